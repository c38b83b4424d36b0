//! Bearer-token transport.
//!
//! Obtaining and refreshing tokens is the caller's business. This module only
//! builds an agent that stamps an already issued token on every request, so
//! the executor itself never sets auth headers.

use ureq::http::header::AUTHORIZATION;
use ureq::http::{HeaderValue, Request, Response};
use ureq::middleware::{Middleware, MiddlewareNext};
use ureq::{Agent, Body, SendBody};

use crate::error::{Error, Result};
use crate::socket::cancellable_agent;

struct BearerToken(HeaderValue);

impl Middleware for BearerToken {
    fn handle(
        &self,
        mut request: Request<SendBody>,
        next: MiddlewareNext,
    ) -> std::result::Result<Response<Body>, ureq::Error> {
        request.headers_mut().insert(AUTHORIZATION, self.0.clone());
        next.handle(request)
    }
}

/// An agent that sends `Authorization: Bearer <token>` with every request.
pub fn bearer_agent(token: &str) -> Result<Agent> {
    let mut value = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|err| Error::Header(err.to_string()))?;
    value.set_sensitive(true);

    let config = Agent::config_builder()
        .http_status_as_error(false)
        .middleware(BearerToken(value))
        .build();
    Ok(cancellable_agent(config))
}
