//! HTTP exchange types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. The executor builds an
//! `HttpRequest`, hands it to a `Transport`, and decodes the `HttpResponse`
//! it gets back. `ureq::Agent` is the production transport; tests swap in
//! canned transports without touching the network.
//!
//! Auth headers are not the executor's concern. They belong to the agent the
//! caller supplies (see [`crate::auth`]).

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use ureq::{Agent, RequestBuilder};
use url::Url;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::socket::Exchange;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data. The body is read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes one HTTP exchange.
///
/// Implementations must return non-2xx responses as data, and must bound
/// the whole exchange by the time left on `ctx`. A cancelled `ctx` should
/// end the exchange promptly with [`Error::Cancelled`].
pub trait Transport: Send + Sync {
    fn execute(&self, request: HttpRequest, ctx: &Context) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: HttpRequest, ctx: &Context) -> Result<HttpResponse> {
        (**self).execute(request, ctx)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: HttpRequest, ctx: &Context) -> Result<HttpResponse> {
        (**self).execute(request, ctx)
    }
}

impl Transport for Agent {
    fn execute(&self, request: HttpRequest, ctx: &Context) -> Result<HttpResponse> {
        let timeout = ctx.remaining()?;
        let _exchange = Exchange::enter(ctx.flag());

        match exchange(self, &request, timeout) {
            Ok(response) => {
                debug!(
                    "{} {} -> {} ({} bytes)",
                    request.method,
                    log_path(&request.url),
                    response.status,
                    response.body.len()
                );
                Ok(response)
            }
            Err(_) if ctx.is_cancelled() => Err(Error::Cancelled),
            Err(err) => Err(err.into()),
        }
    }
}

fn exchange(
    agent: &Agent,
    request: &HttpRequest,
    timeout: Option<Duration>,
) -> std::result::Result<HttpResponse, ureq::Error> {
    let url = request.url.as_str();
    let mut response = match (request.method, request.body.as_deref()) {
        (HttpMethod::Get, None) => configure(agent.get(url), request, timeout).call(),
        (HttpMethod::Delete, None) => configure(agent.delete(url), request, timeout).call(),
        (HttpMethod::Get, Some(body)) => configure(agent.get(url), request, timeout)
            .force_send_body()
            .send(body),
        (HttpMethod::Delete, Some(body)) => configure(agent.delete(url), request, timeout)
            .force_send_body()
            .send(body),
        (HttpMethod::Post, body) => send(configure(agent.post(url), request, timeout), body),
        (HttpMethod::Put, body) => send(configure(agent.put(url), request, timeout), body),
        (HttpMethod::Patch, body) => send(configure(agent.patch(url), request, timeout), body),
    }?;

    let status = response.status().as_u16();
    // The whole body is the result, whatever its size.
    let body = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()?;
    Ok(HttpResponse { status, body })
}

/// `url` as it may appear in logs. The query is withheld: filters carry
/// personal data such as CPF and email.
pub(crate) fn log_path(url: &Url) -> String {
    match url.query() {
        Some(_) => format!("{}?<redacted>", url.path()),
        None => url.path().to_string(),
    }
}

/// Per-request settings: statuses are data, and the context bounds the
/// exchange when it carries a deadline.
fn configure<B>(
    builder: RequestBuilder<B>,
    request: &HttpRequest,
    timeout: Option<Duration>,
) -> RequestBuilder<B> {
    let config = builder.config().http_status_as_error(false);
    let mut builder = match timeout {
        Some(timeout) => config.timeout_global(Some(timeout)).build(),
        None => config.build(),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&[u8]>,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body),
        None => builder.send_empty(),
    }
}
