//! Request executor and the client that owns it.
//!
//! # Design
//! `Executor` holds the base URL, the default timeout and the transport, none
//! of which change after construction. Each call is split the way the rest
//! of the crate reads: `build_request` produces an `HttpRequest`, the
//! transport performs the exchange, `parse_response` decodes the
//! `HttpResponse` with the strategy the call site chose. `request` chains
//! the three.
//!
//! `Client` owns one executor and lends it to short-lived resource services
//! (`client.rides()`, `client.webhooks()`, ...). Nothing is retried, cached
//! or recovered here.

use log::debug;
use serde::Serialize;
use ureq::Agent;
use url::Url;

use crate::config::ClientConfig;
use crate::context::Context;
use crate::decode::Decoder;
use crate::endpoint::{action, Endpoint};
use crate::error::{ApiError, Error, Result};
use crate::http::{log_path, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::resources::{
    CollaboratorService, CostCenterService, DriverService, EmployeeService, QuoteService,
    RideService, RoleService, UnitService, WebhookService,
};
use crate::socket::cancellable_agent;

/// Placeholder body for calls that send none.
pub const NO_BODY: Option<&()> = None;

const STATUS_ENDPOINT: Endpoint = Endpoint::new(action::STATUS);

/// Performs one HTTP exchange per call.
pub struct Executor {
    config: ClientConfig,
    transport: Box<dyn Transport>,
}

impl Executor {
    pub fn new(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Box::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Absolute URL of `endpoint` under the base URL.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url> {
        Ok(self.config.base_url().join(&endpoint.render())?)
    }

    pub fn build_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<HttpRequest> {
        let url = self.url(endpoint)?;
        let (headers, body) = match body {
            None => (Vec::new(), None),
            Some(body) => {
                let bytes = serde_json::to_vec(body).map_err(Error::Serialization)?;
                (
                    vec![("content-type".to_string(), "application/json".to_string())],
                    Some(bytes),
                )
            }
        };
        Ok(HttpRequest {
            method,
            url,
            headers,
            body,
        })
    }

    /// Decodes `response` with `decoder`. The status line is not consulted:
    /// a decodable body is a result, whatever the status.
    pub fn parse_response<T, D: Decoder<T>>(&self, response: HttpResponse, decoder: D) -> Result<T> {
        match decoder.decode(&response.body) {
            Ok(output) => Ok(output),
            Err(message) => Err(ApiError::new(response.status, message, response.body).into()),
        }
    }

    pub fn request<B, T, D>(
        &self,
        ctx: &Context,
        method: HttpMethod,
        endpoint: &Endpoint,
        body: Option<&B>,
        decoder: D,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        D: Decoder<T>,
    {
        let request = self.build_request(method, endpoint, body)?;
        debug!("{} {}", request.method, log_path(&request.url));
        let ctx = ctx.or_timeout(self.config.default_timeout());
        let response = self.transport.execute(request, &ctx)?;
        self.parse_response(response, decoder)
    }

    /// GET without a body.
    pub fn get<T, D: Decoder<T>>(&self, ctx: &Context, endpoint: &Endpoint, decoder: D) -> Result<T> {
        self.request(ctx, HttpMethod::Get, endpoint, NO_BODY, decoder)
    }

    /// POST with an optional JSON body.
    pub fn post<B, T, D>(&self, ctx: &Context, endpoint: &Endpoint, body: Option<&B>, decoder: D) -> Result<T>
    where
        B: Serialize + ?Sized,
        D: Decoder<T>,
    {
        self.request(ctx, HttpMethod::Post, endpoint, body, decoder)
    }

    /// True only when `GET api/status` answers 200. Failures are logged and
    /// reported as `false`.
    pub fn status(&self, ctx: &Context) -> bool {
        let outcome = self
            .build_request(HttpMethod::Get, &STATUS_ENDPOINT, NO_BODY)
            .and_then(|request| {
                let ctx = ctx.or_timeout(self.config.default_timeout());
                self.transport.execute(request, &ctx)
            });
        match outcome {
            Ok(response) => response.status == 200,
            Err(err) => {
                debug!("status probe failed: {err}");
                false
            }
        }
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("base_url", &self.config.base_url().as_str())
            .field("timeout", &self.config.default_timeout())
            .finish_non_exhaustive()
    }
}

/// Client for the Wappa API.
#[derive(Debug)]
pub struct Client {
    executor: Executor,
}

impl Client {
    /// Client over a default `ureq` agent whose in-flight calls stop when
    /// their context is cancelled.
    pub fn new(config: ClientConfig) -> Self {
        let agent = cancellable_agent(Agent::config_builder().http_status_as_error(false).build());
        Self::with_agent(config, agent)
    }

    /// Client over a caller-built agent, e.g. one from [`crate::auth::bearer_agent`].
    /// Agents not built with [`cancellable_agent`] only see cancellation
    /// before dispatch.
    pub fn with_agent(config: ClientConfig, agent: Agent) -> Self {
        Self::with_transport(config, agent)
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            executor: Executor::new(config, transport),
        }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// See [`Executor::status`].
    pub fn status(&self, ctx: &Context) -> bool {
        self.executor.status(ctx)
    }

    pub fn collaborators(&self) -> CollaboratorService<'_> {
        CollaboratorService::new(&self.executor)
    }

    pub fn cost_centers(&self) -> CostCenterService<'_> {
        CostCenterService::new(&self.executor)
    }

    pub fn roles(&self) -> RoleService<'_> {
        RoleService::new(&self.executor)
    }

    pub fn units(&self) -> UnitService<'_> {
        UnitService::new(&self.executor)
    }

    pub fn drivers(&self) -> DriverService<'_> {
        DriverService::new(&self.executor)
    }

    pub fn employees(&self) -> EmployeeService<'_> {
        EmployeeService::new(&self.executor)
    }

    pub fn rides(&self) -> RideService<'_> {
        RideService::new(&self.executor)
    }

    pub fn quotes(&self) -> QuoteService<'_> {
        QuoteService::new(&self.executor)
    }

    pub fn webhooks(&self) -> WebhookService<'_> {
        WebhookService::new(&self.executor)
    }
}
