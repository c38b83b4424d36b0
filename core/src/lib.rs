//! Synchronous client for the Wappa ride-dispatch API.
//!
//! # Overview
//! Each resource service (`client.rides()`, `client.collaborators()`, ...)
//! builds an [`Endpoint`], optionally translating a caller [`Filter`] into
//! query parameters, and hands it to the shared [`Executor`], which performs
//! one blocking HTTP exchange and decodes the body with the strategy the
//! service chose.
//!
//! # Design
//! - The executor is stateless between calls: base URL, default timeout and
//!   transport are fixed at construction.
//! - Requests and responses cross the [`Transport`] seam as plain data, so
//!   the executor can be exercised without a network.
//! - A response that decodes is returned as is, whatever its status. Callers
//!   read the envelope's success flag for business failures.
//! - There are no retries, caches or background threads.
//!
//! ```no_run
//! use wappa::{Client, ClientConfig, Context, Filter};
//!
//! # fn main() -> wappa::Result<()> {
//! let agent = wappa::auth::bearer_agent("token")?;
//! let client = Client::with_agent(ClientConfig::new("https://api.wappa.com.br/")?, agent);
//! let ctx = Context::with_timeout(std::time::Duration::from_secs(10));
//! let found = client
//!     .employees()
//!     .read(&ctx, Some(&Filter::new().with("email", "ana@example.com")))?;
//! println!("{} employees", found.employees.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod decode;
pub mod endpoint;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod http;
pub mod resources;
pub mod socket;
pub mod types;

pub use client::{Client, Executor, NO_BODY};
pub use config::ClientConfig;
pub use context::{CancelHandle, Context};
pub use decode::{Decoder, Json, OperationDecoder};
pub use endpoint::Endpoint;
pub use envelope::{BasicResponse, DefaultResponse, OperationResponse, ResponseError};
pub use error::{ApiError, Error, Result};
pub use filter::{query_values, FieldMap, Filter, QueryValues};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use socket::cancellable_agent;
pub use types::{DurationMin, DurationSec, HmsDuration, Time};
