//! Error types for the Wappa API client.
//!
//! # Design
//! Errors fall into three groups. Build and serialization errors surface
//! before any network I/O. Transport errors (`Transport`, `Cancelled`,
//! `DeadlineExceeded`) mean no HTTP response exists. `Api` is the only
//! variant carrying protocol context: a response arrived but its body could
//! not be decoded into the requested type.
//!
//! A decoded envelope whose own success flag is false is not an error; the
//! caller inspects the envelope.

use std::fmt;

/// Errors returned by the executor and every resource service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base URL or the resolved endpoint is not a valid URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A header value handed to the transport is not valid HTTP.
    #[error("invalid header value: {0}")]
    Header(String),

    /// The request body could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// DNS, connect, read or timeout failure reported by the transport.
    #[error(transparent)]
    Transport(#[from] ureq::Error),

    /// The call context was cancelled before or during the exchange.
    #[error("request cancelled")]
    Cancelled,

    /// The call context deadline elapsed before the exchange started.
    #[error("context deadline exceeded")]
    DeadlineExceeded,

    /// A response was received but its body did not decode.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl Error {
    /// True when the call failed before an HTTP response existed.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Cancelled | Error::DeadlineExceeded
        )
    }

    /// True for malformed URLs and headers, detected before any I/O.
    pub fn is_build(&self) -> bool {
        matches!(self, Error::Url(_) | Error::Header(_))
    }

    /// The typed API error, if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A response body that failed to decode, with the status it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: u16,
    message: String,
    body: Vec<u8>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>, body: Vec<u8>) -> Self {
        Self {
            status,
            message: message.into(),
            body,
        }
    }

    /// HTTP status code actually returned by the server.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Diagnostic text produced by the decode strategy.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error Status Code: {}; Message: {}.",
            self.status, self.message
        )
    }
}

impl std::error::Error for ApiError {}
