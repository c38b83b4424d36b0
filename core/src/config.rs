//! Client configuration.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
    timeout: Option<Duration>,
}

impl ClientConfig {
    /// Parses `base_url` and makes sure relative endpoints resolve under it.
    ///
    /// A missing trailing `/` is added, so `https://host/v1` and
    /// `https://host/v1/` are equivalent.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)?;
        Self::from_url(url)
    }

    pub fn from_url(mut base_url: Url) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            timeout: None,
        })
    }

    /// Default per-call timeout, used when the call context has no deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn default_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
