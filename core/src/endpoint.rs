//! Resource paths.
//!
//! Every wire path lives under the `api` root segment. The root is applied
//! exactly once however many actions and queries are chained, and each
//! builder call returns a new `Endpoint`.

use std::borrow::Cow;
use std::fmt;

use crate::filter::QueryValues;

/// Root segment every request path is mounted under.
pub const API_ROOT: &str = "api";

/// Action suffixes appended to resource paths.
pub mod action {
    pub const READ: &str = "listar";
    pub const CREATE: &str = "cadastrar";
    pub const UPDATE: &str = "update";
    pub const INACTIVATE: &str = "inativar";
    pub const ACTIVATE: &str = "activate";
    pub const DEACTIVATE: &str = "deactivate";
    pub const NEARBY: &str = "nearby";
    pub const STATUS: &str = "status";
    pub const LAST_RIDES: &str = "last-rides";
    pub const CANCELLATION_REASON: &str = "cancellation-reason";
    pub const EMPLOYEE: &str = "employee";
    pub const CANCEL: &str = "cancel";
    pub const RATE: &str = "rate";
    pub const QR_CODE: &str = "qrcode";
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint(Cow<'static, str>);

impl Endpoint {
    pub const fn new(path: &'static str) -> Self {
        Endpoint(Cow::Borrowed(path))
    }

    /// `<self>/<action>`, rooted.
    pub fn action(&self, action: &str) -> Endpoint {
        Endpoint(Cow::Owned(format!("{}/{action}", self.rooted())))
    }

    /// `<self>?<encoded query>`, rooted. An empty query leaves the path as is.
    pub fn query(&self, values: &QueryValues) -> Endpoint {
        let rooted = self.rooted();
        if values.is_empty() {
            return Endpoint(Cow::Owned(rooted));
        }
        Endpoint(Cow::Owned(format!("{rooted}?{}", values.encode())))
    }

    /// Wire path, relative to the client's base URL.
    pub fn render(&self) -> String {
        self.rooted()
    }

    fn rooted(&self) -> String {
        let path = self.0.trim_start_matches('/');
        let already = path
            .strip_prefix(API_ROOT)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(['/', '?']));
        if already {
            path.to_string()
        } else if path.is_empty() {
            API_ROOT.to_string()
        } else {
            format!("{API_ROOT}/{path}")
        }
    }
}

impl From<String> for Endpoint {
    fn from(path: String) -> Self {
        Endpoint(Cow::Owned(path))
    }
}

impl From<&'static str> for Endpoint {
    fn from(path: &'static str) -> Self {
        Endpoint::new(path)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
