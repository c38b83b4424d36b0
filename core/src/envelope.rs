//! Response envelopes.
//!
//! The older Portuguese-named resources answer with [`DefaultResponse`]; the
//! newer English-named ones with [`BasicResponse`]. Resource results embed
//! one of them with `#[serde(flatten)]`. Either way the envelope's success
//! flag, not the HTTP status line, reports business failure.

use serde::{Deserialize, Serialize};

use crate::types::loose_text;

/// Error block of [`DefaultResponse`].
///
/// Declared numeric upstream but sent as text in practice, so both fields
/// accept any scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseError {
    #[serde(rename = "Code", default, deserialize_with = "loose_text")]
    pub code: String,
    #[serde(rename = "Message", default, deserialize_with = "loose_text")]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultResponse {
    #[serde(rename = "Success", default)]
    pub success: bool,
    #[serde(rename = "Quantidade", default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(rename = "Error", default)]
    pub error: ResponseError,
    /// Filled by the API when an error occurs.
    #[serde(rename = "Message", default, deserialize_with = "loose_text")]
    pub message: String,
    #[serde(rename = "MessageDetail", default, deserialize_with = "loose_text")]
    pub message_detail: String,
    /// Outcome text of create, update and (in)activate operations.
    #[serde(rename = "Response", default, skip_serializing_if = "String::is_empty")]
    pub response: String,
}

/// A [`DefaultResponse`] produced by [`crate::decode::OperationDecoder`],
/// which also accepts the plain-text confirmations some operations return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResponse {
    #[serde(flatten)]
    pub envelope: DefaultResponse,
}

impl OperationResponse {
    pub fn success(&self) -> bool {
        self.envelope.success
    }
}

/// Minimal envelope: success flag plus error code and message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicResponse {
    #[serde(default, alias = "Success")]
    pub success: bool,
    #[serde(default, alias = "Message", deserialize_with = "loose_text")]
    pub message: String,
    #[serde(default, alias = "ErrorCode", deserialize_with = "loose_text")]
    pub error_code: String,
}
