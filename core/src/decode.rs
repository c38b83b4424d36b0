//! Response decode strategies.
//!
//! The strategy is picked at each call site: [`Json`] for plain data, or a
//! type-specific decoder such as [`OperationDecoder`]. A decoder only sees
//! the body; the executor pairs any failure with the HTTP status.

use log::trace;
use serde::de::DeserializeOwned;

use crate::envelope::{DefaultResponse, OperationResponse};

/// Phrase the API uses in plain-text confirmations ("... com sucesso").
const PLAIN_SUCCESS: &str = "com sucesso";

pub trait Decoder<T> {
    /// Decodes `body`, or returns a diagnostic message.
    fn decode(&self, body: &[u8]) -> Result<T, String>;
}

/// Generic JSON decode into the destination type. Unknown fields are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl<T: DeserializeOwned> Decoder<T> for Json {
    fn decode(&self, body: &[u8]) -> Result<T, String> {
        serde_json::from_slice(body).map_err(|err| {
            format!(
                "Couldn't unmarshal body: '{}'. Message: '{err}'.",
                String::from_utf8_lossy(body)
            )
        })
    }
}

/// JSON decode into [`OperationResponse`], falling back to treating a
/// plain-text confirmation as success.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationDecoder;

impl Decoder<OperationResponse> for OperationDecoder {
    fn decode(&self, body: &[u8]) -> Result<OperationResponse, String> {
        match serde_json::from_slice::<OperationResponse>(body) {
            Ok(res) => Ok(res),
            Err(err) => {
                let text = String::from_utf8_lossy(body);
                if text.contains(PLAIN_SUCCESS) {
                    trace!("operation body is a plain-text confirmation");
                    return Ok(OperationResponse {
                        envelope: DefaultResponse {
                            success: true,
                            response: text.into_owned(),
                            ..DefaultResponse::default()
                        },
                    });
                }
                Err(format!("Error parsing body: '{text}'; message: '{err}'."))
            }
        }
    }
}
