use httpclient::InMemoryResponseExt;
use serde_json::{json, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    /// Plaid answered with an error payload, kept verbatim so it can be shown to the client.
    #[error("Plaid returned an error: {0}")]
    Api(Value),

    #[error("Plaid request failed: {0}")]
    Transport(String),

    #[error("Couldn't decode Plaid response: {0}")]
    Decode(String),
}

impl ProviderError {
    /// The body to send back to our own client
    pub fn payload(&self) -> Value {
        match self {
            ProviderError::Api(payload) => payload.clone(),
            ProviderError::Transport(_) | ProviderError::Decode(_) => json!({
                "error_code": "OTHER_ERROR",
                "error_message": "Unexpected error while talking to Plaid.",
            }),
        }
    }
}

impl ProviderError {
    /// Classifies the body of a non-2xx response. Plaid reports errors as a JSON object, which
    /// is kept as is. Anything else, e.g. a gateway's HTML page, is a transport failure.
    pub fn from_error_body(body: Option<&str>) -> Self {
        match body.and_then(|body| serde_json::from_str::<Value>(body).ok()) {
            Some(payload @ Value::Object(_)) => ProviderError::Api(payload),
            _ => ProviderError::Transport("Plaid returned a non-JSON error".to_string()),
        }
    }
}

impl From<httpclient::InMemoryError> for ProviderError {
    fn from(err: httpclient::InMemoryError) -> Self {
        match err {
            httpclient::Error::HttpError(response) => {
                ProviderError::from_error_body(response.text().ok().as_deref())
            }
            err => ProviderError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Decode(err.to_string())
    }
}
