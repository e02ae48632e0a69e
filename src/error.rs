use rocket::{
    catch,
    http::{Status, StatusClass},
    response::{self, status, Responder},
    serde::json::Json,
    Request,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::plaid_api::ProviderError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("No {0} stored yet")]
    NotConnected(&'static str),
}

impl ApiError {
    pub fn payload(&self) -> Value {
        match self {
            ApiError::Provider(err) => err.payload(),
            ApiError::NotConnected(_) => json!({
                "error_code": "NOT_CONNECTED",
                "error_message": self.to_string(),
            }),
        }
    }
}

/// Every failure is answered the same way: status 500 with a JSON error body.
impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        log::error!("{} {} failed: {self}", request.method(), request.uri());
        status::Custom(Status::InternalServerError, Json(self.payload())).respond_to(request)
    }
}

/// Failures that happen before a route handler runs, e.g. a body that isn't valid JSON or an
/// unknown path, are answered in the same JSON shape as [ApiError].
#[catch(default)]
pub fn json_error(status: Status, request: &Request<'_>) -> status::Custom<Json<Value>> {
    log::warn!("{} {} failed: {status}", request.method(), request.uri());
    let error_code = match status.class() {
        StatusClass::ClientError => "INVALID_REQUEST",
        _ => "OTHER_ERROR",
    };
    status::Custom(
        status,
        Json(json!({
            "error_code": error_code,
            "error_message": status.reason_lossy(),
        })),
    )
}
