use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::error::InternalError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::web;
use mls_dto::ErrorBody;
use mls_lifecycle::Failure;
use mls_lifecycle::Manager;

/// `kind` of the error body for requests over the size limit.
pub const PAYLOAD_TOO_LARGE: &str = "payload_too_large";
/// `kind` of the error body for requests that are not JSON.
pub const UNSUPPORTED_MEDIA_TYPE: &str = "unsupported_media_type";

/// A lifecycle failure on its way out as an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Rejection(#[from] pub Failure);

impl ResponseError for Rejection {
    fn status_code(&self) -> StatusCode {
        match self.0 {
            Failure::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Failure::Precondition(_) => StatusCode::BAD_REQUEST,
            Failure::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        HttpResponse::build(status).json(ErrorBody {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            detail: self.0.to_string(),
            kind: self.0.kind().to_string(),
        })
    }
}

/// Count the failure and render it.
pub fn reject(manager: &Manager, failure: impl Into<Failure>) -> HttpResponse {
    let rejection = Rejection(failure.into());
    manager.telemetry().failed();
    match rejection.status_code() {
        StatusCode::INTERNAL_SERVER_ERROR => log::error!("{:<24}{}", "request failed", rejection),
        _ => log::warn!("{:<24}{}", "request rejected", rejection),
    }
    rejection.error_response()
}

/// Transport-level refusal that never reached the manager.
fn refuse(error: JsonPayloadError, status: StatusCode, kind: &str) -> actix_web::Error {
    let body = ErrorBody {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        detail: error.to_string(),
        kind: kind.to_string(),
    };
    InternalError::from_response(error, HttpResponse::build(status).json(body)).into()
}

/// Body extraction settings.
///
/// Bodies over `limit` bytes are refused with 413 and non-JSON content
/// types with 415. Anything else that fails to parse is a validation
/// failure.
pub fn json(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|error: JsonPayloadError, req: &HttpRequest| {
            if let Some(manager) = req.app_data::<web::Data<Manager>>() {
                manager.telemetry().failed();
            }
            match error {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    log::warn!("{:<24}{}", "oversized body", error);
                    refuse(error, StatusCode::PAYLOAD_TOO_LARGE, PAYLOAD_TOO_LARGE)
                }
                JsonPayloadError::ContentType => {
                    log::warn!("{:<24}{}", "not a json body", error);
                    refuse(error, StatusCode::UNSUPPORTED_MEDIA_TYPE, UNSUPPORTED_MEDIA_TYPE)
                }
                error => {
                    log::warn!("{:<24}{}", "malformed body", error);
                    Rejection(Failure::Validation(error.to_string())).into()
                }
            }
        })
}
