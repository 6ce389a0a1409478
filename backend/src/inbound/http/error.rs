//! HTTP adapter mapping for domain and validation errors.
//!
//! The domain error type stays HTTP-agnostic; this module maps its codes to
//! status codes and renders the JSON envelope. Internal failures are redacted
//! before leaving the process.

use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use super::validation::ValidationErrors;
use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER, TraceId};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Result alias for handlers that also run the body validation gate.
pub type RequestResult<T> = Result<T, RequestError>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error!(message = %error.message(), "internal error redacted");
        let mut redacted = Error::internal("Internal server error");
        if let Some(id) = error.trace_id() {
            redacted = redacted.with_trace_id(id.to_owned());
        }
        redacted
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

/// Failure raised by a handler that validates its body before calling the
/// domain.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Domain(#[from] Error),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(err) => err.status_code(),
            Self::Validation(err) => err.status_code(),
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Domain(err) => err.error_response(),
            Self::Validation(err) => {
                let mut response = err.error_response();
                let header = TraceId::current()
                    .and_then(|id| HeaderValue::from_str(&id.to_string()).ok());
                if let Some(value) = header {
                    response
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                response
            }
        }
    }
}
