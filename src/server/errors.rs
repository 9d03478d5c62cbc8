use derive_more::{Display, Error};
use log::error;
use ntex::{http, web};

/// Error taxonomy of the HTTP surface, rendered as `{"detail": ...}` JSON.
///
/// Validation failures carry the offending field; everything server-side is
/// deliberately opaque so no stack trace or driver error ever reaches a
/// caller.
#[derive(Debug, Display, Error)]
pub enum ApiError {
    #[display("invalid signature")]
    InvalidSignature,
    #[display("{_0}")]
    Validation(#[error(not(source))] String),
    #[display("storage unavailable")]
    StorageUnavailable,
    #[display("internal server error")]
    Internal,
    #[display("server not ready")]
    NotReady,
}

impl web::error::WebResponseError for ApiError {
    fn error_response(&self, _: &web::HttpRequest) -> web::HttpResponse {
        if matches!(self, ApiError::StorageUnavailable | ApiError::Internal) {
            error!("{:#?}", self);
        }

        web::HttpResponse::build(self.status_code())
            .json(&serde_json::json!({"detail": self.to_string()}))
    }

    fn status_code(&self) -> http::StatusCode {
        match *self {
            ApiError::InvalidSignature => http::StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => http::StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::StorageUnavailable => http::StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => http::StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotReady => http::StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}
