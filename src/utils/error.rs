use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation Error: {0}")]
    ValidationError(String),

    #[error("Bad Request: {0}")]
    BadRequestError(String),

    #[error("Not Found: {0}")]
    NotFoundError(String),

    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Index Format Error: {0}")]
    IndexFormatError(#[from] serde_json::Error),

    #[error("Upstream Error: {0}")]
    UpstreamError(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match *self {
            AppError::ValidationError(..) => "VALIDATION_ERROR",
            AppError::BadRequestError(..) => "BAD_REQUEST_ERROR",
            AppError::NotFoundError(..) => "NOT_FOUND_ERROR",
            AppError::IoError(..) => "IO_ERROR",
            AppError::IndexFormatError(..) => "INDEX_FORMAT_ERROR",
            AppError::UpstreamError(..) => "UPSTREAM_ERROR",
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AppError::ValidationError(..) => StatusCode::BAD_REQUEST,
            AppError::BadRequestError(..) => StatusCode::BAD_REQUEST,
            AppError::NotFoundError(..) => StatusCode::NOT_FOUND,
            AppError::IoError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::IndexFormatError(..) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::UpstreamError(..) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let error_message = json!({
            "success": false,
            "message": self.to_string(),
            "httpStatusCode": self.status_code().as_u16(),
            "error": self.error_code(),
            "service": super::config::service_name(),
        });

        HttpResponse::build(self.status_code()).json(error_message)
    }
}
