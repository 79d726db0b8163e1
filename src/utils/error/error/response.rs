//! HTTP response handling for errors

use super::types::MetricsError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::{debug, error};

impl ResponseError for MetricsError {
    fn status_code(&self) -> StatusCode {
        match self {
            MetricsError::InvalidValue(_)
            | MetricsError::UnknownKind(_)
            | MetricsError::KindMismatch(_)
            | MetricsError::SignatureMismatch(_)
            | MetricsError::BadRequest(_)
            | MetricsError::Serialization(_) => StatusCode::BAD_REQUEST,
            MetricsError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        if self.is_client_error() {
            debug!("Rejected request: {}", self);
        } else {
            error!("Request failed: {}", self);
        }

        let (error_code, message) = match self {
            MetricsError::InvalidValue(_) => ("INVALID_VALUE", self.to_string()),
            MetricsError::UnknownKind(_) => ("UNKNOWN_KIND", self.to_string()),
            MetricsError::KindMismatch(_) => ("KIND_MISMATCH", self.to_string()),
            MetricsError::SignatureMismatch(_) => {
                ("SIGNATURE_MISMATCH", "Signature mismatch".to_string())
            }
            MetricsError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            MetricsError::Serialization(_) => ("PARSING_ERROR", self.to_string()),
            MetricsError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            MetricsError::Database(_) => (
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            MetricsError::BackendUnavailable(_) | MetricsError::Io(_) => (
                "BACKEND_UNAVAILABLE",
                "Storage backend unavailable".to_string(),
            ),
            _ => ("INTERNAL_ERROR", "An internal error occurred".to_string()),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
