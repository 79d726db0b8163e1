//! Helper functions for creating specific error types

use super::types::MetricsError;

/// Helper functions for creating specific errors
impl MetricsError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_value<S: Into<String>>(message: S) -> Self {
        Self::InvalidValue(message.into())
    }

    pub fn unknown_kind<S: Into<String>>(kind: S) -> Self {
        Self::UnknownKind(kind.into())
    }

    pub fn kind_mismatch<S: Into<String>>(message: S) -> Self {
        Self::KindMismatch(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn signature_mismatch<S: Into<String>>(message: S) -> Self {
        Self::SignatureMismatch(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable(message.into())
    }

    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

impl MetricsError {
    /// Whether the failure was caused by the caller's input rather than the backend
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MetricsError::InvalidValue(_)
                | MetricsError::UnknownKind(_)
                | MetricsError::KindMismatch(_)
                | MetricsError::NotFound(_)
                | MetricsError::SignatureMismatch(_)
                | MetricsError::BadRequest(_)
                | MetricsError::Serialization(_)
        )
    }
}
