//! Error types for the metrics pipeline

use thiserror::Error;

/// Result type alias for the metrics pipeline
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Main error type for the metrics pipeline
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Raw value could not be parsed as the kind's numeric type
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Metric kind is neither gauge nor counter
    #[error("Unknown metric kind: {0}")]
    UnknownKind(String),

    /// Id already registered under the other kind
    #[error("Kind mismatch: {0}")]
    KindMismatch(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Integrity check failed
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// File or database backend could not serve the request
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Agent-side send failure or non-2xx response
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
