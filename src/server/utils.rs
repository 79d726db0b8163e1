//! HTTP server utility methods

use crate::server::server::HttpServer;
use crate::utils::error::MetricsError;

impl HttpServer {
    /// Format a user-friendly error message for bind failures
    pub(crate) fn format_bind_error(error: std::io::Error, bind_addr: &str) -> MetricsError {
        if error.kind() == std::io::ErrorKind::AddrInUse {
            MetricsError::config(format!(
                "Address {} is already in use; pass a different one with -a or ADDRESS",
                bind_addr
            ))
        } else {
            MetricsError::config(format!("Failed to bind {}: {}", bind_addr, error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bind_error() {
        let err = HttpServer::format_bind_error(
            std::io::Error::from(std::io::ErrorKind::AddrInUse),
            "localhost:8080",
        );
        assert!(err.to_string().contains("already in use"));
    }
}
