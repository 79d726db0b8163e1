//! Tests for error handling

#[cfg(test)]
mod tests {
    use super::super::types::MetricsError;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;

    // ==================== Helper Function Tests ====================

    #[test]
    fn test_invalid_value_helper() {
        let error = MetricsError::invalid_value("abc");
        assert!(matches!(error, MetricsError::InvalidValue(msg) if msg == "abc"));
    }

    #[test]
    fn test_not_found_helper() {
        let error = MetricsError::not_found("gauge/doesNotExist");
        assert!(matches!(error, MetricsError::NotFound(msg) if msg == "gauge/doesNotExist"));
    }

    #[test]
    fn test_error_display() {
        let error = MetricsError::unknown_kind("bogusType");
        assert_eq!(error.to_string(), "Unknown metric kind: bogusType");

        let error = MetricsError::transport("connection refused");
        assert_eq!(error.to_string(), "Transport failure: connection refused");
    }

    // ==================== Status Mapping Tests ====================

    #[test]
    fn test_client_errors_map_to_bad_request() {
        for error in [
            MetricsError::invalid_value("x"),
            MetricsError::unknown_kind("x"),
            MetricsError::kind_mismatch("x"),
            MetricsError::signature_mismatch("x"),
            MetricsError::bad_request("x"),
        ] {
            assert_eq!(error.status_code(), StatusCode::BAD_REQUEST, "{}", error);
            assert!(error.is_client_error());
        }
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let error = MetricsError::not_found("counter/NeverSet");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_backend_errors_map_to_500() {
        let error = MetricsError::backend_unavailable("disk full");
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.is_client_error());

        let error = MetricsError::Database(sea_orm::DbErr::Custom("down".to_string()));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let error = MetricsError::Io(std::io::Error::other("boom"));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_status() {
        let response = MetricsError::not_found("gauge/x").error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ==================== Conversion Tests ====================

    #[test]
    fn test_from_serde_json_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: MetricsError = json_error.into();
        assert!(matches!(error, MetricsError::Serialization(_)));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: MetricsError = io_error.into();
        assert!(matches!(error, MetricsError::Io(_)));
    }
}
