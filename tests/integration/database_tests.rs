//! SQL storage through the HTTP surface
//!
//! Uses a SQLite file so the data outlives the connection pool.

#[cfg(test)]
mod tests {
    use crate::common::{TestServer, fast_schedule, sample_batch};
    use metrics_relay::agent::DeliveryClient;
    use metrics_relay::storage::build_store;
    use metrics_relay::utils::error::RetryPolicy;
    use metrics_relay::{AgentConfig, ServerConfig};

    fn sqlite_config(dir: &tempfile::TempDir) -> ServerConfig {
        ServerConfig {
            database_dsn: format!(
                "sqlite://{}?mode=rwc",
                dir.path().join("metrics.db").display()
            ),
            ..Default::default()
        }
    }

    /// Upserts accumulate counters and survive reconnecting
    #[actix_web::test]
    async fn test_sql_backend_accumulates_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let config = sqlite_config(&dir);

        let store = build_store(&config).await.unwrap();
        assert_eq!(store.backend(), "database");
        let server = TestServer::start(store.clone(), Some("k"));

        let agent_config = AgentConfig {
            address: server.address.clone(),
            key: "k".to_string(),
            ..Default::default()
        };
        let client = DeliveryClient::new(&agent_config, RetryPolicy::new(fast_schedule())).unwrap();
        client.deliver(&sample_batch()).await.unwrap();
        client.deliver(&sample_batch()).await.unwrap();

        server.stop().await;
        store.close().await.unwrap();

        let reopened = build_store(&config).await.unwrap();
        assert_eq!(reopened.get_metric("counter", "PollCount").await.unwrap(), "6");
        assert_eq!(reopened.get_metric("gauge", "HeapAlloc").await.unwrap(), "2048.5");
        reopened.ping().await.unwrap();
    }
}
