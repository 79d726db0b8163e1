//! File snapshot persistence across a restart

#[cfg(test)]
mod tests {
    use crate::common::{TestServer, fast_schedule, sample_batch};
    use metrics_relay::agent::DeliveryClient;
    use metrics_relay::storage::{PersistenceManager, build_store};
    use metrics_relay::utils::error::RetryPolicy;
    use metrics_relay::{AgentConfig, ServerConfig};

    fn file_config(dir: &tempfile::TempDir, store_interval: u64) -> ServerConfig {
        ServerConfig {
            file_storage_path: dir
                .path()
                .join("metrics-db.json")
                .to_string_lossy()
                .into_owned(),
            store_interval,
            ..Default::default()
        }
    }

    /// Shutdown flushes, and the next process restores the same metrics
    #[actix_web::test]
    async fn test_restart_restores_metrics() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(&dir, 300);

        let store = build_store(&config).await.unwrap();
        let persistence = PersistenceManager::start(store.clone(), config.store_interval());
        let server = TestServer::start(store.clone(), None);

        let agent_config = AgentConfig {
            address: server.address.clone(),
            ..Default::default()
        };
        let client = DeliveryClient::new(&agent_config, RetryPolicy::new(fast_schedule())).unwrap();
        client.deliver(&sample_batch()).await.unwrap();

        server.stop().await;
        let before = store.snapshot().await.unwrap();
        persistence.shutdown().await.unwrap();

        let restored = build_store(&config).await.unwrap();
        assert_eq!(restored.snapshot().await.unwrap(), before);
        assert_eq!(restored.get_metric("counter", "PollCount").await.unwrap(), "3");
    }

    /// With a zero interval every accepted write is already on disk
    #[actix_web::test]
    async fn test_synchronous_mode_needs_no_shutdown() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(&dir, 0);

        let store = build_store(&config).await.unwrap();
        let server = TestServer::start(store, None);
        let agent_config = AgentConfig {
            address: server.address.clone(),
            compress: false,
            ..Default::default()
        };
        let client = DeliveryClient::new(&agent_config, RetryPolicy::new(fast_schedule())).unwrap();
        client.deliver(&sample_batch()).await.unwrap();
        server.stop().await;

        let restored = build_store(&config).await.unwrap();
        assert_eq!(restored.get_metric("gauge", "HeapAlloc").await.unwrap(), "2048.5");
    }

    /// Restore disabled starts empty even with a snapshot on disk
    #[actix_web::test]
    async fn test_restore_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = file_config(&dir, 0);

        let store = build_store(&config).await.unwrap();
        store.save_metric("gauge", "Temp", "1.5").await.unwrap();

        config.restore = false;
        let fresh = build_store(&config).await.unwrap();
        assert!(fresh.snapshot().await.unwrap().is_empty());
    }
}
