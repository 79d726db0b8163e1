//! Agent delivery against a live server

#[cfg(test)]
mod tests {
    use crate::common::{CountingSampler, TestServer, fast_schedule, sample_batch};
    use metrics_relay::agent::{Agent, DeliveryClient};
    use metrics_relay::storage::MemStorage;
    use metrics_relay::utils::error::{BackoffSchedule, MetricsError, RetryPolicy};
    use metrics_relay::{AgentConfig, MetricKind, MetricStore, MetricValue};
    use std::sync::Arc;
    use std::time::Duration;

    fn agent_config(server: &TestServer, key: &str) -> AgentConfig {
        AgentConfig {
            address: server.address.clone(),
            key: key.to_string(),
            ..Default::default()
        }
    }

    /// A signed, compressed batch lands in the server's store
    #[actix_web::test]
    async fn test_signed_batch_is_applied() {
        let server = TestServer::start(Arc::new(MemStorage::new()), Some("shared"));
        let client = DeliveryClient::new(
            &agent_config(&server, "shared"),
            RetryPolicy::new(fast_schedule()),
        )
        .unwrap();

        client.deliver(&sample_batch()).await.unwrap();
        client.deliver(&sample_batch()).await.unwrap();

        assert_eq!(
            server.store.get_metric("counter", "PollCount").await.unwrap(),
            "6"
        );
        assert_eq!(
            server.store.get_metric("gauge", "HeapAlloc").await.unwrap(),
            "2048.5"
        );
        server.stop().await;
    }

    /// A batch signed with the wrong key changes nothing
    #[actix_web::test]
    async fn test_wrong_key_is_rejected() {
        let server = TestServer::start(Arc::new(MemStorage::new()), Some("shared"));
        let client = DeliveryClient::new(
            &agent_config(&server, "forged"),
            RetryPolicy::new(BackoffSchedule::none()),
        )
        .unwrap();

        let err = client.deliver(&sample_batch()).await.unwrap_err();
        assert!(matches!(err, MetricsError::Transport(_)));
        assert!(server.store.snapshot().await.unwrap().is_empty());
        server.stop().await;
    }

    /// An unreachable server exhausts the retries and surfaces a transport error
    #[actix_web::test]
    async fn test_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let config = AgentConfig {
            address,
            ..Default::default()
        };
        let client = DeliveryClient::new(&config, RetryPolicy::new(fast_schedule())).unwrap();
        let err = client.deliver(&sample_batch()).await.unwrap_err();
        assert!(matches!(err, MetricsError::Transport(_)));
    }

    /// Every poll is counted exactly once across the server and the agent
    #[actix_web::test]
    async fn test_agent_poll_count_is_conserved() {
        let server = TestServer::start(Arc::new(MemStorage::new()), Some("shared"));
        let sampler = CountingSampler::default();

        let config = AgentConfig {
            poll_interval: 1,
            report_interval: 1,
            rate_limit: 3,
            ..agent_config(&server, "shared")
        };
        let agent = Agent::with_parts(config, Box::new(sampler.clone()), fast_schedule()).unwrap();
        let local = agent.store();
        let shutdown = agent.shutdown_token();
        let running = tokio::spawn(agent.run());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        shutdown.cancel();
        running.await.unwrap().unwrap();

        let delivered = match server.store.get(MetricKind::Counter, "PollCount").await {
            Ok(MetricValue::Counter(total)) => total,
            other => panic!("unexpected PollCount: {:?}", other),
        };
        let pending = match local.lookup(MetricKind::Counter, "PollCount") {
            Some(MetricValue::Counter(total)) => total,
            _ => 0,
        };

        assert!(delivered >= 1);
        assert_eq!(delivered + pending, sampler.calls() as i64);
        assert_eq!(
            server.store.get_metric("gauge", "HeapAlloc").await.unwrap(),
            "4096"
        );
        server.stop().await;
    }
}
