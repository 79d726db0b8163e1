//! In-process collecting server

use actix_web::dev::ServerHandle;
use actix_web::web;
use metrics_relay::server::{AppState, create_app};
use metrics_relay::storage::MetricStore;
use metrics_relay::utils::crypto::Signer;
use std::net::TcpListener;
use std::sync::Arc;

/// Server listening on `127.0.0.1` with an ephemeral port
///
/// Must be started from an actix runtime (`#[actix_web::test]`).
pub struct TestServer {
    pub address: String,
    pub store: Arc<dyn MetricStore>,
    handle: ServerHandle,
}

impl TestServer {
    pub fn start(store: Arc<dyn MetricStore>, key: Option<&str>) -> Self {
        let state = web::Data::new(AppState::new(
            Arc::clone(&store),
            key.and_then(Signer::from_config),
        ));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap().to_string();

        let server = actix_web::HttpServer::new(move || create_app(state.clone()))
            .workers(1)
            .disable_signals()
            .listen(listener)
            .unwrap()
            .run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            address,
            store,
            handle,
        }
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}
