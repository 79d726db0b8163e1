//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::ServerConfig;
use crate::server::routes;
use crate::server::state::AppState;
use crate::storage::{MetricStore, PersistenceManager, build_store};
use crate::utils::crypto::Signer;
use crate::utils::error::{MetricsError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::Compress, web};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

/// Collecting server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Open the configured backend
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        info!("Creating HTTP server");
        let store = build_store(config).await?;
        Ok(Self::with_store(config, store))
    }

    /// Server over an already opened store
    pub fn with_store(config: &ServerConfig, store: Arc<dyn MetricStore>) -> Self {
        let signer = config.key().and_then(Signer::from_config);
        if signer.is_some() {
            info!("Request signatures are verified");
        }

        Self {
            config: config.clone(),
            state: AppState::new(store, signer),
        }
    }

    /// Bind, start the flush task, serve, then flush the store once stopped
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address.clone();
        info!("Starting HTTP server on {}", bind_addr);

        let store = Arc::clone(&self.state.store);
        let state = web::Data::new(self.state);
        let server = match ActixHttpServer::new(move || create_app(state.clone())).bind(&bind_addr)
        {
            Ok(server) => server.run(),
            Err(e) => {
                if let Err(close) = store.close().await {
                    warn!("Closing the store after a failed bind: {}", close);
                }
                return Err(Self::format_bind_error(e, &bind_addr));
            }
        };

        let persistence = PersistenceManager::start(Arc::clone(&store), self.config.store_interval());
        info!("HTTP server listening on {}", bind_addr);

        // actix stops on SIGINT / SIGTERM after draining connections
        let served = server
            .await
            .map_err(|e| MetricsError::internal(format!("Server error: {}", e)));

        info!("HTTP server stopped");
        persistence.shutdown().await?;
        served
    }
}

/// Create the Actix-web application
pub fn create_app(
    state: web::Data<AppState>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .wrap(Compress::default())
        .wrap(TracingLogger::default())
        .configure(routes::health::configure_routes)
        .configure(routes::metrics::configure_routes)
}

/// Build and run the server from a resolved configuration
pub async fn run_server(config: ServerConfig) -> Result<()> {
    HttpServer::new(&config).await?.start().await
}
