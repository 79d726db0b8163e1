use crate::utils::error::{MetricsError, Result};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, PING_TIMEOUT, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Connect to `dsn` and make sure the metric tables exist
    pub async fn connect(dsn: &str) -> Result<Self> {
        let backend_type = DatabaseBackendType::from_dsn(dsn);
        let db = Self::try_connect(dsn, backend_type).await?;
        info!("Database connection established ({:?})", backend_type);

        let database = Self { db, backend_type };
        database.migrate().await?;
        Ok(database)
    }

    /// Open a pooled connection
    async fn try_connect(dsn: &str, backend_type: DatabaseBackendType) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(dsn.to_string());
        opt.connect_timeout(Duration::from_secs(5))
            .acquire_timeout(Duration::from_secs(30))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        if backend_type == DatabaseBackendType::SQLite && dsn.contains(":memory:") {
            // Every pooled connection would open its own private database
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(10)
                .min_connections(1)
                .idle_timeout(Duration::from_secs(600))
                .max_lifetime(Duration::from_secs(3600));
        }

        Database::connect(opt).await.map_err(MetricsError::Database)
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        debug!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            MetricsError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// `SELECT 1`, bounded by one second
    pub async fn health_check(&self) -> Result<()> {
        match tokio::time::timeout(PING_TIMEOUT, self.db.execute_unprepared("SELECT 1")).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(e)) => Err(MetricsError::backend_unavailable(format!(
                "database ping failed: {}",
                e
            ))),
            Err(_) => Err(MetricsError::backend_unavailable(format!(
                "database ping timed out after {:?}",
                PING_TIMEOUT
            ))),
        }
    }

    /// Close the pool
    pub async fn close_pool(&self) -> Result<()> {
        self.db.clone().close().await.map_err(MetricsError::Database)?;
        info!("Database connection closed");
        Ok(())
    }
}
