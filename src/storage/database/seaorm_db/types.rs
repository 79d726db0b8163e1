use sea_orm::DatabaseConnection;
use std::time::Duration;

/// Upper bound on a liveness probe
pub(super) const PING_TIMEOUT: Duration = Duration::from_secs(1);

/// SeaORM-backed metric store
#[derive(Debug)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

impl DatabaseBackendType {
    /// Infer the backend from a DSN
    pub fn from_dsn(dsn: &str) -> Self {
        if dsn.starts_with("sqlite") {
            DatabaseBackendType::SQLite
        } else {
            DatabaseBackendType::PostgreSQL
        }
    }
}
