//! SQL storage backend using SeaORM
//!
//! Gauges and counters live in two tables keyed by a unique name. A write is
//! one transaction: kind check, overflow check, then an upsert so concurrent
//! counter increments are summed by the database itself. On PostgreSQL the
//! transaction first takes an advisory lock on the metric name.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

#[cfg(test)]
mod tests;

pub use seaorm_db::{DatabaseBackendType, SeaOrmDatabase as DbStorage};
