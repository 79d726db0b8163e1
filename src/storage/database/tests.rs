use super::{DatabaseBackendType, DbStorage};
use crate::core::models::{MetricKind, MetricRecord, MetricValue};
use crate::storage::MetricStore;
use crate::utils::error::MetricsError;
use std::sync::Arc;

async fn memory_db() -> DbStorage {
    DbStorage::connect("sqlite::memory:").await.unwrap()
}

// ==================== Upsert Tests ====================

#[tokio::test]
async fn test_counter_upsert_sums() {
    let db = memory_db().await;
    db.save_metric("counter", "PollCount", "1").await.unwrap();
    let total = db.save_metric("counter", "PollCount", "1").await.unwrap();
    assert_eq!(total, MetricValue::Counter(2));
    assert_eq!(db.get_metric("counter", "PollCount").await.unwrap(), "2");
}

#[tokio::test]
async fn test_gauge_upsert_replaces() {
    let db = memory_db().await;
    db.save_metric("gauge", "Temp", "3.5").await.unwrap();
    let latest = db.save_metric("gauge", "Temp", "9.25").await.unwrap();
    assert_eq!(latest, MetricValue::Gauge(9.25));
    assert_eq!(db.get_metric("gauge", "Temp").await.unwrap(), "9.25");
}

#[tokio::test]
async fn test_missing_metric_not_found() {
    let db = memory_db().await;
    let err = db.get(MetricKind::Gauge, "NeverSet").await.unwrap_err();
    assert!(matches!(err, MetricsError::NotFound(_)));
}

#[tokio::test]
async fn test_kind_mismatch_rejected() {
    let db = memory_db().await;
    db.save(MetricRecord::counter("Shared", 4).unwrap()).await.unwrap();
    let err = db
        .save(MetricRecord::gauge("Shared", 1.0).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, MetricsError::KindMismatch(_)));

    let snapshot = db.snapshot().await.unwrap();
    assert!(snapshot.gauge.is_empty());
    assert_eq!(snapshot.counter["Shared"], 4);
}

#[tokio::test]
async fn test_counter_overflow_is_invalid_value() {
    let db = memory_db().await;
    db.save(MetricRecord::counter("Big", i64::MAX).unwrap()).await.unwrap();

    let err = db
        .save(MetricRecord::counter("Big", 1).unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, MetricsError::InvalidValue(_)), "{}", err);
    assert_eq!(
        db.get(MetricKind::Counter, "Big").await.unwrap(),
        MetricValue::Counter(i64::MAX)
    );
}

// ==================== Concurrency Tests ====================

#[test]
fn test_name_lock_only_on_postgres() {
    let lock = DbStorage::name_lock(DatabaseBackendType::PostgreSQL, "X").unwrap();
    assert!(lock.sql.contains("pg_advisory_xact_lock"));
    assert!(DbStorage::name_lock(DatabaseBackendType::SQLite, "X").is_none());
}

#[tokio::test]
async fn test_concurrent_mixed_kinds_never_coexist() {
    let dir = tempfile::tempdir().unwrap();
    let dsn = format!("sqlite://{}?mode=rwc", dir.path().join("kinds.db").display());
    let db = Arc::new(DbStorage::connect(&dsn).await.unwrap());

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            let db = Arc::clone(&db);
            tokio::spawn(async move {
                let record = if i % 2 == 0 {
                    MetricRecord::gauge("X", 1.0).unwrap()
                } else {
                    MetricRecord::counter("X", 1).unwrap()
                };
                // Losers fail with a mismatch or a busy database
                let _ = db.save(record).await;
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let snapshot = db.snapshot().await.unwrap();
    assert!(
        snapshot.gauge.contains_key("X") != snapshot.counter.contains_key("X"),
        "{:?}",
        snapshot
    );
}

#[tokio::test]
async fn test_concurrent_counter_increments() {
    let db = Arc::new(memory_db().await);
    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let db = Arc::clone(&db);
            tokio::spawn(async move {
                db.save(MetricRecord::counter("Hits", 1).unwrap()).await.unwrap();
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }
    assert_eq!(db.get_metric("counter", "Hits").await.unwrap(), "20");
}

// ==================== Snapshot and Liveness Tests ====================

#[tokio::test]
async fn test_snapshot_lists_both_tables() {
    let db = memory_db().await;
    db.save(MetricRecord::gauge("Alloc", 2.0).unwrap()).await.unwrap();
    db.save(MetricRecord::counter("PollCount", 7).unwrap()).await.unwrap();

    let snapshot = db.snapshot().await.unwrap();
    assert_eq!(snapshot.gauge["Alloc"], 2.0);
    assert_eq!(snapshot.counter["PollCount"], 7);
    assert!(db.get_all_metrics().await.unwrap().contains("PollCount:7<br>"));
}

#[tokio::test]
async fn test_ping_healthy() {
    let db = memory_db().await;
    db.ping().await.unwrap();
}

#[tokio::test]
async fn test_ping_after_close_fails() {
    let db = memory_db().await;
    db.close().await.unwrap();
    let err = db.ping().await.unwrap_err();
    assert!(matches!(err, MetricsError::BackendUnavailable(_)));
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let db = memory_db().await;
    db.save(MetricRecord::gauge("Temp", 1.0).unwrap()).await.unwrap();
    db.migrate().await.unwrap();
    assert_eq!(db.get_metric("gauge", "Temp").await.unwrap(), "1");
}
