use crate::core::models::{MetricKind, MetricRecord, MetricValue};
use crate::storage::{MetricStore, StoreSnapshot};
use crate::utils::error::{MetricsError, Result};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::*;
use tracing::{debug, warn};

use super::super::entities::{counter_metric, gauge_metric};
use super::types::{DatabaseBackendType, SeaOrmDatabase};

impl SeaOrmDatabase {
    /// Transaction-scoped lock on a metric name
    ///
    /// Writers of the same name queue behind each other, so the kind check
    /// and the upsert see every committed write of that name.
    pub(crate) fn name_lock(backend: DatabaseBackendType, name: &str) -> Option<Statement> {
        match backend {
            DatabaseBackendType::PostgreSQL => Some(Statement::from_sql_and_values(
                DbBackend::Postgres,
                "SELECT pg_advisory_xact_lock(hashtext($1))",
                [name.into()],
            )),
            // SQLite admits a single writer; a conflicting transaction fails with SQLITE_BUSY
            DatabaseBackendType::SQLite => None,
        }
    }

    async fn find_gauge<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<f64>> {
        let model = gauge_metric::Entity::find()
            .filter(gauge_metric::Column::Name.eq(name))
            .one(db)
            .await?;
        Ok(model.map(|m| m.value))
    }

    async fn find_counter<C: ConnectionTrait>(db: &C, name: &str) -> Result<Option<i64>> {
        let model = counter_metric::Entity::find()
            .filter(counter_metric::Column::Name.eq(name))
            .one(db)
            .await?;
        Ok(model.map(|m| m.value))
    }

    async fn upsert_gauge<C: ConnectionTrait>(db: &C, name: &str, value: f64) -> Result<()> {
        let model = gauge_metric::ActiveModel {
            name: Set(name.to_string()),
            value: Set(value),
            ..Default::default()
        };
        gauge_metric::Entity::insert(model)
            .on_conflict(
                OnConflict::column(gauge_metric::Column::Name)
                    .update_column(gauge_metric::Column::Value)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }

    async fn save_in(&self, txn: &DatabaseTransaction, record: &MetricRecord) -> Result<MetricValue> {
        let id = record.id.as_str();
        if let Some(lock) = Self::name_lock(self.backend_type, id) {
            txn.execute(lock).await?;
        }

        let taken_by_other = match record.kind() {
            MetricKind::Gauge => Self::find_counter(txn, id).await?.is_some(),
            MetricKind::Counter => Self::find_gauge(txn, id).await?.is_some(),
        };
        if taken_by_other {
            return Err(MetricsError::kind_mismatch(format!(
                "'{}' is already stored as {}",
                id,
                record.kind().other()
            )));
        }

        let stored = match record.value {
            MetricValue::Gauge(v) => {
                Self::upsert_gauge(txn, id, v).await?;
                Self::find_gauge(txn, id).await?.map(MetricValue::Gauge)
            }
            MetricValue::Counter(delta) => {
                // Overflow must surface as a bad value, not as a column error
                let current = Self::find_counter(txn, id).await?.map(MetricValue::Counter);
                MetricValue::merge_into(current, record.value)?;
                Self::upsert_counter(txn, id, delta).await?;
                Self::find_counter(txn, id).await?.map(MetricValue::Counter)
            }
        };
        stored.ok_or_else(|| MetricsError::internal(format!("'{}' vanished after upsert", id)))
    }

    async fn upsert_counter<C: ConnectionTrait>(db: &C, name: &str, delta: i64) -> Result<()> {
        let model = counter_metric::ActiveModel {
            name: Set(name.to_string()),
            value: Set(delta),
            ..Default::default()
        };
        counter_metric::Entity::insert(model)
            .on_conflict(
                OnConflict::column(counter_metric::Column::Name)
                    .value(
                        counter_metric::Column::Value,
                        Expr::col((counter_metric::Entity, counter_metric::Column::Value))
                            .add(delta),
                    )
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl MetricStore for SeaOrmDatabase {
    fn backend(&self) -> &'static str {
        "database"
    }

    async fn save(&self, record: MetricRecord) -> Result<MetricValue> {
        let txn = self.db.begin().await?;
        match self.save_in(&txn, &record).await {
            Ok(value) => {
                txn.commit().await?;
                debug!("Upserted {} '{}'", record.kind(), record.id);
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!("Rollback of '{}' failed: {}", record.id, rollback);
                }
                Err(e)
            }
        }
    }

    async fn get(&self, kind: MetricKind, id: &str) -> Result<MetricValue> {
        let value = match kind {
            MetricKind::Gauge => Self::find_gauge(&self.db, id).await?.map(MetricValue::Gauge),
            MetricKind::Counter => Self::find_counter(&self.db, id)
                .await?
                .map(MetricValue::Counter),
        };
        value.ok_or_else(|| MetricsError::not_found(format!("{} '{}'", kind, id)))
    }

    async fn snapshot(&self) -> Result<StoreSnapshot> {
        let gauges = gauge_metric::Entity::find().all(&self.db).await?;
        let counters = counter_metric::Entity::find().all(&self.db).await?;
        Ok(StoreSnapshot {
            gauge: gauges.into_iter().map(|m| (m.name, m.value)).collect(),
            counter: counters.into_iter().map(|m| (m.name, m.value)).collect(),
        })
    }

    async fn ping(&self) -> Result<()> {
        self.health_check().await
    }

    async fn close(&self) -> Result<()> {
        self.close_pool().await
    }
}
