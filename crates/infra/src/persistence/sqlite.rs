//! SQLite-backed drug inventory store.
//!
//! Every operation opens its own connection and releases it before returning
//! (dropped on error paths, closed explicitly on success). There is no pool and
//! no long-lived handle. The async `sqlx` driver runs on a private current-thread
//! runtime, so the public API is synchronous.

use std::path::{Path, PathBuf};

use chrono::{NaiveDateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tokio::runtime::Runtime;
use tracing::{debug, info, warn};

use drugmon_core::{BatchNo, DrugId, LogId, SupplierId, TransactionId};
use drugmon_inventory::{
    ConditionReading, MonitoringLogEntry, NewDrug, NewSupplier, NewTransaction, QualityStatus,
    SupplyChainEntry, TransactionType,
};

use super::schema::ALL_TABLES;
use super::{ReadingLog, StoreError};
use crate::config::{StoreConfig, UnknownBatchPolicy};

/// Handle to the inventory database file.
///
/// Holds configuration only; connections are scoped to single operations.
#[derive(Debug)]
pub struct SqliteStore {
    db_path: PathBuf,
    options: SqliteConnectOptions,
    unknown_batch: UnknownBatchPolicy,
    runtime: Runtime,
}

impl SqliteStore {
    /// Open the store at `config.db_path` (creating the file if missing) and ensure the schema.
    pub fn open(config: &StoreConfig) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;

        let options = SqliteConnectOptions::new()
            .filename(&config.db_path)
            .create_if_missing(true)
            .foreign_keys(true);

        let store = Self {
            db_path: config.db_path.clone(),
            options,
            unknown_batch: config.unknown_batch,
            runtime,
        };
        store.ensure_schema()?;

        info!(db_path = %store.db_path.display(), policy = ?store.unknown_batch, "opened drug inventory store");
        Ok(store)
    }

    /// Release the store. Nothing is held open between operations, so this only ends the runtime.
    pub fn close(self) {
        info!(db_path = %self.db_path.display(), "closed drug inventory store");
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn unknown_batch_policy(&self) -> UnknownBatchPolicy {
        self.unknown_batch
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        Ok(SqliteConnection::connect_with(&self.options).await?)
    }

    /// Create all four tables if absent. Existing tables are left untouched.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            for (table, ddl) in ALL_TABLES {
                sqlx::query(ddl).execute(&mut conn).await?;
                debug!(table, "ensured table");
            }
            conn.close().await?;
            Ok::<(), StoreError>(())
        })
    }

    pub fn insert_supplier(&self, supplier: &NewSupplier) -> Result<SupplierId, StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(
                r#"
                INSERT INTO suppliers (name, contact_name, phone, email, address)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&supplier.name)
            .bind(&supplier.contact_name)
            .bind(&supplier.phone)
            .bind(&supplier.email)
            .bind(&supplier.address)
            .execute(&mut conn)
            .await?;
            conn.close().await?;

            let id = SupplierId::from_raw(result.last_insert_rowid());
            debug!(supplier_id = %id, email = %supplier.email, "inserted supplier");
            Ok::<_, StoreError>(id)
        })
    }

    pub fn insert_drug(&self, drug: &NewDrug) -> Result<DrugId, StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(
                r#"
                INSERT INTO drugs (name, batch_number, supplier_id, quantity, expiry_date, location, status)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&drug.name)
            .bind(drug.batch_no.as_str())
            .bind(drug.supplier_id.map(i64::from))
            .bind(drug.quantity)
            .bind(drug.expiry_date)
            .bind(&drug.location)
            .bind(drug.status.as_str())
            .execute(&mut conn)
            .await?;
            conn.close().await?;

            let id = DrugId::from_raw(result.last_insert_rowid());
            debug!(drug_id = %id, batch_no = %drug.batch_no, "inserted drug");
            Ok::<_, StoreError>(id)
        })
    }

    pub fn find_drug_id(&self, batch_no: &BatchNo) -> Result<Option<DrugId>, StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let id = lookup_drug_id(&mut conn, batch_no).await?;
            conn.close().await?;
            Ok::<_, StoreError>(id)
        })
    }

    /// Record a Received/Distributed movement. `occurred_at` defaults to now.
    pub fn record_transaction(&self, tx: &NewTransaction) -> Result<TransactionId, StoreError> {
        let occurred_at = tx.occurred_at.unwrap_or_else(Utc::now).naive_utc();

        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let result = sqlx::query(
                r#"
                INSERT INTO supply_chain (drug_id, supplier_id, transaction_type, quantity, transaction_date, destination)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(tx.drug_id.get())
            .bind(tx.supplier_id.get())
            .bind(tx.transaction_type.as_str())
            .bind(tx.quantity)
            .bind(occurred_at)
            .bind(tx.destination.as_deref())
            .execute(&mut conn)
            .await?;
            conn.close().await?;

            let id = TransactionId::from_raw(result.last_insert_rowid());
            debug!(transaction_id = %id, kind = %tx.transaction_type, quantity = tx.quantity, "recorded supply-chain transaction");
            Ok::<_, StoreError>(id)
        })
    }

    /// Supply-chain activity joined to drug names, most recent first.
    ///
    /// Empty when no transactions exist.
    pub fn fetch_supply_chain(&self) -> Result<Vec<SupplyChainEntry>, StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let rows = sqlx::query(
                r#"
                SELECT d.name AS drug_name, s.transaction_date, s.quantity, s.transaction_type
                FROM supply_chain s
                JOIN drugs d ON s.drug_id = d.drug_id
                ORDER BY s.transaction_date DESC, s.transaction_id DESC
                "#,
            )
            .fetch_all(&mut conn)
            .await?;
            conn.close().await?;

            let entries = rows
                .iter()
                .map(supply_chain_entry_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, StoreError>(entries)
        })
    }

    /// Monitoring observations of one batch, newest first.
    pub fn monitoring_history(&self, batch_no: &BatchNo) -> Result<Vec<MonitoringLogEntry>, StoreError> {
        self.runtime.block_on(async {
            let mut conn = self.connect().await?;
            let rows = sqlx::query(
                r#"
                SELECT m.log_id, m.drug_id, m.temperature, m.humidity, m.quality_status, m.timestamp
                FROM monitoring_logs m
                JOIN drugs d ON m.drug_id = d.drug_id
                WHERE d.batch_number = ?1
                ORDER BY m.timestamp DESC, m.log_id DESC
                "#,
            )
            .bind(batch_no.as_str())
            .fetch_all(&mut conn)
            .await?;
            conn.close().await?;

            let entries = rows
                .iter()
                .map(monitoring_entry_from_row)
                .collect::<Result<Vec<_>, _>>()?;
            Ok::<_, StoreError>(entries)
        })
    }
}

impl ReadingLog for SqliteStore {
    fn log_reading(
        &mut self,
        batch_no: &BatchNo,
        reading: ConditionReading,
        status: QualityStatus,
    ) -> Result<LogId, StoreError> {
        let recorded_at = Utc::now().naive_utc();

        self.runtime.block_on(async {
            let mut conn = self.connect().await?;

            let drug_id = match lookup_drug_id(&mut conn, batch_no).await? {
                Some(id) => Some(id),
                None => match self.unknown_batch {
                    UnknownBatchPolicy::Reject => {
                        return Err(StoreError::UnknownBatch(batch_no.clone()));
                    }
                    UnknownBatchPolicy::Lenient => {
                        warn!(batch_no = %batch_no, "no drug row for batch; logging reading without drug reference");
                        None
                    }
                },
            };

            let result = sqlx::query(
                r#"
                INSERT INTO monitoring_logs (drug_id, temperature, humidity, quality_status, timestamp)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(drug_id.map(i64::from))
            .bind(reading.temperature)
            .bind(reading.humidity)
            .bind(status.as_str())
            .bind(recorded_at)
            .execute(&mut conn)
            .await?;
            conn.close().await?;

            let log_id = LogId::from_raw(result.last_insert_rowid());
            debug!(
                %log_id,
                batch_no = %batch_no,
                temperature = reading.temperature,
                humidity = reading.humidity,
                status = %status,
                "logged monitoring reading"
            );
            Ok::<_, StoreError>(log_id)
        })
    }
}

async fn lookup_drug_id(
    conn: &mut SqliteConnection,
    batch_no: &BatchNo,
) -> Result<Option<DrugId>, StoreError> {
    let id: Option<i64> = sqlx::query_scalar::<_, i64>("SELECT drug_id FROM drugs WHERE batch_number = ?1")
        .bind(batch_no.as_str())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id.map(DrugId::from_raw))
}

fn supply_chain_entry_from_row(row: &SqliteRow) -> Result<SupplyChainEntry, StoreError> {
    let transaction_type: String = row.try_get("transaction_type")?;
    let transaction_type: TransactionType = transaction_type
        .parse()
        .map_err(|e: drugmon_core::DomainError| StoreError::Decode(e.to_string()))?;
    let transaction_date: NaiveDateTime = row.try_get("transaction_date")?;

    Ok(SupplyChainEntry {
        drug_name: row.try_get("drug_name")?,
        transaction_date: transaction_date.and_utc(),
        quantity: row.try_get("quantity")?,
        transaction_type,
    })
}

fn monitoring_entry_from_row(row: &SqliteRow) -> Result<MonitoringLogEntry, StoreError> {
    let status: String = row.try_get("quality_status")?;
    let quality_status: QualityStatus = status
        .parse()
        .map_err(|e: drugmon_core::DomainError| StoreError::Decode(e.to_string()))?;
    let drug_id: Option<i64> = row.try_get("drug_id")?;
    let recorded_at: NaiveDateTime = row.try_get("timestamp")?;

    Ok(MonitoringLogEntry {
        log_id: LogId::from_raw(row.try_get("log_id")?),
        drug_id: drug_id.map(DrugId::from_raw),
        reading: ConditionReading::new(row.try_get("temperature")?, row.try_get("humidity")?),
        quality_status,
        recorded_at: recorded_at.and_utc(),
    })
}
