//! Staging store
//!
//! Persists an upload batch together with every validated row, valid or not,
//! in one transaction. Staged rows are immutable: re-uploads create a new
//! batch, and the valid/invalid partition returned on read is exactly the one
//! recorded at creation time.

use crate::core::types::{BatchStatus, OperationMode, UploadType, ValidatedRecord};
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};
use tracing::debug;

use super::entities::{staging_record, upload_batch, StagingRecord, UploadBatch};

/// Parameters for a batch about to be persisted
#[derive(Debug, Clone)]
pub struct NewBatch {
    pub upload_type: UploadType,
    pub file_name: String,
    pub bimestre_id: i32,
    pub uploaded_by: Option<i32>,
    pub mode: OperationMode,
    pub validate_only: bool,
    pub status: BatchStatus,
}

/// Full batch detail with records partitioned as recorded at creation
#[derive(Debug, Clone)]
pub struct BatchDetail {
    pub batch: upload_batch::Model,
    pub valid_records: Vec<staging_record::Model>,
    pub invalid_records: Vec<staging_record::Model>,
}

#[derive(Debug, Clone)]
pub struct StagingStore {
    db: DatabaseConnection,
}

impl StagingStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the batch and all its staging rows atomically
    pub async fn save_batch(
        &self,
        new_batch: NewBatch,
        records: &[ValidatedRecord],
    ) -> Result<upload_batch::Model> {
        let valid = records.iter().filter(|r| r.is_valid()).count() as i32;
        let total = records.len() as i32;

        let txn = self.db.begin().await?;

        let batch = upload_batch::ActiveModel {
            id: NotSet,
            upload_type: Set(new_batch.upload_type.as_path().to_string()),
            file_name: Set(new_batch.file_name.clone()),
            bimestre_id: Set(new_batch.bimestre_id),
            uploaded_by: Set(new_batch.uploaded_by),
            upload_date: Set(Utc::now().into()),
            mode: Set(new_batch.mode.as_str().to_string()),
            validate_only: Set(new_batch.validate_only),
            status: Set(new_batch.status.as_str().to_string()),
            total_records: Set(total),
            valid_records: Set(valid),
            invalid_records: Set(total - valid),
            is_processed: Set(false),
            processed_at: Set(None),
            approval_status: Set("Pendiente".to_string()),
            approved_by: Set(None),
            approved_at: Set(None),
            rejected_by: Set(None),
            rejected_at: Set(None),
            rejection_reason: Set(None),
            error_details: Set(None),
        };
        let batch = batch.insert(&txn).await?;

        if !records.is_empty() {
            let rows: Result<Vec<staging_record::ActiveModel>> = records
                .iter()
                .map(|record| {
                    Ok(staging_record::ActiveModel {
                        id: NotSet,
                        batch_id: Set(batch.id),
                        row_number: Set(record.row_number as i32),
                        data: Set(serde_json::Value::Object(record.data.clone())),
                        errors: Set(serde_json::to_value(&record.errors)?),
                        is_valid: Set(record.is_valid()),
                    })
                })
                .collect();
            StagingRecord::insert_many(rows?).exec(&txn).await?;
        }

        txn.commit().await?;
        debug!(batch_id = batch.id, total, valid, "batch staged");
        Ok(batch)
    }

    pub async fn find_batch(&self, id: i32) -> Result<Option<upload_batch::Model>> {
        Ok(UploadBatch::find_by_id(id).one(&self.db).await?)
    }

    /// Batch plus its rows, partitioned into the buckets recorded at creation
    pub async fn get_batch(&self, id: i32) -> Result<BatchDetail> {
        let batch = self
            .find_batch(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Carga {} no encontrada", id)))?;

        let records = StagingRecord::find()
            .filter(staging_record::Column::BatchId.eq(id))
            .order_by_asc(staging_record::Column::RowNumber)
            .all(&self.db)
            .await?;

        let (valid_records, invalid_records) =
            records.into_iter().partition(|r: &staging_record::Model| r.is_valid);

        Ok(BatchDetail {
            batch,
            valid_records,
            invalid_records,
        })
    }

    /// Latest batches, newest first, optionally scoped to one bimestre
    pub async fn list_recent(
        &self,
        bimestre_id: Option<i32>,
        limit: u64,
    ) -> Result<Vec<upload_batch::Model>> {
        let mut query = UploadBatch::find()
            .order_by_desc(upload_batch::Column::UploadDate)
            .order_by_desc(upload_batch::Column::Id)
            .limit(limit);
        if let Some(bimestre_id) = bimestre_id {
            query = query.filter(upload_batch::Column::BimestreId.eq(bimestre_id));
        }
        Ok(query.all(&self.db).await?)
    }

    /// Record that the batch's valid rows reached the production table
    pub async fn mark_processed(&self, batch_id: i32) -> Result<upload_batch::Model> {
        let batch = self
            .find_batch(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Carga {} no encontrada", batch_id)))?;

        let mut active: upload_batch::ActiveModel = batch.into();
        active.is_processed = Set(true);
        active.processed_at = Set(Some(Utc::now().into()));
        Ok(active.update(&self.db).await?)
    }

    /// Record a failed commit; staging rows stay untouched for inspection
    pub async fn mark_commit_error(&self, batch_id: i32, details: &str) -> Result<()> {
        let batch = self
            .find_batch(batch_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Carga {} no encontrada", batch_id)))?;

        let mut active: upload_batch::ActiveModel = batch.into();
        active.status = Set(BatchStatus::Error.as_str().to_string());
        active.error_details = Set(Some(details.to_string()));
        active.update(&self.db).await?;
        Ok(())
    }
}
