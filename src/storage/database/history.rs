//! History and stats service
//!
//! Paginated, filterable query surface over all batches, plus the aggregate
//! counters behind the admin dashboard. Counters are recomputed from the
//! tables on every call; nothing here is incrementally maintained, so a
//! failed commit can never leave the numbers drifting.

use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use super::entities::{
    upload_batch, AdolPosition, DolPosition, EstructuraAcademica, NominaDocente, Optativo,
    ReporteCursable, StagingRecord, UploadBatch, VacanteInicio,
};

/// Conjunctive history filters; omitted fields match everything
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryFilters {
    pub upload_type: Option<String>,
    pub status: Option<String>,
    pub approval_status: Option<String>,
    pub bimestre_id: Option<i32>,
}

/// Batch counts by processing status
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub exitoso: u64,
    pub con_errores: u64,
    pub error: u64,
}

/// Row counts per production table
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionCounts {
    pub adol_positions: u64,
    pub dol_positions: u64,
    pub nomina_docentes: u64,
    pub estructuras_academicas: u64,
    pub reportes_cursables: u64,
    pub optativos: u64,
    pub vacantes_inicio: u64,
}

/// Aggregate counters for the operational dashboard
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStats {
    pub total_batches: u64,
    pub batches_by_status: StatusCounts,
    pub pending_approvals: u64,
    pub staging_records: u64,
    pub production: ProductionCounts,
}

/// Liveness summary for the admin health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemHealth {
    pub status: String,
    pub database: bool,
    pub pending_approvals: u64,
    pub last_upload_at: Option<DateTime<Utc>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct HistoryService {
    db: DatabaseConnection,
}

impl HistoryService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Offset-paginated batch history, newest first.
    ///
    /// `page` is 1-indexed; the returned total always reflects the filtered
    /// count, independent of `page_size`.
    pub async fn list_history(
        &self,
        page: u64,
        page_size: u64,
        filters: &HistoryFilters,
    ) -> Result<(Vec<upload_batch::Model>, u64)> {
        let mut query = UploadBatch::find()
            .order_by_desc(upload_batch::Column::UploadDate)
            .order_by_desc(upload_batch::Column::Id);

        if let Some(upload_type) = &filters.upload_type {
            query = query.filter(upload_batch::Column::UploadType.eq(upload_type.clone()));
        }
        if let Some(status) = &filters.status {
            query = query.filter(upload_batch::Column::Status.eq(status.clone()));
        }
        if let Some(approval_status) = &filters.approval_status {
            query = query.filter(upload_batch::Column::ApprovalStatus.eq(approval_status.clone()));
        }
        if let Some(bimestre_id) = filters.bimestre_id {
            query = query.filter(upload_batch::Column::BimestreId.eq(bimestre_id));
        }

        let paginator = query.paginate(&self.db, page_size.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.max(1) - 1).await?;
        Ok((items, total))
    }

    /// Recompute the dashboard counters from the tables
    pub async fn stats(&self) -> Result<SystemStats> {
        let total_batches = UploadBatch::find().count(&self.db).await?;
        let batches_by_status = StatusCounts {
            exitoso: self.count_by_status("Exitoso").await?,
            con_errores: self.count_by_status("Con errores").await?,
            error: self.count_by_status("Error").await?,
        };
        let pending_approvals = UploadBatch::find()
            .filter(upload_batch::Column::ApprovalStatus.eq("Pendiente"))
            .count(&self.db)
            .await?;

        Ok(SystemStats {
            total_batches,
            batches_by_status,
            pending_approvals,
            staging_records: StagingRecord::find().count(&self.db).await?,
            production: ProductionCounts {
                adol_positions: AdolPosition::find().count(&self.db).await?,
                dol_positions: DolPosition::find().count(&self.db).await?,
                nomina_docentes: NominaDocente::find().count(&self.db).await?,
                estructuras_academicas: EstructuraAcademica::find().count(&self.db).await?,
                reportes_cursables: ReporteCursable::find().count(&self.db).await?,
                optativos: Optativo::find().count(&self.db).await?,
                vacantes_inicio: VacanteInicio::find().count(&self.db).await?,
            },
        })
    }

    /// Liveness summary: database reachability plus batch-level indicators
    pub async fn health(&self) -> Result<SystemHealth> {
        let database = self.db.ping().await.is_ok();

        let (pending_approvals, last_upload_at) = if database {
            let pending = UploadBatch::find()
                .filter(upload_batch::Column::ApprovalStatus.eq("Pendiente"))
                .count(&self.db)
                .await?;
            let last = UploadBatch::find()
                .order_by_desc(upload_batch::Column::UploadDate)
                .one(&self.db)
                .await?
                .map(|b| b.upload_date.with_timezone(&Utc));
            (pending, last)
        } else {
            (0, None)
        };

        Ok(SystemHealth {
            status: if database { "healthy" } else { "degraded" }.to_string(),
            database,
            pending_approvals,
            last_upload_at,
            timestamp: Utc::now(),
        })
    }

    async fn count_by_status(&self, status: &str) -> Result<u64> {
        Ok(UploadBatch::find()
            .filter(upload_batch::Column::Status.eq(status))
            .count(&self.db)
            .await?)
    }
}
