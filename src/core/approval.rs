//! Approval state machine
//!
//! `Pendiente` → `Aprobado` | `Rechazado`, both terminal. The transition is
//! one conditional UPDATE guarded on the current state, so of two concurrent
//! callers exactly one wins and the loser gets a state-transition error
//! instead of silently succeeding.
//!
//! Approval is a governance overlay, not a data gate: committed rows are
//! already live when a reviewer decides, and rejecting records the decision
//! without reversing the commit.

use crate::core::types::ApprovalStatus;
use crate::storage::database::entities::{upload_batch, UploadBatch};
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::info;

#[derive(Debug, Clone)]
pub struct ApprovalService {
    db: DatabaseConnection,
}

impl ApprovalService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Approve a pending batch, recording the approver and timestamp
    pub async fn approve(&self, batch_id: i32, user_id: i32) -> Result<upload_batch::Model> {
        let now: sea_orm::entity::prelude::DateTimeWithTimeZone = Utc::now().into();

        let result = UploadBatch::update_many()
            .col_expr(
                upload_batch::Column::ApprovalStatus,
                Expr::value(ApprovalStatus::Aprobado.as_str()),
            )
            .col_expr(upload_batch::Column::ApprovedBy, Expr::value(user_id))
            .col_expr(upload_batch::Column::ApprovedAt, Expr::value(now))
            .filter(upload_batch::Column::Id.eq(batch_id))
            .filter(
                upload_batch::Column::ApprovalStatus.eq(ApprovalStatus::Pendiente.as_str()),
            )
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(self.transition_failure(batch_id).await?);
        }

        info!(batch_id, user_id, "batch approved");
        self.fetch(batch_id).await
    }

    /// Reject a pending batch with an optional free-text reason
    pub async fn reject(
        &self,
        batch_id: i32,
        user_id: i32,
        reason: Option<String>,
    ) -> Result<upload_batch::Model> {
        let now: sea_orm::entity::prelude::DateTimeWithTimeZone = Utc::now().into();

        let result = UploadBatch::update_many()
            .col_expr(
                upload_batch::Column::ApprovalStatus,
                Expr::value(ApprovalStatus::Rechazado.as_str()),
            )
            .col_expr(upload_batch::Column::RejectedBy, Expr::value(user_id))
            .col_expr(upload_batch::Column::RejectedAt, Expr::value(now))
            .col_expr(
                upload_batch::Column::RejectionReason,
                Expr::value(reason.clone()),
            )
            .filter(upload_batch::Column::Id.eq(batch_id))
            .filter(
                upload_batch::Column::ApprovalStatus.eq(ApprovalStatus::Pendiente.as_str()),
            )
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(self.transition_failure(batch_id).await?);
        }

        info!(batch_id, user_id, "batch rejected");
        self.fetch(batch_id).await
    }

    /// Zero rows updated means the batch is missing or no longer pending;
    /// look again to tell the two apart.
    async fn transition_failure(&self, batch_id: i32) -> Result<AppError> {
        match UploadBatch::find_by_id(batch_id).one(&self.db).await? {
            None => Ok(AppError::NotFound(format!(
                "Carga {} no encontrada",
                batch_id
            ))),
            Some(batch) => Ok(AppError::StateTransition(format!(
                "La carga {} no está pendiente de aprobación (estado actual: {})",
                batch_id, batch.approval_status
            ))),
        }
    }

    async fn fetch(&self, batch_id: i32) -> Result<upload_batch::Model> {
        UploadBatch::find_by_id(batch_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Carga {} no encontrada", batch_id)))
    }
}
