//! Upload dispatcher
//!
//! One entry point per upload request: validate the request, parse the file,
//! extract and validate rows, stage batch + rows atomically, then commit the
//! valid subset unless the request was a dry run. The whole submission is a
//! single synchronous outcome; only file parsing and database work await.

use crate::core::extract::{extractor_for, parse_upload};
use crate::core::types::{
    BatchStatus, UploadOptions, UploadOutcome, UploadSummary, UploadType, ValidatedRecord,
};
use crate::core::validate::{RecordValidator, ValidationContext};
use crate::storage::database::entities::{
    estructura_academica, nomina_docente, Bimestre, EstructuraAcademica, NominaDocente,
};
use crate::storage::{CommitEngine, NewBatch, StagingStore};
use crate::utils::error::{AppError, Result};
use chrono::Utc;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::collections::HashSet;
use tracing::{info, warn};
use uuid::Uuid;

/// How many row errors the outcome summary carries before truncating
const SUMMARY_ERROR_LIMIT: usize = 10;

/// Dispatch-time guards
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_rows: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self { max_rows: 50_000 }
    }
}

#[derive(Debug, Clone)]
pub struct UploadPipeline {
    db: DatabaseConnection,
    staging: StagingStore,
    commit: CommitEngine,
    limits: UploadLimits,
}

impl UploadPipeline {
    pub fn new(db: DatabaseConnection) -> Self {
        Self::with_limits(db, UploadLimits::default())
    }

    pub fn with_limits(db: DatabaseConnection, limits: UploadLimits) -> Self {
        Self {
            staging: StagingStore::new(db.clone()),
            commit: CommitEngine::new(db.clone()),
            db,
            limits,
        }
    }

    /// Process one uploaded file end to end.
    ///
    /// Returns `Ok` whenever a batch was created, even with invalid rows
    /// (status `Con errores`). A failed commit marks the batch `Error`,
    /// keeps the staging rows and surfaces a commit error.
    pub async fn submit(
        &self,
        kind: UploadType,
        file_name: &str,
        bytes: &[u8],
        opts: UploadOptions,
        uploaded_by: Option<i32>,
    ) -> Result<UploadOutcome> {
        if bytes.is_empty() {
            return Err(AppError::RequestValidation(
                "No se ha proporcionado ningún archivo".to_string(),
            ));
        }
        if opts.bimestre_id <= 0 {
            return Err(AppError::RequestValidation(
                "El ID del bimestre debe ser un número válido".to_string(),
            ));
        }
        self.ensure_bimestre(opts.bimestre_id).await?;

        let upload_id = Uuid::new_v4();
        info!(
            %upload_id,
            tipo = %kind,
            archivo = file_name,
            bimestre = opts.bimestre_id,
            modo = opts.mode.as_str(),
            dry_run = opts.validate_only,
            "procesando carga"
        );

        let sheet = parse_upload(file_name, bytes)?;
        let candidates = extractor_for(kind).extract(&sheet)?;
        if candidates.len() > self.limits.max_rows {
            return Err(AppError::RequestValidation(format!(
                "El archivo excede el máximo de {} filas",
                self.limits.max_rows
            )));
        }

        let mut ctx = self.load_context(kind, opts.bimestre_id).await?;
        ctx.index_keys(&candidates);

        let validator = RecordValidator::new(kind);
        let records: Vec<ValidatedRecord> = candidates
            .iter()
            .map(|candidate| validator.validate(candidate, &ctx))
            .collect();

        let total = records.len() as u32;
        let valid = records.iter().filter(|r| r.is_valid()).count() as u32;
        let invalid = total - valid;
        let status = if invalid == 0 {
            BatchStatus::Exitoso
        } else {
            BatchStatus::ConErrores
        };

        let batch = self
            .staging
            .save_batch(
                NewBatch {
                    upload_type: kind,
                    file_name: file_name.to_string(),
                    bimestre_id: opts.bimestre_id,
                    uploaded_by,
                    mode: opts.mode,
                    validate_only: opts.validate_only,
                    status,
                },
                &records,
            )
            .await?;

        if !opts.validate_only && valid > 0 {
            let valid_records: Vec<ValidatedRecord> =
                records.iter().filter(|r| r.is_valid()).cloned().collect();
            match self
                .commit
                .commit(kind, opts.bimestre_id, opts.mode, &valid_records)
                .await
            {
                Ok(outcome) => {
                    self.staging.mark_processed(batch.id).await?;
                    info!(
                        %upload_id,
                        batch_id = batch.id,
                        records_written = outcome.records_written,
                        "registros confirmados"
                    );
                }
                Err(e) => {
                    warn!(%upload_id, batch_id = batch.id, error = %e, "fallo al confirmar");
                    self.staging
                        .mark_commit_error(batch.id, &e.to_string())
                        .await?;
                    return Err(AppError::Commit(e.to_string()));
                }
            }
        }

        info!(
            %upload_id,
            batch_id = batch.id,
            total, valid, invalid,
            estado = status.as_str(),
            "carga finalizada"
        );

        let message = if opts.validate_only {
            "Archivo validado exitosamente".to_string()
        } else {
            kind.success_message().to_string()
        };

        Ok(UploadOutcome {
            success: true,
            message,
            batch_id: batch.id,
            status,
            upload_date: batch.upload_date.with_timezone(&Utc),
            summary: UploadSummary {
                total_records: total,
                valid_records: valid,
                invalid_records: invalid,
                errors: summarize_errors(&records),
            },
        })
    }

    async fn ensure_bimestre(&self, bimestre_id: i32) -> Result<()> {
        let bimestre = Bimestre::find_by_id(bimestre_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                AppError::RequestValidation("El bimestre especificado no existe".to_string())
            })?;
        if !bimestre.activo {
            return Err(AppError::RequestValidation(
                "El bimestre especificado no está activo".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the committed reference data the validator consults. Only the
    /// course-offering report carries cross-table references today.
    async fn load_context(
        &self,
        kind: UploadType,
        bimestre_id: i32,
    ) -> Result<ValidationContext> {
        if kind != UploadType::ReporteCursables {
            return Ok(ValidationContext::default());
        }

        let known_ruts: HashSet<String> = NominaDocente::find()
            .filter(nomina_docente::Column::IdBimestre.eq(bimestre_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|d| d.rut_docente.trim().to_uppercase())
            .collect();

        let known_siglas: HashSet<String> = EstructuraAcademica::find()
            .filter(estructura_academica::Column::IdBimestre.eq(bimestre_id))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|e| e.sigla.trim().to_uppercase())
            .collect();

        Ok(ValidationContext::new(known_ruts, known_siglas))
    }
}

fn summarize_errors(records: &[ValidatedRecord]) -> Vec<String> {
    let mut summary = Vec::new();
    for record in records {
        for error in &record.errors {
            if summary.len() >= SUMMARY_ERROR_LIMIT {
                summary.push("...".to_string());
                return summary;
            }
            summary.push(format!(
                "Fila {}: {} - {}",
                record.row_number, error.field, error.message
            ));
        }
    }
    summary
}
