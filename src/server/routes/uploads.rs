//! Upload endpoints
//!
//! Seven-type multipart upload, recent/detail/history listings and the
//! approve/reject governance actions, all under `/uploads`.

use crate::core::types::{OperationMode, UploadOptions, UploadType};
use crate::server::routes::{ApiResponse, PaginatedResponse};
use crate::server::state::AppState;
use crate::storage::database::entities::{staging_record, upload_batch};
use crate::storage::HistoryFilters;
use crate::utils::error::{AppError, Result};
use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure upload routes. Literal segments are registered before the
/// dynamic `{tipo}`/`{id}` ones so `recent`, `history` and `admin/*` never
/// fall through to the parameterized handlers.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/uploads")
            .route("/recent", web::get().to(recent_uploads))
            .route("/history", web::get().to(upload_history))
            .service(
                web::scope("/admin")
                    .route("/stats", web::get().to(super::admin::system_stats))
                    .route("/health", web::get().to(super::admin::system_health)),
            )
            // one resource for both: POST /{tipo} uploads, GET /{id} reads detail
            .service(
                web::resource("/{param}")
                    .route(web::post().to(upload_file))
                    .route(web::get().to(upload_details)),
            )
            .route("/{id}/approve", web::post().to(approve_upload))
            .route("/{id}/reject", web::post().to(reject_upload)),
    );
}

/// Batch representation exposed over the API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDto {
    pub id: i32,
    pub upload_type: String,
    pub file_name: String,
    pub bimestre_id: i32,
    pub uploaded_by: Option<i32>,
    pub upload_date: DateTime<Utc>,
    pub mode: String,
    pub validate_only: bool,
    pub status: String,
    pub total_records: i32,
    pub valid_records: i32,
    pub invalid_records: i32,
    pub is_processed: bool,
    pub processed_at: Option<DateTime<Utc>>,
    pub approval_status: String,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejected_by: Option<i32>,
    pub rejected_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub error_details: Option<String>,
}

impl From<upload_batch::Model> for BatchDto {
    fn from(model: upload_batch::Model) -> Self {
        Self {
            id: model.id,
            upload_type: model.upload_type,
            file_name: model.file_name,
            bimestre_id: model.bimestre_id,
            uploaded_by: model.uploaded_by,
            upload_date: model.upload_date.with_timezone(&Utc),
            mode: model.mode,
            validate_only: model.validate_only,
            status: model.status,
            total_records: model.total_records,
            valid_records: model.valid_records,
            invalid_records: model.invalid_records,
            is_processed: model.is_processed,
            processed_at: model.processed_at.map(|t| t.with_timezone(&Utc)),
            approval_status: model.approval_status,
            approved_by: model.approved_by,
            approved_at: model.approved_at.map(|t| t.with_timezone(&Utc)),
            rejected_by: model.rejected_by,
            rejected_at: model.rejected_at.map(|t| t.with_timezone(&Utc)),
            rejection_reason: model.rejection_reason,
            error_details: model.error_details,
        }
    }
}

/// One staged row in the batch-detail view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagingRowDto {
    pub row_number: i32,
    pub data: serde_json::Value,
    pub errors: serde_json::Value,
}

impl From<staging_record::Model> for StagingRowDto {
    fn from(model: staging_record::Model) -> Self {
        Self {
            row_number: model.row_number,
            data: model.data,
            errors: model.errors,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDetailDto {
    pub batch: BatchDto,
    pub valid_records: Vec<StagingRowDto>,
    pub invalid_records: Vec<StagingRowDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentQuery {
    pub bimestre_id: Option<i32>,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    pub upload_type: Option<String>,
    pub status: Option<String>,
    pub approval_status: Option<String>,
    pub bimestre_id: Option<i32>,
}

impl HistoryQuery {
    fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(AppError::RequestValidation(
                "El número de página debe ser mayor que cero".to_string(),
            ));
        }
        if self.limit == 0 || self.limit > 100 {
            return Err(AppError::RequestValidation(
                "El límite debe estar entre 1 y 100".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveBody {
    pub user_id: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectBody {
    pub user_id: i32,
    pub reason: Option<String>,
}

/// Form fields accepted by the multipart upload body
#[derive(Debug, Default)]
struct UploadForm {
    file_name: Option<String>,
    file_data: Option<Vec<u8>>,
    bimestre_id: Option<String>,
    mode: Option<String>,
    validate_only: bool,
}

async fn read_upload_form(payload: &mut Multipart, max_bytes: usize) -> Result<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| AppError::RequestValidation(format!("Formulario inválido: {}", e)))?;

        let field_name = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };

        match field_name.as_str() {
            "file" => {
                if let Some(cd) = field.content_disposition() {
                    if let Some(name) = cd.get_filename() {
                        form.file_name = Some(name.to_string());
                    }
                }

                let mut data = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        AppError::RequestValidation(format!("Error leyendo el archivo: {}", e))
                    })?;
                    if data.len() + bytes.len() > max_bytes {
                        return Err(AppError::RequestValidation(format!(
                            "El archivo excede el tamaño máximo permitido ({} MB)",
                            max_bytes / (1024 * 1024)
                        )));
                    }
                    data.extend_from_slice(&bytes);
                }
                form.file_data = Some(data);
            }
            "bimestreId" => form.bimestre_id = read_text_field(&mut field).await,
            "mode" => form.mode = read_text_field(&mut field).await,
            "validateOnly" => {
                form.validate_only = read_text_field(&mut field)
                    .await
                    .map(|v| v == "true")
                    .unwrap_or(false);
            }
            _ => {
                // drain unknown fields so the stream can advance
                while field.next().await.is_some() {}
            }
        }
    }

    Ok(form)
}

async fn read_text_field(field: &mut actix_multipart::Field) -> Option<String> {
    let mut data = Vec::new();
    while let Some(Ok(bytes)) = field.next().await {
        data.extend_from_slice(&bytes);
    }
    let text = String::from_utf8_lossy(&data).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// `POST /uploads/{tipo}`, multipart body: `file`, `bimestreId`, `mode`,
/// `validateOnly`
pub async fn upload_file(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: HttpRequest,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let tipo = path.into_inner();
    let kind = UploadType::from_path(&tipo).ok_or(AppError::UnknownUploadType(tipo))?;

    let max_bytes = state.config.uploads.max_file_size_bytes();
    let form = read_upload_form(&mut payload, max_bytes).await?;

    let file_data = form.file_data.filter(|d| !d.is_empty()).ok_or_else(|| {
        AppError::RequestValidation("No se ha proporcionado ningún archivo".to_string())
    })?;
    let file_name = form
        .file_name
        .unwrap_or_else(|| format!("{}.xlsx", kind.as_path()));

    let bimestre_raw = form.bimestre_id.ok_or_else(|| {
        AppError::RequestValidation("El ID del bimestre es requerido".to_string())
    })?;
    let bimestre_id: i32 = bimestre_raw.parse().map_err(|_| {
        AppError::RequestValidation("El ID del bimestre debe ser un número válido".to_string())
    })?;

    let mode = match &form.mode {
        Some(raw) => OperationMode::parse(raw).ok_or_else(|| {
            AppError::RequestValidation(format!("Modo de operación inválido: {}", raw))
        })?,
        None => OperationMode::default(),
    };

    let uploaded_by = req
        .headers()
        .get("X-User-Id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i32>().ok());

    let outcome = state
        .pipeline
        .submit(
            kind,
            &file_name,
            &file_data,
            UploadOptions {
                bimestre_id,
                mode,
                validate_only: form.validate_only,
            },
            uploaded_by,
        )
        .await?;

    let message = outcome.message.clone();
    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome, message)))
}

/// `GET /uploads/recent?bimestreId=`: latest batches, newest first
pub async fn recent_uploads(
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse> {
    debug!(bimestre = ?query.bimestre_id, "listing recent uploads");

    let batches = state.staging.list_recent(query.bimestre_id, 20).await?;
    let items: Vec<BatchDto> = batches.into_iter().map(BatchDto::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        items,
        "Cargas recientes obtenidas exitosamente",
    )))
}

/// `GET /uploads/history`: offset-paginated, conjunctively filtered
pub async fn upload_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let query = query.into_inner();
    query.validate()?;

    let filters = HistoryFilters {
        upload_type: query.upload_type.clone(),
        status: query.status.clone(),
        approval_status: query.approval_status.clone(),
        bimestre_id: query.bimestre_id,
    };

    let (batches, total) = state
        .history
        .list_history(query.page as u64, query.limit as u64, &filters)
        .await?;
    let items: Vec<BatchDto> = batches.into_iter().map(BatchDto::from).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        PaginatedResponse::new(items, query.page, query.limit, total),
        "Historial de cargas obtenido exitosamente",
    )))
}

/// `GET /uploads/{id}`: batch plus its staged rows, partitioned
pub async fn upload_details(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let detail = state.staging.get_batch(path.into_inner()).await?;

    let dto = BatchDetailDto {
        batch: detail.batch.into(),
        valid_records: detail
            .valid_records
            .into_iter()
            .map(StagingRowDto::from)
            .collect(),
        invalid_records: detail
            .invalid_records
            .into_iter()
            .map(StagingRowDto::from)
            .collect(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        dto,
        "Detalles de carga obtenidos exitosamente",
    )))
}

/// `POST /uploads/{id}/approve`
pub async fn approve_upload(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<ApproveBody>,
) -> Result<HttpResponse> {
    let batch = state
        .approval
        .approve(path.into_inner(), body.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BatchDto::from(batch),
        "Carga aprobada exitosamente",
    )))
}

/// `POST /uploads/{id}/reject`
pub async fn reject_upload(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<RejectBody>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let batch = state
        .approval
        .reject(path.into_inner(), body.user_id, body.reason)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        BatchDto::from(batch),
        "Carga rechazada exitosamente",
    )))
}
