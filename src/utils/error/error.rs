//! Error types for the upload pipeline
//!
//! Every failure surfaced to an HTTP caller goes through [`AppError`], whose
//! `ResponseError` impl renders the standard `{success, message, errors}`
//! envelope with the status code the error class maps to.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration errors
    #[error("Error de configuración: {0}")]
    Config(String),

    /// Database errors
    #[error("Error de base de datos: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// IO errors
    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Error de serialización: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request-level validation failures. No batch is created when one of
    /// these fires.
    #[error("{0}")]
    RequestValidation(String),

    /// The upload path segment does not name a known spreadsheet kind
    #[error("Tipo de carga desconocido: {0}")]
    UnknownUploadType(String),

    /// The uploaded file could not be read as a workbook or CSV
    #[error("Error leyendo archivo: {0}")]
    Spreadsheet(String),

    /// Missing batch / bimestre / record
    #[error("{0}")]
    NotFound(String),

    /// Illegal approve/reject transition; the batch is left unchanged
    #[error("{0}")]
    StateTransition(String),

    /// Transactional failure while writing valid records to production
    /// tables. Staging data survives for inspection.
    #[error("Error al confirmar registros: {0}")]
    Commit(String),

    /// Internal server errors
    #[error("Error interno del servidor: {0}")]
    Internal(String),
}

impl AppError {
    fn http_status(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            AppError::RequestValidation(_)
            | AppError::UnknownUploadType(_)
            | AppError::Spreadsheet(_)
            | AppError::Serialization(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::StateTransition(_) => StatusCode::CONFLICT,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Io(_)
            | AppError::Commit(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        self.http_status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.http_status();
        let message = if status.is_server_error() {
            // Do not leak driver-level details to clients
            match self {
                AppError::Commit(_) => self.to_string(),
                _ => "Error interno del servidor".to_string(),
            }
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "message": message,
            "errors": [self.to_string()],
        }))
    }
}
