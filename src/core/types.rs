//! Domain types shared across the upload pipeline

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The seven spreadsheet kinds the pipeline accepts.
///
/// Each kind maps to one extractor profile and one production table. The
/// wire value is the URL path segment (e.g. `nomina-docentes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadType {
    /// ADOL staffing codes
    Adol,
    /// DOL staffing codes
    Dol,
    /// Teacher roster
    NominaDocentes,
    /// Academic structure catalog
    EstructuraAcademica,
    /// Course-offering report
    ReporteCursables,
    /// Optional-course list
    Optativos,
    /// Entry-level vacancies
    VacantesInicio,
}

impl UploadType {
    /// All supported kinds, in registration order
    pub const ALL: [UploadType; 7] = [
        UploadType::Adol,
        UploadType::Dol,
        UploadType::NominaDocentes,
        UploadType::EstructuraAcademica,
        UploadType::ReporteCursables,
        UploadType::Optativos,
        UploadType::VacantesInicio,
    ];

    /// Resolve a URL path segment into an upload kind
    pub fn from_path(segment: &str) -> Option<Self> {
        match segment {
            "adol" => Some(UploadType::Adol),
            "dol" => Some(UploadType::Dol),
            "nomina-docentes" => Some(UploadType::NominaDocentes),
            "estructura-academica" => Some(UploadType::EstructuraAcademica),
            "reporte-cursables" => Some(UploadType::ReporteCursables),
            "optativos" => Some(UploadType::Optativos),
            "vacantes-inicio" => Some(UploadType::VacantesInicio),
            _ => None,
        }
    }

    /// URL path segment; also the value persisted in `upload_batches.upload_type`
    pub fn as_path(&self) -> &'static str {
        match self {
            UploadType::Adol => "adol",
            UploadType::Dol => "dol",
            UploadType::NominaDocentes => "nomina-docentes",
            UploadType::EstructuraAcademica => "estructura-academica",
            UploadType::ReporteCursables => "reporte-cursables",
            UploadType::Optativos => "optativos",
            UploadType::VacantesInicio => "vacantes-inicio",
        }
    }

    /// Human-facing label used in success messages
    pub fn label(&self) -> &'static str {
        match self {
            UploadType::Adol => "ADOL - Cargos docentes",
            UploadType::Dol => "DOL - Cargos docentes",
            UploadType::NominaDocentes => "Nómina de docentes",
            UploadType::EstructuraAcademica => "Estructura Académica",
            UploadType::ReporteCursables => "Reporte Cursables",
            UploadType::Optativos => "Asignaturas Optativas",
            UploadType::VacantesInicio => "Vacantes Inicio",
        }
    }

    /// Success message for a committed upload of this kind
    pub fn success_message(&self) -> &'static str {
        match self {
            UploadType::Adol => "ADOL - Cargos docentes cargados exitosamente",
            UploadType::Dol => "DOL - Cargos docentes cargados exitosamente",
            UploadType::NominaDocentes => "Nómina de docentes cargada exitosamente",
            UploadType::EstructuraAcademica => "Estructura Académica cargada exitosamente",
            UploadType::ReporteCursables => "Reporte Cursables procesado exitosamente",
            UploadType::Optativos => "Asignaturas Optativas cargadas exitosamente",
            UploadType::VacantesInicio => "Vacantes Inicio cargadas exitosamente",
        }
    }
}

impl std::fmt::Display for UploadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_path())
    }
}

/// How valid records are written to the production table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OperationMode {
    /// Insert-or-update keyed by the natural key + bimestre
    #[default]
    #[serde(rename = "UPSERT")]
    Upsert,
    /// Replace every row for `(type, bimestre)` with the incoming set
    #[serde(rename = "FULL_REPLACE")]
    FullReplace,
}

impl OperationMode {
    /// Parse the form-field spelling; empty input falls back to `UPSERT`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "" | "UPSERT" => Some(OperationMode::Upsert),
            "FULL_REPLACE" | "FULL-REPLACE" => Some(OperationMode::FullReplace),
            _ => None,
        }
    }

    /// Value persisted in `upload_batches.mode`
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationMode::Upsert => "UPSERT",
            OperationMode::FullReplace => "FULL_REPLACE",
        }
    }
}

/// Processing outcome of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// Every row validated
    Exitoso,
    /// Batch created but some rows failed validation
    #[serde(rename = "Con errores")]
    ConErrores,
    /// The commit transaction failed; staging preserved
    Error,
}

impl BatchStatus {
    /// Persisted spelling (matches the original database enum)
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Exitoso => "Exitoso",
            BatchStatus::ConErrores => "Con errores",
            BatchStatus::Error => "Error",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Exitoso" => Some(BatchStatus::Exitoso),
            "Con errores" => Some(BatchStatus::ConErrores),
            "Error" => Some(BatchStatus::Error),
            _ => None,
        }
    }
}

/// Governance state of a batch. Starts `Pendiente`; both other states are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    Pendiente,
    Aprobado,
    Rechazado,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pendiente => "Pendiente",
            ApprovalStatus::Aprobado => "Aprobado",
            ApprovalStatus::Rechazado => "Rechazado",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pendiente" => Some(ApprovalStatus::Pendiente),
            "Aprobado" => Some(ApprovalStatus::Aprobado),
            "Rechazado" => Some(ApprovalStatus::Rechazado),
            _ => None,
        }
    }
}

/// One field-level validation failure attached to a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Canonical field name (`rut`, `sigla`, ...)
    pub field: String,
    /// Human-readable message, Spanish like the rest of the surface
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A row produced by an extractor, before validation.
///
/// `data` preserves column order; `errors` carries parse-stage failures
/// (unreadable cells), which the validator merges with its own findings.
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    /// 1-based source row (the header is row 1, so data starts at 2)
    pub row_number: u32,
    /// Natural key within the file, uppercased; empty when key parts are missing
    pub key: String,
    /// Extracted column values
    pub data: serde_json::Map<String, serde_json::Value>,
    /// Parse-stage field errors
    pub errors: Vec<FieldError>,
}

/// A candidate record after validation, ready for staging
#[derive(Debug, Clone)]
pub struct ValidatedRecord {
    pub row_number: u32,
    pub key: String,
    pub data: serde_json::Map<String, serde_json::Value>,
    pub errors: Vec<FieldError>,
}

impl ValidatedRecord {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Per-request upload options carried from the multipart form
#[derive(Debug, Clone, Copy)]
pub struct UploadOptions {
    pub bimestre_id: i32,
    pub mode: OperationMode,
    pub validate_only: bool,
}

/// Rollup summary returned with every upload outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub total_records: u32,
    pub valid_records: u32,
    pub invalid_records: u32,
    /// First row-level errors, rendered as `Fila N: campo - mensaje`
    pub errors: Vec<String>,
}

/// Result of one upload submission.
///
/// `success` means the batch was created; a batch with invalid rows is still
/// a successful upload (status `Con errores`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub success: bool,
    pub message: String,
    pub batch_id: i32,
    pub status: BatchStatus,
    pub upload_date: DateTime<Utc>,
    pub summary: UploadSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_type_path_round_trip() {
        for t in UploadType::ALL {
            assert_eq!(UploadType::from_path(t.as_path()), Some(t));
        }
        assert_eq!(UploadType::from_path("payment-codes"), None);
    }

    #[test]
    fn test_operation_mode_parse() {
        assert_eq!(OperationMode::parse(""), Some(OperationMode::Upsert));
        assert_eq!(OperationMode::parse("upsert"), Some(OperationMode::Upsert));
        assert_eq!(
            OperationMode::parse("FULL_REPLACE"),
            Some(OperationMode::FullReplace)
        );
        assert_eq!(OperationMode::parse("merge"), None);
    }

    #[test]
    fn test_batch_status_spelling() {
        assert_eq!(BatchStatus::ConErrores.as_str(), "Con errores");
        assert_eq!(
            BatchStatus::parse("Con errores"),
            Some(BatchStatus::ConErrores)
        );
        assert_eq!(
            serde_json::to_string(&BatchStatus::ConErrores).unwrap(),
            "\"Con errores\""
        );
    }

    #[test]
    fn test_approval_status_round_trip() {
        for s in [
            ApprovalStatus::Pendiente,
            ApprovalStatus::Aprobado,
            ApprovalStatus::Rechazado,
        ] {
            assert_eq!(ApprovalStatus::parse(s.as_str()), Some(s));
        }
    }
}
