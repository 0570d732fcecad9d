//! Spreadsheet extraction
//!
//! An [`Extractor`] turns a parsed [`Sheet`] into typed candidate records
//! plus per-row parse errors. All seven upload kinds share one
//! profile-driven implementation; the profiles in [`profiles`] are the
//! pluggable part.

pub mod profiles;
mod sheet;

pub use profiles::{profile_for, ColumnKind, ColumnSpec, TypeProfile};
pub use sheet::{parse_upload, CellValue, Sheet};

use crate::core::types::{CandidateRecord, FieldError, UploadType};
use crate::utils::error::{AppError, Result};

/// Turns raw tabular input into candidate records.
///
/// Row-level problems are data (`CandidateRecord::errors`), never errors of
/// this call; `extract` only fails on structural problems such as missing
/// required columns.
pub trait Extractor: Send + Sync {
    fn upload_type(&self) -> UploadType;
    fn extract(&self, sheet: &Sheet) -> Result<Vec<CandidateRecord>>;
}

/// Profile-driven extractor shared by every upload kind
pub struct TabularExtractor {
    kind: UploadType,
    profile: &'static TypeProfile,
}

static ADOL: TabularExtractor = TabularExtractor {
    kind: UploadType::Adol,
    profile: &profiles::ADOL,
};
static DOL: TabularExtractor = TabularExtractor {
    kind: UploadType::Dol,
    profile: &profiles::DOL,
};
static NOMINA_DOCENTES: TabularExtractor = TabularExtractor {
    kind: UploadType::NominaDocentes,
    profile: &profiles::NOMINA_DOCENTES,
};
static ESTRUCTURA_ACADEMICA: TabularExtractor = TabularExtractor {
    kind: UploadType::EstructuraAcademica,
    profile: &profiles::ESTRUCTURA_ACADEMICA,
};
static REPORTE_CURSABLES: TabularExtractor = TabularExtractor {
    kind: UploadType::ReporteCursables,
    profile: &profiles::REPORTE_CURSABLES,
};
static OPTATIVOS: TabularExtractor = TabularExtractor {
    kind: UploadType::Optativos,
    profile: &profiles::OPTATIVOS,
};
static VACANTES_INICIO: TabularExtractor = TabularExtractor {
    kind: UploadType::VacantesInicio,
    profile: &profiles::VACANTES_INICIO,
};

/// Extractor lookup by upload kind
pub fn extractor_for(kind: UploadType) -> &'static dyn Extractor {
    match kind {
        UploadType::Adol => &ADOL,
        UploadType::Dol => &DOL,
        UploadType::NominaDocentes => &NOMINA_DOCENTES,
        UploadType::EstructuraAcademica => &ESTRUCTURA_ACADEMICA,
        UploadType::ReporteCursables => &REPORTE_CURSABLES,
        UploadType::Optativos => &OPTATIVOS,
        UploadType::VacantesInicio => &VACANTES_INICIO,
    }
}

impl Extractor for TabularExtractor {
    fn upload_type(&self) -> UploadType {
        self.kind
    }

    fn extract(&self, sheet: &Sheet) -> Result<Vec<CandidateRecord>> {
        let resolved = resolve_columns(sheet, self.profile)?;

        let mut records = Vec::with_capacity(sheet.rows.len());
        for (i, row) in sheet.rows.iter().enumerate() {
            if row.iter().all(CellValue::is_empty) {
                continue;
            }
            // header occupies source row 1
            let row_number = (i + 2) as u32;

            let mut data = serde_json::Map::new();
            let mut errors = Vec::new();

            for (spec, idx) in self.profile.columns.iter().zip(resolved.iter()) {
                let cell = idx.and_then(|i| row.get(i));
                let value = match spec.kind {
                    ColumnKind::Text => cell
                        .and_then(CellValue::as_text)
                        .map(serde_json::Value::String)
                        .unwrap_or(serde_json::Value::Null),
                    ColumnKind::Integer => match cell {
                        None | Some(CellValue::Empty) => serde_json::Value::Null,
                        Some(cell) => match cell.as_integer() {
                            Some(n) => serde_json::Value::Number(n.into()),
                            None => {
                                errors.push(FieldError::new(
                                    spec.field,
                                    "Debe ser un número entero",
                                ));
                                serde_json::Value::Null
                            }
                        },
                    },
                };
                data.insert(spec.field.to_string(), value);
            }

            let key = natural_key(&data, self.profile.key_fields);
            records.push(CandidateRecord {
                row_number,
                key,
                data,
                errors,
            });
        }

        Ok(records)
    }
}

/// Build the uppercase natural key for a row; empty when any part is missing
pub fn natural_key(
    data: &serde_json::Map<String, serde_json::Value>,
    key_fields: &[&str],
) -> String {
    let mut parts = Vec::with_capacity(key_fields.len());
    for field in key_fields {
        match data.get(*field).and_then(|v| match v {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }) {
            Some(part) if !part.trim().is_empty() => {
                parts.push(part.trim().to_uppercase());
            }
            _ => return String::new(),
        }
    }
    parts.join("|")
}

/// Map each profile column to a sheet column index.
///
/// Headers are matched case-insensitively with accents folded and spaces
/// collapsed to underscores; an exact synonym match wins over a prefix
/// match, and a sheet column is only claimed once.
fn resolve_columns(sheet: &Sheet, profile: &TypeProfile) -> Result<Vec<Option<usize>>> {
    let normalized: Vec<String> = sheet.headers.iter().map(|h| normalize_header(h)).collect();

    let mut claimed = vec![false; normalized.len()];
    let mut resolved = Vec::with_capacity(profile.columns.len());
    let mut missing = Vec::new();

    for spec in profile.columns {
        let exact = normalized.iter().enumerate().find(|(i, h)| {
            !claimed[*i] && spec.synonyms.iter().any(|s| h.as_str() == *s)
        });
        let found = exact.or_else(|| {
            normalized.iter().enumerate().find(|(i, h)| {
                !claimed[*i]
                    && !h.is_empty()
                    && spec.synonyms.iter().any(|s| h.starts_with(s))
            })
        });

        match found {
            Some((i, _)) => {
                claimed[i] = true;
                resolved.push(Some(i));
            }
            None => {
                if spec.required {
                    missing.push(spec.field);
                }
                resolved.push(None);
            }
        }
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(AppError::Spreadsheet(format!(
            "El archivo no contiene las columnas requeridas: {}",
            missing.join(", ")
        )))
    }
}

fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut last_was_space = false;
    for c in header.trim().to_lowercase().chars() {
        let folded = match c {
            'á' => 'a',
            'é' => 'e',
            'í' => 'i',
            'ó' => 'o',
            'ú' | 'ü' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if folded.is_whitespace() {
            if !last_was_space {
                out.push('_');
            }
            last_was_space = true;
        } else {
            out.push(folded);
            last_was_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> Sheet {
        Sheet::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| {
                    row.iter()
                        .map(|cell| {
                            if cell.is_empty() {
                                CellValue::Empty
                            } else {
                                CellValue::Text(cell.to_string())
                            }
                        })
                        .collect()
                })
                .collect(),
        )
    }

    #[test]
    fn test_normalize_header_folds_accents_and_spaces() {
        assert_eq!(normalize_header("  Descripción Plan  "), "descripcion_plan");
        assert_eq!(normalize_header("AÑO"), "ano");
        assert_eq!(normalize_header("SIGLA"), "sigla");
    }

    #[test]
    fn test_extract_adol_rows() {
        let sheet = sheet(
            &["SIGLA", "DESCRIPCIÓN"],
            &[&["MAT101", "Matemáticas I"], &["FIS100", "Física General"]],
        );
        let records = extractor_for(UploadType::Adol).extract(&sheet).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_number, 2);
        assert_eq!(records[0].key, "MAT101");
        assert_eq!(records[0].data["sigla"], "MAT101");
        assert_eq!(records[1].data["descripcion"], "Física General");
        assert!(records[0].errors.is_empty());
    }

    #[test]
    fn test_extract_skips_blank_rows_but_keeps_row_numbers() {
        let sheet = sheet(
            &["sigla", "descripcion"],
            &[&["MAT101", "Algebra"], &["", ""], &["QUI200", "Química"]],
        );
        let records = extractor_for(UploadType::Adol).extract(&sheet).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_number, 2);
        assert_eq!(records[1].row_number, 4);
    }

    #[test]
    fn test_extract_reports_bad_integers_as_row_errors() {
        let sheet = sheet(
            &["plan", "nivel", "asignatura", "vacantes"],
            &[&["PLAN-A", "1", "OPT101", "treinta"]],
        );
        let records = extractor_for(UploadType::Optativos).extract(&sheet).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].errors.len(), 1);
        assert_eq!(records[0].errors[0].field, "vacantes");
        assert_eq!(records[0].data["vacantes"], serde_json::Value::Null);
    }

    #[test]
    fn test_extract_missing_required_column_is_structural() {
        let sheet = sheet(&["descripcion"], &[&["sin sigla"]]);
        let err = extractor_for(UploadType::Adol).extract(&sheet).unwrap_err();
        assert!(err.to_string().contains("sigla"));
    }

    #[test]
    fn test_optativos_plan_columns_do_not_collide() {
        let sheet = sheet(
            &[
                "PLAN",
                "DESCRIPCION PLAN",
                "NIVEL",
                "ASIGNATURA",
                "DESCRIPCION ASIGNATURA",
                "VACANTES",
            ],
            &[&["P1", "Plan uno", "2", "OPT-9", "Taller", "15"]],
        );
        let records = extractor_for(UploadType::Optativos).extract(&sheet).unwrap();
        let data = &records[0].data;
        assert_eq!(data["plan"], "P1");
        assert_eq!(data["descripcion_plan"], "Plan uno");
        assert_eq!(data["descripcion_asignatura"], "Taller");
        assert_eq!(data["vacantes"], 15);
        assert_eq!(records[0].key, "P1|OPT-9");
    }

    #[test]
    fn test_natural_key_empty_when_part_missing() {
        let sheet = sheet(&["sigla", "descripcion"], &[&["", "sin sigla"]]);
        let records = extractor_for(UploadType::Adol).extract(&sheet).unwrap();
        assert_eq!(records[0].key, "");
    }
}
