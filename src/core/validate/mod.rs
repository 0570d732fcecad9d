//! Row validation
//!
//! [`RecordValidator`] applies, in order: parse errors carried from the
//! extractor, required-field presence, format checks, referential checks
//! against committed reference data, and intra-file natural-key uniqueness.
//! Every applicable failure is reported so a caller can fix the whole row in
//! one pass. Validation is per-row and side-effect-free: the context carries
//! everything cross-row (reference sets, key counts) precomputed.

use crate::core::extract::{profile_for, TypeProfile};
use crate::core::types::{CandidateRecord, FieldError, UploadType, ValidatedRecord};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

fn rut_regex() -> &'static Regex {
    static RUT_RE: OnceLock<Regex> = OnceLock::new();
    RUT_RE.get_or_init(|| Regex::new(r"^\d{7,8}-[\dkK]$").expect("static regex"))
}

/// Cross-row data the validator consults without touching storage
#[derive(Debug, Default)]
pub struct ValidationContext {
    /// Committed teacher RUTs for the batch's bimestre, uppercased
    pub known_ruts: HashSet<String>,
    /// Committed academic-structure siglas for the batch's bimestre, uppercased
    pub known_siglas: HashSet<String>,
    /// Natural-key occurrence counts within the uploaded file
    key_counts: HashMap<String, usize>,
}

impl ValidationContext {
    pub fn new(known_ruts: HashSet<String>, known_siglas: HashSet<String>) -> Self {
        Self {
            known_ruts,
            known_siglas,
            key_counts: HashMap::new(),
        }
    }

    /// Precompute intra-file key counts so duplicate detection stays per-row
    pub fn index_keys<'a>(&mut self, records: impl IntoIterator<Item = &'a CandidateRecord>) {
        for record in records {
            if !record.key.is_empty() {
                *self.key_counts.entry(record.key.clone()).or_insert(0) += 1;
            }
        }
    }

    fn is_duplicate(&self, key: &str) -> bool {
        !key.is_empty() && self.key_counts.get(key).copied().unwrap_or(0) > 1
    }
}

/// Applies the per-type rule set to one candidate record at a time
pub struct RecordValidator {
    kind: UploadType,
    profile: &'static TypeProfile,
}

impl RecordValidator {
    pub fn new(kind: UploadType) -> Self {
        Self {
            kind,
            profile: profile_for(kind),
        }
    }

    pub fn validate(&self, record: &CandidateRecord, ctx: &ValidationContext) -> ValidatedRecord {
        let mut errors = record.errors.clone();

        self.check_required(record, &mut errors);
        self.check_formats(record, &mut errors);
        self.check_references(record, ctx, &mut errors);

        if ctx.is_duplicate(&record.key) {
            errors.push(FieldError::new(
                self.profile.key_fields.join("+"),
                "Registro duplicado en el archivo",
            ));
        }

        ValidatedRecord {
            row_number: record.row_number,
            key: record.key.clone(),
            data: record.data.clone(),
            errors,
        }
    }

    fn check_required(&self, record: &CandidateRecord, errors: &mut Vec<FieldError>) {
        for field in self.profile.required_fields() {
            let missing = match record.data.get(field) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            // unparseable integers already produced a parse error for the field
            if missing && !errors.iter().any(|e| e.field == field) {
                errors.push(FieldError::new(field, "Campo requerido"));
            }
        }
    }

    fn check_formats(&self, record: &CandidateRecord, errors: &mut Vec<FieldError>) {
        for field in self.profile.rut_fields {
            if let Some(serde_json::Value::String(value)) = record.data.get(*field) {
                if !rut_regex().is_match(value.trim()) {
                    errors.push(FieldError::new(*field, "Formato de RUT inválido"));
                }
            }
        }
        for field in self.profile.integer_fields() {
            if let Some(serde_json::Value::Number(n)) = record.data.get(field) {
                if n.as_i64().unwrap_or(0) < 0 {
                    errors.push(FieldError::new(field, "Debe ser mayor o igual a cero"));
                }
            }
        }
    }

    fn check_references(
        &self,
        record: &CandidateRecord,
        ctx: &ValidationContext,
        errors: &mut Vec<FieldError>,
    ) {
        if self.kind != UploadType::ReporteCursables {
            return;
        }

        if let Some(serde_json::Value::String(rut)) = record.data.get("rut") {
            let rut = rut.trim().to_uppercase();
            if rut_regex().is_match(&rut) && !ctx.known_ruts.contains(&rut) {
                errors.push(FieldError::new(
                    "rut",
                    "El RUT no corresponde a un docente registrado",
                ));
            }
        }
        if let Some(serde_json::Value::String(sigla)) = record.data.get("sigla") {
            let sigla = sigla.trim().to_uppercase();
            if !sigla.is_empty() && !ctx.known_siglas.contains(&sigla) {
                errors.push(FieldError::new(
                    "sigla",
                    "La sigla no existe en la estructura académica",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(kind: UploadType, fields: &[(&str, serde_json::Value)]) -> CandidateRecord {
        let mut data = serde_json::Map::new();
        for (k, v) in fields {
            data.insert(k.to_string(), v.clone());
        }
        let key = crate::core::extract::natural_key(&data, profile_for(kind).key_fields);
        CandidateRecord {
            row_number: 2,
            key,
            data,
            errors: Vec::new(),
        }
    }

    #[test]
    fn test_valid_adol_row_passes() {
        let validator = RecordValidator::new(UploadType::Adol);
        let record = candidate(
            UploadType::Adol,
            &[("sigla", json!("MAT101")), ("descripcion", json!("Algebra"))],
        );
        let mut ctx = ValidationContext::default();
        ctx.index_keys([&record]);
        let verdict = validator.validate(&record, &ctx);
        assert!(verdict.is_valid());
    }

    #[test]
    fn test_all_failures_reported_together() {
        // missing descripcion + malformed rut must both be reported
        let validator = RecordValidator::new(UploadType::NominaDocentes);
        let record = candidate(
            UploadType::NominaDocentes,
            &[
                ("docente", json!(null)),
                ("id_docente", json!("D-44")),
                ("rut_docente", json!("no-es-rut")),
            ],
        );
        let ctx = ValidationContext::default();
        let verdict = validator.validate(&record, &ctx);
        let fields: Vec<&str> = verdict.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["docente", "rut_docente"]);
    }

    #[test]
    fn test_rut_format() {
        let validator = RecordValidator::new(UploadType::NominaDocentes);
        for (rut, ok) in [
            ("12345678-5", true),
            ("1234567-K", true),
            ("1234567-k", true),
            ("12.345.678-5", false),
            ("12345678", false),
        ] {
            let record = candidate(
                UploadType::NominaDocentes,
                &[
                    ("docente", json!("Ana Rojas")),
                    ("id_docente", json!("D-1")),
                    ("rut_docente", json!(rut)),
                ],
            );
            let verdict = validator.validate(&record, &ValidationContext::default());
            assert_eq!(verdict.is_valid(), ok, "rut {rut}");
        }
    }

    #[test]
    fn test_unknown_staff_reference_is_flagged() {
        let validator = RecordValidator::new(UploadType::ReporteCursables);
        let mut ruts = HashSet::new();
        ruts.insert("12345678-5".to_string());
        let mut siglas = HashSet::new();
        siglas.insert("MAT101".to_string());
        let ctx = ValidationContext::new(ruts, siglas);

        let known = candidate(
            UploadType::ReporteCursables,
            &[("rut", json!("12345678-5")), ("sigla", json!("MAT101"))],
        );
        assert!(validator.validate(&known, &ctx).is_valid());

        let unknown = candidate(
            UploadType::ReporteCursables,
            &[("rut", json!("87654321-0")), ("sigla", json!("MAT101"))],
        );
        let verdict = validator.validate(&unknown, &ctx);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.errors[0].field, "rut");
    }

    #[test]
    fn test_duplicate_keys_flag_every_occurrence() {
        let validator = RecordValidator::new(UploadType::Adol);
        let a = candidate(
            UploadType::Adol,
            &[("sigla", json!("MAT101")), ("descripcion", json!("Algebra"))],
        );
        let b = candidate(
            UploadType::Adol,
            &[("sigla", json!("mat101")), ("descripcion", json!("Algebra II"))],
        );
        let mut ctx = ValidationContext::default();
        ctx.index_keys([&a, &b]);
        assert!(!validator.validate(&a, &ctx).is_valid());
        assert!(!validator.validate(&b, &ctx).is_valid());
    }

    #[test]
    fn test_negative_integer_rejected() {
        let validator = RecordValidator::new(UploadType::Optativos);
        let record = candidate(
            UploadType::Optativos,
            &[
                ("plan", json!("P1")),
                ("nivel", json!("2")),
                ("asignatura", json!("OPT-9")),
                ("vacantes", json!(-3)),
            ],
        );
        let verdict = validator.validate(&record, &ValidationContext::default());
        assert!(verdict
            .errors
            .iter()
            .any(|e| e.field == "vacantes" && e.message.contains("mayor o igual")));
    }
}
