//! Fixture factories: CSV payloads, validated records, seeded reference data

use planacad_rs::core::types::{
    OperationMode, UploadOptions, UploadType, ValidatedRecord,
};
use planacad_rs::storage::database::entities::{estructura_academica, nomina_docente};
use planacad_rs::storage::{NewBatch, StagingStore};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::ActiveModelTrait;

use super::TestDatabase;

/// Build a semicolon-separated CSV payload
pub fn csv_bytes(headers: &[&str], rows: &[Vec<String>]) -> Vec<u8> {
    let mut out = String::new();
    out.push_str(&headers.join(";"));
    out.push('\n');
    for row in rows {
        out.push_str(&row.join(";"));
        out.push('\n');
    }
    out.into_bytes()
}

/// Deterministic well-formed RUT for index `i`
pub fn valid_rut(i: usize) -> String {
    format!("{}-5", 1_000_000 + i)
}

/// Roster CSV with `n` well-formed teacher rows
pub fn nomina_csv(n: usize) -> Vec<u8> {
    let rows: Vec<Vec<String>> = (0..n)
        .map(|i| {
            vec![
                format!("Docente {}", i + 1),
                format!("D-{}", i + 1),
                valid_rut(i),
            ]
        })
        .collect();
    csv_bytes(&["DOCENTE", "ID DOCENTE", "RUT DOCENTE"], &rows)
}

/// ADOL CSV from `(sigla, descripcion)` pairs
pub fn adol_csv(rows: &[(&str, &str)]) -> Vec<u8> {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|(sigla, desc)| vec![sigla.to_string(), desc.to_string()])
        .collect();
    csv_bytes(&["SIGLA", "DESCRIPCION"], &rows)
}

/// Course-report CSV from `(rut, sigla)` pairs
pub fn reporte_csv(rows: &[(String, String)]) -> Vec<u8> {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|(rut, sigla)| {
            vec![
                rut.clone(),
                "PLAN-1".to_string(),
                "2".to_string(),
                sigla.clone(),
                "Asignatura".to_string(),
            ]
        })
        .collect();
    csv_bytes(&["RUT", "PLAN", "NIVEL", "SIGLA", "ASIGNATURA"], &rows)
}

/// Default upload options for a bimestre
pub fn upsert_options(bimestre_id: i32) -> UploadOptions {
    UploadOptions {
        bimestre_id,
        mode: OperationMode::Upsert,
        validate_only: false,
    }
}

pub fn dry_run_options(bimestre_id: i32) -> UploadOptions {
    UploadOptions {
        bimestre_id,
        mode: OperationMode::Upsert,
        validate_only: true,
    }
}

/// Build a valid `ValidatedRecord` from canonical field/value pairs
pub fn record(row_number: u32, key: &str, fields: &[(&str, serde_json::Value)]) -> ValidatedRecord {
    let mut data = serde_json::Map::new();
    for (k, v) in fields {
        data.insert(k.to_string(), v.clone());
    }
    ValidatedRecord {
        row_number,
        key: key.to_string(),
        data,
        errors: Vec::new(),
    }
}

/// Valid ADOL record for direct commit-engine calls
pub fn adol_record(row_number: u32, sigla: &str, descripcion: &str) -> ValidatedRecord {
    record(
        row_number,
        &sigla.to_uppercase(),
        &[
            ("sigla", serde_json::Value::String(sigla.to_string())),
            (
                "descripcion",
                serde_json::Value::String(descripcion.to_string()),
            ),
        ],
    )
}

/// Seed committed roster rows the validator can reference
pub async fn seed_nomina(db: &TestDatabase, bimestre_id: i32, ruts: &[String]) {
    for (i, rut) in ruts.iter().enumerate() {
        nomina_docente::ActiveModel {
            id: NotSet,
            docente: Set(format!("Docente {}", i + 1)),
            id_docente: Set(format!("D-{}", i + 1)),
            rut_docente: Set(rut.clone()),
            id_bimestre: Set(bimestre_id),
        }
        .insert(&db.conn())
        .await
        .expect("failed to seed nomina_docentes");
    }
}

/// Seed committed academic-structure rows the validator can reference
pub async fn seed_estructura(db: &TestDatabase, bimestre_id: i32, siglas: &[&str]) {
    for sigla in siglas {
        estructura_academica::ActiveModel {
            id: NotSet,
            plan: Set(Some("PLAN-1".to_string())),
            sigla: Set(sigla.to_string()),
            asignatura: Set(format!("Asignatura {}", sigla)),
            id_bimestre: Set(bimestre_id),
            ..Default::default()
        }
        .insert(&db.conn())
        .await
        .expect("failed to seed estructuras_academicas");
    }
}

/// Stage a minimal batch directly, bypassing the pipeline
pub async fn stage_batch(
    db: &TestDatabase,
    kind: UploadType,
    bimestre_id: i32,
    status: planacad_rs::BatchStatus,
) -> i32 {
    let staging = StagingStore::new(db.conn());
    let batch = staging
        .save_batch(
            NewBatch {
                upload_type: kind,
                file_name: format!("{}.csv", kind.as_path()),
                bimestre_id,
                uploaded_by: Some(1),
                mode: OperationMode::Upsert,
                validate_only: false,
                status,
            },
            &[],
        )
        .await
        .expect("failed to stage batch");
    batch.id
}

/// Raw multipart body for HTTP tests
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: text/csv\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
