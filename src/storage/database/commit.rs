//! Commit engine
//!
//! Writes the valid subset of a batch into the production table of its
//! upload kind, inside a single transaction. `UPSERT` inserts or updates by
//! natural key + bimestre; `FULL_REPLACE` deletes every row for
//! `(type, bimestre)` first and inserts the incoming set. Any failure rolls
//! the whole transaction back; the caller marks the batch `Error` and the
//! staging rows remain for diagnosis.

use crate::core::types::{OperationMode, UploadType, ValidatedRecord};
use crate::utils::error::Result;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, QueryFilter, QuerySelect, TransactionTrait,
};
use tracing::{debug, warn};

use super::entities::{
    adol_position, dol_position, estructura_academica, nomina_docente, optativo,
    reporte_cursable, vacante_inicio, AdolPosition, Bimestre, DolPosition, EstructuraAcademica,
    NominaDocente, Optativo, ReporteCursable, VacanteInicio,
};

/// Result of one committed batch
#[derive(Debug, Clone, Copy)]
pub struct CommitOutcome {
    pub records_written: u64,
}

#[derive(Debug, Clone)]
pub struct CommitEngine {
    db: DatabaseConnection,
}

impl CommitEngine {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Commit `records` (already validated) for `(kind, bimestre_id)`.
    ///
    /// Runs to completion or full rollback; there is no mid-commit
    /// cancellation point.
    pub async fn commit(
        &self,
        kind: UploadType,
        bimestre_id: i32,
        mode: OperationMode,
        records: &[ValidatedRecord],
    ) -> Result<CommitOutcome> {
        let txn = self.db.begin().await?;

        let result = self
            .apply(&txn, kind, bimestre_id, mode, records)
            .await;

        match result {
            Ok(records_written) => {
                txn.commit().await?;
                debug!(%kind, bimestre_id, records_written, "commit completed");
                Ok(CommitOutcome { records_written })
            }
            Err(e) => {
                warn!(%kind, bimestre_id, error = %e, "commit failed, rolling back");
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }

    async fn apply(
        &self,
        txn: &DatabaseTransaction,
        kind: UploadType,
        bimestre_id: i32,
        mode: OperationMode,
        records: &[ValidatedRecord],
    ) -> Result<u64> {
        self.lock_bimestre(txn, bimestre_id).await?;

        match kind {
            UploadType::Adol => commit_adol(txn, bimestre_id, mode, records).await,
            UploadType::Dol => commit_dol(txn, bimestre_id, mode, records).await,
            UploadType::NominaDocentes => commit_nomina(txn, bimestre_id, mode, records).await,
            UploadType::EstructuraAcademica => {
                commit_estructura(txn, bimestre_id, mode, records).await
            }
            UploadType::ReporteCursables => commit_reporte(txn, bimestre_id, mode, records).await,
            UploadType::Optativos => commit_optativos(txn, bimestre_id, mode, records).await,
            UploadType::VacantesInicio => commit_vacantes(txn, bimestre_id, mode, records).await,
        }
    }

    /// Serialize concurrent commits for the same bimestre via a row lock.
    /// SQLite has a single writer and rejects locking clauses, so it is
    /// skipped there.
    async fn lock_bimestre(&self, txn: &DatabaseTransaction, bimestre_id: i32) -> Result<()> {
        if self.db.get_database_backend() != DbBackend::Sqlite {
            Bimestre::find_by_id(bimestre_id)
                .lock_exclusive()
                .one(txn)
                .await?;
        }
        Ok(())
    }
}

fn text(record: &ValidatedRecord, field: &str) -> String {
    match record.data.get(field) {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn opt_text(record: &ValidatedRecord, field: &str) -> Option<String> {
    let value = text(record, field);
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn int(record: &ValidatedRecord, field: &str) -> i32 {
    record
        .data
        .get(field)
        .and_then(serde_json::Value::as_i64)
        .unwrap_or(0) as i32
}

fn opt_int(record: &ValidatedRecord, field: &str) -> Option<i32> {
    record
        .data
        .get(field)
        .and_then(serde_json::Value::as_i64)
        .map(|n| n as i32)
}

async fn commit_adol(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        AdolPosition::delete_many()
            .filter(adol_position::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let sigla = text(record, "sigla");
        let descripcion = text(record, "descripcion");

        let existing = if mode == OperationMode::Upsert {
            AdolPosition::find_by_id((sigla.clone(), bimestre_id))
                .one(txn)
                .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: adol_position::ActiveModel = model.into();
                active.descripcion = Set(descripcion);
                active.update(txn).await?;
            }
            None => {
                // composite PK without auto-increment: skip the re-fetch
                AdolPosition::insert(adol_position::ActiveModel {
                    sigla: Set(sigla),
                    descripcion: Set(descripcion),
                    id_bimestre: Set(bimestre_id),
                })
                .exec_without_returning(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_dol(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        DolPosition::delete_many()
            .filter(dol_position::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let sigla = text(record, "sigla");

        let existing = if mode == OperationMode::Upsert {
            DolPosition::find_by_id((sigla.clone(), bimestre_id))
                .one(txn)
                .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: dol_position::ActiveModel = model.into();
                active.plan = Set(text(record, "plan"));
                active.descripcion = Set(text(record, "descripcion"));
                active.update(txn).await?;
            }
            None => {
                DolPosition::insert(dol_position::ActiveModel {
                    plan: Set(text(record, "plan")),
                    sigla: Set(sigla),
                    descripcion: Set(text(record, "descripcion")),
                    id_bimestre: Set(bimestre_id),
                })
                .exec_without_returning(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_nomina(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        NominaDocente::delete_many()
            .filter(nomina_docente::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let rut = text(record, "rut_docente");

        let existing = if mode == OperationMode::Upsert {
            NominaDocente::find()
                .filter(nomina_docente::Column::RutDocente.eq(rut.clone()))
                .filter(nomina_docente::Column::IdBimestre.eq(bimestre_id))
                .one(txn)
                .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: nomina_docente::ActiveModel = model.into();
                active.docente = Set(text(record, "docente"));
                active.id_docente = Set(text(record, "id_docente"));
                active.update(txn).await?;
            }
            None => {
                nomina_docente::ActiveModel {
                    id: NotSet,
                    docente: Set(text(record, "docente")),
                    id_docente: Set(text(record, "id_docente")),
                    rut_docente: Set(rut),
                    id_bimestre: Set(bimestre_id),
                }
                .insert(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_estructura(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        EstructuraAcademica::delete_many()
            .filter(estructura_academica::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let sigla = text(record, "sigla");
        let plan = opt_text(record, "plan");

        let existing = if mode == OperationMode::Upsert {
            let mut query = EstructuraAcademica::find()
                .filter(estructura_academica::Column::Sigla.eq(sigla.clone()))
                .filter(estructura_academica::Column::IdBimestre.eq(bimestre_id));
            query = match &plan {
                Some(plan) => query.filter(estructura_academica::Column::Plan.eq(plan.clone())),
                None => query.filter(estructura_academica::Column::Plan.is_null()),
            };
            query.one(txn).await?
        } else {
            None
        };

        let fields = |active: &mut estructura_academica::ActiveModel| {
            active.carrera = Set(opt_text(record, "carrera"));
            active.nivel = Set(opt_text(record, "nivel"));
            active.asignatura = Set(text(record, "asignatura"));
            active.creditos = Set(opt_int(record, "creditos"));
            active.categoria = Set(opt_text(record, "categoria"));
            active.horas = Set(opt_int(record, "horas"));
            active.duracion_carrera = Set(opt_text(record, "duracion_carrera"));
            active.clplestud = Set(opt_text(record, "clplestud"));
            active.codigo_escuela = Set(opt_text(record, "codigo_escuela"));
            active.escuela_programa = Set(opt_text(record, "escuela_programa"));
        };

        match existing {
            Some(model) => {
                let mut active: estructura_academica::ActiveModel = model.into();
                fields(&mut active);
                active.update(txn).await?;
            }
            None => {
                let mut active = estructura_academica::ActiveModel {
                    id: NotSet,
                    plan: Set(plan),
                    sigla: Set(sigla),
                    id_bimestre: Set(bimestre_id),
                    ..Default::default()
                };
                fields(&mut active);
                active.insert(txn).await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_reporte(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        ReporteCursable::delete_many()
            .filter(reporte_cursable::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let rut = text(record, "rut");
        let sigla = text(record, "sigla");

        let existing = if mode == OperationMode::Upsert {
            ReporteCursable::find()
                .filter(reporte_cursable::Column::Rut.eq(rut.clone()))
                .filter(reporte_cursable::Column::Sigla.eq(sigla.clone()))
                .filter(reporte_cursable::Column::IdBimestre.eq(bimestre_id))
                .one(txn)
                .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: reporte_cursable::ActiveModel = model.into();
                active.plan = Set(opt_text(record, "plan"));
                active.nivel = Set(opt_text(record, "nivel"));
                active.asignatura = Set(opt_text(record, "asignatura"));
                active.update(txn).await?;
            }
            None => {
                reporte_cursable::ActiveModel {
                    id: NotSet,
                    rut: Set(rut),
                    plan: Set(opt_text(record, "plan")),
                    nivel: Set(opt_text(record, "nivel")),
                    sigla: Set(sigla),
                    asignatura: Set(opt_text(record, "asignatura")),
                    id_bimestre: Set(bimestre_id),
                }
                .insert(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_optativos(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        Optativo::delete_many()
            .filter(optativo::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let plan = text(record, "plan");
        let asignatura = text(record, "asignatura");

        let existing = if mode == OperationMode::Upsert {
            Optativo::find()
                .filter(optativo::Column::Plan.eq(plan.clone()))
                .filter(optativo::Column::Asignatura.eq(asignatura.clone()))
                .filter(optativo::Column::IdBimestre.eq(bimestre_id))
                .one(txn)
                .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: optativo::ActiveModel = model.into();
                active.descripcion_plan = Set(opt_text(record, "descripcion_plan"));
                active.nivel = Set(text(record, "nivel"));
                active.grupo_asignatura = Set(opt_text(record, "grupo_asignatura"));
                active.jornada = Set(opt_text(record, "jornada"));
                active.descripcion_asignatura = Set(opt_text(record, "descripcion_asignatura"));
                active.vacantes = Set(int(record, "vacantes"));
                active.horas = Set(opt_int(record, "horas"));
                active.update(txn).await?;
            }
            None => {
                optativo::ActiveModel {
                    id: NotSet,
                    plan: Set(plan),
                    descripcion_plan: Set(opt_text(record, "descripcion_plan")),
                    nivel: Set(text(record, "nivel")),
                    grupo_asignatura: Set(opt_text(record, "grupo_asignatura")),
                    jornada: Set(opt_text(record, "jornada")),
                    asignatura: Set(asignatura),
                    descripcion_asignatura: Set(opt_text(record, "descripcion_asignatura")),
                    vacantes: Set(int(record, "vacantes")),
                    horas: Set(opt_int(record, "horas")),
                    id_bimestre: Set(bimestre_id),
                }
                .insert(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}

async fn commit_vacantes(
    txn: &DatabaseTransaction,
    bimestre_id: i32,
    mode: OperationMode,
    records: &[ValidatedRecord],
) -> Result<u64> {
    if mode == OperationMode::FullReplace {
        VacanteInicio::delete_many()
            .filter(vacante_inicio::Column::IdBimestre.eq(bimestre_id))
            .exec(txn)
            .await?;
    }

    let mut written = 0;
    for record in records {
        let codigo_plan = text(record, "codigo_plan");
        let sigla_asignatura = text(record, "sigla_asignatura");

        let existing = if mode == OperationMode::Upsert {
            VacanteInicio::find_by_id((
                codigo_plan.clone(),
                sigla_asignatura.clone(),
                bimestre_id,
            ))
            .one(txn)
            .await?
        } else {
            None
        };

        match existing {
            Some(model) => {
                let mut active: vacante_inicio::ActiveModel = model.into();
                active.carrera = Set(opt_text(record, "carrera"));
                active.asignatura = Set(opt_text(record, "asignatura"));
                active.nivel = Set(opt_text(record, "nivel"));
                active.creditos = Set(opt_int(record, "creditos"));
                active.vacantes = Set(int(record, "vacantes"));
                active.update(txn).await?;
            }
            None => {
                VacanteInicio::insert(vacante_inicio::ActiveModel {
                    codigo_plan: Set(codigo_plan),
                    carrera: Set(opt_text(record, "carrera")),
                    sigla_asignatura: Set(sigla_asignatura),
                    asignatura: Set(opt_text(record, "asignatura")),
                    nivel: Set(opt_text(record, "nivel")),
                    creditos: Set(opt_int(record, "creditos")),
                    vacantes: Set(int(record, "vacantes")),
                    id_bimestre: Set(bimestre_id),
                })
                .exec_without_returning(txn)
                .await?;
            }
        }
        written += 1;
    }
    Ok(written)
}
