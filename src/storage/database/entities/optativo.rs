use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Optional-course offer; natural key `plan` + `asignatura` within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "optativos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub plan: String,
    pub descripcion_plan: Option<String>,
    pub nivel: String,
    pub grupo_asignatura: Option<String>,
    pub jornada: Option<String>,
    pub asignatura: String,
    pub descripcion_asignatura: Option<String>,
    pub vacantes: i32,
    pub horas: Option<i32>,

    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
