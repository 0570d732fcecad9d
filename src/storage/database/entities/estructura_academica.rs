use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Academic-structure catalog; natural key `sigla` + `plan` within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "estructuras_academicas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub plan: Option<String>,
    pub carrera: Option<String>,
    pub nivel: Option<String>,
    pub sigla: String,
    pub asignatura: String,
    pub creditos: Option<i32>,
    pub categoria: Option<String>,
    pub horas: Option<i32>,
    pub duracion_carrera: Option<String>,
    pub clplestud: Option<String>,
    pub codigo_escuela: Option<String>,
    pub escuela_programa: Option<String>,

    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
