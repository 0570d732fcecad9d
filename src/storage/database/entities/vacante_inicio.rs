use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry-level vacancies, keyed by plan + sigla within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "vacantes_inicio")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub codigo_plan: String,

    pub carrera: Option<String>,

    #[sea_orm(primary_key, auto_increment = false)]
    pub sigla_asignatura: String,

    pub asignatura: Option<String>,
    pub nivel: Option<String>,
    pub creditos: Option<i32>,
    pub vacantes: i32,

    #[sea_orm(primary_key, auto_increment = false)]
    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
