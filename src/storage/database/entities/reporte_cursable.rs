use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Course-offering report rows; natural key `rut` + `sigla` within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reportes_cursables")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub rut: String,
    pub plan: Option<String>,
    pub nivel: Option<String>,
    pub sigla: String,
    pub asignatura: Option<String>,

    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
