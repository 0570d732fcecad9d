use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Teacher roster; `rut_docente` is the natural key within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "nomina_docentes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub docente: String,

    pub id_docente: String,

    pub rut_docente: String,

    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
