use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// DOL staffing-code catalog, keyed by sigla within a bimestre
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "dol_positions")]
pub struct Model {
    pub plan: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub sigla: String,

    pub descripcion: String,

    #[sea_orm(primary_key, auto_increment = false)]
    pub id_bimestre: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
