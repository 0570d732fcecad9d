use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Academic term registry. Owned elsewhere; the pipeline only checks
/// existence/activity and locks the row to serialize commits per term.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bimestres")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub nombre: String,

    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
