use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One validated row of a batch, immutable after creation.
///
/// `data` keeps the extracted columns in source order; `errors` is the
/// ordered list of `{field, message}` descriptors, empty iff the row is
/// valid. Re-uploads create a new batch and never touch these rows.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staging_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub batch_id: i32,

    /// 1-based source row (header is row 1)
    pub row_number: i32,

    #[sea_orm(column_type = "Json")]
    pub data: Json,

    #[sea_orm(column_type = "Json")]
    pub errors: Json,

    pub is_valid: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::upload_batch::Entity",
        from = "Column::BatchId",
        to = "super::upload_batch::Column::Id",
        on_delete = "Cascade"
    )]
    UploadBatch,
}

impl Related<super::upload_batch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
