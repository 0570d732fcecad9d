use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One spreadsheet submission with its lifecycle and governance state
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "upload_batches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Upload kind, stored as the URL path segment (e.g. `nomina-docentes`)
    pub upload_type: String,

    pub file_name: String,

    /// Academic term the whole batch is scoped to
    pub bimestre_id: i32,

    /// Authenticated uploader, when the identity provider supplied one
    pub uploaded_by: Option<i32>,

    pub upload_date: DateTimeWithTimeZone,

    /// `UPSERT` or `FULL_REPLACE`
    pub mode: String,

    /// Dry run: rows were validated and staged but never committed
    pub validate_only: bool,

    /// `Exitoso`, `Con errores` or `Error`
    pub status: String,

    pub total_records: i32,
    pub valid_records: i32,
    pub invalid_records: i32,

    /// True once valid records were committed to the production table
    pub is_processed: bool,
    pub processed_at: Option<DateTimeWithTimeZone>,

    /// `Pendiente`, `Aprobado` or `Rechazado`; terminal once decided
    pub approval_status: String,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTimeWithTimeZone>,
    pub rejected_by: Option<i32>,
    pub rejected_at: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub rejection_reason: Option<String>,

    /// Commit failure diagnostics, kept with the batch for inspection
    #[sea_orm(column_type = "Text", nullable)]
    pub error_details: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staging_record::Entity")]
    StagingRecord,
}

impl Related<super::staging_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StagingRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
