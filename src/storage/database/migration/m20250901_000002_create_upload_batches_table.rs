use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UploadBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UploadBatches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::UploadType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::FileName)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(UploadBatches::BimestreId).integer().not_null())
                    .col(ColumnDef::new(UploadBatches::UploadedBy).integer().null())
                    .col(
                        ColumnDef::new(UploadBatches::UploadDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::Mode)
                            .string_len(20)
                            .not_null()
                            .default("UPSERT"),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::ValidateOnly)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::Status)
                            .string_len(20)
                            .not_null()
                            .default("Exitoso"),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::TotalRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::ValidRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::InvalidRecords)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::IsProcessed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::ProcessedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UploadBatches::ApprovalStatus)
                            .string_len(20)
                            .not_null()
                            .default("Pendiente"),
                    )
                    .col(ColumnDef::new(UploadBatches::ApprovedBy).integer().null())
                    .col(
                        ColumnDef::new(UploadBatches::ApprovedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(UploadBatches::RejectedBy).integer().null())
                    .col(
                        ColumnDef::new(UploadBatches::RejectedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(UploadBatches::RejectionReason).text().null())
                    .col(ColumnDef::new(UploadBatches::ErrorDetails).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_upload_batches_bimestre_id")
                            .from(UploadBatches::Table, UploadBatches::BimestreId)
                            .to(Bimestres::Table, Bimestres::Id),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_upload_batches_upload_date", UploadBatches::UploadDate),
            ("idx_upload_batches_upload_type", UploadBatches::UploadType),
            ("idx_upload_batches_status", UploadBatches::Status),
            (
                "idx_upload_batches_approval_status",
                UploadBatches::ApprovalStatus,
            ),
            ("idx_upload_batches_bimestre_id", UploadBatches::BimestreId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(UploadBatches::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UploadBatches::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UploadBatches {
    Table,
    Id,
    UploadType,
    FileName,
    BimestreId,
    UploadedBy,
    UploadDate,
    Mode,
    ValidateOnly,
    Status,
    TotalRecords,
    ValidRecords,
    InvalidRecords,
    IsProcessed,
    ProcessedAt,
    ApprovalStatus,
    ApprovedBy,
    ApprovedAt,
    RejectedBy,
    RejectedAt,
    RejectionReason,
    ErrorDetails,
}

#[derive(DeriveIden)]
enum Bimestres {
    Table,
    Id,
}
