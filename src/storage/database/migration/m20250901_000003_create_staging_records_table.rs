use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StagingRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StagingRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StagingRecords::BatchId).integer().not_null())
                    .col(
                        ColumnDef::new(StagingRecords::RowNumber)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StagingRecords::Data).json_binary().not_null())
                    .col(
                        ColumnDef::new(StagingRecords::Errors)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StagingRecords::IsValid)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_staging_records_batch_id")
                            .from(StagingRecords::Table, StagingRecords::BatchId)
                            .to(UploadBatches::Table, UploadBatches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staging_records_batch_id")
                    .table(StagingRecords::Table)
                    .col(StagingRecords::BatchId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StagingRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum StagingRecords {
    Table,
    Id,
    BatchId,
    RowNumber,
    Data,
    Errors,
    IsValid,
}

#[derive(DeriveIden)]
enum UploadBatches {
    Table,
    Id,
}
