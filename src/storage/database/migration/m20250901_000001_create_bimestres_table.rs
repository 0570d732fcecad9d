use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bimestres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bimestres::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bimestres::Nombre).string().not_null())
                    .col(
                        ColumnDef::new(Bimestres::Activo)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bimestres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Bimestres {
    Table,
    Id,
    Nombre,
    Activo,
}
