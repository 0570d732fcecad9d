use sea_orm_migration::prelude::*;

mod m20250901_000001_create_bimestres_table;
mod m20250901_000002_create_upload_batches_table;
mod m20250901_000003_create_staging_records_table;
mod m20250901_000004_create_production_tables;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_create_bimestres_table::Migration),
            Box::new(m20250901_000002_create_upload_batches_table::Migration),
            Box::new(m20250901_000003_create_staging_records_table::Migration),
            Box::new(m20250901_000004_create_production_tables::Migration),
        ]
    }
}
