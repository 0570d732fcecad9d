/// Batch lifecycle entity
pub mod upload_batch;
/// Staged row entity
pub mod staging_record;
/// Academic-term registry entity
pub mod bimestre;

// Production tables, one per upload kind
pub mod adol_position;
pub mod dol_position;
pub mod estructura_academica;
pub mod nomina_docente;
pub mod optativo;
pub mod reporte_cursable;
pub mod vacante_inicio;

pub use adol_position::Entity as AdolPosition;
pub use bimestre::Entity as Bimestre;
pub use dol_position::Entity as DolPosition;
pub use estructura_academica::Entity as EstructuraAcademica;
pub use nomina_docente::Entity as NominaDocente;
pub use optativo::Entity as Optativo;
pub use reporte_cursable::Entity as ReporteCursable;
pub use staging_record::Entity as StagingRecord;
pub use upload_batch::Entity as UploadBatch;
pub use vacante_inicio::Entity as VacanteInicio;
