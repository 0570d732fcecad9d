use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdolPositions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(AdolPositions::Sigla).string_len(20).not_null())
                    .col(
                        ColumnDef::new(AdolPositions::Descripcion)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdolPositions::IdBimestre)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(AdolPositions::Sigla)
                            .col(AdolPositions::IdBimestre),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DolPositions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(DolPositions::Plan).string_len(50).not_null())
                    .col(ColumnDef::new(DolPositions::Sigla).string_len(20).not_null())
                    .col(
                        ColumnDef::new(DolPositions::Descripcion)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(DolPositions::IdBimestre).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(DolPositions::Sigla)
                            .col(DolPositions::IdBimestre),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NominaDocentes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NominaDocentes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NominaDocentes::Docente)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NominaDocentes::IdDocente)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NominaDocentes::RutDocente)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NominaDocentes::IdBimestre)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_nomina_docentes_rut_bimestre")
                    .table(NominaDocentes::Table)
                    .col(NominaDocentes::RutDocente)
                    .col(NominaDocentes::IdBimestre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EstructurasAcademicas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EstructurasAcademicas::Plan).string_len(50).null())
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Carrera)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(EstructurasAcademicas::Nivel).string_len(50).null())
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Sigla)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Asignatura)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(EstructurasAcademicas::Creditos).integer().null())
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Categoria)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(EstructurasAcademicas::Horas).integer().null())
                    .col(
                        ColumnDef::new(EstructurasAcademicas::DuracionCarrera)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EstructurasAcademicas::Clplestud)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EstructurasAcademicas::CodigoEscuela)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EstructurasAcademicas::EscuelaPrograma)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(EstructurasAcademicas::IdBimestre)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_estructuras_academicas_sigla_plan_bimestre")
                    .table(EstructurasAcademicas::Table)
                    .col(EstructurasAcademicas::Sigla)
                    .col(EstructurasAcademicas::Plan)
                    .col(EstructurasAcademicas::IdBimestre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportesCursables::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReportesCursables::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReportesCursables::Rut).string_len(20).not_null())
                    .col(ColumnDef::new(ReportesCursables::Plan).string_len(50).null())
                    .col(ColumnDef::new(ReportesCursables::Nivel).string_len(50).null())
                    .col(
                        ColumnDef::new(ReportesCursables::Sigla)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ReportesCursables::Asignatura)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ReportesCursables::IdBimestre)
                            .integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_reportes_cursables_rut_sigla_bimestre")
                    .table(ReportesCursables::Table)
                    .col(ReportesCursables::Rut)
                    .col(ReportesCursables::Sigla)
                    .col(ReportesCursables::IdBimestre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Optativos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Optativos::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Optativos::Plan).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Optativos::DescripcionPlan)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Optativos::Nivel).string_len(10).not_null())
                    .col(
                        ColumnDef::new(Optativos::GrupoAsignatura)
                            .string_len(50)
                            .null(),
                    )
                    .col(ColumnDef::new(Optativos::Jornada).string_len(50).null())
                    .col(ColumnDef::new(Optativos::Asignatura).string_len(20).not_null())
                    .col(
                        ColumnDef::new(Optativos::DescripcionAsignatura)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(Optativos::Vacantes).integer().not_null())
                    .col(ColumnDef::new(Optativos::Horas).integer().null())
                    .col(ColumnDef::new(Optativos::IdBimestre).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("ux_optativos_plan_asignatura_bimestre")
                    .table(Optativos::Table)
                    .col(Optativos::Plan)
                    .col(Optativos::Asignatura)
                    .col(Optativos::IdBimestre)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(VacantesInicio::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VacantesInicio::CodigoPlan)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VacantesInicio::Carrera).string_len(255).null())
                    .col(
                        ColumnDef::new(VacantesInicio::SiglaAsignatura)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VacantesInicio::Asignatura)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(VacantesInicio::Nivel).string_len(50).null())
                    .col(ColumnDef::new(VacantesInicio::Creditos).integer().null())
                    .col(ColumnDef::new(VacantesInicio::Vacantes).integer().not_null())
                    .col(ColumnDef::new(VacantesInicio::IdBimestre).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(VacantesInicio::CodigoPlan)
                            .col(VacantesInicio::SiglaAsignatura)
                            .col(VacantesInicio::IdBimestre),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdolPositions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DolPositions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(NominaDocentes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EstructurasAcademicas::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReportesCursables::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Optativos::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VacantesInicio::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum AdolPositions {
    Table,
    Sigla,
    Descripcion,
    IdBimestre,
}

#[derive(DeriveIden)]
enum DolPositions {
    Table,
    Plan,
    Sigla,
    Descripcion,
    IdBimestre,
}

#[derive(DeriveIden)]
enum NominaDocentes {
    Table,
    Id,
    Docente,
    IdDocente,
    RutDocente,
    IdBimestre,
}

#[derive(DeriveIden)]
enum EstructurasAcademicas {
    Table,
    Id,
    Plan,
    Carrera,
    Nivel,
    Sigla,
    Asignatura,
    Creditos,
    Categoria,
    Horas,
    DuracionCarrera,
    Clplestud,
    CodigoEscuela,
    EscuelaPrograma,
    IdBimestre,
}

#[derive(DeriveIden)]
enum ReportesCursables {
    Table,
    Id,
    Rut,
    Plan,
    Nivel,
    Sigla,
    Asignatura,
    IdBimestre,
}

#[derive(DeriveIden)]
enum Optativos {
    Table,
    Id,
    Plan,
    DescripcionPlan,
    Nivel,
    GrupoAsignatura,
    Jornada,
    Asignatura,
    DescripcionAsignatura,
    Vacantes,
    Horas,
    IdBimestre,
}

#[derive(DeriveIden)]
enum VacantesInicio {
    Table,
    CodigoPlan,
    Carrera,
    SiglaAsignatura,
    Asignatura,
    Nivel,
    Creditos,
    Vacantes,
    IdBimestre,
}
