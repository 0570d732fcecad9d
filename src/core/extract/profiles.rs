//! Per-type extraction profiles
//!
//! One [`TypeProfile`] per spreadsheet kind: the expected columns with their
//! header synonyms (Spanish and English spellings both occur in the wild),
//! the natural-key fields and the RUT-formatted fields. Adding a new
//! spreadsheet format means adding a profile here and nothing else.

use crate::core::types::UploadType;

/// How a column's cells are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Non-negative integer; unparseable cells become row errors
    Integer,
}

/// One expected spreadsheet column
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Canonical field name used in staging data and production columns
    pub field: &'static str,
    /// Normalized header spellings that resolve to this column
    pub synonyms: &'static [&'static str],
    pub required: bool,
    pub kind: ColumnKind,
}

const fn text(
    field: &'static str,
    synonyms: &'static [&'static str],
    required: bool,
) -> ColumnSpec {
    ColumnSpec {
        field,
        synonyms,
        required,
        kind: ColumnKind::Text,
    }
}

const fn integer(
    field: &'static str,
    synonyms: &'static [&'static str],
    required: bool,
) -> ColumnSpec {
    ColumnSpec {
        field,
        synonyms,
        required,
        kind: ColumnKind::Integer,
    }
}

/// Extraction + validation profile for one upload kind
#[derive(Debug)]
pub struct TypeProfile {
    pub columns: &'static [ColumnSpec],
    /// Fields forming the natural key within a bimestre
    pub key_fields: &'static [&'static str],
    /// Fields that must match the Chilean RUT format
    pub rut_fields: &'static [&'static str],
}

pub static ADOL: TypeProfile = TypeProfile {
    columns: &[
        text("sigla", &["sigla", "codigo"], true),
        text("descripcion", &["descripcion", "description"], true),
    ],
    key_fields: &["sigla"],
    rut_fields: &[],
};

pub static DOL: TypeProfile = TypeProfile {
    columns: &[
        text("plan", &["plan", "codigo_plan"], true),
        text("sigla", &["sigla", "codigo"], true),
        text("descripcion", &["descripcion", "description"], true),
    ],
    key_fields: &["sigla"],
    rut_fields: &[],
};

pub static NOMINA_DOCENTES: TypeProfile = TypeProfile {
    columns: &[
        text("docente", &["docente", "nombre", "name"], true),
        text("id_docente", &["id_docente", "id"], true),
        text("rut_docente", &["rut_docente", "rut"], true),
    ],
    key_fields: &["rut_docente"],
    rut_fields: &["rut_docente"],
};

pub static ESTRUCTURA_ACADEMICA: TypeProfile = TypeProfile {
    columns: &[
        text("plan", &["plan", "codigo_plan"], false),
        text("carrera", &["carrera", "career"], false),
        text("nivel", &["nivel", "level"], false),
        text("sigla", &["sigla", "codigo"], true),
        text("asignatura", &["asignatura", "nombre_asignatura"], true),
        integer("creditos", &["creditos", "credits"], false),
        text("categoria", &["categoria", "tipo"], false),
        integer("horas", &["horas", "horas_semanales"], false),
        text("duracion_carrera", &["duracion_carrera", "duracion"], false),
        text("clplestud", &["clplestud"], false),
        text("codigo_escuela", &["codigo_escuela"], false),
        text(
            "escuela_programa",
            &["escuela_programa", "escuela", "programa"],
            false,
        ),
    ],
    key_fields: &["sigla", "plan"],
    rut_fields: &[],
};

pub static REPORTE_CURSABLES: TypeProfile = TypeProfile {
    columns: &[
        text("rut", &["rut", "rut_estudiante"], true),
        text("plan", &["plan", "codigo_plan"], false),
        text("nivel", &["nivel", "level"], false),
        text("sigla", &["sigla", "codigo"], true),
        text("asignatura", &["asignatura", "nombre_asignatura"], false),
    ],
    key_fields: &["rut", "sigla"],
    rut_fields: &["rut"],
};

pub static OPTATIVOS: TypeProfile = TypeProfile {
    columns: &[
        text("plan", &["plan", "codigo_plan"], true),
        text("descripcion_plan", &["descripcion_plan"], false),
        text("nivel", &["nivel", "level"], true),
        text("grupo_asignatura", &["grupo_asignatura", "grupo"], false),
        text("jornada", &["jornada"], false),
        text("asignatura", &["asignatura", "sigla_asignatura"], true),
        text("descripcion_asignatura", &["descripcion_asignatura"], false),
        integer("vacantes", &["vacantes", "cupos"], true),
        integer("horas", &["horas"], false),
    ],
    key_fields: &["plan", "asignatura"],
    rut_fields: &[],
};

pub static VACANTES_INICIO: TypeProfile = TypeProfile {
    columns: &[
        text("codigo_plan", &["codigo_plan", "plan"], true),
        text("carrera", &["carrera"], false),
        text(
            "sigla_asignatura",
            &["sigla_asignatura", "sigla", "asignatura_sigla"],
            true,
        ),
        text("asignatura", &["asignatura", "nombre_asignatura"], false),
        text("nivel", &["nivel"], false),
        integer("creditos", &["creditos"], false),
        integer("vacantes", &["vacantes", "cupos"], true),
    ],
    key_fields: &["codigo_plan", "sigla_asignatura"],
    rut_fields: &[],
};

/// Profile lookup; the single registration point for spreadsheet kinds
pub fn profile_for(kind: UploadType) -> &'static TypeProfile {
    match kind {
        UploadType::Adol => &ADOL,
        UploadType::Dol => &DOL,
        UploadType::NominaDocentes => &NOMINA_DOCENTES,
        UploadType::EstructuraAcademica => &ESTRUCTURA_ACADEMICA,
        UploadType::ReporteCursables => &REPORTE_CURSABLES,
        UploadType::Optativos => &OPTATIVOS,
        UploadType::VacantesInicio => &VACANTES_INICIO,
    }
}

impl TypeProfile {
    /// Required field names, in column order
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.field)
    }

    /// Integer-typed field names, in column order
    pub fn integer_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Integer)
            .map(|c| c.field)
    }
}
