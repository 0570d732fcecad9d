//! Tabular input parsing
//!
//! Uploads arrive as Excel workbooks (xls/xlsx/ods, read with calamine) or
//! CSV. Both are reduced to a [`Sheet`]: a header row plus data rows of
//! loosely-typed cells. Extractors and tests work on `Sheet` only and never
//! touch the raw bytes.

use crate::utils::error::{AppError, Result};
use calamine::{Data, Reader};
use std::io::Cursor;

/// A single cell value as read from the source file
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as text. Whole numbers drop the trailing `.0` Excel
    /// adds to numeric cells.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            CellValue::Number(n) => {
                if n.fract() == 0.0 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Empty => None,
        }
    }

    /// Interpret the cell as an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 => Some(*n as i64),
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }
}

/// A parsed tabular file: one header row plus data rows
#[derive(Debug, Clone)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }
}

/// Parse uploaded bytes into a [`Sheet`].
///
/// `.csv` files go through the csv reader; everything else is handed to
/// calamine, which auto-detects xls/xlsx/xlsb/ods.
pub fn parse_upload(file_name: &str, bytes: &[u8]) -> Result<Sheet> {
    let sheet = if file_name.to_ascii_lowercase().ends_with(".csv") {
        parse_csv(bytes)?
    } else {
        parse_workbook(bytes)?
    };

    if sheet.rows.is_empty() {
        return Err(AppError::Spreadsheet(
            "El archivo debe contener al menos una fila de encabezados y una fila de datos"
                .to_string(),
        ));
    }
    Ok(sheet)
}

fn parse_workbook(bytes: &[u8]) -> Result<Sheet> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| AppError::Spreadsheet(format!("No se pudo abrir el archivo: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first = sheet_names
        .first()
        .ok_or_else(|| AppError::Spreadsheet("El archivo no contiene hojas".to_string()))?;

    let range = workbook
        .worksheet_range(first)
        .map_err(|e| AppError::Spreadsheet(format!("No se pudo leer la hoja '{}': {}", first, e)))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| {
            AppError::Spreadsheet("El archivo no contiene una fila de encabezados".to_string())
        })?
        .iter()
        .map(|cell| match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();

    let data_rows = rows
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();

    Ok(Sheet::new(headers, data_rows))
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s.trim().to_string())
            }
        }
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}

fn parse_csv(bytes: &[u8]) -> Result<Sheet> {
    // Spanish-locale exports commonly use ';'; pick whichever separator
    // dominates the header line.
    let first_line = bytes
        .split(|b| *b == b'\n')
        .next()
        .unwrap_or_default();
    let semicolons = first_line.iter().filter(|b| **b == b';').count();
    let commas = first_line.iter().filter(|b| **b == b',').count();
    let delimiter = if semicolons >= commas { b';' } else { b',' };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(bytes);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(Ok(record)) => record.iter().map(|s| s.trim().to_string()).collect(),
        Some(Err(e)) => {
            return Err(AppError::Spreadsheet(format!(
                "No se pudo leer el archivo CSV: {}",
                e
            )))
        }
        None => {
            return Err(AppError::Spreadsheet(
                "El archivo no contiene una fila de encabezados".to_string(),
            ))
        }
    };

    let mut rows = Vec::new();
    for record in records {
        let record =
            record.map_err(|e| AppError::Spreadsheet(format!("Fila CSV inválida: {}", e)))?;
        rows.push(
            record
                .iter()
                .map(|s| {
                    let trimmed = s.trim();
                    if trimmed.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(trimmed.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(Sheet::new(headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_rendering() {
        assert_eq!(
            CellValue::Number(42.0).as_text(),
            Some("42".to_string()),
            "whole floats render without decimal point"
        );
        assert_eq!(CellValue::Number(3.5).as_text(), Some("3.5".to_string()));
        assert_eq!(CellValue::Text("  x  ".into()).as_text(), Some("x".into()));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_cell_integer_parsing() {
        assert_eq!(CellValue::Number(7.0).as_integer(), Some(7));
        assert_eq!(CellValue::Number(7.5).as_integer(), None);
        assert_eq!(CellValue::Text("12".into()).as_integer(), Some(12));
        assert_eq!(CellValue::Text("doce".into()).as_integer(), None);
        assert_eq!(CellValue::Empty.as_integer(), None);
    }

    #[test]
    fn test_parse_csv_semicolon() {
        let bytes = b"SIGLA;DESCRIPCION\nMAT101;Matematicas I\nFIS100;Fisica General\n";
        let sheet = parse_upload("adol.csv", bytes).unwrap();
        assert_eq!(sheet.headers, vec!["SIGLA", "DESCRIPCION"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0][0], CellValue::Text("MAT101".into()));
    }

    #[test]
    fn test_parse_csv_comma() {
        let bytes = b"sigla,descripcion\nMAT101,Algebra\n";
        let sheet = parse_upload("adol.csv", bytes).unwrap();
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0][1], CellValue::Text("Algebra".into()));
    }

    #[test]
    fn test_parse_csv_without_data_rows_is_rejected() {
        let bytes = b"sigla;descripcion\n";
        let err = parse_upload("adol.csv", bytes).unwrap_err();
        assert!(err.to_string().contains("al menos una fila"));
    }

    #[test]
    fn test_parse_workbook_rejects_garbage() {
        let err = parse_upload("adol.xlsx", b"not a workbook").unwrap_err();
        assert!(matches!(err, AppError::Spreadsheet(_)));
    }
}
