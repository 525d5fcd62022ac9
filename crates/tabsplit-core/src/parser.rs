//! Loaders for CSV and spreadsheet files

use crate::error::{Error, Result};
use crate::scanner::{SourceFile, SourceFormat};
use crate::table::{CellValue, Column, Row, Table};
use calamine::{open_workbook_auto, Data, Reader};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load a source file into a Table, choosing the loader by format
pub fn load_table(source: &SourceFile) -> Result<Table> {
    let table = match source.format {
        SourceFormat::DelimitedText => parse_csv(&source.path)?,
        SourceFormat::Spreadsheet => parse_spreadsheet(&source.path)?,
    };

    debug!(
        path = %source.path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

/// Parse a CSV file into a Table
pub fn parse_csv<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_csv(BufReader::new(file), path.to_path_buf())
}

/// Parse CSV from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str) -> Result<Table> {
    read_csv(content.as_bytes(), PathBuf::from(source_name))
}

fn read_csv<R: Read>(reader: R, path: PathBuf) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are padded below
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.clone(),
        source: e,
    })?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.to_string(), i))
        .collect();

    if columns.is_empty() {
        return Err(Error::Parse {
            path,
            message: "no columns found in CSV".to_string(),
        });
    }

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        if record.len() > columns.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(Error::Parse {
                path,
                message: format!(
                    "expected {} fields in line {}, saw {}",
                    columns.len(),
                    line,
                    record.len()
                ),
            });
        }

        let mut cells: Vec<CellValue> = record.iter().map(CellValue::parse).collect();
        cells.resize(columns.len(), CellValue::Empty);
        rows.push(Row::new(cells));
    }

    Ok(Table {
        columns,
        rows,
        source_path: path,
    })
}

/// Parse the first sheet of an `.xlsx` or `.xls` workbook into a Table.
///
/// The first used row of the sheet is the header.
pub fn parse_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let spreadsheet_err = |source| Error::Spreadsheet {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(spreadsheet_err)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| Error::Parse {
            path: path.to_path_buf(),
            message: "workbook contains no sheets".to_string(),
        })?
        .map_err(spreadsheet_err)?;

    let mut sheet_rows = range.rows();
    let header = sheet_rows.next().ok_or_else(|| Error::Parse {
        path: path.to_path_buf(),
        message: "first sheet is empty".to_string(),
    })?;

    let columns: Vec<Column> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| Column::new(header_name(cell, i), i))
        .collect();

    let rows = sheet_rows
        .map(|cells| {
            let mut cells: Vec<CellValue> = cells.iter().map(convert_cell).collect();
            cells.resize(columns.len(), CellValue::Empty);
            Row::new(cells)
        })
        .collect();

    Ok(Table {
        columns,
        rows,
        source_path: path.to_path_buf(),
    })
}

fn header_name(cell: &Data, index: usize) -> String {
    match cell {
        Data::Empty => format!("Unnamed: {}", index),
        other => other.to_string(),
    }
}

fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map_or(CellValue::Float(dt.as_f64()), CellValue::DateTime),
        // durations keep their day count
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => s
            .parse()
            .map_or_else(|_| CellValue::String(s.clone()), CellValue::DateTime),
        Data::Empty => CellValue::Empty,
        other => CellValue::String(other.to_string()),
    }
}
