//! Chunk writers: one output file per planned row range

use crate::config::{OutputFormat, SplitMode};
use crate::error::{Error, Result};
use crate::planner::ChunkRange;
use crate::table::{CellValue, Row, Table};
use chrono::NaiveTime;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use std::fs::{self, File};
use std::path::Path;
use tracing::warn;

/// Name of the sheet holding the chunk rows in xlsx output
pub const SHEET_NAME: &str = "Sheet1";

/// Number format for date cells without a time of day
const DATE_FORMAT: &str = "yyyy-mm-dd";
/// Number format for date cells with a time of day
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Output file name for a chunk.
///
/// `{base}_chunk_{NN}.{ext}` in default mode, `{base}_part_{NN}.{ext}` in
/// custom mode. The index is padded to two digits and grows past 99.
pub fn chunk_file_name(
    base_name: &str,
    mode: SplitMode,
    index: usize,
    format: OutputFormat,
) -> String {
    format!(
        "{}_{}_{:02}.{}",
        base_name,
        mode.name_infix(),
        index,
        format.extension()
    )
}

/// Write the rows of `range` (plus the header) to `path`.
///
/// Returns the number of data rows written. If the file cannot be created
/// nothing on disk is touched; a file that was created but not completed
/// is removed.
pub fn write_chunk(
    table: &Table,
    range: &ChunkRange,
    path: &Path,
    format: OutputFormat,
) -> Result<usize> {
    let rows = table.slice(range);
    let file = File::create(path).map_err(|source| Error::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;

    let result = match format {
        OutputFormat::Csv => write_csv(table, rows, file, path),
        OutputFormat::Xlsx => write_xlsx(table, rows, file, path),
    };

    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "failed to remove partial chunk file");
        }
    }

    result.map(|()| rows.len())
}

fn write_csv(table: &Table, rows: &[Row], file: File, path: &Path) -> Result<()> {
    let csv_err = |source| Error::CsvWrite {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(table.header()).map_err(csv_err)?;

    for row in rows {
        writer
            .write_record(row.cells.iter().map(CellValue::to_string_value))
            .map_err(csv_err)?;
    }

    writer.flush().map_err(|e| csv_err(e.into()))?;
    Ok(())
}

fn write_xlsx(table: &Table, rows: &[Row], file: File, path: &Path) -> Result<()> {
    build_workbook(table, rows)
        .and_then(|mut workbook| workbook.save_to_writer(file))
        .map_err(|source| Error::XlsxWrite {
            path: path.to_path_buf(),
            source,
        })
}

struct CellFormats {
    date: Format,
    datetime: Format,
}

fn build_workbook(table: &Table, rows: &[Row]) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for column in &table.columns {
        let col = col_num(column.index)?;
        worksheet.write_string_with_format(0, col, &column.name, &header_format)?;
    }

    let formats = CellFormats {
        date: Format::new().set_num_format(DATE_FORMAT),
        datetime: Format::new().set_num_format(DATETIME_FORMAT),
    };
    for (offset, row) in rows.iter().enumerate() {
        let row_num = row_num(offset + 1)?;
        for (index, cell) in row.cells.iter().enumerate() {
            write_cell(worksheet, row_num, col_num(index)?, cell, &formats)?;
        }
    }

    Ok(workbook)
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    cell: &CellValue,
    formats: &CellFormats,
) -> std::result::Result<(), XlsxError> {
    match cell {
        CellValue::Integer(i) => worksheet.write_number(row, col, *i as f64)?,
        CellValue::Float(f) => worksheet.write_number(row, col, *f)?,
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b)?,
        CellValue::DateTime(dt) => {
            let format = if dt.time() == NaiveTime::MIN {
                &formats.date
            } else {
                &formats.datetime
            };
            worksheet.write_datetime_with_format(row, col, dt, format)?
        }
        CellValue::String(s) => worksheet.write_string(row, col, s)?,
        CellValue::Empty => return Ok(()),
    };
    Ok(())
}

fn row_num(index: usize) -> std::result::Result<RowNum, XlsxError> {
    RowNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}

fn col_num(index: usize) -> std::result::Result<ColNum, XlsxError> {
    ColNum::try_from(index).map_err(|_| XlsxError::RowColumnLimitError)
}
