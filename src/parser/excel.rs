//! Excel file parser (xlsx, xlsm, xls, ods)

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use tracing::debug;

use crate::error::{Result, SheetError};
use crate::model::{CellValue, Column, Row, Table};

use super::TableReader;

/// Parser for spreadsheet workbooks. Reads only the first sheet.
pub struct ExcelReader;

impl TableReader for ExcelReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::Parse("No sheets found in workbook".to_string()))?;

        let values: Range<Data> = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| SheetError::Parse(format!("Failed to read sheet {}: {}", sheet_name, e)))?;

        // Not every format exposes formulas; fall back to plain values
        let formulas: Range<String> = workbook
            .worksheet_formula(&sheet_name)
            .unwrap_or_else(|_| Range::empty());

        debug!(sheet = %sheet_name, size = ?values.get_size(), "read worksheet");
        parse_range(&values, &formulas)
    }
}

fn parse_range(values: &Range<Data>, formulas: &Range<String>) -> Result<Table> {
    let (last_row, last_col) = match (values.end(), formulas.end()) {
        (Some((vr, vc)), Some((fr, fc))) => (vr.max(fr), vc.max(fc)),
        (Some(end), None) | (None, Some(end)) => end,
        (None, None) => return Err(SheetError::Parse("Empty sheet".to_string())),
    };

    let read_row = |row: u32| -> Vec<Option<CellValue>> {
        (0..=last_col)
            .map(|col| read_cell(values, formulas, (row, col)))
            .collect()
    };

    // Sheet row 0 is the header
    let mut columns = Vec::new();
    for (i, cell) in read_row(0).into_iter().enumerate() {
        match cell {
            None => {}
            Some(CellValue::Text(name)) if name.is_empty() => {}
            Some(CellValue::Text(name)) => columns.push(Column::new(name, i)),
            Some(other) => {
                return Err(SheetError::Parse(format!(
                    "Header cell in column {} is not text: {:?}",
                    i + 1,
                    other
                )))
            }
        }
    }
    if columns.is_empty() {
        return Err(SheetError::Parse("No header row found".to_string()));
    }

    let mut table = Table::new(columns);
    let width = table.width();
    for row in 1..=last_row {
        let mut row = Row::new(read_row(row), row as usize + 1);
        if row.is_vacant() {
            continue;
        }
        row.fill_blanks(width);
        table.add_row(row);
    }

    Ok(table)
}

/// Read one cell at an absolute sheet position
fn read_cell(
    values: &Range<Data>,
    formulas: &Range<String>,
    pos: (u32, u32),
) -> Option<CellValue> {
    if let Some(formula) = formulas.get_value(pos).filter(|f| !f.is_empty()) {
        return Some(CellValue::Formula(formula.clone()));
    }
    values.get_value(pos).and_then(convert_cell)
}

fn convert_cell(cell: &Data) -> Option<CellValue> {
    let value = match cell {
        Data::Empty => return None,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        // Dates are numeric cells with a date format; keep the serial value
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(_) | Data::DurationIso(_) | Data::Error(_) => CellValue::Empty,
    };
    Some(value)
}
