//! CSV file parser

use crate::error::{Result, SheetError};
use crate::model::{CellValue, Column, Row, Table};

use super::TableReader;

/// Parser for comma-separated text
pub struct CsvReader;

impl TableReader for CsvReader {
    fn read(&self, bytes: &[u8]) -> Result<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(bytes);

        let mut records = csv_reader.records();

        // Read headers
        let header = records
            .next()
            .ok_or_else(|| SheetError::Parse("No header row found".to_string()))??;
        let columns: Vec<Column> = header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(i, name)| Column::new(name, i))
            .collect();
        if columns.is_empty() {
            return Err(SheetError::Parse("No header row found".to_string()));
        }

        let mut table = Table::new(columns);
        let width = table.width();

        // Read rows
        for (line_num, result) in records.enumerate() {
            let record = result?;
            let mut row = Row::new(
                record.iter().map(parse_cell_value).collect(),
                line_num + 2, // +2 for 1-indexing and header
            );
            if !row.is_vacant() {
                row.fill_blanks(width);
                table.add_row(row);
            }
        }

        Ok(table)
    }
}

/// Parse a string value into a CellValue with type inference.
///
/// A leading apostrophe marks literal text: `'42` is the text "42".
pub(crate) fn parse_cell_value(s: &str) -> Option<CellValue> {
    if s.is_empty() {
        return None;
    }

    if let Some(text) = s.strip_prefix('\'') {
        return Some(CellValue::Text(text.to_string()));
    }

    if let Some(expr) = s.strip_prefix('=') {
        return Some(CellValue::Formula(expr.to_string()));
    }

    if s == "true" || s == "TRUE" {
        return Some(CellValue::Boolean(true));
    }
    if s == "false" || s == "FALSE" {
        return Some(CellValue::Boolean(false));
    }

    // Only plain decimal numbers; "inf"/"NaN" stay text
    let looks_numeric = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if looks_numeric {
        if let Ok(f) = s.parse::<f64>() {
            return Some(CellValue::Number(f));
        }
    }

    Some(CellValue::Text(s.to_string()))
}
