//! CSV output format

use crate::error::{Result, SheetError};
use crate::model::{CellValue, Table};
use crate::parser::parse_cell_value;

use super::TableWriter;

/// Writes a table as comma-separated text. Formulas are written as `=expr`;
/// text that looks like a number, boolean or formula is written as `'text`.
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn write(&self, table: &Table, _sheet_name: &str) -> Result<Vec<u8>> {
        let width = table
            .rows
            .iter()
            .map(|row| row.cells.len())
            .chain(std::iter::once(table.width()))
            .max()
            .unwrap_or(0);

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        let mut header = vec![String::new(); width];
        for column in &table.columns {
            header[column.index] = column.name.clone();
        }
        writer.write_record(&header).map_err(serialization)?;

        for row in &table.rows {
            let record: Vec<String> = row
                .cells
                .iter()
                .map(|cell| cell.as_ref().map(field_text).unwrap_or_default())
                .collect();
            writer.write_record(&record).map_err(serialization)?;
        }

        writer
            .into_inner()
            .map_err(|e| SheetError::Serialization(e.to_string()))
    }
}

/// Field text for a cell. Text that would read back as another type gets
/// a leading apostrophe.
fn field_text(cell: &CellValue) -> String {
    match cell {
        CellValue::Text(s) if !s.is_empty() && parse_cell_value(s).as_ref() != Some(cell) => {
            format!("'{}", s)
        }
        other => other.to_string(),
    }
}

fn serialization(e: csv::Error) -> SheetError {
    SheetError::Serialization(e.to_string())
}
