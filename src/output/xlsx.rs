//! XLSX output format

use rust_xlsxwriter::{ColNum, RowNum, Workbook, Worksheet};

use crate::error::{Result, SheetError};
use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes a table as a single-sheet workbook
pub struct XlsxWriter;

impl XlsxWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for XlsxWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for XlsxWriter {
    fn write(&self, table: &Table, sheet_name: &str) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for column in &table.columns {
            worksheet.write_string(0, col_num(column.index)?, &column.name)?;
        }

        for (i, row) in table.rows.iter().enumerate() {
            let row_num = row_num(i + 1)?;
            for (col, cell) in row.cells.iter().enumerate() {
                if let Some(cell) = cell {
                    write_cell(worksheet, row_num, col_num(col)?, cell)?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn write_cell(sheet: &mut Worksheet, row: RowNum, col: ColNum, cell: &CellValue) -> Result<()> {
    match cell {
        CellValue::Text(s) => sheet.write_string(row, col, s)?,
        CellValue::Number(n) => sheet.write_number(row, col, *n)?,
        CellValue::Boolean(b) => sheet.write_boolean(row, col, *b)?,
        CellValue::Formula(expr) => sheet.write_formula(row, col, expr.as_str())?,
        // Excel keeps no empty strings; blank cells read back as blank text
        CellValue::Empty => sheet.write_string(row, col, "")?,
    };
    Ok(())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index)
        .map_err(|_| SheetError::Serialization(format!("Row {} exceeds sheet limits", index + 1)))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| {
        SheetError::Serialization(format!("Column {} exceeds sheet limits", index + 1))
    })
}
