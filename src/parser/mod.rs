//! Parser layer for reading spreadsheet byte streams

mod csv;
mod excel;

use crate::error::{Result, SheetError};
use crate::model::Table;

pub(crate) use self::csv::parse_cell_value;
pub use self::csv::CsvReader;
pub use self::excel::ExcelReader;

/// Trait for parsing a spreadsheet byte stream into a Table
pub trait TableReader: Send + Sync {
    /// Parse the first sheet; the first row is the header
    fn read(&self, bytes: &[u8]) -> Result<Table>;
}

/// Input formats recognised by content sniffing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Zip-based workbook (xlsx, xlsm, ods)
    Workbook,
    /// Legacy OLE workbook (xls)
    LegacyWorkbook,
    Csv,
}

/// Detect input format from leading bytes
pub fn detect_format(bytes: &[u8]) -> Option<InputFormat> {
    if bytes.is_empty() {
        return None;
    }

    if bytes.starts_with(b"PK\x03\x04") {
        return Some(InputFormat::Workbook);
    }

    if bytes.starts_with(b"\xD0\xCF\x11\xE0") {
        return Some(InputFormat::LegacyWorkbook);
    }

    // Default to CSV
    Some(InputFormat::Csv)
}

/// Picks a reader for each input by sniffing its content
pub struct ReaderFactory {
    excel: ExcelReader,
    csv: CsvReader,
}

impl Default for ReaderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ReaderFactory {
    pub fn new() -> Self {
        Self {
            excel: ExcelReader,
            csv: CsvReader,
        }
    }

    /// Get a reader for the given content
    pub fn get_reader(&self, bytes: &[u8]) -> Result<&dyn TableReader> {
        match detect_format(bytes) {
            Some(InputFormat::Workbook | InputFormat::LegacyWorkbook) => Ok(&self.excel),
            Some(InputFormat::Csv) => Ok(&self.csv),
            None => Err(SheetError::Parse("Input is empty".to_string())),
        }
    }

    /// Parse a byte stream using the appropriate reader
    pub fn read(&self, bytes: &[u8]) -> Result<Table> {
        self.get_reader(bytes)?.read(bytes)
    }
}
