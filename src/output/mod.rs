//! Output layer: spreadsheet writers and archive packaging

mod archive;
mod csv;
mod xlsx;

use crate::config::OutputFormat;
use crate::error::Result;
use crate::model::Table;

pub use archive::{pack, ArchiveEntry};
pub use self::csv::CsvWriter;
pub use xlsx::XlsxWriter;

/// Trait for serializing a table into spreadsheet bytes
pub trait TableWriter {
    /// Write the header row then data rows as one spreadsheet
    fn write(&self, table: &Table, sheet_name: &str) -> Result<Vec<u8>>;
}

/// Factory for creating writers
pub struct WriterFactory;

impl WriterFactory {
    /// Create a writer based on format type
    pub fn create(format: OutputFormat) -> Box<dyn TableWriter> {
        match format {
            OutputFormat::Xlsx => Box::new(XlsxWriter::new()),
            OutputFormat::Csv => Box::new(CsvWriter),
        }
    }
}
