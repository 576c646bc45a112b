//! Merge and split operations over raw spreadsheet bytes

use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::engine::{join_tables, partition_by_column};
use crate::error::{Result, SheetError};
use crate::model::Table;
use crate::output::{pack, ArchiveEntry, TableWriter, WriterFactory};
use crate::parser::ReaderFactory;

/// Summary of one archive entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub name: String,
    /// Data rows, excluding the header
    pub rows: usize,
}

/// Summary of a completed operation
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub operation: &'static str,
    pub key_column: String,
    /// Header of the output spreadsheets
    pub schema: Vec<String>,
    pub entries: Vec<EntryReport>,
}

/// Archive bytes plus what went into them
#[derive(Debug)]
pub struct Output {
    pub archive: Vec<u8>,
    pub report: Report,
}

/// Join two spreadsheets on the key column into `union` and `intersection`
/// entries.
pub fn merge(inputs: &[Vec<u8>], config: &Config) -> Result<Output> {
    let [first, second] = inputs else {
        return Err(SheetError::InvalidArgumentCount {
            operation: "merge",
            expected: 2,
            actual: inputs.len(),
        });
    };

    let readers = ReaderFactory::new();
    let a = readers.read(first)?;
    let b = readers.read(second)?;

    let joined = join_tables(&a, &config.key_column, &b, config.second_key_column())?;

    let mut builder = ArchiveBuilder::new(config);
    builder.add("union", &joined.union, &config.union_sheet)?;
    builder.add("intersection", &joined.intersection, &config.intersection_sheet)?;

    builder.finish("merge", joined.schema)
}

/// Partition one spreadsheet into one entry per normalized key value
pub fn split(inputs: &[Vec<u8>], config: &Config) -> Result<Output> {
    let [input] = inputs else {
        return Err(SheetError::InvalidArgumentCount {
            operation: "split",
            expected: 1,
            actual: inputs.len(),
        });
    };

    let table = ReaderFactory::new().read(input)?;
    let groups = partition_by_column(&table, &config.key_column)?;

    let mut builder = ArchiveBuilder::new(config);
    for (key, group) in &groups {
        builder.add(key, group, &config.split_sheet)?;
    }

    let schema = table.header_names().into_iter().map(str::to_string).collect();
    builder.finish("split", schema)
}

/// Serializes tables and collects them as archive entries
struct ArchiveBuilder<'a> {
    config: &'a Config,
    writer: Box<dyn TableWriter>,
    entries: Vec<ArchiveEntry>,
    reports: Vec<EntryReport>,
}

impl<'a> ArchiveBuilder<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            config,
            writer: WriterFactory::create(config.output_format),
            entries: Vec::new(),
            reports: Vec::new(),
        }
    }

    fn add(&mut self, stem: &str, table: &Table, sheet_name: &str) -> Result<()> {
        let name = format!("{}.{}", stem, self.config.output_format.extension());
        let payload = self.writer.write(table, sheet_name)?;
        self.reports.push(EntryReport {
            name: name.clone(),
            rows: table.row_count(),
        });
        self.entries.push(ArchiveEntry::new(name, payload));
        Ok(())
    }

    fn finish(self, operation: &'static str, schema: Vec<String>) -> Result<Output> {
        let archive = pack(&self.entries)?;
        info!(
            operation,
            entries = self.entries.len(),
            bytes = archive.len(),
            "built archive"
        );
        Ok(Output {
            archive,
            report: Report {
                operation,
                key_column: self.config.key_column.clone(),
                schema,
                entries: self.reports,
            },
        })
    }
}
