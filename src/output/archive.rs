//! Zip packaging of output spreadsheets

use std::io::{Cursor, Write};

use rustc_hash::FxHashSet;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Result, SheetError};

/// One named payload inside the output archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub payload: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// Bundle entries into a deflate-compressed zip, in input order.
///
/// Entry names must be unique.
pub fn pack(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let mut seen = FxHashSet::default();
    if let Some(dup) = entries.iter().find(|e| !seen.insert(e.name.as_str())) {
        return Err(SheetError::Serialization(format!(
            "Duplicate archive entry: {}",
            dup.name
        )));
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        zip.start_file(entry.name.as_str(), options)?;
        zip.write_all(&entry.payload)
            .map_err(|e| SheetError::Serialization(e.to_string()))?;
    }

    Ok(zip.finish()?.into_inner())
}
