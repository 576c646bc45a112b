//! Error taxonomy for merge and split operations

/// Errors produced while reading, combining or writing tables
#[derive(Debug, thiserror::Error)]
pub enum SheetError {
    /// Input is not a readable spreadsheet or lacks a header row
    #[error("Failed to parse input: {0}")]
    Parse(String),

    /// Key column has no case-insensitive match in a table's header row
    #[error("Column not found: {column} (available: {})", .available.join(", "))]
    ColumnNotFound {
        column: String,
        available: Vec<String>,
    },

    /// Output bytes could not be produced
    #[error("Failed to serialize output: {0}")]
    Serialization(String),

    /// Wrong number of input streams for an operation
    #[error("{operation} expects {expected} input(s), got {actual}")]
    InvalidArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },
}

impl SheetError {
    /// Whether the failure is the caller's fault (bad input) rather than ours
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SheetError::Serialization(_))
    }
}

impl From<calamine::Error> for SheetError {
    fn from(e: calamine::Error) -> Self {
        SheetError::Parse(e.to_string())
    }
}

impl From<csv::Error> for SheetError {
    fn from(e: csv::Error) -> Self {
        SheetError::Parse(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for SheetError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        SheetError::Serialization(e.to_string())
    }
}

impl From<zip::result::ZipError> for SheetError {
    fn from(e: zip::result::ZipError) -> Self {
        SheetError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(SheetError::Parse("bad".into()).is_client_error());
        assert!(SheetError::ColumnNotFound {
            column: "Zip".into(),
            available: vec!["ID".into()],
        }
        .is_client_error());
        assert!(SheetError::InvalidArgumentCount {
            operation: "merge",
            expected: 2,
            actual: 1,
        }
        .is_client_error());
        assert!(!SheetError::Serialization("disk full".into()).is_client_error());
    }

    #[test]
    fn test_column_not_found_message() {
        let err = SheetError::ColumnNotFound {
            column: "Zip".into(),
            available: vec!["ID".into(), "City".into()],
        };
        assert_eq!(err.to_string(), "Column not found: Zip (available: ID, City)");
    }
}
