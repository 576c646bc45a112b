//! Configuration handling for sheetmerge

/// Spreadsheet format of the archive entries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
}

impl OutputFormat {
    /// File extension used for archive entry names
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Configuration for merge and split operations
#[derive(Debug, Clone)]
pub struct Config {
    /// Column whose values form the join/partition key
    pub key_column: String,
    /// Key column for the second merge input, when its header is named differently
    pub key_column_b: Option<String>,
    /// Format of the spreadsheets inside the archive
    pub output_format: OutputFormat,
    /// Sheet name of the union output
    pub union_sheet: String,
    /// Sheet name of the intersection output
    pub intersection_sheet: String,
    /// Sheet name of every split output
    pub split_sheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            key_column: String::new(),
            key_column_b: None,
            output_format: OutputFormat::default(),
            union_sheet: "Union".to_string(),
            intersection_sheet: "Intersection".to_string(),
            split_sheet: "Sheet1".to_string(),
        }
    }
}

impl Config {
    /// Create a new Config keyed on `key_column`
    pub fn new(key_column: impl Into<String>) -> Self {
        Self {
            key_column: key_column.into(),
            ..Default::default()
        }
    }

    /// Use a different key column name for the second merge input
    pub fn with_key_column_b(mut self, column: impl Into<String>) -> Self {
        self.key_column_b = Some(column.into());
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Key column applied to the second merge input
    pub fn second_key_column(&self) -> &str {
        self.key_column_b.as_deref().unwrap_or(&self.key_column)
    }
}
