//! sheetmerge - Join and split spreadsheets on a key column

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use sheetmerge::config::{Config, OutputFormat};
use sheetmerge::{merge, split, Output, SheetError};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Xlsx,
    Csv,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Xlsx => OutputFormat::Xlsx,
            CliOutputFormat::Csv => OutputFormat::Csv,
        }
    }
}

/// Join and split spreadsheets on a key column
#[derive(Parser, Debug)]
#[command(name = "sheetmerge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Join two files into union and intersection spreadsheets
    Merge {
        /// First file
        first: PathBuf,

        /// Second file
        second: PathBuf,

        /// Key column name for the second file, if it differs
        #[arg(long)]
        column_b: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Split one file into a spreadsheet per key value
    Split {
        /// File to split
        file: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Key column name (case-insensitive)
    #[arg(short, long)]
    column: String,

    /// Format of the spreadsheets inside the archive
    #[arg(short, long, value_enum, default_value = "xlsx")]
    format: CliOutputFormat,

    /// Path of the zip archive to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON report of the archive contents
    #[arg(long)]
    report: bool,
}

impl CommonArgs {
    fn config(&self) -> Config {
        Config::new(self.column.clone()).with_output_format(self.format.into())
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<SheetError>() {
                Some(sheet_error) if !sheet_error.is_client_error() => ExitCode::from(3),
                _ => ExitCode::from(2),
            }
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let (output, common, default_name) = match cli.command {
        Command::Merge {
            first,
            second,
            column_b,
            common,
        } => {
            let mut config = common.config();
            if let Some(column_b) = column_b {
                config = config.with_key_column_b(column_b);
            }
            let inputs = vec![read_input(&first)?, read_input(&second)?];
            (merge(&inputs, &config)?, common, "merged_intersected_files.zip")
        }
        Command::Split { file, common } => {
            let inputs = vec![read_input(&file)?];
            (split(&inputs, &common.config())?, common, "split_files.zip")
        }
    };

    let path = common
        .output
        .unwrap_or_else(|| PathBuf::from(default_name));
    write_output(&output, &path)?;

    if common.report {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))
}

/// Failing to store the archive is our fault, not the caller's
fn write_output(output: &Output, path: &Path) -> Result<()> {
    std::fs::write(path, &output.archive)
        .map_err(|e| SheetError::Serialization(e.to_string()))
        .with_context(|| format!("Failed to write archive: {}", path.display()))
}
