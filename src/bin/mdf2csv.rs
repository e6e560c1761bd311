use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mdf_extract::{
    ExtractOptions, LINE_SCALE_DEFAULT, MdfExtraction, extract_mdf, write_csv, write_xlsx,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "mdf2csv",
    version,
    about = "Extract MDF Agreement header fields and line items from text PDFs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract records and write CSV (and optionally XLSX) output.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
struct ExtractArgs {
    /// Input PDF path.
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV path.
    #[arg(short, long)]
    output: PathBuf,

    /// Also write an XLSX workbook to this path.
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Table detection sensitivity (5-60). Higher values split rows
    /// into cells more aggressively; adjust when rows merge or split
    /// oddly.
    #[arg(long, default_value_t = LINE_SCALE_DEFAULT)]
    line_scale: u32,

    /// Enable verbose warning output.
    #[arg(short, long)]
    verbose: bool,
}

fn log_result(result: &MdfExtraction, verbose: bool) {
    let display = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };
    eprintln!(
        "PO Number: {}  Plan Period: {}  Partner: {}",
        display(&result.headers.po_number),
        display(&result.headers.plan_period),
        display(&result.headers.partner),
    );
    eprintln!(
        "{} record(s) from {} table(s)",
        result.records.len(),
        result.table_count
    );

    if result.warnings.is_empty() {
        return;
    }
    eprintln!("warning: {} issue(s) detected", result.warnings.len());
    if verbose {
        for warning in &result.warnings {
            eprintln!(
                "  - {:?} page={:?} table_id={:?}: {}",
                warning.code, warning.page, warning.table_id, warning.message
            );
        }
    }
}

fn run_extract(args: &ExtractArgs) -> Result<MdfExtraction> {
    let options = ExtractOptions {
        line_scale: args.line_scale,
        ..ExtractOptions::default()
    };

    let result = extract_mdf(&args.input, &options)
        .with_context(|| format!("failed to extract records from '{}'", args.input.display()))?;

    write_csv(&args.output, &result)
        .with_context(|| format!("failed to write CSV to '{}'", args.output.display()))?;
    if let Some(xlsx_path) = &args.xlsx {
        write_xlsx(xlsx_path, &result)
            .with_context(|| format!("failed to write XLSX to '{}'", xlsx_path.display()))?;
    }

    Ok(result)
}

fn main() -> ExitCode {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mdf_extract=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract(args) => match run_extract(&args) {
            Ok(result) => {
                log_result(&result, args.verbose);
                if result.records.is_empty() {
                    ExitCode::from(2)
                } else {
                    ExitCode::SUCCESS
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                ExitCode::from(1)
            }
        },
    }
}
