//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// AssetPlan - portfolio ledger, allocation and projection
#[derive(Parser)]
#[command(name = "assetplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Ledger file (.csv or .json). Overrides AP_LEDGER_PATH
    #[arg(short, long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Target allocation JSON file. Overrides AP_TARGETS_PATH
    #[arg(short, long, global = true)]
    pub targets: Option<PathBuf>,

    /// Valuation history JSON file. Overrides AP_HISTORY_PATH
    #[arg(long, global = true)]
    pub history: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show category weights, account totals and the largest positions
    Allocation(AllocationArgs),

    /// Compare current weights against the target allocation
    Deviation,

    /// Project the ledger total forward month by month
    Project(ProjectArgs),

    /// Write the ledger as CSV or JSON
    Export(ExportArgs),

    /// Load positions from a CSV or JSON file into the ledger
    Import(ImportArgs),

    /// Record the current ledger totals in the valuation history
    Snapshot(SnapshotArgs),

    /// Show the total value trend from the valuation history
    Trend(TrendArgs),
}

#[derive(Args)]
pub struct AllocationArgs {
    /// Number of largest positions to list
    #[arg(long, default_value_t = 10)]
    pub top: usize,
}

#[derive(Args)]
pub struct ProjectArgs {
    /// Number of months to simulate
    #[arg(short, long, default_value_t = 24, allow_negative_numbers = true)]
    pub months: i32,

    /// Annual return as a fraction (0.05 = 5%)
    #[arg(short = 'r', long, default_value_t = 0.05, allow_negative_numbers = true)]
    pub annual_return: f64,

    /// Monthly contribution in JPY
    #[arg(short = 'c', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub monthly_contribution: f64,

    /// JSON file with a fixed JPY amount per category, used instead of the
    /// target allocation to split contributions
    #[arg(long)]
    pub fixed_rule: Option<PathBuf>,

    /// Also run the optimistic and pessimistic scenarios
    #[arg(long)]
    pub scenarios: bool,

    /// Rate offset for the scenarios. Overrides AP_SCENARIO_DELTA
    #[arg(long)]
    pub scenario_delta: Option<f64>,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: DataFormat,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ImportArgs {
    /// File to import; the format follows its extension
    pub input: PathBuf,

    /// How imported rows combine with the current ledger
    #[arg(short, long, value_enum, default_value = "replace")]
    pub mode: ImportModeArg,
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Snapshot date (YYYY-MM-DD); today when omitted
    #[arg(short, long)]
    pub date: Option<NaiveDate>,
}

#[derive(Args)]
pub struct TrendArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Period granularity
    #[arg(short, long, value_enum, default_value = "month")]
    pub group_by: GroupByArg,
}

/// Data file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataFormat {
    Csv,
    Json,
}

impl DataFormat {
    /// `.json` files are JSON, everything else is CSV.
    pub fn from_path(path: &std::path::Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DataFormat::Json,
            _ => DataFormat::Csv,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ImportModeArg {
    /// Imported rows become the whole ledger
    Replace,
    /// Imported rows are upserted by account and instrument
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupByArg {
    Day,
    Month,
}
