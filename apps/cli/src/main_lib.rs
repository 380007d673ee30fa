use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use assetplan_core::import_export::{
    export_csv, export_json, import_csv_bytes, import_json, ImportMode, ImportSummary,
};
use assetplan_core::portfolio::allocation::TargetAllocation;
use assetplan_core::portfolio::history::ValuationHistory;
use assetplan_core::{Category, Ledger};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cli::DataFormat;
use crate::config::LogFormat;

/// Installs the subscriber. Logs go to stderr so stdout stays machine-readable.
pub fn init_tracing(log_format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Text => registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }
    Ok(())
}

/// Reads the ledger file. A missing file is an empty ledger.
pub fn load_ledger(path: &Path) -> anyhow::Result<Ledger> {
    let mut ledger = Ledger::new();
    if !path.exists() {
        tracing::info!("Ledger {} not found, starting empty", path.display());
        return Ok(ledger);
    }

    let bytes =
        fs::read(path).with_context(|| format!("failed to read ledger {}", path.display()))?;
    read_into(&mut ledger, &bytes, DataFormat::from_path(path), ImportMode::Replace)
        .with_context(|| format!("invalid ledger {}", path.display()))?;
    Ok(ledger)
}

pub fn save_ledger(path: &Path, ledger: &Ledger) -> anyhow::Result<()> {
    let text = render_ledger(ledger, DataFormat::from_path(path))?;
    fs::write(path, text).with_context(|| format!("failed to write ledger {}", path.display()))?;
    tracing::info!("Saved {} positions to {}", ledger.len(), path.display());
    Ok(())
}

pub fn render_ledger(ledger: &Ledger, format: DataFormat) -> anyhow::Result<String> {
    let text = match format {
        DataFormat::Csv => export_csv(ledger)?,
        DataFormat::Json => export_json(ledger)?,
    };
    Ok(text)
}

/// Parses file bytes in the given format and applies them atomically. CSV
/// may be UTF-8 or Shift_JIS; JSON must be UTF-8.
pub fn read_into(
    ledger: &mut Ledger,
    bytes: &[u8],
    format: DataFormat,
    mode: ImportMode,
) -> anyhow::Result<ImportSummary> {
    let summary = match format {
        DataFormat::Csv => import_csv_bytes(ledger, bytes, mode)?,
        DataFormat::Json => {
            let text = std::str::from_utf8(bytes).context("JSON input is not valid UTF-8")?;
            import_json(ledger, text, mode)?
        }
    };
    Ok(summary)
}

pub fn load_targets(path: &Path) -> anyhow::Result<TargetAllocation> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read targets {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid targets {}", path.display()))
}

pub fn load_fixed_rule(path: &Path) -> anyhow::Result<BTreeMap<Category, f64>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read fixed rule {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid fixed rule {}", path.display()))
}

/// Reads the valuation history. A missing file is an empty history.
pub fn load_history(path: &Path) -> anyhow::Result<ValuationHistory> {
    if !path.exists() {
        return Ok(ValuationHistory::new());
    }
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read history {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid history {}", path.display()))
}

pub fn save_history(path: &Path, history: &ValuationHistory) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(history)?;
    fs::write(path, text)
        .with_context(|| format!("failed to write history {}", path.display()))?;
    tracing::info!("Saved {} snapshots to {}", history.len(), path.display());
    Ok(())
}
