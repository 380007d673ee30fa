//! Import/export module - CSV and JSON codecs and atomic ledger imports.

mod csv_codec;
mod import_export_model;
mod json_codec;


pub use csv_codec::{decode_csv_bytes, export_csv, ledger_from_csv, parse_csv};
pub use import_export_model::{ImportMode, ImportSummary};
pub use json_codec::{export_json, ledger_from_json, parse_json};

use log::info;

use crate::errors::Result;
use crate::ledger::{Ledger, Position};

/// Imports CSV text into the ledger. Nothing changes unless every row is
/// valid.
pub fn import_csv(ledger: &mut Ledger, text: &str, mode: ImportMode) -> Result<ImportSummary> {
    let positions = parse_csv(text)?;
    Ok(commit_import(ledger, positions, mode))
}

/// Imports raw CSV bytes in UTF-8 or Shift_JIS. Nothing changes unless the
/// bytes decode and every row is valid.
pub fn import_csv_bytes(
    ledger: &mut Ledger,
    bytes: &[u8],
    mode: ImportMode,
) -> Result<ImportSummary> {
    let text = decode_csv_bytes(bytes)?;
    import_csv(ledger, &text, mode)
}

/// Imports JSON text into the ledger. Nothing changes unless every element
/// is valid.
pub fn import_json(ledger: &mut Ledger, text: &str, mode: ImportMode) -> Result<ImportSummary> {
    let positions = parse_json(text)?;
    Ok(commit_import(ledger, positions, mode))
}

/// Applies validated positions to a staged copy, then swaps it in.
fn commit_import(ledger: &mut Ledger, positions: Vec<Position>, mode: ImportMode) -> ImportSummary {
    let mut staged = match mode {
        ImportMode::Replace => Ledger::new(),
        ImportMode::Merge => ledger.clone(),
    };

    let rows = positions.len();
    let mut inserted = 0;
    let mut updated = 0;
    for position in positions {
        match staged.upsert_position(position) {
            Some(_) => updated += 1,
            None => inserted += 1,
        }
    }

    *ledger = staged;
    info!(
        "Imported {} rows ({:?}): {} inserted, {} updated, {} positions total",
        rows,
        mode,
        inserted,
        updated,
        ledger.len()
    );

    ImportSummary {
        mode,
        rows,
        inserted,
        updated,
        total_positions: ledger.len(),
    }
}
