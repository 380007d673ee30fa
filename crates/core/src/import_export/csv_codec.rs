//! CSV codec for the ledger.
//!
//! The format has a fixed header `account,instrument,category,valuationJPY`.
//! Rows are exported in canonical order; imports are all-or-nothing.

use csv::{ErrorKind, ReaderBuilder, StringRecord, Trim, WriterBuilder};
use encoding_rs::SHIFT_JIS;
use log::debug;

use crate::constants::CSV_HEADER;
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, NewPosition, Position};

/// Serializes the ledger with one row per position.
pub fn export_csv(ledger: &Ledger) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for position in ledger.sorted() {
        writer.write_record([
            position.account.as_str(),
            position.instrument.as_str(),
            position.category.as_str(),
            position.valuation_jpy.to_string().as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Serialization(e.to_string()))
}

/// Decodes raw CSV bytes. UTF-8 (with or without BOM) is tried first, then
/// Shift_JIS as written by Japanese spreadsheet and broker exports. The
/// Shift_JIS decoder is the WHATWG one, which also covers cp932.
pub fn decode_csv_bytes(bytes: &[u8]) -> Result<String> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    match SHIFT_JIS.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => {
            debug!("Decoded {} CSV bytes as Shift_JIS", bytes.len());
            Ok(text.into_owned())
        }
        None => Err(Error::import(0, "file encoding is neither UTF-8 nor Shift_JIS")),
    }
}

/// Parses and validates every row. The first bad row aborts the whole parse
/// with its 1-based line number (the header is line 1).
pub fn parse_csv(text: &str) -> Result<Vec<Position>> {
    // Spreadsheet exports often start with a UTF-8 BOM
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| to_import_error(&e, 1))?;
    validate_header(headers)?;

    let mut positions = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| to_import_error(&e, positions.len() + 2))?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(positions.len() + 2);

        let input = record_to_new_position(&record, row)?;
        let position = Position::try_from(input).map_err(|e| Error::import(row, e.to_string()))?;
        positions.push(position);
    }

    debug!("Parsed {} positions from CSV", positions.len());
    Ok(positions)
}

/// Builds a ledger from CSV text. Duplicate identities resolve to the last
/// row.
pub fn ledger_from_csv(text: &str) -> Result<Ledger> {
    Ok(parse_csv(text)?.into_iter().collect())
}

fn validate_header(headers: &StringRecord) -> Result<()> {
    let matches = headers.len() == CSV_HEADER.len()
        && headers.iter().zip(CSV_HEADER).all(|(found, expected)| found == expected);
    if !matches {
        return Err(Error::import(
            1,
            format!(
                "expected header '{}', found '{}'",
                CSV_HEADER.join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }
    Ok(())
}

fn record_to_new_position(record: &StringRecord, row: usize) -> Result<NewPosition> {
    let field = |index: usize| record.get(index).unwrap_or_default();
    Ok(NewPosition {
        account: field(0).to_string(),
        instrument: field(1).to_string(),
        category: field(2).to_string(),
        valuation_jpy: parse_valuation(field(3)).map_err(|reason| Error::import(row, reason))?,
    })
}

/// Parses a whole-yen amount, tolerating thousands separators ("1,200,000").
fn parse_valuation(value: &str) -> std::result::Result<i64, String> {
    let cleaned: String = value
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() || cleaned == "-" {
        return Err("valuationJPY is required".to_string());
    }
    cleaned
        .parse::<i64>()
        .map_err(|_| format!("valuationJPY '{}' is not a whole number", value.trim()))
}

fn to_import_error(err: &csv::Error, fallback_row: usize) -> Error {
    let row = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_row);
    let reason = match err.kind() {
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {} fields, found {}", expected_len, len),
        ErrorKind::Utf8 { .. } => "row is not valid UTF-8".to_string(),
        _ => err.to_string(),
    };
    Error::import(row, reason)
}
