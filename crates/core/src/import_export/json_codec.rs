//! JSON codec for the ledger: an array of position objects.

use log::debug;
use serde_json::Value;

use crate::errors::{Error, Result};
use crate::ledger::{Ledger, NewPosition, Position};

/// Serializes the ledger as a pretty-printed array in canonical order.
pub fn export_json(ledger: &Ledger) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ledger.sorted())?)
}

/// Parses and validates every element. Rows are 1-based array indices; a
/// document that is not an array fails at row 0.
pub fn parse_json(text: &str) -> Result<Vec<Position>> {
    let elements: Vec<Value> =
        serde_json::from_str(text).map_err(|e| Error::import(0, e.to_string()))?;

    let positions = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let row = index + 1;
            let input: NewPosition =
                serde_json::from_value(element).map_err(|e| Error::import(row, e.to_string()))?;
            Position::try_from(input).map_err(|e| Error::import(row, e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} positions from JSON", positions.len());
    Ok(positions)
}

/// Builds a ledger from JSON text. Duplicate identities resolve to the last
/// element.
pub fn ledger_from_json(text: &str) -> Result<Ledger> {
    Ok(parse_json(text)?.into_iter().collect())
}
