//! Import/export models.

use serde::{Deserialize, Serialize};

/// How imported positions are combined with the current ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// The imported rows become the whole ledger.
    #[default]
    Replace,
    /// Imported rows are upserted by (account, instrument); other positions
    /// stay.
    Merge,
}

/// Outcome of a committed import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub mode: ImportMode,
    /// Data rows read from the source
    pub rows: usize,
    /// Rows that added a new identity
    pub inserted: usize,
    /// Rows that replaced an existing identity
    pub updated: usize,
    /// Ledger size after the import
    pub total_positions: usize,
}
