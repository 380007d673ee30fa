//! Portfolio calculations derived from the ledger.

pub mod allocation;
pub mod history;
pub mod projection;
