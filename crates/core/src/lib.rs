//! AssetPlan Core - Ledger, allocation and projection engine.
//!
//! This crate holds the domain logic of AssetPlan. It performs no file or
//! network I/O: callers hand it text or structured values and render what it
//! returns.

pub mod constants;
pub mod errors;
pub mod import_export;
pub mod ledger;
pub mod portfolio;

// Re-export the ledger types used by every other module
pub use ledger::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
