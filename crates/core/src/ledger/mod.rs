//! Ledger module - position models and the ledger store.

mod ledger_model;
mod ledger_store;

#[cfg(test)]
mod ledger_model_tests;


pub use ledger_model::{canonical_instrument_key, Category, NewPosition, Position, PositionKey};
pub use ledger_store::Ledger;
