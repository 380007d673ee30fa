//! Valuation history module for the total value trend.

mod history_model;
mod history_service;

pub use history_model::*;
pub use history_service::*;

#[cfg(test)]
mod history_service_tests;
