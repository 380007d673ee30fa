//! Projection module - future value simulation under a contribution schedule.

mod projection_model;
mod projection_service;

pub use projection_model::*;
pub use projection_service::*;
