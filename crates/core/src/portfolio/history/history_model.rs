//! Valuation history domain models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ledger::Category;

/// Ledger totals captured on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub date: NaiveDate,
    #[serde(rename = "totalValueJPY")]
    pub total_value_jpy: u128,
    pub by_category: BTreeMap<Category, u128>,
}

/// Period granularity of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    #[default]
    Month,
}

impl GroupBy {
    /// Label of the period containing `date`.
    pub fn period_label(&self, date: NaiveDate) -> String {
        match self {
            GroupBy::Day => date.format("%Y-%m-%d").to_string(),
            GroupBy::Month => date.format("%Y-%m").to_string(),
        }
    }
}

/// A single point of the total value trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeseriesPoint {
    pub period: String,
    /// Date of the snapshot reported for this period
    pub as_of: NaiveDate,
    #[serde(rename = "totalValueJPY")]
    pub total_value_jpy: u128,
}
