//! Dated snapshots of ledger totals and the derived trend series.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::ledger::{Category, Ledger};

use super::{GroupBy, Snapshot, TimeseriesPoint};

/// Snapshots keyed by date. At most one snapshot per date.
///
/// Serializes as a date-ordered array of snapshots; on load a later entry
/// for the same date replaces an earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Snapshot>", into = "Vec<Snapshot>")]
pub struct ValuationHistory {
    snapshots: BTreeMap<NaiveDate, Snapshot>,
}

impl ValuationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the ledger totals for `date`, replacing an earlier capture of
    /// the same date.
    pub fn record(&mut self, date: NaiveDate, ledger: &Ledger) -> &Snapshot {
        let mut by_category: BTreeMap<Category, u128> = BTreeMap::new();
        for position in ledger.all() {
            *by_category.entry(position.category).or_insert(0) +=
                u128::from(position.valuation_jpy);
        }
        let snapshot = Snapshot {
            date,
            total_value_jpy: ledger.total_value(),
            by_category,
        };
        debug!(
            "Recording snapshot for {}: {} JPY",
            date, snapshot.total_value_jpy
        );
        self.snapshots.insert(date, snapshot);
        &self.snapshots[&date]
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Snapshot> {
        self.snapshots.get(&date)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.values().next_back()
    }

    /// Snapshots in date order.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.values()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Total value per period between `start` and `end` (inclusive), in
    /// ascending order. Each period reports its latest snapshot; periods
    /// without snapshots are omitted.
    pub fn timeseries(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<Vec<TimeseriesPoint>> {
        if start > end {
            return Err(Error::invalid_input(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        let mut points: Vec<TimeseriesPoint> = Vec::new();
        for snapshot in self.snapshots.range(start..=end).map(|(_, s)| s) {
            let period = group_by.period_label(snapshot.date);
            let point = TimeseriesPoint {
                period,
                as_of: snapshot.date,
                total_value_jpy: snapshot.total_value_jpy,
            };
            // Snapshots arrive in date order, so a later one in the same
            // period replaces the earlier one.
            match points.last_mut() {
                Some(last) if last.period == point.period => *last = point,
                _ => points.push(point),
            }
        }
        Ok(points)
    }
}

impl From<Vec<Snapshot>> for ValuationHistory {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self {
            snapshots: snapshots.into_iter().map(|s| (s.date, s)).collect(),
        }
    }
}

impl From<ValuationHistory> for Vec<Snapshot> {
    fn from(history: ValuationHistory) -> Self {
        history.snapshots.into_values().collect()
    }
}
