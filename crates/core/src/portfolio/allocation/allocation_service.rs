//! Allocation and summary calculations over a ledger.
//!
//! All functions are pure: they read the ledger and return new values.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use log::{debug, warn};

use crate::ledger::{Category, Ledger, Position};

use super::{AccountTotal, Allocation, CategoryAllocation, DeviationItem, TargetAllocation};

/// Groups the ledger by category and derives each category's weight.
///
/// A ledger whose total is zero yields zero weights for every category it
/// holds and `is_empty = true` instead of an error.
pub fn current_allocation(ledger: &Ledger) -> Allocation {
    let mut values: BTreeMap<Category, u128> = BTreeMap::new();
    for position in ledger.all() {
        *values.entry(position.category).or_insert(0) += u128::from(position.valuation_jpy);
    }

    let total_value_jpy: u128 = values.values().sum();
    let is_empty = total_value_jpy == 0;
    if is_empty {
        warn!(
            "Ledger with {} positions has no valuation; allocation weights are all zero",
            ledger.len()
        );
    }

    let categories = values
        .into_iter()
        .map(|(category, value_jpy)| CategoryAllocation {
            category,
            label: category.label().to_string(),
            value_jpy,
            weight: if is_empty {
                0.0
            } else {
                value_jpy as f64 / total_value_jpy as f64
            },
        })
        .collect();

    debug!(
        "Computed allocation over {} positions, total {} JPY",
        ledger.len(),
        total_value_jpy
    );

    Allocation {
        categories,
        total_value_jpy,
        is_empty,
    }
}

/// Compares current weights against a target for every category present on
/// either side. A category missing from one side counts as weight 0.
pub fn deviation(current: &Allocation, target: &TargetAllocation) -> Vec<DeviationItem> {
    let categories: BTreeSet<Category> = current
        .categories
        .iter()
        .map(|c| c.category)
        .chain(target.iter().map(|(c, _)| c))
        .collect();

    let total = current.total_value_jpy as f64;
    categories
        .into_iter()
        .map(|category| {
            let actual_weight = current.weight(category);
            let target_weight = target.weight(category);
            let diff = actual_weight - target_weight;
            DeviationItem {
                category,
                label: category.label().to_string(),
                actual_weight,
                target_weight,
                diff_pp: diff * 100.0,
                diff_value_jpy: diff * total,
            }
        })
        .collect()
}

/// Total valuation per account, largest first. Ties are ordered by account
/// name.
pub fn totals_by_account(ledger: &Ledger) -> Vec<AccountTotal> {
    let mut values: HashMap<&str, u128> = HashMap::new();
    for position in ledger.all() {
        *values.entry(position.account.as_str()).or_insert(0) +=
            u128::from(position.valuation_jpy);
    }

    let total = ledger.total_value();
    let mut totals: Vec<AccountTotal> = values
        .into_iter()
        .map(|(account, value_jpy)| AccountTotal {
            account: account.to_string(),
            value_jpy,
            weight: if total > 0 {
                value_jpy as f64 / total as f64
            } else {
                0.0
            },
        })
        .collect();

    totals.sort_by(|a, b| {
        b.value_jpy
            .cmp(&a.value_jpy)
            .then_with(|| a.account.cmp(&b.account))
    });
    totals
}

/// The `limit` largest positions by valuation. Ties follow the canonical
/// export order (category, account, instrument).
pub fn top_positions(ledger: &Ledger, limit: usize) -> Vec<Position> {
    let mut positions: Vec<&Position> = ledger.all().collect();
    positions.sort_by(|a, b| {
        b.valuation_jpy
            .cmp(&a.valuation_jpy)
            .then_with(|| a.canonical_cmp(b))
    });
    positions.into_iter().take(limit).cloned().collect()
}
