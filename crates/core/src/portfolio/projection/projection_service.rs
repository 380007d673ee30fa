//! Monthly compounding projection over a ledger.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::constants::MONTHS_PER_YEAR;
use crate::errors::{Error, Result};
use crate::ledger::{Category, Ledger};

use super::{
    CategoryProjection, ProjectionInput, ProjectionPoint, ProjectionResult, ScenarioKind,
    ScenarioProjection,
};

/// Simulates the ledger total month by month:
/// `value[m + 1] = value[m] * (1 + annual_rate / 12) + monthly_contribution`.
///
/// Values are accumulated in `f64` without intermediate rounding. A horizon
/// of 0 returns the starting point only.
pub fn run_projection(ledger: &Ledger, input: &ProjectionInput) -> Result<ProjectionResult> {
    input.validate()?;

    let horizon = input.horizon_months as u32;
    let growth = 1.0 + input.annual_return_rate / MONTHS_PER_YEAR;
    let start_value = ledger.total_value() as f64;

    let mut points = Vec::with_capacity(horizon as usize + 1);
    let mut value = start_value;
    points.push(ProjectionPoint {
        month_index: 0,
        total_value: value,
    });
    for month_index in 1..=horizon {
        value = value * growth + input.monthly_contribution;
        points.push(ProjectionPoint {
            month_index,
            total_value: value,
        });
    }

    let categories = project_categories(ledger, input, growth, horizon);

    debug!(
        "Projected {} months at {} annual return: {} -> {}",
        horizon, input.annual_return_rate, start_value, value
    );

    Ok(ProjectionResult {
        start_value,
        points,
        categories,
    })
}

/// Runs the base, optimistic and pessimistic projections, offsetting the
/// annual rate by `+delta` and `-delta`. Each run is an independent call to
/// [`run_projection`].
pub fn run_scenarios(
    ledger: &Ledger,
    input: &ProjectionInput,
    delta: f64,
) -> Result<Vec<ScenarioProjection>> {
    if !delta.is_finite() || delta < 0.0 {
        return Err(Error::invalid_input(format!(
            "scenario delta must be 0 or greater, got {}",
            delta
        )));
    }

    ScenarioKind::ALL
        .iter()
        .map(|&scenario| {
            let annual_return_rate =
                input.annual_return_rate + scenario.rate_offset_sign() * delta;
            let scenario_input = ProjectionInput {
                annual_return_rate,
                ..input.clone()
            };
            Ok(ScenarioProjection {
                scenario,
                annual_return_rate,
                result: run_projection(ledger, &scenario_input)?,
            })
        })
        .collect()
}

/// Grows each category from its ledger value with the same monthly rate,
/// adding the category's share of the contribution.
fn project_categories(
    ledger: &Ledger,
    input: &ProjectionInput,
    growth: f64,
    horizon: u32,
) -> Vec<CategoryProjection> {
    let mut start_values: BTreeMap<Category, f64> = BTreeMap::new();
    for position in ledger.all() {
        *start_values.entry(position.category).or_insert(0.0) += position.valuation_jpy as f64;
    }
    let shares = input
        .allocation_policy
        .contribution_shares(input.monthly_contribution);

    let categories: BTreeSet<Category> = start_values.keys().chain(shares.keys()).copied().collect();

    categories
        .into_iter()
        .map(|category| {
            let contribution = shares.get(&category).copied().unwrap_or(0.0);
            let mut value = start_values.get(&category).copied().unwrap_or(0.0);
            let mut values = Vec::with_capacity(horizon as usize + 1);
            values.push(value);
            for _ in 0..horizon {
                value = value * growth + contribution;
                values.push(value);
            }
            CategoryProjection { category, values }
        })
        .collect()
}
