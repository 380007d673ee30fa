//! Projection domain models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_HORIZON_MONTHS, MIN_ANNUAL_RETURN_RATE, WEIGHT_TOLERANCE};
use crate::errors::{Error, Result};
use crate::ledger::Category;
use crate::portfolio::allocation::TargetAllocation;

/// How the monthly contribution is split across categories.
///
/// The policy only shapes the per-category breakdown; the aggregate total
/// does not depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AllocationPolicy {
    /// Split the contribution by target weight.
    Target(TargetAllocation),
    /// Fixed JPY amount per category each month.
    FixedRule(BTreeMap<Category, f64>),
}

impl AllocationPolicy {
    /// Monthly contribution per category under this policy.
    pub fn contribution_shares(&self, monthly_contribution: f64) -> BTreeMap<Category, f64> {
        match self {
            AllocationPolicy::Target(target) => target
                .iter()
                .map(|(category, weight)| (category, weight * monthly_contribution))
                .collect(),
            AllocationPolicy::FixedRule(amounts) => amounts.clone(),
        }
    }
}

/// Input model for a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub horizon_months: i32,
    /// Annual return as a fraction, e.g. 0.05 for 5%/year. May be negative.
    pub annual_return_rate: f64,
    pub monthly_contribution: f64,
    pub allocation_policy: AllocationPolicy,
}

impl ProjectionInput {
    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_HORIZON_MONTHS).contains(&self.horizon_months) {
            return Err(Error::invalid_input(format!(
                "horizonMonths must be between 0 and {}, got {}",
                MAX_HORIZON_MONTHS, self.horizon_months
            )));
        }
        if !self.annual_return_rate.is_finite()
            || self.annual_return_rate < MIN_ANNUAL_RETURN_RATE
        {
            return Err(Error::invalid_input(format!(
                "annualReturnRate must be a number of at least {}, got {}",
                MIN_ANNUAL_RETURN_RATE, self.annual_return_rate
            )));
        }
        if !self.monthly_contribution.is_finite() || self.monthly_contribution < 0.0 {
            return Err(Error::invalid_input(format!(
                "monthlyContribution must be 0 or greater, got {}",
                self.monthly_contribution
            )));
        }
        if let AllocationPolicy::FixedRule(amounts) = &self.allocation_policy {
            validate_fixed_rule(amounts, self.monthly_contribution)?;
        }
        Ok(())
    }
}

fn validate_fixed_rule(amounts: &BTreeMap<Category, f64>, monthly_contribution: f64) -> Result<()> {
    if let Some((category, amount)) = amounts
        .iter()
        .find(|(_, amount)| !amount.is_finite() || **amount < 0.0)
    {
        return Err(Error::invalid_input(format!(
            "fixed rule amount for {} must be 0 or greater, got {}",
            category, amount
        )));
    }

    let total: f64 = amounts.values().sum();
    if (total - monthly_contribution).abs() > WEIGHT_TOLERANCE * monthly_contribution.max(1.0) {
        return Err(Error::invalid_input(format!(
            "fixed rule amounts sum to {} but monthlyContribution is {}",
            total, monthly_contribution
        )));
    }
    Ok(())
}

/// Projected total value at the end of a month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub month_index: u32,
    pub total_value: f64,
}

impl ProjectionPoint {
    /// Value rounded to whole yen for display.
    pub fn rounded_yen(&self) -> i64 {
        self.total_value.round() as i64
    }
}

/// Projected value series of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProjection {
    pub category: Category,
    pub values: Vec<f64>,
}

/// Output of a projection run: `horizon_months + 1` points starting at month 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub start_value: f64,
    pub points: Vec<ProjectionPoint>,
    /// Per-category series in canonical order
    pub categories: Vec<CategoryProjection>,
}

impl ProjectionResult {
    pub fn final_value(&self) -> f64 {
        self.points
            .last()
            .map(|p| p.total_value)
            .unwrap_or(self.start_value)
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.total_value).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    Base,
    Optimistic,
    Pessimistic,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Base,
        ScenarioKind::Optimistic,
        ScenarioKind::Pessimistic,
    ];

    /// Multiplier applied to the scenario delta.
    pub fn rate_offset_sign(&self) -> f64 {
        match self {
            ScenarioKind::Base => 0.0,
            ScenarioKind::Optimistic => 1.0,
            ScenarioKind::Pessimistic => -1.0,
        }
    }
}

/// One labelled run of a scenario set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub scenario: ScenarioKind,
    pub annual_return_rate: f64,
    pub result: ProjectionResult,
}
