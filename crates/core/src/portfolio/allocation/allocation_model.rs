//! Allocation models for the category breakdown of a ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::WEIGHT_TOLERANCE;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Category;

/// Allocation of a single category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAllocation {
    pub category: Category,
    /// Localized display label of the category
    pub label: String,
    /// Total valuation of the category
    #[serde(rename = "valueJPY")]
    pub value_jpy: u128,
    /// Fraction of the ledger total (0-1)
    pub weight: f64,
}

/// Category breakdown of a ledger, in canonical category order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub categories: Vec<CategoryAllocation>,
    #[serde(rename = "totalValueJPY")]
    pub total_value_jpy: u128,
    /// Set when the ledger total is zero; every weight is then 0.
    pub is_empty: bool,
}

impl Allocation {
    /// Weight of a category, 0 when the category holds nothing.
    pub fn weight(&self, category: Category) -> f64 {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.weight)
            .unwrap_or(0.0)
    }

    pub fn weights(&self) -> BTreeMap<Category, f64> {
        self.categories
            .iter()
            .map(|c| (c.category, c.weight))
            .collect()
    }

    /// Uses the current weights as a target, e.g. to freeze today's mix for
    /// a projection. An empty ledger has no mix to freeze.
    pub fn as_target(&self) -> Result<TargetAllocation> {
        if self.is_empty {
            return Err(Error::EmptyLedger);
        }
        TargetAllocation::new(self.weights())
    }
}

/// Desired weight per category. Weights lie in [0, 1] and sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Category, f64>", into = "BTreeMap<Category, f64>")]
pub struct TargetAllocation {
    weights: BTreeMap<Category, f64>,
}

impl TargetAllocation {
    pub fn new(weights: impl IntoIterator<Item = (Category, f64)>) -> Result<Self> {
        let weights: BTreeMap<Category, f64> = weights.into_iter().collect();

        for (category, weight) in &weights {
            if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                return Err(ValidationError::InvalidTarget(format!(
                    "weight for {} must be between 0 and 1, got {}",
                    category, weight
                ))
                .into());
            }
        }

        let total: f64 = weights.values().sum();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ValidationError::InvalidTarget(format!(
                "weights must sum to 1. Current sum: {:.6}",
                total
            ))
            .into());
        }

        Ok(Self { weights })
    }

    /// Target weight of a category, 0 when the category is not targeted.
    pub fn weight(&self, category: Category) -> f64 {
        self.weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Targeted categories in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.weights.iter().map(|(c, w)| (*c, *w))
    }

    pub fn contains(&self, category: Category) -> bool {
        self.weights.contains_key(&category)
    }
}

impl TryFrom<BTreeMap<Category, f64>> for TargetAllocation {
    type Error = Error;

    fn try_from(weights: BTreeMap<Category, f64>) -> Result<Self> {
        TargetAllocation::new(weights)
    }
}

impl From<TargetAllocation> for BTreeMap<Category, f64> {
    fn from(target: TargetAllocation) -> Self {
        target.weights
    }
}

/// Gap between the current and the target weight of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviationItem {
    pub category: Category,
    pub label: String,
    pub actual_weight: f64,
    pub target_weight: f64,
    /// (actual - target) in percentage points
    pub diff_pp: f64,
    /// (actual - target) applied to the ledger total
    #[serde(rename = "diffValueJPY")]
    pub diff_value_jpy: f64,
}

/// Total valuation held in one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountTotal {
    pub account: String,
    #[serde(rename = "valueJPY")]
    pub value_jpy: u128,
    pub weight: f64,
}
