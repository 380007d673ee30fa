//! Ledger domain models.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::errors::{Error, Result, ValidationError};

/// Top-level classification of a position.
///
/// The declaration order is the canonical order used for every report and
/// export, and is also the `Ord` of the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Cash,
    EquityCore,
    EquitySatellite,
    Bond,
}

impl Category {
    /// All categories in canonical order.
    pub const ALL: [Category; 4] = [
        Category::Cash,
        Category::EquityCore,
        Category::EquitySatellite,
        Category::Bond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cash => "Cash",
            Category::EquityCore => "EquityCore",
            Category::EquitySatellite => "EquitySatellite",
            Category::Bond => "Bond",
        }
    }

    /// Localized display label shown by the asset input and dashboard pages.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Cash => "現金",
            Category::EquityCore => "株式（コア）",
            Category::EquitySatellite => "株式（サテライト）",
            Category::Bond => "債券",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Accepts the canonical literals (any case) and the localized labels,
    /// with either full-width or ASCII parentheses.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.replace('（', "(").replace('）', ")");
        let category = match normalized.to_ascii_lowercase().as_str() {
            "cash" | "現金" => Category::Cash,
            "equitycore" | "株式(コア)" => Category::EquityCore,
            "equitysatellite" | "株式(サテライト)" => Category::EquitySatellite,
            "bond" | "債券" => Category::Bond,
            _ => return Err(ValidationError::UnknownCategory(trimmed.to_string())),
        };
        Ok(category)
    }
}

/// Separators ignored when matching instrument names. Full-width variants
/// are already folded to these by NFKC.
const NAME_SEPARATORS: &[char] = &[
    '・', '·', '&', '/', '(', ')', '[', ']', '【', '】', '{', '}', '<', '>', ':', ';', ',', '.',
    '、', '。', '!', '?', '=', '+', '×', '*', '〜', '~', '-', '‐', '‑', '–', '—', '―', '−',
];

/// Matching key for an instrument name: NFKC-normalized, upper-cased, with
/// whitespace and separators removed, so `ｅＭＡＸＩＳ Slim 全世界株式` and
/// `eMAXIS Slim 全世界株式` match.
pub fn canonical_instrument_key(name: &str) -> String {
    let normalized = name.nfkc().collect::<String>().to_uppercase();
    let key: String = normalized
        .chars()
        .filter(|c| !c.is_whitespace() && !NAME_SEPARATORS.contains(c))
        .collect();

    // The all-country fund is listed both with and without its suffix.
    if key.contains("EMAXISSLIM") && key.contains("全世界株式") {
        return key.replace("オールカントリー", "");
    }
    key
}

/// Identity of a position within a ledger: the trimmed account name and the
/// canonical instrument key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PositionKey {
    pub account: String,
    pub instrument: String,
}

impl PositionKey {
    pub fn new(account: &str, instrument: &str) -> Self {
        Self {
            account: account.trim().to_string(),
            instrument: canonical_instrument_key(instrument),
        }
    }
}

/// Domain model representing a single valued holding
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub account: String,
    /// Instrument name as entered; identity uses [`PositionKey`]
    pub instrument: String,
    pub category: Category,
    #[serde(rename = "valuationJPY")]
    pub valuation_jpy: u64,
}

impl Position {
    pub fn key(&self) -> PositionKey {
        PositionKey::new(&self.account, &self.instrument)
    }

    /// Canonical report order: category, then account, then instrument.
    pub fn canonical_cmp(&self, other: &Position) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.account.cmp(&other.account))
            .then_with(|| self.instrument.cmp(&other.instrument))
    }
}

/// Input model for creating or replacing a position.
///
/// Carries the raw category text and a signed valuation so that bad input
/// can be reported instead of being unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewPosition {
    pub account: String,
    pub instrument: String,
    pub category: String,
    #[serde(rename = "valuationJPY")]
    pub valuation_jpy: i64,
}

impl NewPosition {
    pub fn new(
        account: impl Into<String>,
        instrument: impl Into<String>,
        category: impl Into<String>,
        valuation_jpy: i64,
    ) -> Self {
        Self {
            account: account.into(),
            instrument: instrument.into(),
            category: category.into(),
            valuation_jpy,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(ValidationError::MissingField("account".to_string()).into());
        }
        if canonical_instrument_key(&self.instrument).is_empty() {
            return Err(ValidationError::MissingField("instrument".to_string()).into());
        }
        self.category.parse::<Category>()?;
        if self.valuation_jpy < 0 {
            return Err(ValidationError::NegativeValuation(self.valuation_jpy).into());
        }
        Ok(())
    }
}

impl TryFrom<NewPosition> for Position {
    type Error = Error;

    fn try_from(input: NewPosition) -> Result<Self> {
        input.validate()?;
        let category = input.category.parse::<Category>()?;
        let valuation_jpy = u64::try_from(input.valuation_jpy)
            .map_err(|_| ValidationError::NegativeValuation(input.valuation_jpy))?;
        Ok(Position {
            account: input.account.trim().to_string(),
            instrument: input.instrument.trim().to_string(),
            category,
            valuation_jpy,
        })
    }
}
