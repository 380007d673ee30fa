/// Tolerance used when checking that weights sum to one
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Column header shared by CSV import and export
pub const CSV_HEADER: [&str; 4] = ["account", "instrument", "category", "valuationJPY"];

/// Upper bound on a projection horizon (100 years)
pub const MAX_HORIZON_MONTHS: i32 = 1200;

/// Lowest accepted annual return rate (-100%/year)
pub const MIN_ANNUAL_RETURN_RATE: f64 = -1.0;

/// Rate offset applied to the optimistic and pessimistic scenarios
pub const DEFAULT_SCENARIO_DELTA: f64 = 0.01;

/// Months per year, used to derive the monthly rate
pub const MONTHS_PER_YEAR: f64 = 12.0;
