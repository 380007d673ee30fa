use std::path::PathBuf;

use anyhow::Context;
use assetplan_core::constants::DEFAULT_SCENARIO_DELTA;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub ledger_path: PathBuf,
    pub targets_path: Option<PathBuf>,
    pub history_path: PathBuf,
    pub scenario_delta: f64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let ledger_path = std::env::var("AP_LEDGER_PATH").unwrap_or_else(|_| "ledger.csv".into());
        let targets_path = std::env::var("AP_TARGETS_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let history_path =
            std::env::var("AP_HISTORY_PATH").unwrap_or_else(|_| "history.json".into());
        let scenario_delta = match std::env::var("AP_SCENARIO_DELTA") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .with_context(|| format!("AP_SCENARIO_DELTA must be a number, got '{}'", raw))?,
            Err(_) => DEFAULT_SCENARIO_DELTA,
        };
        let log_format = match std::env::var("AP_LOG_FORMAT") {
            Ok(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Ok(Self {
            ledger_path: PathBuf::from(ledger_path),
            targets_path,
            history_path: PathBuf::from(history_path),
            scenario_delta,
            log_format,
        })
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(
        mut self,
        ledger_path: Option<PathBuf>,
        targets_path: Option<PathBuf>,
        history_path: Option<PathBuf>,
    ) -> Self {
        if let Some(path) = ledger_path {
            self.ledger_path = path;
        }
        if targets_path.is_some() {
            self.targets_path = targets_path;
        }
        if let Some(path) = history_path {
            self.history_path = path;
        }
        self
    }
}
