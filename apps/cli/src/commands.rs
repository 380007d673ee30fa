//! Command handlers. Each one reads what it needs from disk, calls the
//! engine and prints JSON (or the exported ledger) to stdout.

use std::fs;

use anyhow::{bail, Context};
use assetplan_core::import_export::ImportMode;
use assetplan_core::portfolio::allocation::{
    current_allocation, deviation, top_positions, totals_by_account, AccountTotal, Allocation,
};
use assetplan_core::portfolio::history::GroupBy;
use assetplan_core::portfolio::projection::{
    run_projection, run_scenarios, AllocationPolicy, ProjectionInput,
};
use assetplan_core::{Error, Ledger, Position};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::cli::{
    AllocationArgs, DataFormat, ExportArgs, GroupByArg, ImportArgs, ImportModeArg, ProjectArgs,
    SnapshotArgs, TrendArgs,
};
use crate::config::Config;
use crate::main_lib::{
    load_fixed_rule, load_history, load_ledger, load_targets, read_into, render_ledger,
    save_history, save_ledger,
};

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllocationReport {
    allocation: Allocation,
    accounts: Vec<AccountTotal>,
    top_positions: Vec<Position>,
}

pub fn allocation(config: &Config, args: &AllocationArgs) -> anyhow::Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    print_json(&AllocationReport {
        allocation: current_allocation(&ledger),
        accounts: totals_by_account(&ledger),
        top_positions: top_positions(&ledger, args.top),
    })
}

pub fn deviation_report(config: &Config) -> anyhow::Result<()> {
    let Some(targets_path) = &config.targets_path else {
        bail!("deviation needs a target allocation: pass --targets or set AP_TARGETS_PATH");
    };
    let ledger = load_ledger(&config.ledger_path)?;
    let target = load_targets(targets_path)?;
    print_json(&deviation(&current_allocation(&ledger), &target))
}

pub fn project(config: &Config, args: &ProjectArgs) -> anyhow::Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let input = ProjectionInput {
        horizon_months: args.months,
        annual_return_rate: args.annual_return,
        monthly_contribution: args.monthly_contribution,
        allocation_policy: resolve_policy(config, args, &ledger)?,
    };

    if args.scenarios {
        let delta = args.scenario_delta.unwrap_or(config.scenario_delta);
        print_json(&run_scenarios(&ledger, &input, delta)?)
    } else {
        print_json(&run_projection(&ledger, &input)?)
    }
}

/// Fixed rule first, then the target file, then today's mix.
fn resolve_policy(
    config: &Config,
    args: &ProjectArgs,
    ledger: &Ledger,
) -> anyhow::Result<AllocationPolicy> {
    if let Some(path) = &args.fixed_rule {
        return Ok(AllocationPolicy::FixedRule(load_fixed_rule(path)?));
    }
    if let Some(path) = &config.targets_path {
        return Ok(AllocationPolicy::Target(load_targets(path)?));
    }
    match current_allocation(ledger).as_target() {
        Ok(target) => Ok(AllocationPolicy::Target(target)),
        Err(Error::EmptyLedger) => {
            bail!("ledger is empty: pass --targets or --fixed-rule to split contributions")
        }
        Err(e) => Err(e.into()),
    }
}

pub fn export(config: &Config, args: &ExportArgs) -> anyhow::Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let text = render_ledger(&ledger, args.format)?;
    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("Exported {} positions to {}", ledger.len(), path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

pub fn import(config: &Config, args: &ImportArgs) -> anyhow::Result<()> {
    let bytes =
        fs::read(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let mode = match args.mode {
        ImportModeArg::Replace => ImportMode::Replace,
        ImportModeArg::Merge => ImportMode::Merge,
    };

    let mut ledger = load_ledger(&config.ledger_path)?;
    // The ledger file is only rewritten after the whole source validated.
    let summary = read_into(&mut ledger, &bytes, DataFormat::from_path(&args.input), mode)?;
    save_ledger(&config.ledger_path, &ledger)?;
    print_json(&summary)
}

pub fn snapshot(config: &Config, args: &SnapshotArgs) -> anyhow::Result<()> {
    let ledger = load_ledger(&config.ledger_path)?;
    let mut history = load_history(&config.history_path)?;
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());

    let snapshot = history.record(date, &ledger).clone();
    save_history(&config.history_path, &history)?;
    print_json(&snapshot)
}

pub fn trend(config: &Config, args: &TrendArgs) -> anyhow::Result<()> {
    let history = load_history(&config.history_path)?;
    let group_by = match args.group_by {
        GroupByArg::Day => GroupBy::Day,
        GroupByArg::Month => GroupBy::Month,
    };
    let start = args.from.unwrap_or(NaiveDate::MIN);
    let end = args.to.unwrap_or(NaiveDate::MAX);
    print_json(&history.timeseries(start, end, group_by)?)
}
