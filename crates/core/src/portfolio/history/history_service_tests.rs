#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::errors::Error;
    use crate::ledger::{Category, Ledger, NewPosition};
    use crate::portfolio::history::{GroupBy, ValuationHistory};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ledger_worth(cash: i64, equity: i64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .upsert(NewPosition::new("Bank", "Deposit", "Cash", cash))
            .unwrap();
        ledger
            .upsert(NewPosition::new("Broker", "All-World", "EquityCore", equity))
            .unwrap();
        ledger
    }

    fn sample_history() -> ValuationHistory {
        let mut history = ValuationHistory::new();
        history.record(date(2024, 1, 31), &ledger_worth(100, 420));
        history.record(date(2024, 2, 10), &ledger_worth(100, 440));
        history.record(date(2024, 2, 29), &ledger_worth(100, 460));
        history.record(date(2024, 3, 31), &ledger_worth(120, 490));
        history
    }

    #[test]
    fn test_record_captures_category_totals() {
        let mut history = ValuationHistory::new();
        let snapshot = history.record(date(2024, 1, 31), &ledger_worth(100, 420));
        assert_eq!(snapshot.total_value_jpy, 520);
        assert_eq!(snapshot.by_category[&Category::Cash], 100);
        assert_eq!(snapshot.by_category[&Category::EquityCore], 420);
    }

    #[test]
    fn test_record_replaces_same_date() {
        let mut history = sample_history();
        history.record(date(2024, 3, 31), &ledger_worth(0, 0));
        assert_eq!(history.len(), 4);
        assert_eq!(history.latest().unwrap().total_value_jpy, 0);
        assert_eq!(history.get(date(2024, 1, 31)).unwrap().total_value_jpy, 520);
    }

    #[test]
    fn test_monthly_series_uses_last_snapshot_of_month() {
        let series = sample_history()
            .timeseries(date(2024, 1, 1), date(2024, 12, 31), GroupBy::Month)
            .unwrap();

        let periods: Vec<&str> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-01", "2024-02", "2024-03"]);
        assert_eq!(series[1].total_value_jpy, 560);
        assert_eq!(series[1].as_of, date(2024, 2, 29));
    }

    #[test]
    fn test_daily_series_within_range() {
        let series = sample_history()
            .timeseries(date(2024, 2, 1), date(2024, 2, 29), GroupBy::Day)
            .unwrap();
        let periods: Vec<&str> = series.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-02-10", "2024-02-29"]);
    }

    #[test]
    fn test_series_rejects_inverted_range() {
        let result = sample_history().timeseries(date(2024, 3, 1), date(2024, 1, 1), GroupBy::Month);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_history() {
        let history = ValuationHistory::new();
        assert!(history.is_empty());
        assert!(history.latest().is_none());
        assert!(history
            .timeseries(date(2024, 1, 1), date(2024, 1, 31), GroupBy::Day)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_history_json_is_date_ordered_array() {
        let history = sample_history();
        let json = serde_json::to_value(&history).unwrap();
        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["date"], "2024-01-31");
        assert_eq!(entries[0]["totalValueJPY"], 520);
        assert_eq!(entries[0]["byCategory"]["EquityCore"], 420);

        let restored: ValuationHistory = serde_json::from_value(json).unwrap();
        assert_eq!(restored, history);
    }
}
