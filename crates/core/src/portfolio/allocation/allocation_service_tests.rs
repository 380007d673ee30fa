#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::ledger::{Category, Ledger, NewPosition};
    use crate::portfolio::allocation::{
        current_allocation, deviation, top_positions, totals_by_account, TargetAllocation,
    };

    const EPS: f64 = 1e-9;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn dashboard_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for (instrument, category, value) in [
            ("Deposit", "Cash", 150000),
            ("All-World", "EquityCore", 450000),
            ("FANG+", "EquitySatellite", 200000),
            ("JGB", "Bond", 200000),
        ] {
            ledger
                .upsert(NewPosition::new("A", instrument, category, value))
                .unwrap();
        }
        ledger
    }

    fn dashboard_target() -> TargetAllocation {
        TargetAllocation::new([
            (Category::EquityCore, 0.50),
            (Category::EquitySatellite, 0.15),
            (Category::Cash, 0.15),
            (Category::Bond, 0.20),
        ])
        .unwrap()
    }

    // ==================== current_allocation Tests ====================

    #[test]
    fn test_dashboard_allocation() {
        let allocation = current_allocation(&dashboard_ledger());
        assert!(!allocation.is_empty);
        assert_eq!(allocation.total_value_jpy, 1_000_000);
        assert_close(allocation.weight(Category::Cash), 0.15);
        assert_close(allocation.weight(Category::EquityCore), 0.45);
        assert_close(allocation.weight(Category::EquitySatellite), 0.20);
        assert_close(allocation.weight(Category::Bond), 0.20);

        let order: Vec<Category> = allocation.categories.iter().map(|c| c.category).collect();
        assert_eq!(order, Category::ALL.to_vec());
    }

    #[test]
    fn test_allocation_sums_values_per_category() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(NewPosition::new("B", "Fund 1", "Bond", 300))
            .unwrap();
        ledger
            .upsert(NewPosition::new("A", "Cash", "Cash", 200))
            .unwrap();
        ledger
            .upsert(NewPosition::new("C", "Fund 2", "Bond", 500))
            .unwrap();

        let allocation = current_allocation(&ledger);
        assert_eq!(allocation.categories.len(), 2);
        assert_eq!(allocation.categories[0].category, Category::Cash);
        assert_eq!(allocation.categories[1].value_jpy, 800);
        assert_close(allocation.weight(Category::Bond), 0.8);
        assert_close(allocation.weight(Category::EquityCore), 0.0);
    }

    #[test]
    fn test_zero_total_yields_empty_flag() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(NewPosition::new("A", "Deposit", "Cash", 0))
            .unwrap();

        let allocation = current_allocation(&ledger);
        assert!(allocation.is_empty);
        assert_eq!(allocation.categories.len(), 1);
        assert_eq!(allocation.weight(Category::Cash), 0.0);
        assert_eq!(allocation.as_target(), Err(Error::EmptyLedger));

        let empty = current_allocation(&Ledger::new());
        assert!(empty.is_empty);
        assert!(empty.categories.is_empty());
    }

    // ==================== deviation Tests ====================

    #[test]
    fn test_dashboard_deviation() {
        let allocation = current_allocation(&dashboard_ledger());
        let items = deviation(&allocation, &dashboard_target());

        let order: Vec<Category> = items.iter().map(|i| i.category).collect();
        assert_eq!(order, Category::ALL.to_vec());

        assert_close(items[0].diff_pp, 0.0);
        assert_close(items[1].diff_pp, -5.0);
        assert_close(items[2].diff_pp, 5.0);
        assert_close(items[3].diff_pp, 0.0);

        assert!((items[1].diff_value_jpy + 50000.0).abs() < 1e-6);
        assert_close(items[1].target_weight, 0.50);
        assert_close(items[1].actual_weight, 0.45);
        assert_eq!(items[1].label, "株式（コア）");
    }

    #[test]
    fn test_deviation_defaults_missing_side_to_zero() {
        let mut ledger = Ledger::new();
        ledger
            .upsert(NewPosition::new("A", "Deposit", "Cash", 100))
            .unwrap();
        let target = TargetAllocation::new([(Category::Bond, 1.0)]).unwrap();

        let items = deviation(&current_allocation(&ledger), &target);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].category, Category::Cash);
        assert_close(items[0].diff_pp, 100.0);
        assert_eq!(items[1].category, Category::Bond);
        assert_close(items[1].diff_pp, -100.0);
    }

    #[test]
    fn test_deviation_against_self_is_zero() {
        let allocation = current_allocation(&dashboard_ledger());
        let items = deviation(&allocation, &allocation.as_target().unwrap());
        assert!(items.iter().all(|i| i.diff_pp == 0.0));
    }

    // ==================== TargetAllocation Tests ====================

    #[test]
    fn test_target_must_sum_to_one() {
        let result = TargetAllocation::new([(Category::Cash, 0.5), (Category::Bond, 0.4)]);
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidTarget(_)))
        ));
    }

    #[test]
    fn test_target_accepts_rounding_noise() {
        let result = TargetAllocation::new([
            (Category::Cash, 0.1),
            (Category::EquityCore, 0.2),
            (Category::Bond, 0.7000000001),
        ]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_target_rejects_out_of_range_weight() {
        let result = TargetAllocation::new([(Category::Cash, 1.5), (Category::Bond, -0.5)]);
        assert!(result.is_err());
        assert!(TargetAllocation::new([(Category::Cash, f64::NAN)]).is_err());
    }

    #[test]
    fn test_target_json_round_trip() {
        let target: TargetAllocation =
            serde_json::from_str(r#"{"EquityCore":0.5,"EquitySatellite":0.15,"Cash":0.15,"Bond":0.2}"#)
                .unwrap();
        assert_eq!(target, dashboard_target());

        let invalid = serde_json::from_str::<TargetAllocation>(r#"{"Cash":0.5}"#);
        assert!(invalid.is_err());
    }

    // ==================== Summary Tests ====================

    #[test]
    fn test_totals_by_account() {
        let mut ledger = dashboard_ledger();
        ledger
            .upsert(NewPosition::new("B", "Deposit", "Cash", 1_000_000))
            .unwrap();
        ledger
            .upsert(NewPosition::new("C", "Deposit", "Cash", 1_000_000))
            .unwrap();

        let totals = totals_by_account(&ledger);
        let accounts: Vec<&str> = totals.iter().map(|t| t.account.as_str()).collect();
        assert_eq!(accounts, vec!["A", "B", "C"]);
        assert_close(totals[0].weight, 1.0 / 3.0);
    }

    #[test]
    fn test_top_positions() {
        let top = top_positions(&dashboard_ledger(), 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].instrument, "All-World");
        // FANG+ and JGB tie at 200000; EquitySatellite sorts before Bond
        assert_eq!(top[1].instrument, "FANG+");

        assert_eq!(top_positions(&dashboard_ledger(), 10).len(), 4);
        assert!(top_positions(&Ledger::new(), 3).is_empty());
    }

    #[test]
    fn test_allocation_of_maximal_valuations() {
        let mut ledger = Ledger::new();
        for (instrument, category) in [("X0", "Cash"), ("X1", "Cash"), ("X2", "Bond")] {
            ledger
                .upsert(NewPosition::new("A", instrument, category, i64::MAX))
                .unwrap();
        }

        let allocation = current_allocation(&ledger);
        assert_eq!(allocation.total_value_jpy, 3 * i64::MAX as u128);
        assert_close(allocation.weight(Category::Cash), 2.0 / 3.0);
        assert_close(allocation.weight(Category::Bond), 1.0 / 3.0);
        let sum: f64 = allocation.categories.iter().map(|c| c.weight).sum();
        assert_close(sum, 1.0);

        let totals = totals_by_account(&ledger);
        assert_eq!(totals[0].value_jpy, 3 * i64::MAX as u128);
    }
}
