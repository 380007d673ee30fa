//! Tests for ledger domain models.

#[cfg(test)]
mod tests {
    use crate::errors::{Error, ValidationError};
    use crate::ledger::{canonical_instrument_key, Category, NewPosition, Position, PositionKey};

    // ==================== Category Tests ====================

    #[test]
    fn test_category_canonical_order() {
        let mut shuffled = vec![
            Category::Bond,
            Category::EquitySatellite,
            Category::Cash,
            Category::EquityCore,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Category::ALL.to_vec());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&Category::EquitySatellite).unwrap(),
            "\"EquitySatellite\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"Bond\"").unwrap(),
            Category::Bond
        );
    }

    #[test]
    fn test_category_parse_canonical_literals() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert_eq!("equitycore".parse::<Category>().unwrap(), Category::EquityCore);
        assert_eq!("  Cash ".parse::<Category>().unwrap(), Category::Cash);
    }

    #[test]
    fn test_category_parse_localized_labels() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
        assert_eq!("株式(コア)".parse::<Category>().unwrap(), Category::EquityCore);
        assert_eq!(
            "株式(サテライト)".parse::<Category>().unwrap(),
            Category::EquitySatellite
        );
    }

    #[test]
    fn test_category_parse_unknown() {
        assert_eq!(
            "Crypto".parse::<Category>(),
            Err(ValidationError::UnknownCategory("Crypto".to_string()))
        );
    }

    // ==================== NewPosition Tests ====================

    #[test]
    fn test_new_position_converts_and_trims() {
        let position =
            Position::try_from(NewPosition::new(" 証券口座 ", "全世界株式 ", "株式（コア）", 1000))
                .unwrap();
        assert_eq!(position.account, "証券口座");
        assert_eq!(position.instrument, "全世界株式");
        assert_eq!(position.category, Category::EquityCore);
        assert_eq!(position.valuation_jpy, 1000);
    }

    #[test]
    fn test_new_position_rejects_negative_valuation() {
        let result = Position::try_from(NewPosition::new("A", "X", "Cash", -1));
        assert_eq!(
            result,
            Err(Error::Validation(ValidationError::NegativeValuation(-1)))
        );
    }

    #[test]
    fn test_new_position_rejects_unknown_category() {
        let result = Position::try_from(NewPosition::new("A", "X", "Gold", 10));
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::UnknownCategory(_)))
        ));
    }

    #[test]
    fn test_new_position_rejects_blank_identity() {
        assert_eq!(
            NewPosition::new("  ", "X", "Cash", 10).validate(),
            Err(Error::Validation(ValidationError::MissingField(
                "account".to_string()
            )))
        );
        assert_eq!(
            NewPosition::new("A", "", "Cash", 10).validate(),
            Err(Error::Validation(ValidationError::MissingField(
                "instrument".to_string()
            )))
        );
    }

    #[test]
    fn test_zero_valuation_is_valid() {
        assert!(NewPosition::new("A", "X", "Cash", 0).validate().is_ok());
    }

    #[test]
    fn test_position_json_field_names() {
        let position = Position {
            account: "A".to_string(),
            instrument: "X".to_string(),
            category: Category::Bond,
            valuation_jpy: 200000,
        };
        let value = serde_json::to_value(&position).unwrap();
        assert_eq!(value["account"], "A");
        assert_eq!(value["instrument"], "X");
        assert_eq!(value["category"], "Bond");
        assert_eq!(value["valuationJPY"], 200000);
    }

    // ==================== Identity Tests ====================

    #[test]
    fn test_canonical_key_folds_width_and_case() {
        assert_eq!(
            canonical_instrument_key("ｅＭＡＸＩＳ Ｓｌｉｍ 全世界株式"),
            canonical_instrument_key("eMAXIS Slim 全世界株式")
        );
        assert_eq!(canonical_instrument_key("  iFreeNEXT FANG+ "), "IFREENEXTFANG");
    }

    #[test]
    fn test_canonical_key_ignores_separators() {
        assert_eq!(
            canonical_instrument_key("ＳＢＩ・Ｖ・Ｓ＆Ｐ５００インデックス・ファンド"),
            canonical_instrument_key("SBI・V・S&P500 インデックス・ファンド")
        );
    }

    #[test]
    fn test_canonical_key_all_country_suffix() {
        assert_eq!(
            canonical_instrument_key("eMAXIS Slim 全世界株式（オール・カントリー）"),
            canonical_instrument_key("eMAXIS Slim 全世界株式")
        );
    }

    #[test]
    fn test_position_key_keeps_account_case() {
        assert_ne!(PositionKey::new("sbi", "X"), PositionKey::new("SBI", "X"));
        assert_eq!(PositionKey::new(" SBI ", "x"), PositionKey::new("SBI", "X"));
    }

    #[test]
    fn test_separator_only_instrument_is_missing() {
        assert_eq!(
            NewPosition::new("A", "・・・", "Cash", 10).validate(),
            Err(Error::Validation(ValidationError::MissingField(
                "instrument".to_string()
            )))
        );
    }
}
