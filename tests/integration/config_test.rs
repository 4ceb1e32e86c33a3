//! Configuration integration tests

use card_value::card::{CardAttributes, Sport};
use card_value::config::Config;
use card_value::valuation::ValuationEngine;
use chrono::{TimeZone, Utc};
use rust_decimal_macros::dec;
use std::io::Write;

#[test]
fn test_config_example_loads() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example")).unwrap();
    assert_eq!(config.engine.mock_price_min, dec!(5));
    assert_eq!(config.confidence.stale_days, 180);
    assert!(config.ebay.app_id.is_none());
}

#[test]
fn test_mock_range_from_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[engine]\nmock_price_min = 42\nmock_price_max = 42").unwrap();

    let config = Config::load(file.path()).unwrap();
    let engine = ValuationEngine::from_config(&config);
    let card = CardAttributes::new(Sport::Baseball, 1993, "SP", "Derek Jeter");
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();

    let estimate = engine.estimate_at(&card, &[], now).unwrap();
    assert!(estimate.used_mock_price);
    assert_eq!(estimate.base_price, dec!(42));
}

#[test]
fn test_invalid_config_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[confidence]\nfresh_days = \"soon\"").unwrap();
    assert!(Config::load(file.path()).is_err());
}
