//! Pricing pipeline integration tests

use card_value::card::{CardAttributes, Sport};
use card_value::pricing::ebay::parse_finding_items;
use card_value::pricing::{
    aggregate, normalize_all, Aggregation, PriceSource, RawPricingPayload, RawSaleRecord,
    TrendDirection,
};
use card_value::valuation::ValuationEngine;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const FINDING_BODY: &str = r#"{
    "findCompletedItemsResponse": [{
        "ack": ["Success"],
        "searchResult": [{
            "@count": "4",
            "item": [
                {
                    "sellingStatus": [{"currentPrice": [{"__value__": "60.00"}]}],
                    "listingInfo": [{"endTime": ["2026-10-10T12:00:00.000Z"]}]
                },
                {
                    "sellingStatus": [{"currentPrice": [{"__value__": "64.00"}]}],
                    "listingInfo": [{"endTime": ["2026-10-12T12:00:00.000Z"]}]
                },
                {
                    "sellingStatus": [{"currentPrice": [{"__value__": "0.00"}]}],
                    "listingInfo": [{"endTime": ["2026-10-13T12:00:00.000Z"]}]
                },
                {
                    "sellingStatus": [{"currentPrice": [{"__value__": "62.00"}]}]
                }
            ]
        }]
    }]
}"#;

#[test]
fn test_finding_response_feeds_engine() {
    let payload = parse_finding_items(FINDING_BODY).unwrap();
    assert_eq!(payload.records.len(), 4);

    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let card = CardAttributes::new(Sport::Baseball, 2011, "Topps Update", "Mike Trout");
    let estimate = ValuationEngine::default()
        .estimate_at(&card, &[payload], now)
        .unwrap();

    // Zero price and missing end time are dropped
    assert_eq!(estimate.sources.len(), 1);
    assert_eq!(estimate.sources[0].sample_count, 2);
    assert_eq!(estimate.base_price, dec!(62));
    assert!(!estimate.used_mock_price);
}

#[test]
fn test_empty_payloads_are_no_data() {
    let payloads = vec![
        RawPricingPayload::new(PriceSource::Beckett, vec![]),
        RawPricingPayload::new(PriceSource::PsaApr, vec![RawSaleRecord::default()]),
    ];
    assert_eq!(aggregate(&normalize_all(&payloads)), Aggregation::NoData);
}

#[test]
fn test_normalize_all_keeps_payload_order() {
    let at = Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap();
    let payloads = vec![
        RawPricingPayload::new(PriceSource::Pwcc, vec![RawSaleRecord::new(dec!(30), at)]),
        RawPricingPayload::new(PriceSource::Ebay, vec![RawSaleRecord::new(dec!(10), at)]),
    ];
    let observations = normalize_all(&payloads);
    assert_eq!(observations[0].source, PriceSource::Pwcc);
    assert_eq!(observations[0].source_weight, dec!(0.15));
    assert_eq!(observations[1].source, PriceSource::Ebay);
}

#[test]
fn test_rising_market_reported_on_estimate() {
    let start = Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap();
    let prices = [dec!(100), dec!(102), dec!(98), dec!(140), dec!(145), dec!(150)];
    let records = prices
        .iter()
        .enumerate()
        .map(|(i, p)| RawSaleRecord::new(*p, start + Duration::days(10 * i as i64)))
        .collect();
    let payload = RawPricingPayload::new(PriceSource::Ebay, records);

    let card = CardAttributes::new(Sport::Basketball, 2003, "Topps Chrome", "LeBron James");
    let estimate = ValuationEngine::default()
        .estimate_at(&card, &[payload], start + Duration::days(60))
        .unwrap();
    assert_eq!(estimate.trend.direction, TrendDirection::Up);
    assert!(estimate.trend.change_pct > Decimal::ZERO);
}
