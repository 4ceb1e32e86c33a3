//! End-to-end estimation tests

use card_value::card::{Autograph, CardAttributes, GradeCompany, RawCardAttributes, Sport};
use card_value::pricing::{PriceSource, RawPricingPayload, RawSaleRecord};
use card_value::valuation::{
    scarcity_multiplier, ConfidenceLevel, MultiplierSet, ValuationEngine, MAX_COMPOSITE_MULTIPLIER,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap()
}

fn sales(source: PriceSource, prices: &[Decimal]) -> RawPricingPayload {
    let records = prices
        .iter()
        .enumerate()
        .map(|(i, p)| RawSaleRecord::new(*p, now() - Duration::days(2 * i as i64 + 1)))
        .collect();
    RawPricingPayload::new(source, records)
}

fn griffey_psa10() -> CardAttributes {
    CardAttributes::new(Sport::Baseball, 1989, "Upper Deck", "Ken Griffey Jr.")
        .rookie()
        .with_grade(GradeCompany::Psa, dec!(10))
}

#[test]
fn test_graded_rookie_from_single_source() {
    let engine = ValuationEngine::default();
    let estimate = engine
        .estimate_at(
            &griffey_psa10(),
            &[sales(PriceSource::Ebay, &[dec!(100), dec!(100), dec!(100)])],
            now(),
        )
        .unwrap();

    assert_eq!(estimate.base_price, dec!(100));
    assert_eq!(estimate.multiplier_set.condition, dec!(3.0));
    assert_eq!(estimate.multiplier_set.rookie, dec!(1.5));
    assert_eq!(estimate.multiplier_set.era, dec!(1.8));
    assert_eq!(estimate.multiplier_set.composite, dec!(8.1));
    assert_eq!(estimate.final_value, dec!(810));
    assert_eq!(estimate.quality_indicator, dec!(0.35));
    assert!(estimate.confidence < dec!(0.8));
}

#[test]
fn test_identical_inputs_identical_output() {
    let engine = ValuationEngine::default();
    let payloads = vec![
        sales(PriceSource::Ebay, &[dec!(40), dec!(44), dec!(38), dec!(41)]),
        sales(PriceSource::Comc, &[dec!(45)]),
        sales(PriceSource::OneThirtyPoint, &[dec!(39), dec!(42)]),
    ];
    let card = CardAttributes::new(Sport::Basketball, 2018, "Prizm", "Luka Doncic")
        .rookie()
        .with_parallel("Silver");

    let first = engine.estimate_at(&card, &payloads, now()).unwrap();
    for _ in 0..5 {
        assert_eq!(engine.estimate_at(&card, &payloads, now()).unwrap(), first);
    }
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&engine.estimate_at(&card, &payloads, now()).unwrap()).unwrap()
    );
}

#[test]
fn test_composite_is_capped_at_25() {
    let card = CardAttributes::new(Sport::Soccer, 1970, "Panini", "Pele")
        .rookie()
        .with_autograph(Autograph::OnCard)
        .with_parallel("Superfractor")
        .with_serial(1, 1)
        .with_grade(GradeCompany::Bgs, dec!(10));

    let estimate = ValuationEngine::default()
        .estimate_at(&card, &[sales(PriceSource::Pwcc, &[dec!(1000)])], now())
        .unwrap();

    assert_eq!(estimate.multiplier_set.composite, MAX_COMPOSITE_MULTIPLIER);
    assert!(estimate.multiplier_set.cap_applied);
    assert!(estimate.multiplier_set.raw_composite > dec!(25));
    assert_eq!(estimate.final_value, dec!(25000));
}

#[test]
fn test_scarcity_never_increases_with_print_run() {
    let mut previous = scarcity_multiplier(Some(1));
    for denominator in 1..=1000u32 {
        let current = scarcity_multiplier(Some(denominator));
        assert!(current <= previous, "scarcity rose at /{}", denominator);
        previous = current;
    }
    assert_eq!(scarcity_multiplier(Some(1000)), Decimal::ONE);
}

#[test]
fn test_higher_grade_never_lowers_condition() {
    for company in [GradeCompany::Psa, GradeCompany::Bgs, GradeCompany::Sgc] {
        let mut previous = Decimal::ZERO;
        for step in 2..=20 {
            let grade = Decimal::from(step) / Decimal::TWO;
            let card = griffey_psa10().with_grade(company, grade);
            let condition = MultiplierSet::compute(&card).condition;
            assert!(condition >= previous, "{} {} dropped", company, grade);
            previous = condition;
        }
    }
}

#[test]
fn test_missing_sources_are_not_renormalized() {
    let card = CardAttributes::new(Sport::Baseball, 2005, "Topps", "Some Player");
    let estimate = ValuationEngine::default()
        .estimate_at(
            &card,
            &[
                sales(PriceSource::Ebay, &[dec!(100)]),
                sales(PriceSource::OneThirtyPoint, &[dec!(200)]),
                sales(PriceSource::Pwcc, &[]),
            ],
            now(),
        )
        .unwrap();

    // An empty PWCC payload contributes no weight: (100 * 0.35 + 200 * 0.20) / 0.55
    assert_eq!(estimate.base_price, dec!(136.36));
    assert_eq!(estimate.quality_indicator, dec!(0.55));
    assert_eq!(estimate.source_count, 2);
}

#[test]
fn test_outlier_does_not_move_base_price() {
    let card = CardAttributes::new(Sport::Football, 2005, "Topps", "Aaron Rodgers");
    let engine = ValuationEngine::default();
    let clean = engine
        .estimate_at(
            &card,
            &[sales(PriceSource::Ebay, &[dec!(50), dec!(52), dec!(48)])],
            now(),
        )
        .unwrap();
    let noisy = engine
        .estimate_at(
            &card,
            &[sales(
                PriceSource::Ebay,
                &[dec!(50), dec!(52), dec!(48), dec!(99999)],
            )],
            now(),
        )
        .unwrap();
    assert_eq!(clean.base_price, noisy.base_price);
}

#[test]
fn test_mock_prices_distinct_and_reproducible() {
    let engine = ValuationEngine::default();
    let a = CardAttributes::new(Sport::Baseball, 1952, "Topps", "Mickey Mantle");
    let b = CardAttributes::new(Sport::Hockey, 1979, "O-Pee-Chee", "Wayne Gretzky");

    let a1 = engine.estimate_at(&a, &[], now()).unwrap();
    let a2 = engine.estimate_at(&a, &[], now()).unwrap();
    let b1 = engine.estimate_at(&b, &[], now()).unwrap();

    assert!(a1.used_mock_price && b1.used_mock_price);
    assert_eq!(a1.base_price, a2.base_price);
    assert_ne!(a1.base_price, b1.base_price);
    assert_eq!(a1.source_count, 0);
    assert_eq!(a1.confidence_level, ConfidenceLevel::VeryLow);
}

#[test]
fn test_confidence_bounded_across_inputs() {
    let engine = ValuationEngine::default();
    let cards = [
        CardAttributes::new(Sport::Other, 1860, "Antique", "Unknown"),
        griffey_psa10(),
        CardAttributes::new(Sport::Basketball, 2023, "Select", "Victor Wembanyama")
            .rookie()
            .with_autograph(Autograph::Sticker)
            .with_parallel("Gold")
            .with_serial(3, 10)
            .with_grade(GradeCompany::Sgc, dec!(9.5)),
    ];
    let payload_sets = [
        vec![],
        vec![sales(PriceSource::SportLots, &[dec!(0.5)])],
        PriceSource::ALL
            .iter()
            .map(|s| sales(*s, &[dec!(10), dec!(11), dec!(12)]))
            .collect::<Vec<_>>(),
    ];

    for card in &cards {
        for payloads in &payload_sets {
            let estimate = engine.estimate_at(card, payloads, now()).unwrap();
            assert!(estimate.confidence >= Decimal::ZERO);
            assert!(estimate.confidence <= Decimal::ONE);
            assert!(estimate.value_range.low <= estimate.final_value);
            assert!(estimate.value_range.high >= estimate.final_value);
        }
    }
}

#[test]
fn test_all_sources_full_coverage() {
    let payloads: Vec<_> = PriceSource::ALL
        .iter()
        .map(|s| sales(*s, &[dec!(20), dec!(20), dec!(20)]))
        .collect();
    let card = CardAttributes::new(Sport::Baseball, 2010, "Bowman Chrome", "Mike Trout");
    let estimate = ValuationEngine::default()
        .estimate_at(&card, &payloads, now())
        .unwrap();
    assert_eq!(estimate.quality_indicator, Decimal::ONE);
    assert_eq!(estimate.source_count, 7);
    assert_eq!(estimate.base_price, dec!(20));
}

#[test]
fn test_identifier_output_through_engine() {
    let raw: RawCardAttributes = serde_json::from_str(
        r#"{
            "sport": "football",
            "year": "2017",
            "set_name": "Contenders",
            "player_name": "Patrick Mahomes",
            "parallel": "Cracked Ice",
            "is_rookie": true,
            "is_auto": true,
            "numbering": "23/25",
            "grading_company": "PSA",
            "grade_value": 10
        }"#,
    )
    .unwrap();
    let card = CardAttributes::try_from(raw).unwrap();
    let estimate = ValuationEngine::default()
        .estimate_at(&card, &[sales(PriceSource::Ebay, &[dec!(900)])], now())
        .unwrap();

    assert!(estimate.multiplier_set.cap_applied);
    assert_eq!(estimate.final_value, dec!(22500));
    assert!(estimate.grading_recommendation.is_none());
}

#[test]
fn test_revaluation_tracks_change() {
    let engine = ValuationEngine::default();
    let card = griffey_psa10();
    let before = engine
        .estimate_at(&card, &[sales(PriceSource::Ebay, &[dec!(100)])], now())
        .unwrap();
    let later = now() + Duration::days(60);
    let revaluation = engine
        .revalue_at(
            &before,
            &card,
            &[sales(PriceSource::Ebay, &[dec!(80)])],
            later,
        )
        .unwrap();

    assert_eq!(revaluation.previous, before);
    assert_eq!(revaluation.current.final_value, dec!(648));
    assert_eq!(revaluation.change, dec!(-162));
    assert_eq!(revaluation.change_pct, Some(dec!(-20)));
}
