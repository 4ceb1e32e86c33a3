//! Estimation orchestrator
//!
//! Runs the fixed pipeline for one card:
//! 1. Validate attributes
//! 2. Normalize raw payloads into observations
//! 3. Aggregate into a base price, or fall back to the mock price
//! 4. Compute multipliers and confidence
//! 5. Assemble the estimate

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::confidence::{ConfidenceInputs, ConfidenceScorer};
use super::mock::mock_base_price;
use super::{MultiplierSet, Revaluation, ValuationError, ValueEstimate, ValueRange};
use crate::card::CardAttributes;
use crate::config::{Config, EngineConfig};
use crate::pricing::{aggregate, analyze_trend, normalize_all, Aggregation, RawPricingPayload};
use crate::telemetry::{increment_counter, record_histogram, CounterMetric, HistogramMetric};

/// Narrowest relative half-width of the value range
const MIN_RANGE_SPREAD: Decimal = dec!(0.05);

/// Valuation engine
///
/// Holds only immutable configuration, so one instance can be shared across
/// threads.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: EngineConfig,
    scorer: ConfidenceScorer,
}

impl ValuationEngine {
    /// Create an engine
    pub fn new(config: EngineConfig, scorer: ConfidenceScorer) -> Self {
        Self { config, scorer }
    }

    /// Create an engine from the root configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.engine.clone(),
            ConfidenceScorer::new(config.confidence.clone()),
        )
    }

    /// Estimate a card's value as of now
    pub fn estimate(
        &self,
        card: &CardAttributes,
        payloads: &[RawPricingPayload],
    ) -> Result<ValueEstimate, ValuationError> {
        self.estimate_at(card, payloads, Utc::now())
    }

    /// Estimate a card's value against an explicit clock
    ///
    /// Identical inputs produce identical estimates.
    pub fn estimate_at(
        &self,
        card: &CardAttributes,
        payloads: &[RawPricingPayload],
        now: DateTime<Utc>,
    ) -> Result<ValueEstimate, ValuationError> {
        card.validate_at(now)?;

        let observations = normalize_all(payloads);
        let aggregation = aggregate(&observations);

        let (base_price, quality_indicator, source_count, latest, sources, used_mock_price) =
            match aggregation {
                Aggregation::Priced(quote) => (
                    quote.base_price,
                    quote.quality_indicator,
                    quote.source_count,
                    Some(quote.latest_observation),
                    quote.sources,
                    false,
                ),
                Aggregation::NoData => {
                    let mock = mock_base_price(
                        card,
                        self.config.mock_price_min,
                        self.config.mock_price_max,
                    );
                    tracing::warn!(
                        card = %card.summary(),
                        mock_price = %mock,
                        "No market data, using deterministic mock price"
                    );
                    increment_counter(CounterMetric::MockFallback);
                    (mock, Decimal::ZERO, 0, None, Vec::new(), true)
                }
            };

        let multiplier_set = MultiplierSet::compute(card);
        if multiplier_set.cap_applied {
            tracing::debug!(
                raw = %multiplier_set.raw_composite,
                capped = %multiplier_set.composite,
                "Composite multiplier capped"
            );
        }

        let confidence = self.scorer.score(&ConfidenceInputs {
            card,
            quality_indicator,
            source_count,
            latest_observation: latest,
            multipliers: &multiplier_set,
            now,
        });

        // Reported base and final value must agree to the cent
        let base_price = base_price.round_dp(2);
        let final_value = (base_price * multiplier_set.composite).round_dp(2);
        let value_range = value_range(final_value, confidence.score);
        let grading_recommendation = if card.is_graded() {
            None
        } else {
            Some(grading_recommendation(final_value).to_string())
        };

        tracing::info!(
            card = %card.summary(),
            base = %base_price,
            composite = %multiplier_set.composite,
            value = %final_value,
            confidence = %confidence.score,
            sources = source_count,
            "Estimated card value"
        );
        increment_counter(CounterMetric::Estimates);
        record_histogram(
            HistogramMetric::EstimateConfidence,
            f64::try_from(confidence.score).unwrap_or(0.0),
        );

        Ok(ValueEstimate {
            base_price,
            multiplier_set,
            final_value,
            confidence: confidence.score,
            source_count,
            generated_at: now,
            quality_indicator,
            confidence_level: confidence.level,
            confidence_factors: confidence.factors,
            value_range,
            trend: analyze_trend(&observations),
            sources,
            grading_recommendation,
            used_mock_price,
        })
    }

    /// Produce a fresh estimate and compare it with an earlier one
    pub fn revalue(
        &self,
        previous: &ValueEstimate,
        card: &CardAttributes,
        payloads: &[RawPricingPayload],
    ) -> Result<Revaluation, ValuationError> {
        self.revalue_at(previous, card, payloads, Utc::now())
    }

    /// Revalue against an explicit clock
    pub fn revalue_at(
        &self,
        previous: &ValueEstimate,
        card: &CardAttributes,
        payloads: &[RawPricingPayload],
        now: DateTime<Utc>,
    ) -> Result<Revaluation, ValuationError> {
        let current = self.estimate_at(card, payloads, now)?;
        let revaluation = Revaluation::new(previous.clone(), current);
        tracing::info!(
            previous = %revaluation.previous.final_value,
            current = %revaluation.current.final_value,
            change = %revaluation.change,
            "Revalued card"
        );
        Ok(revaluation)
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), ConfidenceScorer::default())
    }
}

/// Band around the final value that narrows as confidence rises
pub fn value_range(final_value: Decimal, confidence: Decimal) -> ValueRange {
    let spread = (dec!(0.5) - confidence / Decimal::TWO).max(MIN_RANGE_SPREAD);
    ValueRange {
        low: (final_value * (Decimal::ONE - spread)).round_dp(2),
        high: (final_value * (Decimal::ONE + spread)).round_dp(2),
    }
}

/// Grading advice for an ungraded card at the given value
pub fn grading_recommendation(final_value: Decimal) -> &'static str {
    if final_value < dec!(20) {
        "Not worth grading unless gem mint condition"
    } else if final_value < dec!(50) {
        "Consider grading if confident in 9+ grade"
    } else if final_value < dec!(100) {
        "Grading recommended if NM+ or better"
    } else if final_value < dec!(500) {
        "Definitely grade if NM or better"
    } else {
        "High value, professional grading essential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{GradeCompany, Sport, ValidationError};
    use crate::pricing::{PriceSource, RawSaleRecord};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn griffey() -> CardAttributes {
        CardAttributes::new(Sport::Baseball, 1989, "Upper Deck", "Ken Griffey Jr.")
            .rookie()
            .with_grade(GradeCompany::Psa, dec!(10))
    }

    fn payload(source: PriceSource, prices: &[Decimal]) -> RawPricingPayload {
        let records = prices
            .iter()
            .enumerate()
            .map(|(i, p)| RawSaleRecord::new(*p, now() - Duration::days(i as i64 + 1)))
            .collect();
        RawPricingPayload::new(source, records)
    }

    #[test]
    fn test_graded_rookie_scenario() {
        let engine = ValuationEngine::default();
        let estimate = engine
            .estimate_at(
                &griffey(),
                &[payload(PriceSource::Ebay, &[dec!(100), dec!(100), dec!(100)])],
                now(),
            )
            .unwrap();

        assert_eq!(estimate.base_price, dec!(100));
        assert_eq!(estimate.multiplier_set.composite, dec!(8.1));
        assert_eq!(estimate.final_value, dec!(810.00));
        assert_eq!(estimate.quality_indicator, dec!(0.35));
        assert_eq!(estimate.source_count, 1);
        assert!(!estimate.used_mock_price);
        assert!(estimate.grading_recommendation.is_none());
        assert!(estimate.confidence < dec!(0.8));
    }

    #[test]
    fn test_no_data_uses_mock() {
        let engine = ValuationEngine::default();
        let card = CardAttributes::new(Sport::Hockey, 2005, "Upper Deck", "Sidney Crosby");
        let estimate = engine.estimate_at(&card, &[], now()).unwrap();

        assert!(estimate.used_mock_price);
        assert_eq!(estimate.source_count, 0);
        assert_eq!(estimate.quality_indicator, Decimal::ZERO);
        assert!(estimate.base_price > Decimal::ZERO);
        assert!(estimate.sources.is_empty());
    }

    #[test]
    fn test_all_records_dropped_uses_mock() {
        let engine = ValuationEngine::default();
        let bad = RawPricingPayload::new(
            PriceSource::Comc,
            vec![RawSaleRecord {
                price: Some(dec!(-4)),
                sold_at: Some(now()),
                url: None,
            }],
        );
        let estimate = engine.estimate_at(&griffey(), &[bad], now()).unwrap();
        assert!(estimate.used_mock_price);
    }

    #[test]
    fn test_invalid_card_is_rejected() {
        let engine = ValuationEngine::default();
        let card = CardAttributes::new(Sport::Baseball, 1989, "Upper Deck", "");
        let err = engine.estimate_at(&card, &[], now()).unwrap_err();
        assert_eq!(
            err,
            ValuationError::Validation(ValidationError::MissingField {
                field: "player_name"
            })
        );
    }

    #[test]
    fn test_final_value_uses_reported_base() {
        let engine = ValuationEngine::default();
        let estimate = engine
            .estimate_at(
                &griffey(),
                &[
                    payload(PriceSource::Ebay, &[dec!(100)]),
                    payload(PriceSource::OneThirtyPoint, &[dec!(200)]),
                ],
                now(),
            )
            .unwrap();

        assert_eq!(estimate.base_price, dec!(136.36));
        assert_eq!(estimate.final_value, dec!(1104.52));
        assert_eq!(
            estimate.final_value,
            (estimate.base_price * estimate.multiplier_set.composite).round_dp(2)
        );
    }

    #[test]
    fn test_implausible_prices_fall_back_to_mock() {
        let engine = ValuationEngine::default();
        let huge = Decimal::from_str_exact("30000000000000000000000000000").unwrap();
        let estimate = engine
            .estimate_at(&griffey(), &[payload(PriceSource::Ebay, &[huge, huge])], now())
            .unwrap();

        assert!(estimate.used_mock_price);
        assert!(estimate.final_value > Decimal::ZERO);
    }

    #[test]
    fn test_lone_outlier_does_not_discard_market_data() {
        let engine = ValuationEngine::default();
        let card = CardAttributes::new(Sport::Basketball, 2021, "Prizm", "LaMelo Ball");
        let estimate = engine
            .estimate_at(
                &card,
                &[payload(PriceSource::Ebay, &[dec!(10), dec!(10), dec!(1000)])],
                now(),
            )
            .unwrap();

        assert!(!estimate.used_mock_price);
        assert_eq!(estimate.base_price, dec!(10));
    }

    #[test]
    fn test_year_checked_against_supplied_clock() {
        let engine = ValuationEngine::default();
        let card = CardAttributes::new(Sport::Football, 2027, "Prizm", "Future Rookie");
        assert!(engine.estimate_at(&card, &[], now()).is_ok());

        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let err = engine.estimate_at(&card, &[], past).unwrap_err();
        assert!(matches!(
            err,
            ValuationError::Validation(ValidationError::OutOfRange { field: "year", .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let engine = ValuationEngine::default();
        let payloads = [
            payload(PriceSource::Ebay, &[dec!(90), dec!(110), dec!(100)]),
            payload(PriceSource::Pwcc, &[dec!(120)]),
        ];
        let a = engine.estimate_at(&griffey(), &payloads, now()).unwrap();
        let b = engine.estimate_at(&griffey(), &payloads, now()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ungraded_card_gets_recommendation() {
        let engine = ValuationEngine::default();
        let card = CardAttributes::new(Sport::Basketball, 2021, "Prizm", "LaMelo Ball");
        let estimate = engine
            .estimate_at(&card, &[payload(PriceSource::Ebay, &[dec!(10)])], now())
            .unwrap();
        assert_eq!(
            estimate.grading_recommendation.as_deref(),
            Some("Not worth grading unless gem mint condition")
        );
    }

    #[test]
    fn test_value_range_narrows_with_confidence() {
        let wide = value_range(dec!(100), dec!(0));
        assert_eq!(wide.low, dec!(50.00));
        assert_eq!(wide.high, dec!(150.00));

        let tight = value_range(dec!(100), dec!(1));
        assert_eq!(tight.low, dec!(95.00));
        assert_eq!(tight.high, dec!(105.00));
    }

    #[test]
    fn test_grading_thresholds() {
        assert_eq!(
            grading_recommendation(dec!(49.99)),
            "Consider grading if confident in 9+ grade"
        );
        assert_eq!(
            grading_recommendation(dec!(50)),
            "Grading recommended if NM+ or better"
        );
        assert_eq!(
            grading_recommendation(dec!(500)),
            "High value, professional grading essential"
        );
    }

    #[test]
    fn test_revalue_does_not_touch_previous() {
        let engine = ValuationEngine::default();
        let first = engine
            .estimate_at(&griffey(), &[payload(PriceSource::Ebay, &[dec!(100)])], now())
            .unwrap();
        let snapshot = first.clone();

        let later = now() + Duration::days(30);
        let revaluation = engine
            .revalue_at(
                &first,
                &griffey(),
                &[payload(PriceSource::Ebay, &[dec!(150)])],
                later,
            )
            .unwrap();

        assert_eq!(first, snapshot);
        assert_eq!(revaluation.previous, snapshot);
        assert_eq!(revaluation.current.final_value, dec!(1215.00));
        assert_eq!(revaluation.change, dec!(405.00));
        assert_eq!(revaluation.change_pct, Some(dec!(50.00)));
        assert_eq!(revaluation.current.generated_at, later);
    }
}
