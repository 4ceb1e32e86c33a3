//! Price source adapter
//!
//! Normalizes raw sold-listing payloads into [`PriceObservation`]s. Bad
//! records are dropped one at a time; the rest of the payload proceeds.
//! Source weights are attached as-is and never renormalized here.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::stats::median;
use super::{PriceObservation, RawPricingPayload, RawSaleRecord};
use crate::telemetry::{increment_counter, CounterMetric};

/// Ratio to the payload median beyond which a record is an outlier
pub const OUTLIER_RATIO: Decimal = dec!(50);

/// Fewest sane records for which outlier filtering applies
pub const MIN_OUTLIER_SAMPLE: usize = 3;

/// Highest price accepted from a feed
///
/// Keeps every later product and sum well inside `Decimal` range.
pub const MAX_PLAUSIBLE_PRICE: Decimal = dec!(100000000);

/// Why a raw record was not turned into an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    MissingPrice,
    NonPositivePrice,
    ImplausiblePrice,
    MissingTimestamp,
    Outlier,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::MissingPrice => write!(f, "missing price"),
            DropReason::NonPositivePrice => write!(f, "non-positive price"),
            DropReason::ImplausiblePrice => write!(f, "implausibly large price"),
            DropReason::MissingTimestamp => write!(f, "missing timestamp"),
            DropReason::Outlier => write!(f, "outlier against payload median"),
        }
    }
}

/// Normalize one source's payload
///
/// Output order follows input order.
pub fn normalize(payload: &RawPricingPayload) -> Vec<PriceObservation> {
    let source = payload.source;
    let weight = source.weight();

    let sane: Vec<(usize, Decimal, DateTime<Utc>)> = payload
        .records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| match check_record(record) {
            Ok((price, observed_at)) => Some((index, price, observed_at)),
            Err(reason) => {
                log_drop(payload, index, reason);
                None
            }
        })
        .collect();

    let prices: Vec<Decimal> = sane.iter().map(|(_, price, _)| *price).collect();
    let reference = outlier_reference(&prices);

    sane.iter()
        .filter_map(|(index, price, observed_at)| {
            if reference.is_some_and(|median| is_outlier(*price, median)) {
                log_drop(payload, *index, DropReason::Outlier);
                return None;
            }
            Some(PriceObservation {
                source,
                price: *price,
                observed_at: *observed_at,
                source_weight: weight,
            })
        })
        .collect()
}

/// Normalize every payload, concatenated in input order
pub fn normalize_all(payloads: &[RawPricingPayload]) -> Vec<PriceObservation> {
    payloads.iter().flat_map(normalize).collect()
}

fn check_record(record: &RawSaleRecord) -> Result<(Decimal, DateTime<Utc>), DropReason> {
    let price = record.price.ok_or(DropReason::MissingPrice)?;
    if price <= Decimal::ZERO {
        return Err(DropReason::NonPositivePrice);
    }
    if price > MAX_PLAUSIBLE_PRICE {
        return Err(DropReason::ImplausiblePrice);
    }
    let observed_at = record.sold_at.ok_or(DropReason::MissingTimestamp)?;
    Ok((price, observed_at))
}

/// Median of all sane prices, or `None` when too few to have a majority
fn outlier_reference(prices: &[Decimal]) -> Option<Decimal> {
    if prices.len() < MIN_OUTLIER_SAMPLE {
        return None;
    }
    median(prices)
}

/// Strictly beyond 50x or 1/50x the reference median
fn is_outlier(price: Decimal, median: Decimal) -> bool {
    price > median * OUTLIER_RATIO || price * OUTLIER_RATIO < median
}

fn log_drop(payload: &RawPricingPayload, index: usize, reason: DropReason) {
    increment_counter(CounterMetric::RecordsDropped);
    tracing::debug!(
        source = %payload.source,
        record = index,
        reason = %reason,
        "Dropped sold-listing record"
    );
}
