//! Estimate accuracy against realised sales

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValueEstimate;
use crate::pricing::{mean, median};

/// One estimate compared with the price it actually sold for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyRecord {
    pub estimated: Decimal,
    pub actual: Decimal,
    /// Absolute error in dollars
    pub error: Decimal,
    /// Absolute error as a percent of the actual price
    pub error_pct: Decimal,
    /// `max(0, 100 - error_pct)`
    pub accuracy_pct: Decimal,
    /// Whether the actual price fell inside the estimate's value range
    pub in_range: bool,
}

/// Roll-up over all recorded comparisons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccuracySummary {
    pub total: usize,
    pub mean_accuracy_pct: Decimal,
    pub median_accuracy_pct: Decimal,
    /// Percent of actual prices inside the value range
    pub in_range_pct: Decimal,
}

/// Accumulates estimate-versus-sale comparisons
#[derive(Debug, Default)]
pub struct AccuracyTracker {
    records: Vec<AccuracyRecord>,
}

impl AccuracyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare an estimate with a realised sale price
    ///
    /// A non-positive actual price scores zero accuracy.
    pub fn record(&mut self, estimate: &ValueEstimate, actual: Decimal) -> AccuracyRecord {
        let estimated = estimate.final_value;
        let error = (estimated - actual).abs();
        let error_pct = if actual > Decimal::ZERO {
            (error / actual * Decimal::ONE_HUNDRED).round_dp(2)
        } else {
            Decimal::ONE_HUNDRED
        };
        let accuracy_pct = (Decimal::ONE_HUNDRED - error_pct).max(Decimal::ZERO);

        let record = AccuracyRecord {
            estimated,
            actual,
            error,
            error_pct,
            accuracy_pct,
            in_range: estimate.value_range.contains(actual),
        };

        tracing::debug!(
            estimated = %estimated,
            actual = %actual,
            accuracy_pct = %accuracy_pct,
            "Recorded estimate accuracy"
        );

        self.records.push(record.clone());
        record
    }

    pub fn records(&self) -> &[AccuracyRecord] {
        &self.records
    }

    /// Summarize everything recorded so far
    pub fn summary(&self) -> AccuracySummary {
        let accuracies: Vec<Decimal> = self.records.iter().map(|r| r.accuracy_pct).collect();
        let (Some(mean_accuracy), Some(median_accuracy)) = (mean(&accuracies), median(&accuracies))
        else {
            return AccuracySummary::default();
        };

        let in_range = self.records.iter().filter(|r| r.in_range).count();
        let in_range_pct = Decimal::from(in_range) / Decimal::from(self.records.len())
            * Decimal::ONE_HUNDRED;

        AccuracySummary {
            total: self.records.len(),
            mean_accuracy_pct: mean_accuracy.round_dp(2),
            median_accuracy_pct: median_accuracy.round_dp(2),
            in_range_pct: in_range_pct.round_dp(2),
        }
    }
}
