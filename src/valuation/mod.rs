//! Valuation module
//!
//! Turns card attributes and aggregated market data into a capped, scored
//! value estimate

mod accuracy;
mod confidence;
mod engine;
pub mod mock;
mod multipliers;
mod types;

pub use accuracy::{AccuracyRecord, AccuracySummary, AccuracyTracker};
pub use confidence::{
    ConfidenceFactors, ConfidenceInputs, ConfidenceLevel, ConfidenceScore, ConfidenceScorer,
};
pub use engine::{grading_recommendation, value_range, ValuationEngine};
pub use multipliers::{
    condition_multiplier, parallel_multiplier, scarcity_multiplier, sport_multiplier, Era,
    MultiplierSet, MAX_COMPOSITE_MULTIPLIER, UNLISTED_PARALLEL_MULTIPLIER,
};
pub use types::{Revaluation, ValuationError, ValueEstimate, ValueRange};
