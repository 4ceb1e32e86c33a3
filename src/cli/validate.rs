//! Validate command implementation
//!
//! Runs the engine over cards with known sale prices and reports accuracy.

use clap::Args;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::PathBuf;

use super::{read_json, OutputFormat};
use crate::card::{CardAttributes, RawCardAttributes};
use crate::config::Config;
use crate::pricing::RawPricingPayload;
use crate::valuation::{AccuracyTracker, ValuationEngine};

/// A card with the price it actually sold for
#[derive(Debug, Clone, Deserialize)]
pub struct AccuracyCase {
    pub card: RawCardAttributes,
    #[serde(default)]
    pub prices: Vec<RawPricingPayload>,
    pub actual_price: Decimal,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON array of {card, prices, actual_price} cases
    #[arg(long)]
    pub cases: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl ValidateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let cases: Vec<AccuracyCase> = read_json(&self.cases)?;
        let engine = ValuationEngine::from_config(config);
        let mut tracker = AccuracyTracker::new();
        let mut skipped = 0usize;

        for (index, case) in cases.into_iter().enumerate() {
            let card = match CardAttributes::try_from(case.card) {
                Ok(card) => card,
                Err(e) => {
                    tracing::warn!(case = index, error = %e, "Skipping invalid case");
                    skipped += 1;
                    continue;
                }
            };
            let estimate = engine.estimate(&card, &case.prices)?;
            let record = tracker.record(&estimate, case.actual_price);

            if self.format == OutputFormat::Table {
                println!(
                    "{:>3}  est ${:<10} actual ${:<10} accuracy {:>6}%{}  {}",
                    index,
                    record.estimated,
                    record.actual,
                    record.accuracy_pct,
                    if record.in_range { " *" } else { "  " },
                    card.summary()
                );
            }
        }

        let summary = tracker.summary();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Table => {
                println!();
                println!("Cases:            {} ({} skipped)", summary.total, skipped);
                println!("Mean accuracy:    {}%", summary.mean_accuracy_pct);
                println!("Median accuracy:  {}%", summary.median_accuracy_pct);
                println!("Within range (*): {}%", summary.in_range_pct);
            }
        }
        Ok(())
    }
}
