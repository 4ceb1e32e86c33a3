//! Estimate command implementation

use clap::Args;
use std::path::PathBuf;

use super::{load_card, load_payloads, OutputFormat};
use crate::card::CardAttributes;
use crate::config::Config;
use crate::pricing::ebay::EbayFindingClient;
use crate::pricing::{RawPricingPayload, SoldListingProvider};
use crate::valuation::{ValuationEngine, ValueEstimate};

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Card attributes JSON (vision identifier output)
    #[arg(long)]
    pub card: PathBuf,

    /// Sold-listing payloads JSON, an array of {source, records}
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// eBay application ID for fetching live sold listings
    #[arg(long)]
    pub ebay_app_id: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl EstimateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let card = load_card(&self.card)?;
        let mut payloads = load_payloads(self.prices.as_deref())?;

        let app_id = self.ebay_app_id.clone().or_else(|| config.ebay.app_id.clone());
        if let Some(app_id) = app_id {
            if let Some(payload) = fetch_ebay(&app_id, config, &card).await {
                payloads.push(payload);
            }
        }

        let engine = ValuationEngine::from_config(config);
        let estimate = engine.estimate(&card, &payloads)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
            OutputFormat::Table => print_estimate(&card, &estimate),
        }
        Ok(())
    }
}

/// Fetch eBay sold listings; failures are logged and skipped
pub(crate) async fn fetch_ebay(
    app_id: &str,
    config: &Config,
    card: &CardAttributes,
) -> Option<RawPricingPayload> {
    let client = match EbayFindingClient::new(app_id, &config.ebay) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to build eBay client");
            return None;
        }
    };

    match client.fetch_sold(card).await {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::warn!(error = %e, "eBay fetch failed, continuing without it");
            None
        }
    }
}

/// Print an estimate as a human-readable table
pub(crate) fn print_estimate(card: &CardAttributes, estimate: &ValueEstimate) {
    println!("Card: {}", card.summary());
    println!();
    println!("  Base price:      ${}", estimate.base_price);
    if estimate.used_mock_price {
        println!("                   (no market data, deterministic mock price)");
    }
    for quote in &estimate.sources {
        println!(
            "    {:<10} {:<11} weight {} ({} sales)",
            quote.source.as_str(),
            format!("${}", quote.price.round_dp(2)),
            quote.weight,
            quote.sample_count
        );
    }
    println!();
    println!("  Multipliers:");
    for (name, value) in estimate.multiplier_set.factors() {
        println!("    {:<13} {}x", name, value);
    }
    let cap_note = if estimate.multiplier_set.cap_applied {
        format!(" (capped from {}x)", estimate.multiplier_set.raw_composite)
    } else {
        String::new()
    };
    println!(
        "    {:<13} {}x{}",
        "composite", estimate.multiplier_set.composite, cap_note
    );
    println!();
    println!("  Final value:     ${}", estimate.final_value);
    println!(
        "  Range:           ${} - ${}",
        estimate.value_range.low, estimate.value_range.high
    );
    println!(
        "  Confidence:      {} ({})",
        estimate.confidence, estimate.confidence_level
    );
    println!(
        "  Sources:         {} (coverage {})",
        estimate.source_count, estimate.quality_indicator
    );
    println!(
        "  Trend:           {:?} {}% ({:?} volatility, {})",
        estimate.trend.direction,
        estimate.trend.change_pct,
        estimate.trend.volatility,
        estimate.trend.recommendation
    );
    if let Some(recommendation) = &estimate.grading_recommendation {
        println!("  Grading:         {}", recommendation);
    }
}
