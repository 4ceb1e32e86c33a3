//! Revalue command implementation

use clap::Args;
use std::path::PathBuf;

use super::estimate::{fetch_ebay, print_estimate};
use super::{load_card, load_payloads, read_json, OutputFormat};
use crate::config::Config;
use crate::valuation::{ValuationEngine, ValueEstimate};

#[derive(Args, Debug)]
pub struct RevalueArgs {
    /// Card attributes JSON (vision identifier output)
    #[arg(long)]
    pub card: PathBuf,

    /// Previous estimate JSON, as written by `estimate --format json`
    #[arg(long)]
    pub previous: PathBuf,

    /// Sold-listing payloads JSON
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// eBay application ID for fetching live sold listings
    #[arg(long)]
    pub ebay_app_id: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl RevalueArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let card = load_card(&self.card)?;
        let previous: ValueEstimate = read_json(&self.previous)?;
        let mut payloads = load_payloads(self.prices.as_deref())?;

        let app_id = self.ebay_app_id.clone().or_else(|| config.ebay.app_id.clone());
        if let Some(app_id) = app_id {
            if let Some(payload) = fetch_ebay(&app_id, config, &card).await {
                payloads.push(payload);
            }
        }

        let engine = ValuationEngine::from_config(config);
        let revaluation = engine.revalue(&previous, &card, &payloads)?;

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&revaluation)?),
            OutputFormat::Table => {
                print_estimate(&card, &revaluation.current);
                println!();
                println!(
                    "  Previous:        ${} ({})",
                    revaluation.previous.final_value,
                    revaluation.previous.generated_at.format("%Y-%m-%d")
                );
                match revaluation.change_pct {
                    Some(pct) => println!("  Change:          ${} ({}%)", revaluation.change, pct),
                    None => println!("  Change:          ${}", revaluation.change),
                }
            }
        }
        Ok(())
    }
}
