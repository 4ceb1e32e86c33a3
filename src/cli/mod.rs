//! CLI interface for card-value
//!
//! Provides subcommands for:
//! - `estimate`: Value one card from attributes and sold listings
//! - `revalue`: Re-estimate a card and compare with an earlier estimate
//! - `validate`: Score estimates against realised sale prices
//! - `sources`: Show price sources and their weights
//! - `config`: Show effective configuration

mod estimate;
mod revalue;
mod validate;

pub use estimate::EstimateArgs;
pub use revalue::RevalueArgs;
pub use validate::{AccuracyCase, ValidateArgs};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::card::{CardAttributes, RawCardAttributes};
use crate::pricing::RawPricingPayload;

#[derive(Parser, Debug)]
#[command(name = "card-value")]
#[command(about = "Trading card value estimation from multi-source sold listings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate a card's value
    Estimate(EstimateArgs),
    /// Re-estimate against a previous estimate
    Revalue(RevalueArgs),
    /// Measure accuracy against known sale prices
    Validate(ValidateArgs),
    /// Show price sources and weights
    Sources,
    /// Show configuration
    Config,
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// Read and deserialize a JSON file
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load identifier output and convert it to typed attributes
pub(crate) fn load_card(path: &Path) -> anyhow::Result<CardAttributes> {
    let raw: RawCardAttributes = read_json(path)?;
    let card = CardAttributes::try_from(raw)
        .with_context(|| format!("Invalid card attributes in {}", path.display()))?;
    Ok(card)
}

/// Load sold-listing payloads, or none when no file is given
pub(crate) fn load_payloads(path: Option<&Path>) -> anyhow::Result<Vec<RawPricingPayload>> {
    match path {
        Some(path) => read_json(path),
        None => Ok(Vec::new()),
    }
}
