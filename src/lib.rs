//! card-value: value estimation for physical trading cards
//!
//! This library provides the core components for:
//! - Typed card attributes and ingestion of vision identifier output
//! - Normalization of multi-source sold listings
//! - Weighted price aggregation without renormalization
//! - Seven-factor multipliers under a global 25x cap
//! - Confidence scoring and a deterministic no-data fallback
//! - eBay completed-listing fetching
//! - Accuracy tracking against realised sales

pub mod card;
pub mod cli;
pub mod config;
pub mod pricing;
pub mod telemetry;
pub mod valuation;
