//! eBay sold-listing integration
//!
//! Response parsing for the Browse and Finding APIs, and a Finding API client

mod client;
mod parse;

pub use client::{build_query, EbayFindingClient, FINDING_API_URL, FINDING_SANDBOX_URL};
pub use parse::{parse_browse_items, parse_finding_items, BrowseResponse, FindingResponse};
