//! eBay Finding API client for completed sold listings
//!
//! Authenticates with the application ID only, so no OAuth flow is needed.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::parse::FindingResponse;
use crate::card::CardAttributes;
use crate::config::EbayConfig;
use crate::pricing::{PriceSource, RawPricingPayload, SoldListingProvider};

/// Production Finding API endpoint
pub const FINDING_API_URL: &str = "https://svcs.ebay.com/services/search/FindingService/v1";

/// Sandbox Finding API endpoint
pub const FINDING_SANDBOX_URL: &str =
    "https://svcs.sandbox.ebay.com/services/search/FindingService/v1";

/// Sports trading cards category
const SPORTS_CARDS_CATEGORY: &str = "261328";

/// Maximum page size accepted by the Finding API
const MAX_ENTRIES_PER_PAGE: u32 = 100;

/// Client for eBay's completed-items search
pub struct EbayFindingClient {
    app_id: String,
    base_url: String,
    max_results: u32,
    client: Client,
}

impl EbayFindingClient {
    /// Create a client from configuration
    pub fn new(app_id: impl Into<String>, config: &EbayConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = match (&config.base_url, config.sandbox) {
            (Some(url), _) => url.clone(),
            (None, true) => FINDING_SANDBOX_URL.to_string(),
            (None, false) => FINDING_API_URL.to_string(),
        };

        Ok(Self {
            app_id: app_id.into(),
            base_url,
            max_results: config.max_results.min(MAX_ENTRIES_PER_PAGE),
            client,
        })
    }
}

#[async_trait]
impl SoldListingProvider for EbayFindingClient {
    fn source(&self) -> PriceSource {
        PriceSource::Ebay
    }

    async fn fetch_sold(&self, card: &CardAttributes) -> anyhow::Result<RawPricingPayload> {
        let query = build_query(card);
        let page_size = self.max_results.to_string();
        tracing::debug!(url = %self.base_url, query = %query, "Searching eBay completed items");

        let response = self
            .client
            .get(&self.base_url)
            .header("X-EBAY-SOA-SECURITY-APPNAME", &self.app_id)
            .header("X-EBAY-SOA-OPERATION-NAME", "findCompletedItems")
            .header("X-EBAY-SOA-SERVICE-VERSION", "1.13.0")
            .header("X-EBAY-SOA-RESPONSE-DATA-FORMAT", "JSON")
            .query(&[
                ("keywords", query.as_str()),
                ("categoryId", SPORTS_CARDS_CATEGORY),
                ("itemFilter(0).name", "SoldItemsOnly"),
                ("itemFilter(0).value", "true"),
                ("sortOrder", "EndTimeSoonest"),
                ("paginationInput.entriesPerPage", page_size.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("eBay Finding API error: {} - {}", status, body);
        }

        let parsed: FindingResponse = response.json().await?;
        let payload = RawPricingPayload::from(parsed);

        tracing::info!(
            records = payload.records.len(),
            card = %card.summary(),
            "Fetched eBay sold listings"
        );

        Ok(payload)
    }
}

/// Build search keywords from card attributes
pub fn build_query(card: &CardAttributes) -> String {
    let mut parts = vec![
        card.player_name.clone(),
        card.year.to_string(),
        card.set_name.clone(),
    ];
    if let Some(parallel) = &card.parallel {
        parts.push(parallel.clone());
    }
    if card.is_rookie {
        parts.push("RC".to_string());
    }
    if card.autograph.is_present() {
        parts.push("auto".to_string());
    }
    if let Some(run) = card.print_run() {
        parts.push(format!("/{}", run));
    }
    if let Some((company, grade)) = card.grade() {
        parts.push(format!("{} {}", company, grade.normalize()));
    }
    parts.join(" ")
}
