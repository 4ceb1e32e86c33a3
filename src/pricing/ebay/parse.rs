//! eBay response shapes
//!
//! Both the Browse API and the Finding API report completed listings, in
//! very different JSON layouts. Fields that fail to parse become `None` so the
//! adapter drops the record instead of treating it as a zero price.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

use crate::pricing::{PriceSource, RawPricingPayload, RawSaleRecord};

/// Browse API `item_summary/search` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    #[serde(default)]
    pub item_summaries: Vec<BrowseItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseItem {
    pub price: Option<BrowsePrice>,
    pub item_end_date: Option<String>,
    pub item_web_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BrowsePrice {
    pub value: Option<String>,
}

/// Finding API `findCompletedItems` response
///
/// Every field in this API is wrapped in a single-element array.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingResponse {
    #[serde(default)]
    pub find_completed_items_response: Vec<FindingBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingBody {
    #[serde(default)]
    pub search_result: Vec<FindingSearchResult>,
}

#[derive(Debug, Deserialize)]
pub struct FindingSearchResult {
    #[serde(default)]
    pub item: Vec<FindingItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingItem {
    #[serde(default)]
    pub selling_status: Vec<FindingSellingStatus>,
    #[serde(default)]
    pub listing_info: Vec<FindingListingInfo>,
    #[serde(default, rename = "viewItemURL")]
    pub view_item_url: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingSellingStatus {
    #[serde(default)]
    pub current_price: Vec<FindingAmount>,
}

#[derive(Debug, Deserialize)]
pub struct FindingAmount {
    #[serde(rename = "__value__")]
    pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindingListingInfo {
    #[serde(default)]
    pub end_time: Vec<String>,
}

impl From<BrowseResponse> for RawPricingPayload {
    fn from(response: BrowseResponse) -> Self {
        let records = response
            .item_summaries
            .into_iter()
            .map(|item| RawSaleRecord {
                price: item
                    .price
                    .and_then(|p| p.value)
                    .and_then(|v| parse_price(&v)),
                sold_at: item.item_end_date.and_then(|d| parse_time(&d)),
                url: item.item_web_url,
            })
            .collect();
        RawPricingPayload::new(PriceSource::Ebay, records)
    }
}

impl From<FindingResponse> for RawPricingPayload {
    fn from(response: FindingResponse) -> Self {
        let records = response
            .find_completed_items_response
            .into_iter()
            .flat_map(|body| body.search_result)
            .flat_map(|result| result.item)
            .map(|item| RawSaleRecord {
                price: item
                    .selling_status
                    .first()
                    .and_then(|s| s.current_price.first())
                    .and_then(|a| a.value.as_deref())
                    .and_then(parse_price),
                sold_at: item
                    .listing_info
                    .first()
                    .and_then(|l| l.end_time.first())
                    .and_then(|t| parse_time(t)),
                url: item.view_item_url.into_iter().next(),
            })
            .collect();
        RawPricingPayload::new(PriceSource::Ebay, records)
    }
}

/// Parse a Browse API response body
pub fn parse_browse_items(body: &str) -> serde_json::Result<RawPricingPayload> {
    let response: BrowseResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

/// Parse a Finding API response body
pub fn parse_finding_items(body: &str) -> serde_json::Result<RawPricingPayload> {
    let response: FindingResponse = serde_json::from_str(body)?;
    Ok(response.into())
}

fn parse_price(text: &str) -> Option<Decimal> {
    Decimal::from_str(text.trim()).ok()
}

fn parse_time(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
