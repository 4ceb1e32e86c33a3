//! Market trend from the observation series

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::stats::{coefficient_of_variation, mean};
use super::PriceObservation;

/// Window size compared at each end of the series
const TREND_WINDOW: usize = 3;

/// Rise beyond which holders should sell
const SELL_HIGH_PCT: Decimal = dec!(30);

/// Fall beyond which buyers should step in
const BUY_LOW_PCT: Decimal = dec!(-20);

/// Price direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Stable,
}

/// Price dispersion bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    #[default]
    Low,
    Medium,
    High,
}

/// Suggested market action for a holder of the card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketRecommendation {
    #[default]
    Hold,
    SellHigh,
    BuyLow,
}

impl std::fmt::Display for MarketRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarketRecommendation::Hold => write!(f, "hold"),
            MarketRecommendation::SellHigh => write!(f, "sell high"),
            MarketRecommendation::BuyLow => write!(f, "buy low"),
        }
    }
}

/// Summary of recent price movement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketTrend {
    pub direction: TrendDirection,
    /// Percent change of the newest window against the oldest
    pub change_pct: Decimal,
    pub volatility: Volatility,
    #[serde(default)]
    pub recommendation: MarketRecommendation,
}

/// Analyze the direction and volatility of observed prices
pub fn analyze(observations: &[PriceObservation]) -> MarketTrend {
    if observations.len() < TREND_WINDOW {
        return MarketTrend::default();
    }

    let mut sorted: Vec<&PriceObservation> = observations.iter().collect();
    sorted.sort_by_key(|o| o.observed_at);
    let prices: Vec<Decimal> = sorted.iter().map(|o| o.price).collect();

    let older = mean(&prices[..TREND_WINDOW]).unwrap_or_default();
    let recent = mean(&prices[prices.len() - TREND_WINDOW..]).unwrap_or_default();

    let change_pct = if older > Decimal::ZERO {
        ((recent - older) / older * Decimal::ONE_HUNDRED).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let direction = if change_pct > dec!(10) {
        TrendDirection::Up
    } else if change_pct < dec!(-10) {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    let recommendation = if change_pct > SELL_HIGH_PCT {
        MarketRecommendation::SellHigh
    } else if change_pct < BUY_LOW_PCT {
        MarketRecommendation::BuyLow
    } else {
        MarketRecommendation::Hold
    };

    let volatility = match coefficient_of_variation(&prices) {
        Some(cv) if cv > 0.30 => Volatility::High,
        Some(cv) if cv > 0.15 => Volatility::Medium,
        _ => Volatility::Low,
    };

    MarketTrend {
        direction,
        change_pct,
        volatility,
        recommendation,
    }
}
