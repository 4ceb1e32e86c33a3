//! Deterministic fallback base price
//!
//! Used when no source reports market data. The price is derived from a
//! SHA-256 digest of the card's identity, so it is stable across runs and
//! platforms and differs between cards.

use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::card::CardAttributes;

/// Canonical identity string hashed for the mock price
pub fn identity_key(card: &CardAttributes) -> String {
    format!(
        "{}|{}|{}|{}",
        card.sport.as_str(),
        card.year,
        card.set_name.trim().to_lowercase(),
        card.player_name.trim().to_lowercase()
    )
}

/// Mock base price in `[min, max]`, in whole cents
///
/// A range with `max <= min` collapses to `min`.
pub fn mock_base_price(card: &CardAttributes, min: Decimal, max: Decimal) -> Decimal {
    let digest = Sha256::digest(identity_key(card).as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    let seed = u64::from_be_bytes(prefix);

    let min_cents = (min * Decimal::ONE_HUNDRED).round();
    let max_cents = (max * Decimal::ONE_HUNDRED).round();
    if max_cents <= min_cents {
        return min_cents / Decimal::ONE_HUNDRED;
    }

    let span = max_cents - min_cents + Decimal::ONE;
    let offset = Decimal::from(seed) % span;
    (min_cents + offset) / Decimal::ONE_HUNDRED
}
