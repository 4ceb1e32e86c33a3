//! Small descriptive statistics over decimal prices

use rust_decimal::Decimal;

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().sum();
    Some(sum / Decimal::from(values.len()))
}

/// Median, averaging the two middle values for even counts
pub fn median(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / Decimal::TWO)
    } else {
        Some(sorted[mid])
    }
}

/// Mean after dropping `ceil(10%)` of points from each end
///
/// Fewer than three points are averaged as-is. Only the count is trimmed,
/// so values tied at the boundary are interchangeable.
pub fn trimmed_mean(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 3 {
        return mean(values);
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    let trim = (sorted.len() + 9) / 10;
    mean(&sorted[trim..sorted.len() - trim])
}

/// Population coefficient of variation (std dev / mean)
pub fn coefficient_of_variation(values: &[Decimal]) -> Option<f64> {
    let avg: f64 = mean(values)?.try_into().ok()?;
    if avg <= 0.0 {
        return None;
    }
    let n = values.len() as f64;
    let variance = values
        .iter()
        .filter_map(|v| f64::try_from(*v).ok())
        .map(|v| (v - avg).powi(2))
        .sum::<f64>()
        / n;
    Some(variance.sqrt() / avg)
}
