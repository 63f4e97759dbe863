// 💰 Pricing - rand price format and historical price deltas
//
// The wire format for a price is the literal character 'R' followed by a
// non-negative integer, no thousands separator: "R1250". Deltas compare a
// quote against the chronologically-nearest strictly-earlier entry for the
// same (company, animal) key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::history::HistoricalEntry;

// ============================================================================
// PRICE FORMAT
// ============================================================================

/// Parse the fixed `R<integer>` wire format.
pub fn parse_price(raw: &str) -> Result<u64, PricingError> {
    let digits = raw
        .strip_prefix('R')
        .ok_or_else(|| PricingError::MalformedPrice(raw.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PricingError::MalformedPrice(raw.to_string()));
    }

    digits
        .parse::<u64>()
        .map_err(|_| PricingError::MalformedPrice(raw.to_string()))
}

/// Inverse of `parse_price`.
pub fn format_price(amount: u64) -> String {
    format!("R{amount}")
}

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("malformed price (expected R<integer>): {0:?}")]
    MalformedPrice(String),

    #[error("previous price is zero, percentage change is undefined")]
    DivisionByZero,
}

// ============================================================================
// PRICE MOVEMENT
// ============================================================================

/// Classified change vs. the previous observation for the same
/// (company, animal) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PriceMovement {
    /// No earlier observation exists.
    New,
    Increase { absolute: i64, percent: i64 },
    Decrease { absolute: i64, percent: i64 },
    Stable,
}

impl PriceMovement {
    pub fn label(&self) -> String {
        match self {
            PriceMovement::New => "New".to_string(),
            PriceMovement::Increase { absolute, percent } => {
                format!("+R{absolute} (+{percent}%)")
            }
            PriceMovement::Decrease { absolute, percent } => {
                format!("-R{} ({percent}%)", absolute.abs())
            }
            PriceMovement::Stable => "Stable".to_string(),
        }
    }
}

// ============================================================================
// DELTA CALCULATOR
// ============================================================================

/// Compute the price movement of `target` against the supplied history.
///
/// Pure over the slice: the caller materializes a consistent snapshot first.
/// Only entries with the target's company and animal and a strictly earlier
/// timestamp count as "previous". Among equal timestamps the last-inserted
/// entry wins (slice order is insertion order).
pub fn delta(history: &[HistoricalEntry], target: &HistoricalEntry) -> Result<PriceMovement, PricingError> {
    let previous = history
        .iter()
        .filter(|e| e.same_key(&target.company_name, &target.animal))
        .filter(|e| e.recorded_at < target.recorded_at)
        // >= keeps the later slice position on timestamp ties
        .fold(None::<&HistoricalEntry>, |best, e| match best {
            Some(b) if e.recorded_at < b.recorded_at => Some(b),
            _ => Some(e),
        });

    let previous = match previous {
        Some(entry) => entry,
        None => return Ok(PriceMovement::New),
    };

    let previous_price = parse_price(&previous.price)? as i64;
    let current_price = parse_price(&target.price)? as i64;

    if previous_price == 0 {
        return Err(PricingError::DivisionByZero);
    }

    let absolute = current_price - previous_price;
    let percent = ((absolute as f64 / previous_price as f64) * 100.0).round() as i64;

    Ok(match absolute {
        a if a > 0 => PriceMovement::Increase { absolute, percent },
        a if a < 0 => PriceMovement::Decrease { absolute, percent },
        _ => PriceMovement::Stable,
    })
}

// ============================================================================
// TESTS
// ============================================================================
