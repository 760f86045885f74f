use crate::core::money::{format_money, Money};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive price band for one model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: Money,
    pub high: Money,
}

impl PriceBand {
    pub fn new(low: Money, high: Money) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, price: Money) -> bool {
        price >= self.low && price <= self.high
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", format_money(self.low), format_money(self.high))
    }
}

/// Where a final price falls relative to a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    WithinRange,
    BelowRange,
    AboveRange,
}

impl PriceRange {
    pub fn is_realistic(self) -> bool {
        self == PriceRange::WithinRange
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PriceRange::WithinRange => "within range",
            PriceRange::BelowRange => "below range",
            PriceRange::AboveRange => "above range",
        })
    }
}

/// Flags quotes that land outside a plausible retail band.
///
/// Classification is informational: an out-of-band price is still a valid
/// result and is returned to the caller unchanged.
pub struct PriceRangeValidator;

impl PriceRangeValidator {
    pub fn classify(price: Money, band: PriceBand) -> PriceRange {
        if price < band.low {
            PriceRange::BelowRange
        } else if price > band.high {
            PriceRange::AboveRange
        } else {
            PriceRange::WithinRange
        }
    }
}
