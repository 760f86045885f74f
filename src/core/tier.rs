use crate::core::error::PricingError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A customer pricing tier, 1 through 14.
///
/// The tier selects a discount from the config's schedule and an estimated
/// sales volume. Construction is the only place the range is checked.
///
/// # Examples
///
/// ```
/// use fuel_pricing::core::tier::Tier;
///
/// let tier = Tier::new(6).unwrap();
/// assert_eq!(tier.get(), 6);
/// assert!(Tier::new(15).is_err());
/// assert!("6.5".parse::<Tier>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Tier(u8);

impl Tier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 14;

    pub fn new(value: i64) -> Result<Self, PricingError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(PricingError::InvalidTier {
                value: value.to_string(),
            })
        }
    }

    /// Clamp `value` into 1..=14. Usable in `const` items; caller input
    /// goes through [`Tier::new`] or [`FromStr`] instead.
    pub const fn clamped(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// All tiers in ascending order.
    pub fn all() -> impl Iterator<Item = Tier> {
        (Self::MIN..=Self::MAX).map(Tier)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.0
    }
}

impl TryFrom<u8> for Tier {
    type Error = PricingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Tier::new(i64::from(value))
    }
}

impl TryFrom<Decimal> for Tier {
    type Error = PricingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.fract() != Decimal::ZERO {
            return Err(PricingError::InvalidTier {
                value: value.to_string(),
            });
        }
        let whole = i64::try_from(value).map_err(|_| PricingError::InvalidTier {
            value: value.to_string(),
        })?;
        Tier::new(whole)
    }
}

impl FromStr for Tier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = Decimal::from_str(trimmed).map_err(|_| PricingError::InvalidTier {
            value: trimmed.to_string(),
        })?;
        Tier::try_from(value)
    }
}
