use crate::core::error::PricingError;
use crate::core::money::Percent;
use crate::core::tier::Tier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Direction a tier discount schedule moves in as the tier number grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Monotonicity {
    NonDecreasing,
    NonIncreasing,
}

impl Monotonicity {
    pub fn holds(self, previous: Decimal, next: Decimal) -> bool {
        match self {
            Monotonicity::NonDecreasing => next >= previous,
            Monotonicity::NonIncreasing => next <= previous,
        }
    }
}

/// Maps a [`Tier`] to the discount fraction it earns.
///
/// Two shapes exist in practice: a linear schedule (`2% × tier`) and a
/// hand-tuned table, either rising with the tier or a loyalty table that
/// falls from 25% to 0%. A table declares its direction and is rejected at
/// config construction if it does not honour it.
///
/// # Examples
///
/// ```
/// use fuel_pricing::config::schedule::DiscountSchedule;
/// use fuel_pricing::core::tier::Tier;
/// use rust_decimal_macros::dec;
///
/// let linear = DiscountSchedule::Linear { per_tier: dec!(0.02) };
/// assert_eq!(linear.percent_for(Tier::new(6).unwrap()).unwrap(), dec!(0.12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountSchedule {
    Linear {
        per_tier: Percent,
    },
    Table {
        direction: Monotonicity,
        rates: BTreeMap<Tier, Percent>,
    },
}

impl DiscountSchedule {
    pub const TABLE_NAME: &'static str = "tier_discount";

    /// Build a table schedule from `(tier, fraction)` pairs.
    pub fn table(
        direction: Monotonicity,
        rates: impl IntoIterator<Item = (Tier, Percent)>,
    ) -> Self {
        DiscountSchedule::Table {
            direction,
            rates: rates.into_iter().collect(),
        }
    }

    pub fn percent_for(&self, tier: Tier) -> Result<Percent, PricingError> {
        match self {
            DiscountSchedule::Linear { per_tier } => Ok(*per_tier * Decimal::from(tier.get())),
            DiscountSchedule::Table { rates, .. } => {
                rates
                    .get(&tier)
                    .copied()
                    .ok_or_else(|| PricingError::IncompleteConfig {
                        table: Self::TABLE_NAME,
                        key: format!("tier {}", tier),
                    })
            }
        }
    }

    pub fn direction(&self) -> Monotonicity {
        match self {
            DiscountSchedule::Linear { .. } => Monotonicity::NonDecreasing,
            DiscountSchedule::Table { direction, .. } => *direction,
        }
    }

    /// Check completeness, range and direction over every tier.
    pub fn validate(&self) -> Result<(), PricingError> {
        if let DiscountSchedule::Linear { per_tier } = self {
            if *per_tier < Decimal::ZERO {
                return Err(PricingError::InvalidConfig {
                    table: Self::TABLE_NAME,
                    key: "per_tier".to_string(),
                    value: per_tier.to_string(),
                    reason: "linear step must not be negative",
                });
            }
        }

        let direction = self.direction();
        let mut previous: Option<Percent> = None;
        for tier in Tier::all() {
            let pct = self.percent_for(tier)?;
            if pct < Decimal::ZERO || pct > Decimal::ONE {
                return Err(PricingError::InvalidConfig {
                    table: Self::TABLE_NAME,
                    key: format!("tier {}", tier),
                    value: pct.to_string(),
                    reason: "discount must be a fraction in [0, 1]",
                });
            }
            if let Some(prev) = previous {
                if !direction.holds(prev, pct) {
                    return Err(PricingError::InvalidConfig {
                        table: Self::TABLE_NAME,
                        key: format!("tier {}", tier),
                        value: pct.to_string(),
                        reason: "schedule breaks its declared direction",
                    });
                }
            }
            previous = Some(pct);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tier(n: i64) -> Tier {
        Tier::new(n).unwrap()
    }

    #[test]
    fn test_linear_schedule() {
        let schedule = DiscountSchedule::Linear { per_tier: dec!(0.02) };
        assert_eq!(schedule.percent_for(tier(1)).unwrap(), dec!(0.02));
        assert_eq!(schedule.percent_for(tier(14)).unwrap(), dec!(0.28));
        assert!(schedule.validate().is_ok());
    }

    #[test]
    fn test_linear_overflowing_one_is_rejected() {
        let schedule = DiscountSchedule::Linear { per_tier: dec!(0.08) };
        assert!(matches!(
            schedule.validate(),
            Err(PricingError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_incomplete_table() {
        let schedule =
            DiscountSchedule::table(Monotonicity::NonIncreasing, [(tier(1), dec!(0.25))]);
        assert_eq!(
            schedule.validate(),
            Err(PricingError::IncompleteConfig {
                table: "tier_discount",
                key: "tier 2".to_string()
            })
        );
    }

    #[test]
    fn test_direction_is_enforced() {
        let rising = DiscountSchedule::table(
            Monotonicity::NonIncreasing,
            Tier::all().map(|t| (t, Decimal::from(t.get()) / dec!(100))),
        );
        assert!(rising.validate().is_err());

        let rising = DiscountSchedule::table(
            Monotonicity::NonDecreasing,
            Tier::all().map(|t| (t, Decimal::from(t.get()) / dec!(100))),
        );
        assert!(rising.validate().is_ok());
    }

    #[test]
    fn test_table_serde_uses_numeric_keys() {
        let schedule = DiscountSchedule::table(
            Monotonicity::NonIncreasing,
            [(tier(1), dec!(0.25)), (tier(2), dec!(0.22))],
        );
        let text = serde_json::to_string(&schedule).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["table"]["direction"], "non_increasing");
        assert_eq!(json["table"]["rates"]["1"], "0.25");

        let back: DiscountSchedule = serde_json::from_str(&text).unwrap();
        assert_eq!(back, schedule);
    }
}
