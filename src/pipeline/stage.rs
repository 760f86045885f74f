//! Stage primitives.
//!
//! A stage is one arithmetic step applied to the running per-liter price.
//! Each application yields a [`StageRecord`] holding the signed change and
//! the price after the step, rounded to cents.

use crate::core::error::PricingError;
use crate::core::money::{round2, Money, Multiplier, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies what a stage prices in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKey {
    WholesaleBase,
    RetailPrice,
    CrudeBase,
    RetailMargin,
    RefiningCost,
    TaxesLevies,
    FuelLevy,
    WholesaleMargin,
    TierDiscount,
    PartnerDiscount,
    Transport,
    CurrencyRisk,
    PoliticalRisk,
    ExchangeAdjustment,
    CountryFactor,
    GridFactor,
}

impl StageKey {
    pub fn label(self) -> &'static str {
        match self {
            StageKey::WholesaleBase => "Wholesale Price",
            StageKey::RetailPrice => "Retail Price",
            StageKey::CrudeBase => "Crude Cost",
            StageKey::RetailMargin => "Retail Margin",
            StageKey::RefiningCost => "Refining Cost",
            StageKey::TaxesLevies => "Taxes & Levies",
            StageKey::FuelLevy => "Fuel Levy",
            StageKey::WholesaleMargin => "Wholesale Margin",
            StageKey::TierDiscount => "Tier Discount",
            StageKey::PartnerDiscount => "Partner Discount",
            StageKey::Transport => "Transport Cost",
            StageKey::CurrencyRisk => "Currency Risk",
            StageKey::PoliticalRisk => "Political Risk",
            StageKey::ExchangeAdjustment => "Exchange Adjustment",
            StageKey::CountryFactor => "Country Factor",
            StageKey::GridFactor => "Grid Factor",
        }
    }
}

impl StageKey {
    /// Snake-case name used in error fields.
    pub fn field(self) -> &'static str {
        match self {
            StageKey::WholesaleBase => "wholesale_base",
            StageKey::RetailPrice => "retail_price",
            StageKey::CrudeBase => "crude_base",
            StageKey::RetailMargin => "retail_margin",
            StageKey::RefiningCost => "refining_cost",
            StageKey::TaxesLevies => "taxes_levies",
            StageKey::FuelLevy => "fuel_levy",
            StageKey::WholesaleMargin => "wholesale_margin",
            StageKey::TierDiscount => "tier_discount",
            StageKey::PartnerDiscount => "partner_discount",
            StageKey::Transport => "transport",
            StageKey::CurrencyRisk => "currency_risk",
            StageKey::PoliticalRisk => "political_risk",
            StageKey::ExchangeAdjustment => "exchange_adjustment",
            StageKey::CountryFactor => "country_factor",
            StageKey::GridFactor => "grid_factor",
        }
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The price a percentage is taken of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// The running price when the stage starts.
    Running,
    /// The running price minus the deltas already recorded for these stages.
    Excluding(Vec<StageKey>),
}

impl Basis {
    /// `None` when the excluded deltas overflow the decimal range.
    pub fn resolve(&self, current: Money, history: &[StageRecord]) -> Option<Money> {
        match self {
            Basis::Running => Some(current),
            Basis::Excluding(keys) => history
                .iter()
                .filter(|r| keys.contains(&r.key))
                .try_fold(Decimal::ZERO, |sum, r| sum.checked_add(r.delta))
                .and_then(|excluded| current.checked_sub(excluded)),
        }
    }
}

/// One of the four arithmetic primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    AddFixed(Money),
    AddPercent { pct: Percent, basis: Basis },
    SubtractPercent { pct: Percent, basis: Basis },
    MultiplyByFactor(Multiplier),
}

/// Operation tag carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Opening,
    AddFixed,
    AddPercent,
    SubtractPercent,
    MultiplyByFactor,
}

/// Audit line for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRecord {
    pub key: StageKey,
    pub label: String,
    pub operation: Operation,
    /// Percentage or factor applied; `None` for fixed amounts.
    pub rate: Option<Decimal>,
    /// Signed change to the running price.
    pub delta: Money,
    /// Price per liter after this stage.
    pub running_price: Money,
}

impl StageRecord {
    pub fn opening(key: StageKey, amount: Money) -> Self {
        let amount = round2(amount);
        Self {
            key,
            label: key.label().to_string(),
            operation: Operation::Opening,
            rate: None,
            delta: amount,
            running_price: amount,
        }
    }

    /// The delta as a positive amount, for display next to a `-` sign.
    pub fn magnitude(&self) -> Money {
        self.delta.abs()
    }
}

/// A primitive bound to the component it prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub key: StageKey,
    pub kind: StageKind,
}

impl Stage {
    pub fn add_fixed(key: StageKey, amount: Money) -> Self {
        Self {
            key,
            kind: StageKind::AddFixed(amount),
        }
    }

    pub fn add_percent(key: StageKey, pct: Percent) -> Self {
        Self::add_percent_of(key, pct, Basis::Running)
    }

    pub fn add_percent_of(key: StageKey, pct: Percent, basis: Basis) -> Self {
        Self {
            key,
            kind: StageKind::AddPercent { pct, basis },
        }
    }

    pub fn subtract_percent(key: StageKey, pct: Percent) -> Self {
        Self {
            key,
            kind: StageKind::SubtractPercent {
                pct,
                basis: Basis::Running,
            },
        }
    }

    pub fn multiply(key: StageKey, factor: Multiplier) -> Self {
        Self {
            key,
            kind: StageKind::MultiplyByFactor(factor),
        }
    }

    /// Apply this stage to `current`, given the records produced so far.
    ///
    /// Fails with [`PricingError::InvalidNumericInput`] when a product or
    /// sum leaves the decimal range.
    pub fn apply(&self, current: Money, history: &[StageRecord]) -> Result<StageRecord, PricingError> {
        let overflow = || PricingError::numeric(self.key.field(), "overflows the decimal range");
        let (operation, rate, delta, next) = match &self.kind {
            StageKind::AddFixed(amount) => {
                let delta = round2(*amount);
                let next = current.checked_add(delta).ok_or_else(overflow)?;
                (Operation::AddFixed, None, delta, next)
            }
            StageKind::AddPercent { pct, basis } => {
                let delta = basis
                    .resolve(current, history)
                    .and_then(|base| base.checked_mul(*pct))
                    .map(round2)
                    .ok_or_else(overflow)?;
                let next = current.checked_add(delta).ok_or_else(overflow)?;
                (Operation::AddPercent, Some(*pct), delta, next)
            }
            StageKind::SubtractPercent { pct, basis } => {
                let delta = basis
                    .resolve(current, history)
                    .and_then(|base| base.checked_mul(*pct))
                    .map(round2)
                    .ok_or_else(overflow)?;
                let next = current.checked_sub(delta).ok_or_else(overflow)?;
                (Operation::SubtractPercent, Some(*pct), -delta, next)
            }
            StageKind::MultiplyByFactor(factor) => {
                let next = current.checked_mul(*factor).map(round2).ok_or_else(overflow)?;
                let delta = next.checked_sub(current).ok_or_else(overflow)?;
                (Operation::MultiplyByFactor, Some(*factor), delta, next)
            }
        };

        Ok(StageRecord {
            key: self.key,
            label: self.key.label().to_string(),
            operation,
            rate,
            delta,
            running_price: next,
        })
    }
}
