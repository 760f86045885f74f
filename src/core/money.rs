//! Fixed-point money handling.
//!
//! Every monetary quantity in the pipeline is a [`Decimal`] rounded to two
//! decimal places, half away from zero, at the moment a stage produces it.
//! A breakdown reproduced step by step from its records therefore matches
//! the live run to the cent.

use crate::core::error::PricingError;
use rust_decimal::prelude::*;

/// Rand per liter (or any per-unit currency amount).
pub type Money = Decimal;

/// A fraction, `0.05` meaning 5%.
pub type Percent = Decimal;

/// A positive multiplicative adjustment.
pub type Multiplier = Decimal;

/// A volume in liters.
pub type Liters = Decimal;

/// Decimal places kept for every monetary value.
pub const MONEY_DP: u32 = 2;

/// Symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "R";

/// Round to cents, half away from zero.
///
/// # Examples
///
/// ```
/// use fuel_pricing::core::money::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(1.0485)), dec!(1.05));
/// assert_eq!(round2(dec!(-0.075)), dec!(-0.08));
/// ```
pub fn round2(value: Decimal) -> Money {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render an amount as `R23.78` (or `-R2.28`).
pub fn format_money(amount: Money) -> String {
    let rounded = round2(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", CURRENCY_SYMBOL, rounded.abs())
    } else {
        format!("{}{:.2}", CURRENCY_SYMBOL, rounded.abs())
    }
}

/// Parse an amount rendered by [`format_money`], or a bare number.
pub fn parse_money(text: &str) -> Result<Money, PricingError> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = rest.strip_prefix(CURRENCY_SYMBOL).unwrap_or(rest);
    let value = Decimal::from_str(digits)
        .map_err(|e| PricingError::numeric("amount", format!("'{}': {}", text, e)))?;
    Ok(if negative { -value } else { value })
}

/// Render a fraction as a percentage with one decimal, `0.125` → `12.5%`.
pub fn format_percent(pct: Percent) -> String {
    format!("{:.1}%", pct * Decimal::ONE_HUNDRED)
}

/// Parse a caller-supplied number for `field`.
///
/// Rejects anything that is not a finite decimal (`NaN`, `inf`, empty).
pub fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, PricingError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(PricingError::numeric(field, "value is missing"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| PricingError::numeric(field, format!("'{}' is not a number", trimmed)))
}

/// Convert a float coming from a form or script into a decimal.
pub fn decimal_from_f64(field: &'static str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() {
        return Err(PricingError::numeric(field, format!("{} is not finite", value)));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| PricingError::numeric(field, format!("{} is out of range", value)))
}

/// Parse a percentage given in points (`12.5` meaning 12.5%) into a fraction.
pub fn parse_percent_points(field: &'static str, text: &str) -> Result<Percent, PricingError> {
    let points = parse_decimal(field, text)?;
    Ok(points / Decimal::ONE_HUNDRED)
}

/// Convert a decimal to `f64` for display-only ratios.
pub fn to_f64(value: Decimal) -> Option<f64> {
    value.to_f64()
}
