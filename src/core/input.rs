use crate::core::error::PricingError;
use crate::core::money::{Money, Percent};
use crate::core::region::{Country, GridLocation};
use crate::core::tier::Tier;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything a caller supplies for one price calculation.
///
/// `tier`, `country` and `grid_location` are always required. The numeric
/// fields are only read by the models that need them; a model that needs a
/// field the caller left empty fails with
/// [`PricingError::InvalidNumericInput`].
///
/// Percent fields are fractions: `0.125` is 12.5%.
///
/// # Examples
///
/// ```
/// use fuel_pricing::core::input::CalculationInput;
/// use fuel_pricing::core::region::{Country, GridLocation};
/// use fuel_pricing::core::tier::Tier;
/// use rust_decimal_macros::dec;
///
/// let input = CalculationInput::new(Tier::new(6).unwrap(), Country::SouthAfrica, GridLocation::Urban)
///     .with_crude_price(dec!(85.50))
///     .with_exchange_rate(dec!(18.75));
/// assert_eq!(input.crude_price, Some(dec!(85.50)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub tier: Tier,
    pub country: Country,
    pub grid_location: GridLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crude_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refining_cost_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes_levies_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_margin_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retail_margin_percent: Option<Percent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_discount_percent: Option<Percent>,
}

impl CalculationInput {
    pub fn new(tier: Tier, country: Country, grid_location: GridLocation) -> Self {
        Self {
            tier,
            country,
            grid_location,
            retail_price: None,
            crude_price: None,
            exchange_rate: None,
            refining_cost_percent: None,
            taxes_levies_percent: None,
            wholesale_margin_percent: None,
            retail_margin_percent: None,
            partner_discount_percent: None,
        }
    }

    pub fn with_retail_price(mut self, price: Money) -> Self {
        self.retail_price = Some(price);
        self
    }

    pub fn with_crude_price(mut self, price: Money) -> Self {
        self.crude_price = Some(price);
        self
    }

    pub fn with_exchange_rate(mut self, rate: Decimal) -> Self {
        self.exchange_rate = Some(rate);
        self
    }

    pub fn with_refining_cost(mut self, pct: Percent) -> Self {
        self.refining_cost_percent = Some(pct);
        self
    }

    pub fn with_taxes_levies(mut self, pct: Percent) -> Self {
        self.taxes_levies_percent = Some(pct);
        self
    }

    pub fn with_wholesale_margin(mut self, pct: Percent) -> Self {
        self.wholesale_margin_percent = Some(pct);
        self
    }

    pub fn with_retail_margin(mut self, pct: Percent) -> Self {
        self.retail_margin_percent = Some(pct);
        self
    }

    pub fn with_partner_discount(mut self, pct: Percent) -> Self {
        self.partner_discount_percent = Some(pct);
        self
    }
}

/// A field a model requires, checked once when the pipeline is bound.
pub(crate) fn require_positive(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<Decimal, PricingError> {
    let value = value.ok_or_else(|| PricingError::numeric(field, "required by the selected model"))?;
    if value <= Decimal::ZERO {
        return Err(PricingError::numeric(
            field,
            format!("must be positive, got {}", value),
        ));
    }
    Ok(value)
}

pub(crate) fn require_percent(
    field: &'static str,
    value: Option<Percent>,
) -> Result<Percent, PricingError> {
    let value = value.ok_or_else(|| PricingError::numeric(field, "required by the selected model"))?;
    check_percent(field, value)
}

pub(crate) fn check_percent(field: &'static str, value: Percent) -> Result<Percent, PricingError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PricingError::numeric(
            field,
            format!("must be a fraction in [0, 1], got {}", value),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn base() -> CalculationInput {
        CalculationInput::new(Tier::new(6).unwrap(), Country::Zimbabwe, GridLocation::Inland)
    }

    #[test]
    fn test_builder_sets_fields() {
        let input = base()
            .with_refining_cost(dec!(0.125))
            .with_partner_discount(dec!(0.05));
        assert_eq!(input.refining_cost_percent, Some(dec!(0.125)));
        assert_eq!(input.partner_discount_percent, Some(dec!(0.05)));
        assert_eq!(input.crude_price, None);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("crude_price", None).is_err());
        assert!(require_positive("crude_price", Some(dec!(-1))).is_err());
        assert!(require_positive("crude_price", Some(Decimal::ZERO)).is_err());
        assert_eq!(require_positive("crude_price", Some(dec!(85.5))).unwrap(), dec!(85.5));
    }

    #[test]
    fn test_require_percent() {
        assert!(require_percent("taxes_levies", Some(dec!(1.5))).is_err());
        assert!(require_percent("taxes_levies", Some(dec!(-0.1))).is_err());
        assert_eq!(require_percent("taxes_levies", Some(dec!(0.285))).unwrap(), dec!(0.285));
    }

    #[test]
    fn test_json_skips_missing_fields() {
        let json = serde_json::to_value(base()).unwrap();
        assert_eq!(json["country"], "zimbabwe");
        assert_eq!(json["grid_location"], "inland");
        assert_eq!(json["tier"], 6);
        assert!(json.get("crude_price").is_none());
    }
}
