//! Exchange-rate shock analysis.
//!
//! Reprices one scenario under relative moves in the exchange rate, to show
//! how exposed a quote is to currency swings.

use crate::compute_price;
use crate::config::pricing_config::PricingConfig;
use crate::core::error::PricingError;
use crate::core::input::CalculationInput;
use crate::core::money::{format_money, format_percent, round2, Money, Percent};
use crate::pipeline::models::{self, ModelId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of one shock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeShockResult {
    /// Relative move applied, `0.10` = the rate rises 10%.
    pub shock: Percent,
    pub exchange_rate: Decimal,
    pub baseline_price: Money,
    pub shocked_price: Money,
    /// Change in per-liter price.
    pub impact: Money,
}

impl fmt::Display for ExchangeShockResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.shock >= Decimal::ZERO { "+" } else { "" };
        write!(
            f,
            "{}{:<8} rate {:>8}  {} -> {} ({})",
            sign,
            format_percent(self.shock),
            self.exchange_rate,
            format_money(self.baseline_price),
            format_money(self.shocked_price),
            format_money(self.impact)
        )
    }
}

/// Reprice `input` at `rate × (1 + shock)` for each shock.
///
/// The base rate is the input's, or the config's rate for the input's
/// country. Models that ignore the exchange rate report zero impact. Shocks
/// of −100% or below fail like any other non-positive rate.
pub fn exchange_shocks(
    model: ModelId,
    config: &PricingConfig,
    input: &CalculationInput,
    shocks: &[Percent],
) -> Result<Vec<ExchangeShockResult>, PricingError> {
    let base_rate = models::exchange_rate(config, input)?;
    let baseline = compute_price(input, config, model)?.final_price_per_liter();

    shocks
        .iter()
        .map(|&shock| {
            let rate = Decimal::ONE
                .checked_add(shock)
                .and_then(|move_by| base_rate.checked_mul(move_by))
                .ok_or_else(|| PricingError::numeric("exchange_rate", "shocked rate overflows the decimal range"))?
                .round_dp(4);
            let shocked = compute_price(&input.clone().with_exchange_rate(rate), config, model)?
                .final_price_per_liter();
            Ok(ExchangeShockResult {
                shock,
                exchange_rate: rate,
                baseline_price: baseline,
                shocked_price: shocked,
                impact: round2(shocked - baseline),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::{Country, GridLocation};
    use crate::core::tier::Tier;
    use crate::simulation::presets;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simplified_shock() {
        let model = ModelId::SimplifiedRetail;
        let config = model.default_config().unwrap();
        let preset = presets::find(model, "south-africa").unwrap();
        let results = exchange_shocks(model, &config, &preset.input, &[dec!(0), dec!(0.10)]).unwrap();

        assert_eq!(results[0].impact, Decimal::ZERO);
        assert_eq!(results[0].shocked_price, dec!(17.68));
        // 18.75 × 1.1 = 20.625 -> adjustment round2(0.2625) = 0.26
        assert_eq!(results[1].exchange_rate, dec!(20.625));
        assert_eq!(results[1].shocked_price, dec!(17.86));
        assert_eq!(results[1].impact, dec!(0.18));
    }

    #[test]
    fn test_rate_insensitive_model() {
        let model = ModelId::Multiplicative;
        let config = model.default_config().unwrap();
        let input = presets::find(ModelId::SimplifiedRetail, "premium").unwrap().input;
        let results = exchange_shocks(model, &config, &input, &[dec!(-0.2), dec!(0.2)]).unwrap();
        assert!(results.iter().all(|r| r.impact == Decimal::ZERO));
    }

    #[test]
    fn test_base_rate_from_config_table() {
        let model = ModelId::DynamicMargin;
        let config = model.default_config().unwrap();
        let input = CalculationInput::new(Tier::new(1).unwrap(), Country::SouthAfrica, GridLocation::Coastal);
        let results = exchange_shocks(model, &config, &input, &[dec!(0.10)]).unwrap();
        // 17.25 × 1.1
        assert_eq!(results[0].exchange_rate, dec!(18.975));
        assert!(results[0].impact > Decimal::ZERO);
    }

    #[test]
    fn test_total_collapse_is_rejected() {
        let model = ModelId::SimplifiedRetail;
        let config = model.default_config().unwrap();
        let input = presets::find(model, "premium").unwrap().input;
        assert!(matches!(
            exchange_shocks(model, &config, &input, &[dec!(-1)]),
            Err(PricingError::InvalidNumericInput { field: "exchange_rate", .. })
        ));
    }
}
