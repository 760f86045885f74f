//! Quick-start scenarios.
//!
//! The crude-to-retail and simplified models each ship three named inputs:
//! a South African urban fleet, a Zimbabwean inland depot and a premium
//! coastal account.

use crate::core::input::CalculationInput;
use crate::core::region::{Country, GridLocation};
use crate::core::tier::Tier;
use crate::pipeline::models::ModelId;
use rust_decimal_macros::dec;

pub const PRESET_NAMES: [&str; 3] = ["south-africa", "zimbabwe", "premium"];

/// A named input for one model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub model: ModelId,
    pub input: CalculationInput,
}

const FLEET: Tier = Tier::clamped(6);
const DEPOT: Tier = Tier::clamped(8);
const PREMIUM: Tier = Tier::clamped(1);

/// All presets for `model`; empty when the model has none.
pub fn presets(model: ModelId) -> Vec<Preset> {
    let inputs: Vec<(&'static str, CalculationInput)> = match model {
        ModelId::CrudeToRetail => vec![
            (
                "south-africa",
                CalculationInput::new(FLEET, Country::SouthAfrica, GridLocation::Urban)
                    .with_crude_price(dec!(85.50))
                    .with_exchange_rate(dec!(18.75))
                    .with_refining_cost(dec!(0.125))
                    .with_taxes_levies(dec!(0.285))
                    .with_wholesale_margin(dec!(0.085))
                    .with_retail_margin(dec!(0.12))
                    .with_partner_discount(dec!(0.05)),
            ),
            (
                "zimbabwe",
                CalculationInput::new(DEPOT, Country::Zimbabwe, GridLocation::Inland)
                    .with_crude_price(dec!(87.20))
                    .with_exchange_rate(dec!(19.25))
                    .with_refining_cost(dec!(0.15))
                    .with_taxes_levies(dec!(0.32))
                    .with_wholesale_margin(dec!(0.10))
                    .with_retail_margin(dec!(0.15))
                    .with_partner_discount(dec!(0.03)),
            ),
            (
                "premium",
                CalculationInput::new(PREMIUM, Country::SouthAfrica, GridLocation::Coastal)
                    .with_crude_price(dec!(84.00))
                    .with_exchange_rate(dec!(18.50))
                    .with_refining_cost(dec!(0.11))
                    .with_taxes_levies(dec!(0.26))
                    .with_wholesale_margin(dec!(0.075))
                    .with_retail_margin(dec!(0.10))
                    .with_partner_discount(dec!(0.08)),
            ),
        ],
        ModelId::SimplifiedRetail => vec![
            (
                "south-africa",
                CalculationInput::new(FLEET, Country::SouthAfrica, GridLocation::Urban)
                    .with_retail_price(dec!(20.00))
                    .with_exchange_rate(dec!(18.75)),
            ),
            (
                "zimbabwe",
                CalculationInput::new(DEPOT, Country::Zimbabwe, GridLocation::Inland)
                    .with_retail_price(dec!(22.00))
                    .with_exchange_rate(dec!(19.25)),
            ),
            (
                "premium",
                CalculationInput::new(PREMIUM, Country::SouthAfrica, GridLocation::Coastal)
                    .with_retail_price(dec!(19.50))
                    .with_exchange_rate(dec!(18.50)),
            ),
        ],
        ModelId::TierRisk | ModelId::Multiplicative | ModelId::DynamicMargin => Vec::new(),
    };

    inputs
        .into_iter()
        .map(|(name, input)| Preset { name, model, input })
        .collect()
}

/// Look a preset up by name, ignoring case.
pub fn find(model: ModelId, name: &str) -> Option<Preset> {
    let wanted = name.trim();
    presets(model)
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(wanted))
}
