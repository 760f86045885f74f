//! Pricing models as data.
//!
//! A model is a recipe: which opening price to start from and which stages
//! to bind, with parameters pulled from a [`PricingConfig`] and a
//! [`CalculationInput`]. All five models run on the same executor.

use crate::config::defaults;
use crate::config::pricing_config::{CountryTable, GridTable, PricingConfig};
use crate::core::error::PricingError;
use crate::core::input::{require_percent, require_positive, CalculationInput};
use crate::core::money::{round2, Money};
use crate::pipeline::formula::FormulaPipeline;
use crate::pipeline::stage::{Basis, Stage, StageKey};
use crate::pipeline::validator::PriceBand;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The pricing models the engine knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelId {
    /// Wholesale + margin, tier discount, transport, then risk premiums.
    TierRisk,
    /// Flat retail price × country × grid, less a linear tier discount.
    Multiplicative,
    /// Crude per barrel converted to a per-liter cost, then refined, taxed and marked up.
    CrudeToRetail,
    /// Retail price, loyalty discount and a linear exchange-rate adjustment.
    SimplifiedRetail,
    /// Crude cost with every margin expressed as a percentage.
    DynamicMargin,
}

impl ModelId {
    pub const ALL: [ModelId; 5] = [
        ModelId::TierRisk,
        ModelId::Multiplicative,
        ModelId::CrudeToRetail,
        ModelId::SimplifiedRetail,
        ModelId::DynamicMargin,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ModelId::TierRisk => "tier-risk",
            ModelId::Multiplicative => "multiplicative",
            ModelId::CrudeToRetail => "crude-to-retail",
            ModelId::SimplifiedRetail => "simplified-retail",
            ModelId::DynamicMargin => "dynamic-margin",
        }
    }

    /// Human-readable title used in reports.
    pub fn name(self) -> &'static str {
        match self {
            ModelId::TierRisk => "Tier & Risk",
            ModelId::Multiplicative => "Multiplicative",
            ModelId::CrudeToRetail => "Crude to Retail",
            ModelId::SimplifiedRetail => "Simplified Retail",
            ModelId::DynamicMargin => "Dynamic Margin",
        }
    }

    /// Realistic price band a finished quote is checked against.
    pub fn price_band(self) -> PriceBand {
        match self {
            ModelId::CrudeToRetail => PriceBand::new(dec!(25), dec!(35)),
            ModelId::TierRisk
            | ModelId::Multiplicative
            | ModelId::SimplifiedRetail
            | ModelId::DynamicMargin => PriceBand::new(dec!(15), dec!(30)),
        }
    }

    /// The built-in tables this model was calibrated with.
    pub fn default_config(self) -> Result<PricingConfig, PricingError> {
        let builder = match self {
            ModelId::TierRisk => defaults::tier_risk(),
            ModelId::Multiplicative => defaults::multiplicative(),
            ModelId::CrudeToRetail => defaults::crude_to_retail(),
            ModelId::SimplifiedRetail => defaults::simplified_retail(),
            ModelId::DynamicMargin => defaults::dynamic_margin(),
        };
        builder.build()
    }

    /// Bind this model's stages to concrete parameters.
    ///
    /// All lookups and input checks happen here; a bound pipeline can
    /// still fail at run time if its arithmetic overflows.
    pub fn bind(
        self,
        config: &PricingConfig,
        input: &CalculationInput,
    ) -> Result<FormulaPipeline, PricingError> {
        let country = input.country;
        let grid = input.grid_location;
        let volume = config.volume_for(input.tier)?;
        let tier_discount = config.tier_discount(input.tier)?;

        let pipeline = match self {
            ModelId::TierRisk => FormulaPipeline::new(
                self,
                StageKey::WholesaleBase,
                config.country_rate(CountryTable::WholesaleBase, country)?,
                volume,
            )
            .then(Stage::add_fixed(
                StageKey::RetailMargin,
                config.country_rate(CountryTable::RetailMargin, country)?,
            ))
            .then(Stage::subtract_percent(StageKey::TierDiscount, tier_discount))
            .then(Stage::add_fixed(
                StageKey::Transport,
                config.grid_rate(GridTable::TransportCost, grid)?,
            ))
            .then(Stage::add_percent(
                StageKey::CurrencyRisk,
                config.country_rate(CountryTable::CurrencyRisk, country)?,
            ))
            .then(Stage::add_percent(
                StageKey::PoliticalRisk,
                config.country_rate(CountryTable::PoliticalRisk, country)?,
            )),

            ModelId::Multiplicative => FormulaPipeline::new(
                self,
                StageKey::RetailPrice,
                retail_price(config, input)?,
                volume,
            )
            .then(Stage::multiply(
                StageKey::CountryFactor,
                config.country_rate(CountryTable::CountryFactor, country)?,
            ))
            .then(Stage::multiply(
                StageKey::GridFactor,
                config.grid_rate(GridTable::GridFactor, grid)?,
            ))
            .then(Stage::subtract_percent(StageKey::TierDiscount, tier_discount)),

            ModelId::CrudeToRetail => {
                let exclude_taxes = Basis::Excluding(vec![StageKey::TaxesLevies]);
                FormulaPipeline::new(self, StageKey::CrudeBase, crude_base(config, input)?, volume)
                    .then(Stage::add_percent(
                        StageKey::RefiningCost,
                        require_percent("refining_cost_percent", input.refining_cost_percent)?,
                    ))
                    .then(Stage::add_percent(
                        StageKey::TaxesLevies,
                        require_percent("taxes_levies_percent", input.taxes_levies_percent)?,
                    ))
                    .then(Stage::add_percent_of(
                        StageKey::WholesaleMargin,
                        require_percent("wholesale_margin_percent", input.wholesale_margin_percent)?,
                        exclude_taxes.clone(),
                    ))
                    .then(Stage::add_percent_of(
                        StageKey::RetailMargin,
                        require_percent("retail_margin_percent", input.retail_margin_percent)?,
                        exclude_taxes,
                    ))
                    .then(Stage::subtract_percent(StageKey::TierDiscount, tier_discount))
                    .then(Stage::subtract_percent(
                        StageKey::PartnerDiscount,
                        require_percent("partner_discount_percent", input.partner_discount_percent)?,
                    ))
                    .then(Stage::multiply(
                        StageKey::CountryFactor,
                        config.country_rate(CountryTable::CountryFactor, country)?,
                    ))
                    .then(Stage::multiply(
                        StageKey::GridFactor,
                        config.grid_rate(GridTable::GridFactor, grid)?,
                    ))
            }

            ModelId::SimplifiedRetail => {
                let adjustment = exchange_rate(config, input)?
                    .checked_sub(config.exchange_baseline())
                    .and_then(|d| d.checked_mul(config.exchange_sensitivity()))
                    .map(round2)
                    .ok_or_else(|| PricingError::numeric("exchange_rate", "overflows the decimal range"))?;
                FormulaPipeline::new(self, StageKey::RetailPrice, retail_price(config, input)?, volume)
                    .then(Stage::subtract_percent(StageKey::TierDiscount, tier_discount))
                    .then(Stage::add_fixed(StageKey::ExchangeAdjustment, adjustment))
                    .then(Stage::multiply(
                        StageKey::CountryFactor,
                        config.country_rate(CountryTable::CountryFactor, country)?,
                    ))
                    .then(Stage::multiply(
                        StageKey::GridFactor,
                        config.grid_rate(GridTable::GridFactor, grid)?,
                    ))
            }

            ModelId::DynamicMargin => {
                FormulaPipeline::new(self, StageKey::CrudeBase, crude_base(config, input)?, volume)
                    .then(Stage::add_percent(
                        StageKey::FuelLevy,
                        config.country_rate(CountryTable::FuelLevy, country)?,
                    ))
                    .then(Stage::add_percent(
                        StageKey::WholesaleMargin,
                        config.country_rate(CountryTable::WholesaleMargin, country)?,
                    ))
                    .then(Stage::add_percent(
                        StageKey::RetailMargin,
                        config.country_rate(CountryTable::RetailMarginPercent, country)?,
                    ))
                    .then(Stage::subtract_percent(StageKey::TierDiscount, tier_discount))
                    .then(Stage::add_percent(
                        StageKey::Transport,
                        config.grid_rate(GridTable::TransportPercent, grid)?,
                    ))
                    .then(Stage::add_percent(
                        StageKey::CurrencyRisk,
                        config.country_rate(CountryTable::CurrencyRisk, country)?,
                    ))
                    .then(Stage::add_percent_of(
                        StageKey::PoliticalRisk,
                        config.country_rate(CountryTable::PoliticalRisk, country)?,
                        Basis::Excluding(vec![StageKey::CurrencyRisk]),
                    ))
            }
        };

        log::debug!(
            "bound {} pipeline for tier {} {} {}: {} stages",
            self,
            input.tier,
            country,
            grid,
            pipeline.stages().len()
        );
        Ok(pipeline)
    }
}

/// Input override first, then the config's flat price.
fn retail_price(config: &PricingConfig, input: &CalculationInput) -> Result<Money, PricingError> {
    match input.retail_price {
        Some(price) => require_positive("retail_price", Some(price)),
        None => config.flat_retail_price().ok_or(PricingError::IncompleteConfig {
            table: "flat_retail_price",
            key: "constant".to_string(),
        }),
    }
}

/// The quote's own exchange rate, else the config's rate for its country.
///
/// Configs without an exchange-rate table require the rate on the input.
pub(crate) fn exchange_rate(config: &PricingConfig, input: &CalculationInput) -> Result<Decimal, PricingError> {
    match input.exchange_rate {
        None if config.carries_country_table(CountryTable::ExchangeRate) => {
            config.country_rate(CountryTable::ExchangeRate, input.country)
        }
        rate => require_positive("exchange_rate", rate),
    }
}

/// `crude × exchange_rate / liters_per_barrel`, rounded to cents.
fn crude_base(config: &PricingConfig, input: &CalculationInput) -> Result<Money, PricingError> {
    let crude = require_positive("crude_price", input.crude_price.or(config.reference_crude_price()))?;
    let rate = exchange_rate(config, input)?;
    crude
        .checked_mul(rate)
        .and_then(|local| local.checked_div(config.liters_per_barrel()))
        .map(round2)
        .ok_or_else(|| PricingError::numeric("crude_price", "crude price × exchange rate overflows the decimal range"))
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ModelId {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ModelId::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PricingError::UnknownModel {
                key: wanted.to_string(),
            })
    }
}
