//! Built-in rate tables, one set per pricing model.
//!
//! Each function returns a builder so callers can override individual
//! rates before freezing the config.

use crate::config::pricing_config::{CountryTable, GridTable, PricingConfig, PricingConfigBuilder};
use crate::config::schedule::{DiscountSchedule, Monotonicity};
use crate::core::money::{Liters, Multiplier};
use crate::core::region::{Country, GridLocation};
use crate::core::tier::Tier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use Country::{Botswana, Mozambique, Namibia, SouthAfrica, Zambia, Zimbabwe};
use GridLocation::{Coastal, Inland, Remote, Suburban, Urban};

const VOLUMES: [u32; 14] = [
    2500, 3200, 4000, 4800, 5600, 6878, 7500, 8200, 9000, 9800, 10500, 11200, 12000, 12800,
];

/// Loyalty discounts in percent points, tier 1 first.
const LOYALTY_POINTS: [u32; 14] = [25, 22, 20, 18, 15, 12, 10, 8, 6, 4, 3, 2, 1, 0];

fn by_tier<T: Copy>(values: [T; 14], convert: impl Fn(T) -> Decimal) -> Vec<(Tier, Decimal)> {
    Tier::all().zip(values).map(|(t, v)| (t, convert(v))).collect()
}

/// Estimated monthly liters per tier.
pub fn volume_estimates() -> Vec<(Tier, Liters)> {
    by_tier(VOLUMES, Decimal::from)
}

/// 0% for tier 1 rising by 2 points per tier to 26% for tier 14.
pub fn stepped_discounts() -> DiscountSchedule {
    DiscountSchedule::table(
        Monotonicity::NonDecreasing,
        Tier::all().map(|t| (t, Decimal::from(t.get() - 1) * dec!(0.02))),
    )
}

/// 25% for tier 1 falling to 0% for tier 14.
pub fn loyalty_discounts() -> DiscountSchedule {
    DiscountSchedule::table(
        Monotonicity::NonIncreasing,
        by_tier(LOYALTY_POINTS, |p| Decimal::from(p) / Decimal::ONE_HUNDRED),
    )
}

fn regional_country_factors() -> [(Country, Multiplier); 6] {
    [
        (SouthAfrica, dec!(1.0)),
        (Zimbabwe, dec!(1.15)),
        (Botswana, dec!(1.08)),
        (Namibia, dec!(1.12)),
        (Zambia, dec!(1.25)),
        (Mozambique, dec!(1.35)),
    ]
}

fn regional_grid_factors() -> [(GridLocation, Multiplier); 5] {
    [
        (Coastal, dec!(0.95)),
        (Urban, dec!(1.0)),
        (Suburban, dec!(1.05)),
        (Inland, dec!(1.15)),
        (Remote, dec!(1.25)),
    ]
}

/// Fixed wholesale and margin amounts with percentage risk premiums.
pub fn tier_risk() -> PricingConfigBuilder {
    PricingConfig::builder()
        .countries([SouthAfrica, Zimbabwe, Botswana])
        .grid_locations([Coastal, Inland])
        .country_table(
            CountryTable::WholesaleBase,
            [(SouthAfrica, dec!(18.50)), (Zimbabwe, dec!(19.20)), (Botswana, dec!(18.80))],
        )
        .country_table(
            CountryTable::RetailMargin,
            [(SouthAfrica, dec!(3.00)), (Zimbabwe, dec!(3.60)), (Botswana, dec!(3.10))],
        )
        .country_table(
            CountryTable::CurrencyRisk,
            [(SouthAfrica, dec!(0.02)), (Zimbabwe, dec!(0.05)), (Botswana, dec!(0.03))],
        )
        .country_table(
            CountryTable::PoliticalRisk,
            [(SouthAfrica, dec!(0.01)), (Zimbabwe, dec!(0.08)), (Botswana, dec!(0.02))],
        )
        .grid_table(
            GridTable::TransportCost,
            [(Coastal, dec!(0.25)), (Inland, dec!(0.45))],
        )
        .tier_discount(stepped_discounts())
        .volumes(volume_estimates())
}

/// Flat R20.00 retail price scaled by country and grid factors.
pub fn multiplicative() -> PricingConfigBuilder {
    PricingConfig::builder()
        .countries([SouthAfrica, Zimbabwe, Botswana])
        .grid_locations([Coastal, Inland])
        .country_table(
            CountryTable::CountryFactor,
            [(SouthAfrica, dec!(1.0)), (Zimbabwe, dec!(1.2)), (Botswana, dec!(1.1))],
        )
        .grid_table(GridTable::GridFactor, [(Coastal, dec!(1.0)), (Inland, dec!(1.1))])
        .tier_discount(DiscountSchedule::Linear { per_tier: dec!(0.02) })
        .flat_retail_price(dec!(20.00))
        .volumes(volume_estimates())
}

/// Regional factors and the loyalty table; margins come from the caller.
pub fn crude_to_retail() -> PricingConfigBuilder {
    PricingConfig::builder()
        .countries(Country::ALL)
        .grid_locations(GridLocation::ALL)
        .country_table(CountryTable::CountryFactor, regional_country_factors())
        .grid_table(GridTable::GridFactor, regional_grid_factors())
        .tier_discount(loyalty_discounts())
        .volumes(volume_estimates())
}

/// Retail price with a linear exchange-rate adjustment around 18.0.
pub fn simplified_retail() -> PricingConfigBuilder {
    PricingConfig::builder()
        .countries(Country::ALL)
        .grid_locations(GridLocation::ALL)
        .country_table(CountryTable::CountryFactor, regional_country_factors())
        .grid_table(GridTable::GridFactor, regional_grid_factors())
        .tier_discount(loyalty_discounts())
        .flat_retail_price(dec!(20.00))
        .exchange_baseline(dec!(18.0))
        .exchange_sensitivity(dec!(0.1))
        .volumes(volume_estimates())
}

/// Every margin expressed as a percentage of the running cost.
pub fn dynamic_margin() -> PricingConfigBuilder {
    PricingConfig::builder()
        .countries([SouthAfrica, Zimbabwe, Botswana])
        .grid_locations([Coastal, Inland])
        .country_table(
            CountryTable::ExchangeRate,
            [(SouthAfrica, dec!(17.25)), (Zimbabwe, dec!(322.0)), (Botswana, dec!(11.50))],
        )
        .country_table(
            CountryTable::FuelLevy,
            [(SouthAfrica, dec!(0.058)), (Zimbabwe, dec!(0.087)), (Botswana, dec!(0.045))],
        )
        .country_table(
            CountryTable::WholesaleMargin,
            [(SouthAfrica, dec!(0.162)), (Zimbabwe, dec!(0.187)), (Botswana, dec!(0.165))],
        )
        .country_table(
            CountryTable::RetailMarginPercent,
            [(SouthAfrica, dec!(0.140)), (Zimbabwe, dec!(0.158)), (Botswana, dec!(0.142))],
        )
        .country_table(
            CountryTable::CurrencyRisk,
            [(SouthAfrica, dec!(0.024)), (Zimbabwe, dec!(0.052)), (Botswana, dec!(0.031))],
        )
        .country_table(
            CountryTable::PoliticalRisk,
            [(SouthAfrica, dec!(0.013)), (Zimbabwe, dec!(0.078)), (Botswana, dec!(0.019))],
        )
        .grid_table(
            GridTable::TransportPercent,
            [(Coastal, dec!(0.012)), (Inland, dec!(0.021))],
        )
        .tier_discount(stepped_discounts())
        .reference_crude_price(dec!(82.45))
        .volumes(volume_estimates())
}
