//! Scenario generation for comparisons, benchmarks and stress tests.

use crate::config::pricing_config::PricingConfig;
use crate::core::input::CalculationInput;
use crate::core::region::{Country, GridLocation};
use crate::core::tier::Tier;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;

/// Every tier × country × grid location the config covers.
///
/// Numeric fields are copied from `template`, so a model that needs crude
/// or margin inputs can be swept with a fixed market snapshot.
pub fn scenario_grid(config: &PricingConfig, template: &CalculationInput) -> Vec<CalculationInput> {
    let mut inputs = Vec::new();
    for tier in Tier::all() {
        for country in config.countries() {
            for grid_location in config.grid_locations() {
                inputs.push(CalculationInput {
                    tier,
                    country,
                    grid_location,
                    ..template.clone()
                });
            }
        }
    }
    inputs
}

/// Ranges for randomly generated market inputs, in hundredths.
#[derive(Debug, Clone)]
pub struct RandomInputConfig {
    /// Crude price per barrel in USD cents.
    pub crude_cents: (i64, i64),
    /// Exchange rate × 100.
    pub exchange_hundredths: (i64, i64),
    /// Retail price override in cents.
    pub retail_cents: (i64, i64),
    /// Upper bound for each caller-supplied percentage, in basis points.
    pub max_percent_bps: i64,
}

impl Default for RandomInputConfig {
    fn default() -> Self {
        Self {
            crude_cents: (6_000, 11_000),
            exchange_hundredths: (1_500, 2_200),
            retail_cents: (1_800, 2_400),
            max_percent_bps: 3_500,
        }
    }
}

fn cents(rng: &mut impl Rng, (low, high): (i64, i64)) -> Decimal {
    Decimal::new(rng.gen_range(low..=high), 2)
}

fn percent(rng: &mut impl Rng, max_bps: i64) -> Decimal {
    Decimal::new(rng.gen_range(0..=max_bps), 4)
}

/// Random scenarios drawn from the config's domain.
///
/// Every numeric field is filled so the inputs are usable with any model.
/// Values are generated as integers and scaled, so they are exact decimals.
pub fn random_inputs<R: Rng>(
    config: &PricingConfig,
    ranges: &RandomInputConfig,
    count: usize,
    rng: &mut R,
) -> Vec<CalculationInput> {
    let countries: Vec<Country> = config.countries().collect();
    let grids: Vec<GridLocation> = config.grid_locations().collect();
    let tiers: Vec<Tier> = Tier::all().collect();

    let mut inputs = Vec::with_capacity(count);
    for _ in 0..count {
        let (Some(&tier), Some(&country), Some(&grid)) = (
            tiers.choose(rng),
            countries.choose(rng),
            grids.choose(rng),
        ) else {
            break;
        };
        inputs.push(
            CalculationInput::new(tier, country, grid)
                .with_retail_price(cents(rng, ranges.retail_cents))
                .with_crude_price(cents(rng, ranges.crude_cents))
                .with_exchange_rate(cents(rng, ranges.exchange_hundredths))
                .with_refining_cost(percent(rng, ranges.max_percent_bps))
                .with_taxes_levies(percent(rng, ranges.max_percent_bps))
                .with_wholesale_margin(percent(rng, ranges.max_percent_bps))
                .with_retail_margin(percent(rng, ranges.max_percent_bps))
                .with_partner_discount(percent(rng, ranges.max_percent_bps)),
        );
    }
    inputs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::models::ModelId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_grid_covers_domain() {
        let config = ModelId::TierRisk.default_config().unwrap();
        let template = CalculationInput::new(Tier::new(1).unwrap(), Country::SouthAfrica, GridLocation::Coastal);
        let grid = scenario_grid(&config, &template);
        // 14 tiers × 3 countries × 2 locations
        assert_eq!(grid.len(), 84);
        assert!(grid.iter().all(|i| i.country != Country::Zambia));
    }

    #[test]
    fn test_grid_keeps_template_numbers() {
        let config = ModelId::SimplifiedRetail.default_config().unwrap();
        let template = CalculationInput::new(Tier::new(1).unwrap(), Country::SouthAfrica, GridLocation::Coastal)
            .with_exchange_rate(Decimal::new(1875, 2));
        let grid = scenario_grid(&config, &template);
        assert_eq!(grid.len(), 14 * 6 * 5);
        assert!(grid.iter().all(|i| i.exchange_rate == Some(Decimal::new(1875, 2))));
    }

    #[test]
    fn test_random_inputs_are_seeded_and_in_range() {
        let config = ModelId::CrudeToRetail.default_config().unwrap();
        let ranges = RandomInputConfig::default();
        let a = random_inputs(&config, &ranges, 50, &mut StdRng::seed_from_u64(7));
        let b = random_inputs(&config, &ranges, 50, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        for input in &a {
            let crude = input.crude_price.unwrap();
            assert!(crude >= Decimal::new(6_000, 2) && crude <= Decimal::new(11_000, 2));
            assert!(input.taxes_levies_percent.unwrap() <= Decimal::new(3_500, 4));
        }
    }
}
