use crate::compute_price;
use crate::config::pricing_config::PricingConfig;
use crate::core::error::PricingError;
use crate::core::input::CalculationInput;
use crate::core::money::{format_money, Money};
use crate::pipeline::models::ModelId;
use crate::pipeline::validator::{PriceRange, PriceRangeValidator};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One priced scenario in a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub input: CalculationInput,
    pub final_price_per_liter: Money,
    pub total_cost: Money,
    pub range: PriceRange,
}

/// Side-by-side comparison of many scenarios under one model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub model: ModelId,
    pub rows: Vec<ScenarioRow>,
}

impl ScenarioTable {
    /// Price every input, stopping at the first failure.
    pub fn price(
        model: ModelId,
        config: &PricingConfig,
        inputs: impl IntoIterator<Item = CalculationInput>,
    ) -> Result<Self, PricingError> {
        let band = model.price_band();
        let mut rows = Vec::new();
        for input in inputs {
            let result = compute_price(&input, config, model)?;
            let final_price = result.final_price_per_liter();
            rows.push(ScenarioRow {
                final_price_per_liter: final_price,
                total_cost: result.total_cost(),
                range: PriceRangeValidator::classify(final_price, band),
                input,
            });
        }
        log::debug!("priced {} {} scenarios", rows.len(), model);
        Ok(Self { model, rows })
    }

    pub fn cheapest(&self) -> Option<&ScenarioRow> {
        self.rows.iter().min_by_key(|r| r.final_price_per_liter)
    }

    pub fn most_expensive(&self) -> Option<&ScenarioRow> {
        self.rows.iter().max_by_key(|r| r.final_price_per_liter)
    }

    pub fn out_of_band(&self) -> impl Iterator<Item = &ScenarioRow> {
        self.rows.iter().filter(|r| !r.range.is_realistic())
    }
}

impl fmt::Display for ScenarioTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Scenario Comparison ===", self.model.name())?;
        writeln!(
            f,
            "{:>4}  {:<14} {:<10} {:>10} {:>14}  {}",
            "Tier", "Country", "Grid", "Per Liter", "Total Cost", "Range"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>4}  {:<14} {:<10} {:>10} {:>14}  {}",
                row.input.tier,
                row.input.country.key(),
                row.input.grid_location.key(),
                format_money(row.final_price_per_liter),
                format_money(row.total_cost),
                row.range
            )?;
        }

        if let (Some(low), Some(high)) = (self.cheapest(), self.most_expensive()) {
            writeln!(f)?;
            writeln!(
                f,
                "Cheapest:       {} (tier {} {} {})",
                format_money(low.final_price_per_liter),
                low.input.tier,
                low.input.country,
                low.input.grid_location
            )?;
            writeln!(
                f,
                "Most Expensive: {} (tier {} {} {})",
                format_money(high.final_price_per_liter),
                high.input.tier,
                high.input.country,
                high.input.grid_location
            )?;
        }
        writeln!(
            f,
            "Outside {}: {} of {}",
            self.model.price_band(),
            self.out_of_band().count(),
            self.rows.len()
        )
    }
}
