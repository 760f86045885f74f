//! # fuel-pricing
//!
//! Staged per-liter fuel pricing for tier, country and delivery-location
//! what-if scenarios.
//!
//! A pricing model binds an ordered list of arithmetic stages to a
//! [`PricingConfig`](config::pricing_config::PricingConfig) and a
//! [`CalculationInput`](core::input::CalculationInput), then folds an opening
//! price through them. Every stage rounds to cents and leaves an audit record,
//! so the final price can be re-derived line by line.
//!
//! ## Architecture
//!
//! - **core** — Tiers, countries, grid locations, money helpers, inputs, errors
//! - **config** — Validated rate tables and discount schedules, with built-in defaults
//! - **pipeline** — Stage primitives, model recipes, the executor, price bands
//! - **report** — Text breakdowns, scenario tables and JSON quote envelopes
//! - **simulation** — Named presets and scenario sweeps
//!
//! ```
//! use fuel_pricing::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let config = ModelId::TierRisk.default_config().unwrap();
//! let input = CalculationInput::new(Tier::new(6).unwrap(), Country::Zimbabwe, GridLocation::Inland);
//! let result = compute_price(&input, &config, ModelId::TierRisk).unwrap();
//! assert_eq!(result.final_price_per_liter(), dec!(23.78));
//! assert_eq!(result.total_cost(), dec!(163558.84));
//! ```

pub mod config;
pub mod core;
pub mod pipeline;
pub mod report;
pub mod simulation;

use crate::config::pricing_config::PricingConfig;
use crate::core::error::PricingError;
use crate::core::input::CalculationInput;
use crate::pipeline::formula::CalculationResult;
use crate::pipeline::models::ModelId;

/// Price one scenario under `model`.
///
/// Binding checks every lookup and required input up front; running can then
/// fail only on decimal overflow. The same arguments always produce the same
/// result.
pub fn compute_price(
    input: &CalculationInput,
    config: &PricingConfig,
    model: ModelId,
) -> Result<CalculationResult, PricingError> {
    let pipeline = model.bind(config, input)?;
    let result = pipeline.run()?;
    log::debug!(
        "{} quote tier {} {} {}: {} per liter, total {}",
        model,
        input.tier,
        input.country,
        input.grid_location,
        result.final_price_per_liter(),
        result.total_cost()
    );
    Ok(result)
}

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::compute_price;
    pub use crate::config::pricing_config::{PricingConfig, PricingConfigBuilder};
    pub use crate::config::schedule::DiscountSchedule;
    pub use crate::core::error::PricingError;
    pub use crate::core::input::CalculationInput;
    pub use crate::core::region::{Country, GridLocation};
    pub use crate::core::tier::Tier;
    pub use crate::pipeline::formula::CalculationResult;
    pub use crate::pipeline::models::ModelId;
    pub use crate::pipeline::validator::{PriceBand, PriceRange, PriceRangeValidator};
    pub use crate::report::Quote;
}
