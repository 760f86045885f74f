//! The same customer priced under every model.
//!
//! Each model reads the inputs it needs and ignores the rest, so one fully
//! populated input can be run through all five.

use fuel_pricing::prelude::*;
use fuel_pricing::simulation::exchange_shock::exchange_shocks;
use rust_decimal_macros::dec;

fn main() -> Result<(), PricingError> {
    println!("╔══════════════════════════════════════════╗");
    println!("║   fuel-pricing: Model Comparison Demo    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let input = CalculationInput::new(Tier::new(6)?, Country::SouthAfrica, GridLocation::Coastal)
        .with_crude_price(dec!(85.50))
        .with_exchange_rate(dec!(18.75))
        .with_refining_cost(dec!(0.125))
        .with_taxes_levies(dec!(0.285))
        .with_wholesale_margin(dec!(0.085))
        .with_retail_margin(dec!(0.12))
        .with_partner_discount(dec!(0.05));

    println!("{:<18} {:>10} {:>14}  {}", "Model", "Per Liter", "Total Cost", "Range");
    for model in ModelId::ALL {
        let config = model.default_config()?;
        let result = compute_price(&input, &config, model)?;
        let range = PriceRangeValidator::classify(result.final_price_per_liter(), model.price_band());
        println!(
            "{:<18} {:>10} {:>14}  {}",
            model.name(),
            result.final_price_per_liter(),
            result.total_cost(),
            range
        );
    }

    println!("\n━━━ Exchange-rate exposure (simplified retail) ━━━\n");
    let model = ModelId::SimplifiedRetail;
    let config = model.default_config()?;
    for shock in exchange_shocks(model, &config, &input, &[dec!(-0.10), dec!(0.10), dec!(0.25)])? {
        println!("  {}", shock);
    }
    Ok(())
}
