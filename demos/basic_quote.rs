//! Price the tier 6 Zimbabwe inland scenario step by step.
//!
//! Shows the itemised breakdown, the total for the tier's estimated volume
//! and the JSON quote envelope.

use fuel_pricing::prelude::*;

fn main() -> Result<(), PricingError> {
    println!("╔══════════════════════════════════════════╗");
    println!("║     fuel-pricing: Basic Quote Example    ║");
    println!("╚══════════════════════════════════════════╝\n");

    let model = ModelId::TierRisk;
    let config = model.default_config()?;
    let input = CalculationInput::new(Tier::new(6)?, Country::Zimbabwe, GridLocation::Inland);

    let result = compute_price(&input, &config, model)?;
    println!("{}", result);

    let verdict = PriceRangeValidator::classify(result.final_price_per_liter(), model.price_band());
    println!("Band {}: {}\n", model.price_band(), verdict);

    println!("━━━ JSON quote ━━━\n");
    let quote = Quote::new(input, result);
    match serde_json::to_string_pretty(&quote) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("could not serialise quote: {}", e),
    }
    Ok(())
}
