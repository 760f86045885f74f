use crate::core::input::CalculationInput;
use crate::core::money::{format_money, Money};
use crate::pipeline::formula::CalculationResult;
use crate::pipeline::models::ModelId;
use crate::pipeline::validator::{PriceBand, PriceRange, PriceRangeValidator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A priced scenario ready to hand to someone else.
///
/// Wraps the deterministic [`CalculationResult`] with an id, a timestamp and
/// the range verdict for the model's band. Two quotes for the same input
/// differ only in `id` and `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Unique identifier for this quote.
    pub id: Uuid,
    /// When the quote was produced.
    pub created_at: DateTime<Utc>,
    pub model: ModelId,
    pub input: CalculationInput,
    pub result: CalculationResult,
    pub final_price_per_liter: Money,
    pub total_cost: Money,
    pub price_band: PriceBand,
    pub range: PriceRange,
}

impl Quote {
    pub fn new(input: CalculationInput, result: CalculationResult) -> Self {
        Self::with_id(Uuid::new_v4(), input, result)
    }

    /// Build a quote with a fixed id (useful for testing / replay).
    pub fn with_id(id: Uuid, input: CalculationInput, result: CalculationResult) -> Self {
        let model = result.model();
        let price_band = model.price_band();
        let final_price = result.final_price_per_liter();
        Self {
            id,
            created_at: Utc::now(),
            model,
            input,
            final_price_per_liter: final_price,
            total_cost: result.total_cost(),
            price_band,
            range: PriceRangeValidator::classify(final_price, price_band),
            result,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Quote {} ({})", self.id, self.created_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(
            f,
            "Tier {} | {} | {}",
            self.input.tier,
            self.input.country.name(),
            self.input.grid_location.name()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.result)?;
        writeln!(
            f,
            "Price Check:           {} ({} band {})",
            format_money(self.final_price_per_liter),
            self.range,
            self.price_band
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_price;
    use crate::core::region::{Country, GridLocation};
    use crate::core::tier::Tier;
    use rust_decimal_macros::dec;

    fn worked_example() -> (CalculationInput, CalculationResult) {
        let config = ModelId::TierRisk.default_config().unwrap();
        let input = CalculationInput::new(Tier::new(6).unwrap(), Country::Zimbabwe, GridLocation::Inland);
        let result = compute_price(&input, &config, ModelId::TierRisk).unwrap();
        (input, result)
    }

    #[test]
    fn test_quote_carries_derived_totals() {
        let (input, result) = worked_example();
        let quote = Quote::new(input, result);
        assert_eq!(quote.model, ModelId::TierRisk);
        assert_eq!(quote.final_price_per_liter, dec!(23.78));
        assert_eq!(quote.total_cost, dec!(163558.84));
        assert_eq!(quote.range, PriceRange::WithinRange);
    }

    #[test]
    fn test_quotes_differ_only_in_envelope() {
        let (input, result) = worked_example();
        let a = Quote::new(input.clone(), result.clone());
        let b = Quote::new(input, result);
        assert_ne!(a.id, b.id);
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn test_quote_json_shape() {
        let (input, result) = worked_example();
        let quote = Quote::with_id(Uuid::nil(), input, result);
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["model"], "tier-risk");
        assert_eq!(json["total_cost"], "163558.84");
        assert_eq!(json["range"], "within_range");
        assert_eq!(json["input"]["country"], "zimbabwe");
    }

    #[test]
    fn test_quote_text_has_price_check() {
        let (input, result) = worked_example();
        let text = Quote::new(input, result).to_string();
        assert!(text.contains("Tier 6 | Zimbabwe | Rural/Inland"));
        assert!(text.contains("Price Check:           R23.78 (within range band R15.00 to R30.00)"));
    }
}
