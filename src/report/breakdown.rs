use crate::core::money::{format_money, format_percent, Money};
use crate::pipeline::formula::CalculationResult;
use crate::pipeline::stage::{Operation, StageRecord};
use rust_decimal::Decimal;
use std::fmt;

/// `+R3.60`, `-R2.28`; the opening line is printed bare.
fn signed_money(amount: Money) -> String {
    if amount >= Decimal::ZERO {
        format!("+{}", format_money(amount))
    } else {
        format_money(amount)
    }
}

fn rate_column(record: &StageRecord) -> String {
    match (record.operation, record.rate) {
        (Operation::AddPercent | Operation::SubtractPercent, Some(pct)) => format_percent(pct),
        (Operation::MultiplyByFactor, Some(factor)) => format!("x{}", factor.normalize()),
        _ => String::new(),
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {} Price Breakdown ===", self.model().name())?;
        writeln!(f, "{:<22} {:>10} {:>8} {:>10}", "Component", "Change", "Rate", "Per Liter")?;

        for record in self.breakdown() {
            let change = match record.operation {
                Operation::Opening => String::new(),
                _ => signed_money(record.delta),
            };
            writeln!(
                f,
                "{:<22} {:>10} {:>8} {:>10}",
                record.label,
                change,
                rate_column(record),
                format_money(record.running_price)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Final Price per Liter: {}", format_money(self.final_price_per_liter()))?;
        writeln!(f, "Estimated Volume:      {} L", self.estimated_volume())?;
        writeln!(f, "Total Cost:            {}", format_money(self.total_cost()))?;
        match self.price_change_percent() {
            Some(pct) => writeln!(f, "Change vs Opening:     {:+.1}%", pct),
            None => writeln!(f, "Change vs Opening:     n/a"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::formula::FormulaPipeline;
    use crate::pipeline::models::ModelId;
    use crate::pipeline::stage::{Stage, StageKey};
    use rust_decimal_macros::dec;

    #[test]
    fn test_breakdown_lists_every_stage() {
        let result = FormulaPipeline::new(ModelId::Multiplicative, StageKey::RetailPrice, dec!(20.00), dec!(6878))
            .then(Stage::multiply(StageKey::CountryFactor, dec!(1.2)))
            .then(Stage::multiply(StageKey::GridFactor, dec!(1.1)))
            .then(Stage::subtract_percent(StageKey::TierDiscount, dec!(0.12)))
            .run()
            .unwrap();
        let text = result.to_string();

        assert!(text.starts_with("=== Multiplicative Price Breakdown ==="));
        assert!(text.contains("Country Factor"));
        assert!(text.contains("x1.2"));
        assert!(text.contains("12.0%"));
        assert!(text.contains("-R3.17"));
        assert!(text.contains("Final Price per Liter: R23.23"));
        assert!(text.contains("Total Cost:            R159775.94"));
        assert!(text.contains("Change vs Opening:     +16."));
    }

    #[test]
    fn test_zero_opening_prints_no_change() {
        let result = FormulaPipeline::new(ModelId::TierRisk, StageKey::WholesaleBase, dec!(0), dec!(10))
            .then(Stage::add_fixed(StageKey::RetailMargin, dec!(3.60)))
            .run()
            .unwrap();
        assert!(result.to_string().contains("Change vs Opening:     n/a"));
    }
}
