use crate::core::error::PricingError;
use crate::core::money::{round2, to_f64, Liters, Money};
use crate::pipeline::models::ModelId;
use crate::pipeline::stage::{Stage, StageKey, StageRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An opening price followed by an ordered list of bound stages.
///
/// Every pricing model compiles down to one of these; the executor in
/// [`run`](Self::run) is the only place arithmetic is sequenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaPipeline {
    model: ModelId,
    opening_key: StageKey,
    opening: Money,
    stages: Vec<Stage>,
    estimated_volume: Liters,
}

impl FormulaPipeline {
    pub fn new(model: ModelId, opening_key: StageKey, opening: Money, estimated_volume: Liters) -> Self {
        Self {
            model,
            opening_key,
            opening,
            stages: Vec::new(),
            estimated_volume,
        }
    }

    /// Append a stage; stages run in insertion order.
    pub fn then(mut self, stage: Stage) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Fold the opening price through every stage.
    ///
    /// Each stage sees only the running price and the records already
    /// produced, so the result is fully determined by the pipeline. The only
    /// failure left after binding is arithmetic overflow, including the
    /// final price times the estimated volume.
    pub fn run(&self) -> Result<CalculationResult, PricingError> {
        let mut breakdown = Vec::with_capacity(self.stages.len() + 1);
        let opening = StageRecord::opening(self.opening_key, self.opening);
        let mut running = opening.running_price;
        breakdown.push(opening);

        for stage in &self.stages {
            let record = stage.apply(running, &breakdown)?;
            log::debug!(
                "{} stage {:<20} delta {:>8} running {:>8}",
                self.model,
                record.label,
                record.delta,
                record.running_price
            );
            running = record.running_price;
            breakdown.push(record);
        }

        if running.checked_mul(self.estimated_volume).is_none() {
            return Err(PricingError::numeric("total_cost", "overflows the decimal range"));
        }

        Ok(CalculationResult {
            model: self.model,
            breakdown,
            estimated_volume: self.estimated_volume,
        })
    }
}

/// Itemised outcome of one price calculation.
///
/// The final price is the last record's running price and the total cost is
/// derived from it on demand; neither is stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    model: ModelId,
    breakdown: Vec<StageRecord>,
    estimated_volume: Liters,
}

impl CalculationResult {
    pub fn model(&self) -> ModelId {
        self.model
    }

    /// Ordered stage records, opening price first.
    pub fn breakdown(&self) -> &[StageRecord] {
        &self.breakdown
    }

    pub fn record(&self, key: StageKey) -> Option<&StageRecord> {
        self.breakdown.iter().find(|r| r.key == key)
    }

    pub fn opening_price(&self) -> Money {
        self.breakdown
            .first()
            .map(|r| r.running_price)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn final_price_per_liter(&self) -> Money {
        self.breakdown
            .last()
            .map(|r| r.running_price)
            .unwrap_or(Decimal::ZERO)
    }

    pub fn estimated_volume(&self) -> Liters {
        self.estimated_volume
    }

    /// `final_price_per_liter × estimated_volume`, rounded to cents.
    ///
    /// [`FormulaPipeline::run`] rejects results whose product overflows.
    pub fn total_cost(&self) -> Money {
        round2(self.final_price_per_liter() * self.estimated_volume)
    }

    /// Change from opening to final price, in percent.
    ///
    /// `None` for a zero opening price or a change too large to represent.
    pub fn price_change_percent(&self) -> Option<f64> {
        let opening = self.opening_price();
        if opening.is_zero() {
            return None;
        }
        let pct = self
            .final_price_per_liter()
            .checked_sub(opening)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(opening)?;
        to_f64(pct)
    }
}
