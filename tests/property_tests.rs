use fuel_pricing::compute_price;
use fuel_pricing::config::defaults::{loyalty_discounts, stepped_discounts};
use fuel_pricing::config::schedule::{DiscountSchedule, Monotonicity};
use fuel_pricing::core::input::CalculationInput;
use fuel_pricing::core::money::{format_money, parse_money, round2};
use fuel_pricing::core::region::{Country, GridLocation};
use fuel_pricing::core::tier::Tier;
use fuel_pricing::pipeline::models::ModelId;
use fuel_pricing::pipeline::stage::Operation;
use fuel_pricing::pipeline::validator::{PriceBand, PriceRange, PriceRangeValidator};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn arb_tier() -> impl Strategy<Value = Tier> {
    (1i64..=14).prop_map(|n| Tier::new(n).unwrap())
}

fn arb_model() -> impl Strategy<Value = ModelId> {
    prop::sample::select(ModelId::ALL.to_vec())
}

/// An amount in cents between `low` and `high` (both in cents).
fn arb_cents(low: i64, high: i64) -> impl Strategy<Value = Decimal> {
    (low..=high).prop_map(|c| Decimal::new(c, 2))
}

/// A fraction in `[0, max_bps / 10000]`.
fn arb_percent(max_bps: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_bps).prop_map(|b| Decimal::new(b, 4))
}

/// A scenario valid for every model's default config.
///
/// Country and grid location are drawn from the smallest shared domain.
fn arb_input() -> impl Strategy<Value = CalculationInput> {
    (
        arb_tier(),
        prop::sample::select(vec![Country::SouthAfrica, Country::Zimbabwe, Country::Botswana]),
        prop::sample::select(vec![GridLocation::Coastal, GridLocation::Inland]),
        arb_cents(1_500, 2_500),
        arb_cents(5_000, 12_000),
        arb_cents(1_500, 2_200),
        (arb_percent(2_000), arb_percent(3_500), arb_percent(1_500), arb_percent(2_000), arb_percent(1_000)),
    )
        .prop_map(|(tier, country, grid, retail, crude, rate, (refining, taxes, wholesale, margin, partner))| {
            CalculationInput::new(tier, country, grid)
                .with_retail_price(retail)
                .with_crude_price(crude)
                .with_exchange_rate(rate)
                .with_refining_cost(refining)
                .with_taxes_levies(taxes)
                .with_wholesale_margin(wholesale)
                .with_retail_margin(margin)
                .with_partner_discount(partner)
        })
}

fn check_schedule(schedule: &DiscountSchedule) -> Result<(), TestCaseError> {
    let mut previous: Option<Decimal> = None;
    for tier in Tier::all() {
        let pct = schedule.percent_for(tier).unwrap();
        prop_assert!(pct >= Decimal::ZERO && pct <= Decimal::ONE);
        if let Some(prev) = previous {
            match schedule.direction() {
                Monotonicity::NonDecreasing => prop_assert!(pct >= prev),
                Monotonicity::NonIncreasing => prop_assert!(pct <= prev),
            }
        }
        previous = Some(pct);
    }
    Ok(())
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Discount schedules stay in [0, 1] and keep direction.
    // ===================================================================
    #[test]
    fn linear_schedules_are_monotonic(per_tier in arb_percent(700)) {
        check_schedule(&DiscountSchedule::Linear { per_tier })?;
    }

    // ===================================================================
    // INVARIANT 2: Same input, same config, same bytes.
    // ===================================================================
    #[test]
    fn compute_price_is_deterministic(model in arb_model(), input in arb_input()) {
        let config = model.default_config().unwrap();
        let a = compute_price(&input, &config, model).unwrap();
        let b = compute_price(&input, &config, model).unwrap();
        prop_assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
    }

    // ===================================================================
    // INVARIANT 3: Every record is consistent with its neighbour.
    //
    // Running prices are already rounded to cents, each record's running
    // price is the previous one plus its delta, and the final price is the
    // last running price.
    // ===================================================================
    #[test]
    fn breakdown_chains(model in arb_model(), input in arb_input()) {
        let config = model.default_config().unwrap();
        let result = compute_price(&input, &config, model).unwrap();
        let records = result.breakdown();

        prop_assert_eq!(records[0].operation, Operation::Opening);
        for pair in records.windows(2) {
            prop_assert_eq!(pair[1].running_price, pair[0].running_price + pair[1].delta);
            prop_assert_eq!(round2(pair[1].running_price), pair[1].running_price);
        }
        prop_assert_eq!(result.final_price_per_liter(), records[records.len() - 1].running_price);
    }

    // ===================================================================
    // INVARIANT 4: Total cost is derived, never drifted.
    // ===================================================================
    #[test]
    fn total_cost_is_price_times_volume(model in arb_model(), input in arb_input()) {
        let config = model.default_config().unwrap();
        let result = compute_price(&input, &config, model).unwrap();
        prop_assert_eq!(
            result.total_cost(),
            round2(result.final_price_per_liter() * config.volume_for(input.tier).unwrap())
        );
    }

    // ===================================================================
    // INVARIANT 5: A better tier never pays more under a rising schedule.
    //
    // For the multiplicative model every stage is order-preserving, so a
    // higher tier (larger discount) is never more expensive.
    // ===================================================================
    #[test]
    fn higher_tier_never_costs_more(input in arb_input(), step in 1u8..14) {
        let model = ModelId::Multiplicative;
        let config = model.default_config().unwrap();
        let low = input.tier.get();
        prop_assume!(low + step <= Tier::MAX);
        let higher = CalculationInput {
            tier: Tier::try_from(low + step).unwrap(),
            ..input.clone()
        };
        let cheap = compute_price(&higher, &config, model).unwrap();
        let dear = compute_price(&input, &config, model).unwrap();
        prop_assert!(cheap.final_price_per_liter() <= dear.final_price_per_liter());
    }

    // ===================================================================
    // INVARIANT 6: Money formatting round-trips.
    // ===================================================================
    #[test]
    fn money_format_parse_idempotent(cents in -1_000_000i64..1_000_000) {
        let amount = Decimal::new(cents, 2);
        let text = format_money(amount);
        let parsed = parse_money(&text).unwrap();
        prop_assert_eq!(parsed, amount);
        prop_assert_eq!(format_money(parsed), text);
    }

    // ===================================================================
    // INVARIANT 7: The validator reads the band the way it is printed.
    //
    // Under [15, 30] anything below 15 is low, anything above 30 is high,
    // and both edges are realistic.
    // ===================================================================
    #[test]
    fn prices_below_the_band_are_below_range(cents in 0i64..1_500) {
        let band = PriceBand::new(Decimal::from(15), Decimal::from(30));
        prop_assert_eq!(PriceRangeValidator::classify(Decimal::new(cents, 2), band), PriceRange::BelowRange);
    }

    #[test]
    fn prices_above_the_band_are_above_range(cents in 3_001i64..1_000_000) {
        let band = PriceBand::new(Decimal::from(15), Decimal::from(30));
        prop_assert_eq!(PriceRangeValidator::classify(Decimal::new(cents, 2), band), PriceRange::AboveRange);
    }

    #[test]
    fn prices_inside_the_band_are_realistic(cents in 1_500i64..=3_000) {
        let band = PriceBand::new(Decimal::from(15), Decimal::from(30));
        let range = PriceRangeValidator::classify(Decimal::new(cents, 2), band);
        prop_assert_eq!(range, PriceRange::WithinRange);
        prop_assert!(range.is_realistic());
    }

    #[test]
    fn crude_band_flags_anything_over_35(cents in 3_501i64..10_000_000) {
        let band = ModelId::CrudeToRetail.price_band();
        prop_assert_eq!(PriceRangeValidator::classify(Decimal::new(cents, 2), band), PriceRange::AboveRange);
    }
}

#[test]
fn built_in_schedules_are_monotonic() {
    check_schedule(&stepped_discounts()).unwrap();
    check_schedule(&loyalty_discounts()).unwrap();
}

#[test]
fn band_edges_are_inclusive() {
    let band = PriceBand::new(Decimal::from(15), Decimal::from(30));
    assert_eq!(PriceRangeValidator::classify(Decimal::from(15), band), PriceRange::WithinRange);
    assert_eq!(PriceRangeValidator::classify(Decimal::from(30), band), PriceRange::WithinRange);
    assert_eq!(PriceRangeValidator::classify(Decimal::new(1499, 2), band), PriceRange::BelowRange);
    assert_eq!(PriceRangeValidator::classify(Decimal::new(3001, 2), band), PriceRange::AboveRange);
}
