//! fuel-pricing CLI
//!
//! Price fuel scenarios from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Worked example: tier 6, Zimbabwe, inland
//! fuel-pricing quote --model tier-risk --tier 6 --country zimbabwe --grid inland
//!
//! # Crude-to-retail with caller margins, as JSON
//! fuel-pricing quote --model crude-to-retail --tier 6 --country south-africa --grid urban \
//!     --crude-price 85.50 --exchange-rate 18.75 --refining 12.5 --taxes 28.5 \
//!     --wholesale-margin 8.5 --retail-margin 12 --partner-discount 5 --format json
//!
//! # Every tier × country × grid location for a model
//! fuel-pricing compare --model multiplicative
//! ```
//!
//! Set `RUST_LOG=debug` to trace every stage.

use fuel_pricing::compute_price;
use fuel_pricing::config::pricing_config::PricingConfig;
use fuel_pricing::core::error::PricingError;
use fuel_pricing::core::input::CalculationInput;
use fuel_pricing::core::money::{parse_decimal, parse_money, parse_percent_points, Percent};
use fuel_pricing::core::region::{Country, GridLocation};
use fuel_pricing::core::tier::Tier;
use fuel_pricing::pipeline::models::ModelId;
use fuel_pricing::report::{Quote, ScenarioTable};
use fuel_pricing::simulation::exchange_shock::exchange_shocks;
use fuel_pricing::simulation::presets::{self, PRESET_NAMES};
use fuel_pricing::simulation::sweep::scenario_grid;
use std::fmt::Display;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"fuel-pricing — staged per-liter fuel pricing

USAGE:
    fuel-pricing <COMMAND> [OPTIONS]

COMMANDS:
    quote       Price one scenario
    preset      Price one of the built-in presets
    compare     Price every tier × country × grid location in the config
    shock       Reprice a scenario under exchange-rate moves
    config      Print a model's built-in config as JSON
    help        Show this message

OPTIONS (all commands):
    --model <ID>              tier-risk (default), multiplicative, crude-to-retail,
                              simplified-retail, dynamic-margin
    --config <FILE>           JSON config override
    --format <FORMAT>         Output format: text (default) or json

OPTIONS (quote, compare, shock):
    --tier <N>                Customer tier, 1-14
    --country <C>             e.g. south-africa, zimbabwe
    --grid <G>                coastal, urban, suburban, inland, remote
    --retail-price <R>        Retail price override per liter
    --crude-price <USD>       Crude price per barrel
    --exchange-rate <RATE>    Local currency per USD
    --refining <PCT>          Refining cost, percent points
    --taxes <PCT>             Taxes and levies, percent points
    --wholesale-margin <PCT>  Wholesale margin, percent points
    --retail-margin <PCT>     Retail margin, percent points
    --partner-discount <PCT>  Partner discount, percent points

OPTIONS (preset, shock):
    --name <NAME>             south-africa, zimbabwe or premium

OPTIONS (shock):
    --shocks <LIST>           Comma-separated moves in percent points (default: -10,-5,5,10)

EXAMPLES:
    fuel-pricing quote --tier 6 --country zimbabwe --grid inland
    fuel-pricing preset --model crude-to-retail --name south-africa
    fuel-pricing compare --model simplified-retail --exchange-rate 18.75
    fuel-pricing shock --model simplified-retail --name zimbabwe --shocks -20,20
    fuel-pricing config --model dynamic-margin > dynamic.json"#
    );
}

fn fail(message: impl Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn or_fail<T>(result: Result<T, PricingError>) -> T {
    result.unwrap_or_else(|e| fail(e))
}

/// Options shared by every command; each command reads the ones it needs.
#[derive(Default)]
struct Options {
    model: Option<String>,
    config: Option<String>,
    format: Option<String>,
    name: Option<String>,
    shocks: Option<String>,
    tier: Option<String>,
    country: Option<String>,
    grid: Option<String>,
    retail_price: Option<String>,
    crude_price: Option<String>,
    exchange_rate: Option<String>,
    refining: Option<String>,
    taxes: Option<String>,
    wholesale_margin: Option<String>,
    retail_margin: Option<String>,
    partner_discount: Option<String>,
}

fn parse_options(args: &[String]) -> Options {
    let mut options = Options::default();
    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let slot = match flag {
            "--model" => &mut options.model,
            "--config" => &mut options.config,
            "--format" => &mut options.format,
            "--name" => &mut options.name,
            "--shocks" => &mut options.shocks,
            "--tier" => &mut options.tier,
            "--country" => &mut options.country,
            "--grid" => &mut options.grid,
            "--retail-price" => &mut options.retail_price,
            "--crude-price" => &mut options.crude_price,
            "--exchange-rate" => &mut options.exchange_rate,
            "--refining" => &mut options.refining,
            "--taxes" => &mut options.taxes,
            "--wholesale-margin" => &mut options.wholesale_margin,
            "--retail-margin" => &mut options.retail_margin,
            "--partner-discount" => &mut options.partner_discount,
            _ => fail(format!("unknown option: {}", flag)),
        };
        i += 1;
        *slot = Some(
            args.get(i)
                .cloned()
                .unwrap_or_else(|| fail(format!("{} requires a value", flag))),
        );
        i += 1;
    }
    options
}

impl Options {
    fn model(&self) -> ModelId {
        match &self.model {
            Some(key) => or_fail(key.parse()),
            None => ModelId::TierRisk,
        }
    }

    fn json(&self) -> bool {
        match self.format.as_deref() {
            None | Some("text") => false,
            Some("json") => true,
            Some(other) => fail(format!("--format requires 'text' or 'json', got '{}'", other)),
        }
    }

    /// The `--config` override, or the model's built-in tables.
    fn pricing_config(&self, model: ModelId) -> PricingConfig {
        match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .unwrap_or_else(|e| fail(format!("reading '{}': {}", path, e)));
                serde_json::from_str(&content)
                    .unwrap_or_else(|e| fail(format!("invalid config '{}': {}", path, e)))
            }
            None => or_fail(model.default_config()),
        }
    }

    /// Overlay the numeric flags onto `input`.
    fn apply_numbers(&self, mut input: CalculationInput) -> Result<CalculationInput, PricingError> {
        if let Some(text) = &self.retail_price {
            input.retail_price = Some(parse_money(text)?);
        }
        if let Some(text) = &self.crude_price {
            input.crude_price = Some(parse_decimal("crude_price", text)?);
        }
        if let Some(text) = &self.exchange_rate {
            input.exchange_rate = Some(parse_decimal("exchange_rate", text)?);
        }
        let percents: [(&'static str, &Option<String>, &mut Option<Percent>); 5] = [
            ("refining_cost_percent", &self.refining, &mut input.refining_cost_percent),
            ("taxes_levies_percent", &self.taxes, &mut input.taxes_levies_percent),
            ("wholesale_margin_percent", &self.wholesale_margin, &mut input.wholesale_margin_percent),
            ("retail_margin_percent", &self.retail_margin, &mut input.retail_margin_percent),
            ("partner_discount_percent", &self.partner_discount, &mut input.partner_discount_percent),
        ];
        for (field, text, slot) in percents {
            if let Some(text) = text {
                *slot = Some(parse_percent_points(field, text)?);
            }
        }
        Ok(input)
    }

    /// A full input from `--tier`, `--country`, `--grid` and the numeric flags.
    fn input(&self) -> Result<CalculationInput, PricingError> {
        let required = |value: &Option<String>, flag: &str| -> String {
            value
                .clone()
                .unwrap_or_else(|| fail(format!("{} is required", flag)))
        };
        let tier: Tier = required(&self.tier, "--tier").parse()?;
        let country: Country = required(&self.country, "--country").parse()?;
        let grid: GridLocation = required(&self.grid, "--grid").parse()?;
        self.apply_numbers(CalculationInput::new(tier, country, grid))
    }

    /// `--name` selects a preset; otherwise the input is read from flags.
    fn preset_or_input(&self, model: ModelId) -> CalculationInput {
        match &self.name {
            Some(name) => {
                let preset = presets::find(model, name).unwrap_or_else(|| {
                    fail(format!(
                        "no preset '{}' for {} (presets exist for crude-to-retail and simplified-retail: {})",
                        name,
                        model,
                        PRESET_NAMES.join(", ")
                    ))
                });
                or_fail(self.apply_numbers(preset.input))
            }
            None => or_fail(self.input()),
        }
    }
}

fn print_quote(quote: &Quote, json: bool) {
    if json {
        let text = serde_json::to_string_pretty(quote).unwrap_or_else(|e| fail(e));
        println!("{}", text);
    } else {
        println!("{}", quote);
    }
}

fn cmd_quote(args: &[String]) {
    let options = parse_options(args);
    let model = options.model();
    let config = options.pricing_config(model);
    let input = or_fail(options.input());
    let result = or_fail(compute_price(&input, &config, model));
    print_quote(&Quote::new(input, result), options.json());
}

fn cmd_preset(args: &[String]) {
    let mut options = parse_options(args);
    if options.model.is_none() {
        options.model = Some(ModelId::CrudeToRetail.key().to_string());
    }
    if options.name.is_none() {
        fail(format!("--name is required ({})", PRESET_NAMES.join(", ")));
    }
    let model = options.model();
    let config = options.pricing_config(model);
    let input = options.preset_or_input(model);
    let result = or_fail(compute_price(&input, &config, model));
    print_quote(&Quote::new(input, result), options.json());
}

fn cmd_compare(args: &[String]) {
    let options = parse_options(args);
    let model = options.model();
    let config = options.pricing_config(model);

    let (Some(tier), Some(country), Some(grid)) =
        (Tier::all().next(), config.countries().next(), config.grid_locations().next())
    else {
        fail("config declares no countries or grid locations");
    };
    let template = or_fail(options.apply_numbers(CalculationInput::new(tier, country, grid)));
    let table = or_fail(ScenarioTable::price(model, &config, scenario_grid(&config, &template)));

    if options.json() {
        let text = serde_json::to_string_pretty(&table).unwrap_or_else(|e| fail(e));
        println!("{}", text);
    } else {
        println!("{}", table);
    }
}

fn cmd_shock(args: &[String]) {
    let options = parse_options(args);
    let model = options.model();
    let config = options.pricing_config(model);
    let input = options.preset_or_input(model);

    let shocks: Vec<Percent> = options
        .shocks
        .as_deref()
        .unwrap_or("-10,-5,5,10")
        .split(',')
        .map(|s| or_fail(parse_percent_points("shocks", s)))
        .collect();

    let results = or_fail(exchange_shocks(model, &config, &input, &shocks));
    if options.json() {
        let text = serde_json::to_string_pretty(&results).unwrap_or_else(|e| fail(e));
        println!("{}", text);
    } else {
        println!("=== {} Exchange Rate Shocks ===", model.name());
        for result in &results {
            println!("  {}", result);
        }
    }
}

fn cmd_config(args: &[String]) {
    let options = parse_options(args);
    let config = options.pricing_config(options.model());
    let text = serde_json::to_string_pretty(&config).unwrap_or_else(|e| fail(e));
    println!("{}", text);
}

fn main() {
    env_logger::init();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "quote" => cmd_quote(rest),
        "preset" => cmd_preset(rest),
        "compare" => cmd_compare(rest),
        "shock" => cmd_shock(rest),
        "config" => cmd_config(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
