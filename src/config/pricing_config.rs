use crate::config::schedule::DiscountSchedule;
use crate::core::error::PricingError;
use crate::core::money::{Liters, Money, Percent};
use crate::core::region::{Country, GridLocation};
use crate::core::tier::Tier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// What a table's values mean, and therefore which values are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    /// A per-liter amount, `>= 0`.
    Money,
    /// A fraction in `[0, 1]`.
    Percent,
    /// A factor, `> 0`.
    Multiplier,
}

impl RateKind {
    fn check(
        self,
        table: &'static str,
        key: impl Display,
        value: Decimal,
    ) -> Result<(), PricingError> {
        let reason = match self {
            RateKind::Money if value < Decimal::ZERO => "amount must not be negative",
            RateKind::Percent if value < Decimal::ZERO || value > Decimal::ONE => {
                "percent must be a fraction in [0, 1]"
            }
            RateKind::Multiplier if value <= Decimal::ZERO => "factor must be positive",
            _ => return Ok(()),
        };
        Err(PricingError::InvalidConfig {
            table,
            key: key.to_string(),
            value: value.to_string(),
            reason,
        })
    }
}

/// Tables keyed by [`Country`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountryTable {
    WholesaleBase,
    RetailMargin,
    CurrencyRisk,
    PoliticalRisk,
    CountryFactor,
    FuelLevy,
    WholesaleMargin,
    RetailMarginPercent,
    /// Local currency per USD, used when a quote carries no rate of its own.
    ExchangeRate,
}

impl CountryTable {
    pub fn name(self) -> &'static str {
        match self {
            CountryTable::WholesaleBase => "wholesale_base",
            CountryTable::RetailMargin => "retail_margin",
            CountryTable::CurrencyRisk => "currency_risk",
            CountryTable::PoliticalRisk => "political_risk",
            CountryTable::CountryFactor => "country_factor",
            CountryTable::FuelLevy => "fuel_levy",
            CountryTable::WholesaleMargin => "wholesale_margin",
            CountryTable::RetailMarginPercent => "retail_margin_percent",
            CountryTable::ExchangeRate => "exchange_rate",
        }
    }

    pub fn kind(self) -> RateKind {
        match self {
            CountryTable::WholesaleBase | CountryTable::RetailMargin => RateKind::Money,
            CountryTable::CountryFactor | CountryTable::ExchangeRate => RateKind::Multiplier,
            CountryTable::CurrencyRisk
            | CountryTable::PoliticalRisk
            | CountryTable::FuelLevy
            | CountryTable::WholesaleMargin
            | CountryTable::RetailMarginPercent => RateKind::Percent,
        }
    }
}

/// Tables keyed by [`GridLocation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridTable {
    TransportCost,
    TransportPercent,
    GridFactor,
}

impl GridTable {
    pub fn name(self) -> &'static str {
        match self {
            GridTable::TransportCost => "transport_cost",
            GridTable::TransportPercent => "transport_percent",
            GridTable::GridFactor => "grid_factor",
        }
    }

    pub fn kind(self) -> RateKind {
        match self {
            GridTable::TransportCost => RateKind::Money,
            GridTable::TransportPercent => RateKind::Percent,
            GridTable::GridFactor => RateKind::Multiplier,
        }
    }
}

pub const LITERS_PER_BARREL: Decimal = dec!(159);

fn default_exchange_baseline() -> Decimal {
    dec!(18.0)
}

fn default_exchange_sensitivity() -> Decimal {
    dec!(0.1)
}

/// Immutable rate tables for one pricing scenario.
///
/// A config declares the countries and grid locations it covers. Every
/// table it carries holds an entry for each of them; a table it does not
/// carry is simply empty. Lookups distinguish three outcomes:
///
/// - key outside the declared domain → `UnknownCountry` / `UnknownGridLocation`
/// - table not carried by this config → `IncompleteConfig`
/// - otherwise the stored rate
///
/// Construct through [`PricingConfigBuilder::build`] (or deserialize, which
/// runs the same validation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PricingConfigBuilder")]
pub struct PricingConfig {
    countries: BTreeSet<Country>,
    grid_locations: BTreeSet<GridLocation>,
    country_tables: BTreeMap<CountryTable, BTreeMap<Country, Decimal>>,
    grid_tables: BTreeMap<GridTable, BTreeMap<GridLocation, Decimal>>,
    tier_discount: DiscountSchedule,
    volume_estimate: BTreeMap<Tier, Liters>,
    liters_per_barrel: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    flat_retail_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_crude_price: Option<Money>,
    exchange_baseline: Decimal,
    exchange_sensitivity: Decimal,
}

impl PricingConfig {
    pub fn builder() -> PricingConfigBuilder {
        PricingConfigBuilder::default()
    }

    pub fn country_rate(&self, table: CountryTable, country: Country) -> Result<Decimal, PricingError> {
        if !self.countries.contains(&country) {
            return Err(PricingError::UnknownCountry {
                key: country.to_string(),
            });
        }
        self.country_tables
            .get(&table)
            .and_then(|entries| entries.get(&country))
            .copied()
            .ok_or_else(|| PricingError::IncompleteConfig {
                table: table.name(),
                key: country.to_string(),
            })
    }

    pub fn grid_rate(&self, table: GridTable, location: GridLocation) -> Result<Decimal, PricingError> {
        if !self.grid_locations.contains(&location) {
            return Err(PricingError::UnknownGridLocation {
                key: location.to_string(),
            });
        }
        self.grid_tables
            .get(&table)
            .and_then(|entries| entries.get(&location))
            .copied()
            .ok_or_else(|| PricingError::IncompleteConfig {
                table: table.name(),
                key: location.to_string(),
            })
    }

    pub fn tier_discount(&self, tier: Tier) -> Result<Percent, PricingError> {
        self.tier_discount.percent_for(tier)
    }

    pub fn discount_schedule(&self) -> &DiscountSchedule {
        &self.tier_discount
    }

    pub fn volume_for(&self, tier: Tier) -> Result<Liters, PricingError> {
        self.volume_estimate
            .get(&tier)
            .copied()
            .ok_or_else(|| PricingError::IncompleteConfig {
                table: "volume_estimate",
                key: format!("tier {}", tier),
            })
    }

    pub fn countries(&self) -> impl Iterator<Item = Country> + '_ {
        self.countries.iter().copied()
    }

    pub fn grid_locations(&self) -> impl Iterator<Item = GridLocation> + '_ {
        self.grid_locations.iter().copied()
    }

    pub fn carries_country_table(&self, table: CountryTable) -> bool {
        self.country_tables.contains_key(&table)
    }

    pub fn carries_grid_table(&self, table: GridTable) -> bool {
        self.grid_tables.contains_key(&table)
    }

    pub fn liters_per_barrel(&self) -> Decimal {
        self.liters_per_barrel
    }

    pub fn flat_retail_price(&self) -> Option<Money> {
        self.flat_retail_price
    }

    pub fn reference_crude_price(&self) -> Option<Money> {
        self.reference_crude_price
    }

    pub fn exchange_baseline(&self) -> Decimal {
        self.exchange_baseline
    }

    pub fn exchange_sensitivity(&self) -> Decimal {
        self.exchange_sensitivity
    }
}

impl TryFrom<PricingConfigBuilder> for PricingConfig {
    type Error = PricingError;

    fn try_from(builder: PricingConfigBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

/// Mutable staging area for a [`PricingConfig`].
///
/// Also the wire shape of a config: a JSON override is read into a builder
/// and validated by [`build`](Self::build).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingConfigBuilder {
    #[serde(default)]
    pub countries: BTreeSet<Country>,
    #[serde(default)]
    pub grid_locations: BTreeSet<GridLocation>,
    #[serde(default)]
    pub country_tables: BTreeMap<CountryTable, BTreeMap<Country, Decimal>>,
    #[serde(default)]
    pub grid_tables: BTreeMap<GridTable, BTreeMap<GridLocation, Decimal>>,
    #[serde(default)]
    pub tier_discount: Option<DiscountSchedule>,
    #[serde(default)]
    pub volume_estimate: BTreeMap<Tier, Liters>,
    #[serde(default)]
    pub liters_per_barrel: Option<Decimal>,
    #[serde(default)]
    pub flat_retail_price: Option<Money>,
    #[serde(default)]
    pub reference_crude_price: Option<Money>,
    #[serde(default)]
    pub exchange_baseline: Option<Decimal>,
    #[serde(default)]
    pub exchange_sensitivity: Option<Decimal>,
}

impl PricingConfigBuilder {
    pub fn countries(mut self, countries: impl IntoIterator<Item = Country>) -> Self {
        self.countries.extend(countries);
        self
    }

    pub fn grid_locations(mut self, locations: impl IntoIterator<Item = GridLocation>) -> Self {
        self.grid_locations.extend(locations);
        self
    }

    pub fn country_table(
        mut self,
        table: CountryTable,
        entries: impl IntoIterator<Item = (Country, Decimal)>,
    ) -> Self {
        self.country_tables.entry(table).or_default().extend(entries);
        self
    }

    pub fn grid_table(
        mut self,
        table: GridTable,
        entries: impl IntoIterator<Item = (GridLocation, Decimal)>,
    ) -> Self {
        self.grid_tables.entry(table).or_default().extend(entries);
        self
    }

    /// Override a single country rate, e.g. for a what-if run.
    pub fn set_country_rate(mut self, table: CountryTable, country: Country, value: Decimal) -> Self {
        self.country_tables.entry(table).or_default().insert(country, value);
        self
    }

    pub fn set_grid_rate(mut self, table: GridTable, location: GridLocation, value: Decimal) -> Self {
        self.grid_tables.entry(table).or_default().insert(location, value);
        self
    }

    pub fn tier_discount(mut self, schedule: DiscountSchedule) -> Self {
        self.tier_discount = Some(schedule);
        self
    }

    pub fn volumes(mut self, volumes: impl IntoIterator<Item = (Tier, Liters)>) -> Self {
        self.volume_estimate.extend(volumes);
        self
    }

    pub fn liters_per_barrel(mut self, liters: Decimal) -> Self {
        self.liters_per_barrel = Some(liters);
        self
    }

    pub fn flat_retail_price(mut self, price: Money) -> Self {
        self.flat_retail_price = Some(price);
        self
    }

    pub fn reference_crude_price(mut self, price: Money) -> Self {
        self.reference_crude_price = Some(price);
        self
    }

    pub fn exchange_baseline(mut self, rate: Decimal) -> Self {
        self.exchange_baseline = Some(rate);
        self
    }

    pub fn exchange_sensitivity(mut self, coefficient: Decimal) -> Self {
        self.exchange_sensitivity = Some(coefficient);
        self
    }

    /// Validate every table against the declared domain and freeze the config.
    pub fn build(self) -> Result<PricingConfig, PricingError> {
        if self.countries.is_empty() {
            return Err(PricingError::IncompleteConfig {
                table: "countries",
                key: "domain".to_string(),
            });
        }
        if self.grid_locations.is_empty() {
            return Err(PricingError::IncompleteConfig {
                table: "grid_locations",
                key: "domain".to_string(),
            });
        }

        for (table, entries) in &self.country_tables {
            check_table(table.name(), table.kind(), &self.countries, entries)?;
        }
        for (table, entries) in &self.grid_tables {
            check_table(table.name(), table.kind(), &self.grid_locations, entries)?;
        }

        let tier_discount = self.tier_discount.ok_or_else(|| PricingError::IncompleteConfig {
            table: DiscountSchedule::TABLE_NAME,
            key: "schedule".to_string(),
        })?;
        tier_discount.validate()?;

        for tier in Tier::all() {
            let volume = self.volume_estimate.get(&tier).copied().ok_or_else(|| {
                PricingError::IncompleteConfig {
                    table: "volume_estimate",
                    key: format!("tier {}", tier),
                }
            })?;
            RateKind::Money.check("volume_estimate", format!("tier {}", tier), volume)?;
        }

        let liters_per_barrel = self.liters_per_barrel.unwrap_or(LITERS_PER_BARREL);
        RateKind::Multiplier.check("liters_per_barrel", "constant", liters_per_barrel)?;

        let exchange_baseline = self
            .exchange_baseline
            .unwrap_or_else(default_exchange_baseline);
        RateKind::Multiplier.check("exchange_baseline", "constant", exchange_baseline)?;

        if let Some(price) = self.flat_retail_price {
            RateKind::Multiplier.check("flat_retail_price", "constant", price)?;
        }
        if let Some(price) = self.reference_crude_price {
            RateKind::Multiplier.check("reference_crude_price", "constant", price)?;
        }

        log::trace!(
            "pricing config validated: {} countries, {} grid locations, {} country tables, {} grid tables",
            self.countries.len(),
            self.grid_locations.len(),
            self.country_tables.len(),
            self.grid_tables.len()
        );

        Ok(PricingConfig {
            countries: self.countries,
            grid_locations: self.grid_locations,
            country_tables: self.country_tables,
            grid_tables: self.grid_tables,
            tier_discount,
            volume_estimate: self.volume_estimate,
            liters_per_barrel,
            flat_retail_price: self.flat_retail_price,
            reference_crude_price: self.reference_crude_price,
            exchange_baseline,
            exchange_sensitivity: self
                .exchange_sensitivity
                .unwrap_or_else(default_exchange_sensitivity),
        })
    }
}

impl From<PricingConfig> for PricingConfigBuilder {
    fn from(config: PricingConfig) -> Self {
        Self {
            countries: config.countries,
            grid_locations: config.grid_locations,
            country_tables: config.country_tables,
            grid_tables: config.grid_tables,
            tier_discount: Some(config.tier_discount),
            volume_estimate: config.volume_estimate,
            liters_per_barrel: Some(config.liters_per_barrel),
            flat_retail_price: config.flat_retail_price,
            reference_crude_price: config.reference_crude_price,
            exchange_baseline: Some(config.exchange_baseline),
            exchange_sensitivity: Some(config.exchange_sensitivity),
        }
    }
}

fn check_table<K: Ord + Copy + Display>(
    name: &'static str,
    kind: RateKind,
    domain: &BTreeSet<K>,
    entries: &BTreeMap<K, Decimal>,
) -> Result<(), PricingError> {
    for key in domain {
        let value = entries.get(key).ok_or_else(|| PricingError::IncompleteConfig {
            table: name,
            key: key.to_string(),
        })?;
        kind.check(name, key, *value)?;
    }
    if let Some(stray) = entries.keys().find(|k| !domain.contains(k)) {
        return Err(PricingError::InvalidConfig {
            table: name,
            key: stray.to_string(),
            value: entries[stray].to_string(),
            reason: "key is outside the declared domain",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schedule::Monotonicity;

    fn volumes() -> Vec<(Tier, Liters)> {
        Tier::all().map(|t| (t, Decimal::from(1000 * t.get() as u32))).collect()
    }

    fn minimal() -> PricingConfigBuilder {
        PricingConfig::builder()
            .countries([Country::SouthAfrica, Country::Zimbabwe])
            .grid_locations([GridLocation::Coastal])
            .country_table(
                CountryTable::CountryFactor,
                [(Country::SouthAfrica, dec!(1.0)), (Country::Zimbabwe, dec!(1.2))],
            )
            .grid_table(GridTable::GridFactor, [(GridLocation::Coastal, dec!(1.0))])
            .tier_discount(DiscountSchedule::Linear { per_tier: dec!(0.02) })
            .volumes(volumes())
    }

    #[test]
    fn test_build_and_lookup() {
        let config = minimal().build().unwrap();
        assert_eq!(
            config
                .country_rate(CountryTable::CountryFactor, Country::Zimbabwe)
                .unwrap(),
            dec!(1.2)
        );
        assert_eq!(config.liters_per_barrel(), dec!(159));
        assert_eq!(config.exchange_baseline(), dec!(18.0));
    }

    #[test]
    fn test_country_outside_domain_is_unknown() {
        let config = minimal().build().unwrap();
        assert_eq!(
            config.country_rate(CountryTable::CountryFactor, Country::Zambia),
            Err(PricingError::UnknownCountry {
                key: "zambia".to_string()
            })
        );
        assert!(matches!(
            config.grid_rate(GridTable::GridFactor, GridLocation::Remote),
            Err(PricingError::UnknownGridLocation { .. })
        ));
    }

    #[test]
    fn test_missing_table_is_incomplete() {
        let config = minimal().build().unwrap();
        assert_eq!(
            config.country_rate(CountryTable::CurrencyRisk, Country::SouthAfrica),
            Err(PricingError::IncompleteConfig {
                table: "currency_risk",
                key: "south-africa".to_string()
            })
        );
    }

    #[test]
    fn test_missing_entry_fails_construction() {
        let result = minimal()
            .country_table(CountryTable::PoliticalRisk, [(Country::SouthAfrica, dec!(0.01))])
            .build();
        assert_eq!(
            result,
            Err(PricingError::IncompleteConfig {
                table: "political_risk",
                key: "zimbabwe".to_string()
            })
        );
    }

    #[test]
    fn test_missing_volume_fails_construction() {
        let mut builder = minimal();
        builder.volume_estimate.remove(&Tier::new(9).unwrap());
        assert!(matches!(
            builder.build(),
            Err(PricingError::IncompleteConfig {
                table: "volume_estimate",
                ..
            })
        ));
    }

    #[test]
    fn test_non_positive_factor_rejected() {
        let result = minimal()
            .set_country_rate(CountryTable::CountryFactor, Country::Zimbabwe, Decimal::ZERO)
            .build();
        assert!(matches!(
            result,
            Err(PricingError::InvalidConfig {
                table: "country_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_percent_out_of_range_rejected() {
        let result = minimal()
            .country_table(
                CountryTable::CurrencyRisk,
                [(Country::SouthAfrica, dec!(0.02)), (Country::Zimbabwe, dec!(5))],
            )
            .build();
        assert!(matches!(result, Err(PricingError::InvalidConfig { .. })));
    }

    #[test]
    fn test_stray_key_rejected() {
        let result = minimal()
            .set_grid_rate(GridTable::GridFactor, GridLocation::Remote, dec!(1.25))
            .build();
        assert!(matches!(
            result,
            Err(PricingError::InvalidConfig {
                reason: "key is outside the declared domain",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_schedule() {
        let mut builder = minimal();
        builder.tier_discount = None;
        assert!(matches!(
            builder.build(),
            Err(PricingError::IncompleteConfig {
                table: "tier_discount",
                ..
            })
        ));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let config = minimal()
            .tier_discount(DiscountSchedule::table(
                Monotonicity::NonIncreasing,
                Tier::all().map(|t| (t, Decimal::from(14 - t.get()) / dec!(100))),
            ))
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let back: PricingConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let broken = json.replace("\"1.2\"", "\"-1.2\"");
        assert!(serde_json::from_str::<PricingConfig>(&broken).is_err());
    }

    #[test]
    fn test_builder_from_config_allows_overrides() {
        let config = minimal().build().unwrap();
        let tweaked = PricingConfigBuilder::from(config)
            .set_country_rate(CountryTable::CountryFactor, Country::Zimbabwe, dec!(1.3))
            .build()
            .unwrap();
        assert_eq!(
            tweaked
                .country_rate(CountryTable::CountryFactor, Country::Zimbabwe)
                .unwrap(),
            dec!(1.3)
        );
    }
}
