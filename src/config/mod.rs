pub mod defaults;
pub mod pricing_config;
pub mod schedule;
