pub mod exchange_shock;
pub mod presets;
pub mod sweep;
