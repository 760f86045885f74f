use thiserror::Error;

/// Errors raised while building a pricing config or computing a price.
///
/// Every failure is returned to the caller. An unknown key never degrades
/// into a neutral factor of `1.0`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("tier must be an integer in 1..=14, got {value}")]
    InvalidTier { value: String },

    #[error("unknown country '{key}'")]
    UnknownCountry { key: String },

    #[error("unknown grid location '{key}'")]
    UnknownGridLocation { key: String },

    #[error("unknown pricing model '{key}'")]
    UnknownModel { key: String },

    #[error("pricing config is missing the {table} entry for {key}")]
    IncompleteConfig { table: &'static str, key: String },

    #[error("pricing config {table} entry for {key} is {value}: {reason}")]
    InvalidConfig {
        table: &'static str,
        key: String,
        value: String,
        reason: &'static str,
    },

    #[error("invalid numeric input for {field}: {reason}")]
    InvalidNumericInput { field: &'static str, reason: String },
}

impl PricingError {
    pub(crate) fn numeric(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidNumericInput {
            field,
            reason: reason.into(),
        }
    }
}
