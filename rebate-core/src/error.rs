use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected configuration. Raised while building a [`crate::RateSchedule`] or
/// [`crate::KeywordSets`], never during a run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rate `{name}` must not be negative (got {value})")]
    NegativeRate { name: &'static str, value: Decimal },

    #[error("bonus cap must not be negative (got {0})")]
    NegativeCap(Decimal),

    #[error("special rate {special} is below the {name} base rate {base}")]
    SpecialBelowBase {
        name: &'static str,
        special: Decimal,
        base: Decimal,
    },

    #[error("empty keyword in the {0} list")]
    EmptyKeyword(&'static str),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
