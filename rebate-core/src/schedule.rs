//! Rate schedule: the fixed constants of one rebate run.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{ConfigError, Result};

/// Rates are fractions (`0.012` is 1.2%). `bonus_cap` is measured in points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateSchedule {
    domestic_rate: Decimal,
    foreign_rate: Decimal,
    /// Total rate for special merchants, base rate included.
    special_rate: Decimal,
    /// Maximum extra points above base that special merchants may earn per run.
    bonus_cap: Decimal,
}

impl RateSchedule {
    /// Validate and build a schedule.
    ///
    /// A special rate equal to a base rate is accepted (it simply yields no
    /// bonus); a special rate below either base rate is not.
    pub fn new(
        domestic_rate: Decimal,
        foreign_rate: Decimal,
        special_rate: Decimal,
        bonus_cap: Decimal,
    ) -> Result<Self> {
        for (name, value) in [
            ("domestic_rate", domestic_rate),
            ("foreign_rate", foreign_rate),
            ("special_rate", special_rate),
        ] {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(ConfigError::NegativeRate { name, value });
            }
        }
        if bonus_cap.is_sign_negative() && !bonus_cap.is_zero() {
            return Err(ConfigError::NegativeCap(bonus_cap));
        }
        for (name, base) in [("domestic", domestic_rate), ("foreign", foreign_rate)] {
            if special_rate < base {
                return Err(ConfigError::SpecialBelowBase {
                    name,
                    special: special_rate,
                    base,
                });
            }
        }

        Ok(Self {
            domestic_rate,
            foreign_rate,
            special_rate,
            bonus_cap,
        })
    }

    pub fn domestic_rate(&self) -> Decimal {
        self.domestic_rate
    }

    pub fn foreign_rate(&self) -> Decimal {
        self.foreign_rate
    }

    pub fn special_rate(&self) -> Decimal {
        self.special_rate
    }

    pub fn bonus_cap(&self) -> Decimal {
        self.bonus_cap
    }

    /// Ordinary rate for the run: foreign or domestic.
    pub fn base_rate(&self, is_foreign: bool) -> Decimal {
        if is_foreign {
            self.foreign_rate
        } else {
            self.domestic_rate
        }
    }

    /// Bonus share of the special rate on top of the run's base rate.
    pub fn extra_rate(&self, is_foreign: bool) -> Decimal {
        self.special_rate - self.base_rate(is_foreign)
    }
}
