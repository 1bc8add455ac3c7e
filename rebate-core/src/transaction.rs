//! Input and output records of a rebate run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One statement line handed to the allocator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub description: String,
    /// Charge amount. Zero or negative amounts are skipped by the allocator.
    pub amount: Decimal,
    /// Issuing card identifier, when the statement covers several cards.
    pub card_tag: Option<String>,
}

impl Transaction {
    pub fn new(description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            description: description.into(),
            amount,
            card_tag: None,
        }
    }

    pub fn with_card_tag(mut self, tag: impl Into<String>) -> Self {
        self.card_tag = Some(tag.into());
        self
    }
}

/// Reward tier assigned to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RewardCategory {
    #[serde(rename = "excluded")]
    Excluded,
    #[serde(rename = "special-full")]
    SpecialFull,
    #[serde(rename = "special-partial")]
    SpecialPartial,
    #[serde(rename = "special-exhausted")]
    SpecialExhausted,
    #[serde(rename = "standard")]
    Standard,
}

impl RewardCategory {
    /// True for every tier reached through a special-merchant match.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            RewardCategory::SpecialFull
                | RewardCategory::SpecialPartial
                | RewardCategory::SpecialExhausted
        )
    }

    /// Short human label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            RewardCategory::Excluded => "Excluded",
            RewardCategory::SpecialFull => "Special rate",
            RewardCategory::SpecialPartial => "Cap reached (partial bonus)",
            RewardCategory::SpecialExhausted => "Standard (cap used up)",
            RewardCategory::Standard => "Standard",
        }
    }
}

/// Per-transaction outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub description: String,
    /// Amount truncated toward zero.
    pub amount: i64,
    /// Rate actually earned, in percent (`10` means 10%).
    pub applied_rate_percent: Decimal,
    pub points: i64,
    pub category: RewardCategory,
    pub card_tag: Option<String>,
    /// Bonus ledger after this transaction. Never decreases within a run and
    /// may exceed the cap once a partial award has been made.
    pub bonus_ledger: Decimal,
}

/// Aggregate over one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Sum of the truncated amounts of all emitted results.
    pub total_spend: i64,
    pub total_points: i64,
    /// Final ledger clamped to the bonus cap.
    pub bonus_used: Decimal,
    /// Final ledger as accumulated, possibly above the cap.
    pub bonus_claimed: Decimal,
    pub transaction_count: usize,
}

impl RunSummary {
    /// The cap has no headroom left.
    pub fn cap_exhausted(&self, bonus_cap: Decimal) -> bool {
        self.bonus_used >= bonus_cap
    }
}
