//! Classifier/allocator: a single ordered fold over a statement.
//!
//! Earlier transactions get first claim on the bonus pool. The ledger counts the
//! full potential bonus of every special transaction that was evaluated against
//! the cap, so it can end above the cap; see [`RunState`].

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::keywords::{KeywordMatch, KeywordSets};
use crate::schedule::RateSchedule;
use crate::transaction::{RewardCategory, RunSummary, Transaction, TransactionResult};

/// Mutable state of one run. Created per call, never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RunState {
    accumulated_bonus_points: Decimal,
}

/// Score one statement.
///
/// Total over all inputs: non-positive amounts are skipped, an empty input
/// gives an empty result and a zero summary.
pub fn process(
    transactions: &[Transaction],
    schedule: &RateSchedule,
    keywords: &KeywordSets,
    is_foreign: bool,
) -> (Vec<TransactionResult>, RunSummary) {
    let mut state = RunState::default();
    let mut results = Vec::with_capacity(transactions.len());

    for txn in transactions {
        if txn.amount <= Decimal::ZERO {
            continue;
        }
        results.push(score(txn, schedule, keywords, is_foreign, &mut state));
    }

    let summary = summarize(&results, schedule, &state);
    (results, summary)
}

/// Score several independent statements. Each gets its own bonus budget.
pub fn process_statements(
    statements: &[Vec<Transaction>],
    schedule: &RateSchedule,
    keywords: &KeywordSets,
    is_foreign: bool,
) -> Vec<(Vec<TransactionResult>, RunSummary)> {
    statements
        .iter()
        .map(|txns| process(txns, schedule, keywords, is_foreign))
        .collect()
}

/// Spend that can still earn the full special rate before the cap is hit.
///
/// `None` when the schedule gives no bonus over the run's base rate.
pub fn remaining_full_rate_spend(
    summary: &RunSummary,
    schedule: &RateSchedule,
    is_foreign: bool,
) -> Option<Decimal> {
    let extra_rate = schedule.extra_rate(is_foreign);
    if extra_rate <= Decimal::ZERO {
        return None;
    }
    let headroom = (schedule.bonus_cap() - summary.bonus_used).max(Decimal::ZERO);
    headroom.checked_div(extra_rate)
}

fn score(
    txn: &Transaction,
    schedule: &RateSchedule,
    keywords: &KeywordSets,
    is_foreign: bool,
    state: &mut RunState,
) -> TransactionResult {
    let amount = txn.amount;
    let base_rate = schedule.base_rate(is_foreign);
    let cap = schedule.bonus_cap();

    let (rate, points, category) = match keywords.classify(&txn.description) {
        KeywordMatch::Excluded => (Decimal::ZERO, Decimal::ZERO, RewardCategory::Excluded),
        KeywordMatch::Unmatched => (
            base_rate,
            round_points(amount * base_rate),
            RewardCategory::Standard,
        ),
        KeywordMatch::Special => {
            let extra_potential = amount * schedule.extra_rate(is_foreign);
            let headroom = cap - state.accumulated_bonus_points;

            if state.accumulated_bonus_points + extra_potential <= cap {
                state.accumulated_bonus_points += extra_potential;
                (
                    schedule.special_rate(),
                    round_points(amount * schedule.special_rate()),
                    RewardCategory::SpecialFull,
                )
            } else if headroom > Decimal::ZERO {
                // Base points plus the whole remaining headroom, not a pro-rata share.
                // The rate reflects the exact sum; the award drops any fractional point.
                let exact = round_points(amount * base_rate) + headroom;
                state.accumulated_bonus_points += extra_potential;
                (exact / amount, exact.trunc(), RewardCategory::SpecialPartial)
            } else {
                (
                    base_rate,
                    round_points(amount * base_rate),
                    RewardCategory::SpecialExhausted,
                )
            }
        }
    };

    TransactionResult {
        description: txn.description.clone(),
        amount: to_whole(amount.trunc()),
        applied_rate_percent: (rate * Decimal::ONE_HUNDRED).normalize(),
        points: to_whole(points),
        category,
        card_tag: txn.card_tag.clone(),
        bonus_ledger: state.accumulated_bonus_points,
    }
}

fn summarize(results: &[TransactionResult], schedule: &RateSchedule, state: &RunState) -> RunSummary {
    RunSummary {
        total_spend: results.iter().fold(0i64, |acc, r| acc.saturating_add(r.amount)),
        total_points: results.iter().fold(0i64, |acc, r| acc.saturating_add(r.points)),
        bonus_used: state.accumulated_bonus_points.min(schedule.bonus_cap()),
        bonus_claimed: state.accumulated_bonus_points,
        transaction_count: results.len(),
    }
}

/// Points are rounded per transaction, half to even.
pub fn round_points(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

fn to_whole(value: Decimal) -> i64 {
    value.to_i64().unwrap_or(if value.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
