//! Headline metrics shown above the result table.

use comfy_table::{Cell, Table};
use rebate_core::{RateSchedule, RunSummary, remaining_full_rate_spend};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::fmt::{grouped, money};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    pub total_spend: i64,
    pub total_points: i64,
    /// Bonus points used, whole points.
    pub bonus_used: i64,
    pub bonus_cap: i64,
    pub cap_exhausted: bool,
    /// Special-merchant spend still earning the full rate. `None` once the cap
    /// is used up or when the schedule carries no bonus.
    pub remaining_full_rate_spend: Option<i64>,
}

impl Headline {
    pub fn new(summary: &RunSummary, schedule: &RateSchedule, is_foreign: bool) -> Self {
        let cap_exhausted = summary.cap_exhausted(schedule.bonus_cap());
        let remaining = if cap_exhausted {
            None
        } else {
            remaining_full_rate_spend(summary, schedule, is_foreign).map(whole)
        };

        Self {
            total_spend: summary.total_spend,
            total_points: summary.total_points,
            bonus_used: whole(summary.bonus_used),
            bonus_cap: whole(schedule.bonus_cap()),
            cap_exhausted,
            remaining_full_rate_spend: remaining,
        }
    }

    /// One-line status about the bonus budget.
    pub fn status_line(&self) -> String {
        if self.cap_exhausted {
            "Bonus cap used up: further special-merchant spend earns the base rate.".to_string()
        } else if let Some(spend) = self.remaining_full_rate_spend {
            format!(
                "About {} more special-merchant spend earns the full rate before the cap.",
                money(spend)
            )
        } else {
            "This schedule gives no bonus over the base rate.".to_string()
        }
    }

    pub fn render(&self) -> String {
        let mut table = Table::new();
        table.set_header(vec!["Metric", "Value"]);
        table.add_row(vec![Cell::new("Total spend"), Cell::new(money(self.total_spend))]);
        table.add_row(vec![
            Cell::new("Estimated points"),
            Cell::new(format!("{} pts", grouped(self.total_points))),
        ]);
        table.add_row(vec![
            Cell::new(format!("Bonus used (cap {})", grouped(self.bonus_cap))),
            Cell::new(format!("{} / {}", grouped(self.bonus_used), grouped(self.bonus_cap))),
        ]);
        format!("{table}\n{}", self.status_line())
    }
}

/// Truncate toward zero, saturating.
fn whole(value: Decimal) -> i64 {
    value.trunc().to_i64().unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebate_core::{KeywordSets, Transaction, process};
    use rust_decimal_macros::dec;

    fn schedule() -> RateSchedule {
        RateSchedule::new(dec!(0.012), dec!(0.025), dec!(0.10), dec!(1000)).unwrap()
    }

    fn run(txns: &[Transaction]) -> RunSummary {
        let k = KeywordSets::from_patterns(["年費"], false, ["Steam", "Netflix"], true).unwrap();
        process(txns, &schedule(), &k, false).1
    }

    #[test]
    fn test_headroom_left() {
        let summary = run(&[Transaction::new("Netflix", dec!(5000))]);
        let h = Headline::new(&summary, &schedule(), false);
        assert!(!h.cap_exhausted);
        assert_eq!(h.bonus_used, 440);
        assert_eq!(h.remaining_full_rate_spend, Some(6363));
        assert!(h.status_line().contains("$6,363"));
    }

    #[test]
    fn test_cap_used_up() {
        let summary = run(&[
            Transaction::new("Steam", dec!(8000)),
            Transaction::new("Steam", dec!(8000)),
        ]);
        let h = Headline::new(&summary, &schedule(), false);
        assert!(h.cap_exhausted);
        assert_eq!(h.bonus_used, 1000);
        assert_eq!(h.remaining_full_rate_spend, None);
        assert_eq!(h.total_points, 1192);

        let text = h.render();
        assert!(text.contains("$16,000"));
        assert!(text.contains("1,192 pts"));
        assert!(text.contains("1,000 / 1,000"));
        assert!(text.contains("cap used up"));
    }

    #[test]
    fn test_flat_schedule_has_no_remaining_figure() {
        let flat = RateSchedule::new(dec!(0.01), dec!(0.01), dec!(0.01), dec!(100)).unwrap();
        let h = Headline::new(&RunSummary::default(), &flat, false);
        assert_eq!(h.remaining_full_rate_spend, None);
        assert!(h.status_line().contains("no bonus"));
    }
}
