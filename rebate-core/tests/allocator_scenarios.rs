use rebate_core::{
    KeywordSets, RateSchedule, RewardCategory, RunSummary, Transaction, process,
    process_statements,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn schedule() -> RateSchedule {
    RateSchedule::new(dec!(0.012), dec!(0.025), dec!(0.10), dec!(1000)).unwrap()
}

fn keywords() -> KeywordSets {
    KeywordSets::from_patterns(
        ["年費", "循環息", "全聯"],
        false,
        ["Steam", "Netflix", "LINE Pay", "蝦皮"],
        true,
    )
    .unwrap()
}

fn txn(desc: &str, amount: Decimal) -> Transaction {
    Transaction::new(desc, amount)
}

#[test]
fn scenario_a_single_special_within_cap() {
    let (res, summary) = process(&[txn("Netflix", dec!(5000))], &schedule(), &keywords(), false);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].points, 500);
    assert_eq!(res[0].category, RewardCategory::SpecialFull);
    assert_eq!(res[0].applied_rate_percent, dec!(10));
    assert_eq!(res[0].bonus_ledger, dec!(440));
    assert_eq!(summary.bonus_used, dec!(440));
}

#[test]
fn scenario_b_second_transaction_takes_remaining_headroom() {
    let txns = vec![txn("Steam", dec!(8000)), txn("Steam", dec!(8000))];
    let (res, summary) = process(&txns, &schedule(), &keywords(), false);

    assert_eq!(res[0].points, 800);
    assert_eq!(res[0].category, RewardCategory::SpecialFull);
    assert_eq!(res[0].bonus_ledger, dec!(704));

    assert_eq!(res[1].points, 392);
    assert_eq!(res[1].category, RewardCategory::SpecialPartial);
    assert_eq!(res[1].bonus_ledger, dec!(1408));

    assert_eq!(summary.bonus_claimed, dec!(1408));
    assert_eq!(summary.bonus_used, dec!(1000));
    assert_eq!(summary.total_points, 1192);
    assert_eq!(summary.total_spend, 16000);
}

#[test]
fn scenario_c_excluded_earns_nothing() {
    let (res, summary) = process(&[txn("年費", dec!(1000))], &schedule(), &keywords(), false);

    assert_eq!(res[0].points, 0);
    assert_eq!(res[0].category, RewardCategory::Excluded);
    assert_eq!(res[0].applied_rate_percent, Decimal::ZERO);
    assert_eq!(summary.total_spend, 1000);
    assert_eq!(summary.total_points, 0);
}

#[test]
fn scenario_d_empty_input() {
    let (res, summary) = process(&[], &schedule(), &keywords(), false);

    assert!(res.is_empty());
    assert_eq!(summary, RunSummary::default());
    assert_eq!(summary.total_spend, 0);
    assert_eq!(summary.total_points, 0);
    assert_eq!(summary.bonus_used, Decimal::ZERO);
}

#[test]
fn non_positive_amounts_are_dropped() {
    let txns = vec![
        txn("Steam", dec!(0)),
        txn("REFUND Steam", dec!(-300)),
        txn("7-ELEVEN", dec!(100)),
    ];
    let (res, summary) = process(&txns, &schedule(), &keywords(), false);

    assert_eq!(res.len(), 1);
    assert_eq!(res[0].description, "7-ELEVEN");
    assert_eq!(summary.transaction_count, 1);
    assert_eq!(summary.bonus_claimed, Decimal::ZERO);
}

#[test]
fn exclusion_beats_special_keyword() {
    let txns = vec![txn("LINE Pay 全聯福利中心", dec!(2000))];
    let (res, summary) = process(&txns, &schedule(), &keywords(), false);

    assert_eq!(res[0].category, RewardCategory::Excluded);
    assert_eq!(res[0].points, 0);
    assert_eq!(summary.bonus_claimed, Decimal::ZERO);
}

#[test]
fn exhausted_special_falls_back_to_base_rate() {
    let txns = vec![
        txn("Steam", dec!(20000)),
        txn("Netflix", dec!(390)),
        txn("蝦皮購物", dec!(1500)),
    ];
    let (res, summary) = process(&txns, &schedule(), &keywords(), false);

    assert_eq!(res[0].category, RewardCategory::SpecialPartial);
    assert_eq!(res[0].points, 240 + 1000);
    assert_eq!(res[1].category, RewardCategory::SpecialExhausted);
    // 390 * 0.012 = 4.68
    assert_eq!(res[1].points, 5);
    assert_eq!(res[1].applied_rate_percent, dec!(1.2));
    assert_eq!(res[2].category, RewardCategory::SpecialExhausted);
    assert_eq!(res[2].points, 18);
    // Exhausted transactions do not add to the ledger.
    assert_eq!(summary.bonus_claimed, dec!(1760));
}

#[test]
fn swapping_order_moves_the_partial_award() {
    let a = txn("Steam", dec!(12000));
    let b = txn("Netflix", dec!(15000));

    let (ab, ab_sum) = process(&[a.clone(), b.clone()], &schedule(), &keywords(), false);
    let (ba, ba_sum) = process(&[b, a], &schedule(), &keywords(), false);

    assert_eq!(ab[0].category, RewardCategory::SpecialPartial);
    assert_eq!(ab[1].category, RewardCategory::SpecialExhausted);
    assert_eq!(ab[0].points, 1144);
    assert_eq!(ab[1].points, 180);

    // Same merchants, roles reversed.
    assert_eq!(ba[0].description, "Netflix");
    assert_eq!(ba[0].category, RewardCategory::SpecialPartial);
    assert_eq!(ba[1].category, RewardCategory::SpecialExhausted);
    assert_eq!(ba[0].points, 1180);
    assert_eq!(ba[1].points, 144);

    assert!((ab_sum.total_points - ba_sum.total_points).abs() <= 1);
}

#[test]
fn swapping_order_changes_who_gets_full_rate() {
    let small = txn("Netflix", dec!(5000));
    let large = txn("Steam", dec!(10000));

    let (first, _) = process(&[small.clone(), large.clone()], &schedule(), &keywords(), false);
    let (second, _) = process(&[large, small], &schedule(), &keywords(), false);

    assert_eq!(first[0].category, RewardCategory::SpecialFull);
    assert_eq!(first[1].category, RewardCategory::SpecialPartial);
    assert_eq!(second[0].category, RewardCategory::SpecialFull);
    assert_eq!(second[1].category, RewardCategory::SpecialPartial);
    // 5000 first: 500 + (120 + 560); 10000 first: 1000 + (60 + 120)
    assert_eq!(first[1].points, 680);
    assert_eq!(second[1].points, 180);
}

#[test]
fn rounding_is_half_to_even() {
    // 125 * 0.012 = 1.5 -> 2, 375 * 0.012 = 4.5 -> 4
    let txns = vec![txn("CAFE", dec!(125)), txn("CAFE", dec!(375))];
    let (res, _) = process(&txns, &schedule(), &keywords(), false);
    assert_eq!(res[0].points, 2);
    assert_eq!(res[1].points, 4);
}

#[test]
fn repeated_runs_are_identical() {
    let txns = vec![
        txn("Steam", dec!(8000)),
        txn("年費", dec!(1200)),
        txn("Steam", dec!(8000)),
        txn("Netflix", dec!(390)),
    ];
    let first = process(&txns, &schedule(), &keywords(), false);
    let second = process(&txns, &schedule(), &keywords(), false);
    assert_eq!(first, second);
}

#[test]
fn statements_do_not_share_a_budget() {
    let statement = vec![txn("Steam", dec!(8000)), txn("Steam", dec!(8000))];
    let batch = process_statements(
        &[statement.clone(), statement.clone()],
        &schedule(),
        &keywords(),
        false,
    );
    let single = process(&statement, &schedule(), &keywords(), false);

    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0], single);
    assert_eq!(batch[1], single);
    assert_eq!(batch[1].0[0].category, RewardCategory::SpecialFull);
}

#[test]
fn card_tag_is_carried_through() {
    let txns = vec![txn("Netflix", dec!(390)).with_card_tag("5678")];
    let (res, _) = process(&txns, &schedule(), &keywords(), false);
    assert_eq!(res[0].card_tag.as_deref(), Some("5678"));
}
