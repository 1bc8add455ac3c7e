use comfy_table::{Cell, CellAlignment, Table};
use rebate_core::TransactionResult;

use crate::fmt::{grouped, money, percent};

/// Per-transaction table in statement order. A card column is added when any
/// row carries a card tag.
pub fn format_results(results: &[TransactionResult]) -> String {
    let with_card = results.iter().any(|r| r.card_tag.is_some());

    let mut header = vec!["#", "Description", "Amount", "Rate", "Points", "Note"];
    if with_card {
        header.insert(1, "Card");
    }

    let mut table = Table::new();
    table.set_header(header);

    for (i, r) in results.iter().enumerate() {
        let mut row = vec![Cell::new(i + 1), Cell::new(&r.description)];
        if with_card {
            row.insert(1, Cell::new(r.card_tag.as_deref().unwrap_or("-")));
        }
        row.extend([
            Cell::new(money(r.amount)).set_alignment(CellAlignment::Right),
            Cell::new(percent(r.applied_rate_percent)).set_alignment(CellAlignment::Right),
            Cell::new(grouped(r.points)).set_alignment(CellAlignment::Right),
            Cell::new(r.category.label()),
        ]);
        table.add_row(row);
    }

    table.to_string()
}
