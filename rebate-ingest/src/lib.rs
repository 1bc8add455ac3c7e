//! rebate-ingest: statement ingestion (CSV, spreadsheets, extracted text) and card filtering.

pub mod amount;
pub mod card_filter;
pub mod parsers;
pub mod table;
pub mod types;

pub use amount::parse_amount;
pub use card_filter::CardFilter;
pub use table::{ColumnSelection, Table, read_csv, read_xlsx};
pub use types::{SourceFormat, StatementTransaction};

use anyhow::{Context, Result};
use rebate_core::Transaction;
use std::path::Path;
use tracing::info;

/// How to read one statement file.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Forced format; guessed from the extension when `None`.
    pub format: Option<SourceFormat>,
    pub columns: ColumnSelection,
    /// Year used for `MM/DD` rows in statement text.
    pub statement_year: i32,
    pub card: CardFilter,
}

/// Read a statement, apply the card filter and return rows in statement order.
pub fn load_statement(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Vec<StatementTransaction>> {
    let path = path.as_ref();
    let format = match opts.format {
        Some(f) => f,
        None => SourceFormat::from_path(path).with_context(|| {
            format!(
                "cannot tell the format of {} (use .csv, .xlsx/.xls or .txt, or pass --format)",
                path.display()
            )
        })?,
    };

    let rows = match format {
        SourceFormat::Csv => read_csv(path)?.transactions(&opts.columns)?,
        SourceFormat::Xlsx => read_xlsx(path)?.transactions(&opts.columns)?,
        SourceFormat::Text => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            parsers::parse_statement_text(&text, opts.statement_year)?
        }
    };

    let total = rows.len();
    let rows = opts.card.apply(rows);
    info!(
        file = %path.display(),
        ?format,
        rows = total,
        kept = rows.len(),
        "loaded statement"
    );
    Ok(rows)
}

/// [`load_statement`], converted to allocator input.
pub fn load_transactions(path: impl AsRef<Path>, opts: &LoadOptions) -> Result<Vec<Transaction>> {
    Ok(load_statement(path, opts)?
        .into_iter()
        .map(StatementTransaction::into_transaction)
        .collect())
}
