//! Tabular statements (CSV exports, spreadsheets) with explicit column selection.

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

use crate::amount::parse_amount;
use crate::types::StatementTransaction;

/// Header names tried first when no description column is chosen.
pub const DEFAULT_DESCRIPTION_COLUMN: &str = "摘要";
/// Header names tried first when no amount column is chosen.
pub const DEFAULT_AMOUNT_COLUMN: &str = "金額";

/// A header row plus string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Which columns hold the description, amount and (optionally) card tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSelection {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub card: Option<String>,
}

impl Table {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name.trim())
    }

    /// Resolve a selection to column indices.
    ///
    /// Unset description falls back to `摘要` or the first column; unset amount
    /// to `金額` or the second column.
    pub fn resolve(&self, selection: &ColumnSelection) -> Result<(usize, usize, Option<usize>)> {
        if self.headers.is_empty() {
            bail!("statement has no header row");
        }

        let pick = |chosen: &Option<String>, default_name: &str, default_idx: usize| {
            match chosen {
                Some(name) => self
                    .column_index(name)
                    .with_context(|| format!("column `{}` not found in {:?}", name, self.headers)),
                None => Ok(self
                    .column_index(default_name)
                    .unwrap_or(default_idx.min(self.headers.len() - 1))),
            }
        };

        let desc = pick(&selection.description, DEFAULT_DESCRIPTION_COLUMN, 0)?;
        let amount = pick(&selection.amount, DEFAULT_AMOUNT_COLUMN, 1)?;
        let card = match &selection.card {
            Some(name) => Some(
                self.column_index(name)
                    .with_context(|| format!("card column `{}` not found", name))?,
            ),
            None => None,
        };

        debug!(desc, amount, ?card, "resolved statement columns");
        Ok((desc, amount, card))
    }

    /// Convert rows to transactions, keeping row order.
    ///
    /// A row whose amount cannot be parsed is kept with a zero amount (and so
    /// skipped by the allocator); a warning is logged for it.
    pub fn transactions(&self, selection: &ColumnSelection) -> Result<Vec<StatementTransaction>> {
        let (desc_idx, amount_idx, card_idx) = self.resolve(selection)?;

        let mut out = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let cell = |idx: usize| row.get(idx).map(|s| s.trim()).unwrap_or("");

            let raw_amount = cell(amount_idx);
            let amount = match parse_amount(raw_amount) {
                Some(a) => a,
                None => {
                    warn!(row = i + 2, raw = raw_amount, "unparseable amount, treating as 0");
                    Decimal::ZERO
                }
            };

            let card_tag = card_idx
                .map(cell)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());

            out.push(StatementTransaction {
                date: None,
                description: cell(desc_idx).to_string(),
                amount,
                card_tag,
            });
        }

        Ok(out)
    }
}

/// Read a CSV statement; the first record is the header.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    read_csv_from(file).with_context(|| format!("reading {}", path.as_ref().display()))
}

/// Read CSV from any reader. A UTF-8 byte-order mark on the header is dropped.
pub fn read_csv_from<R: Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(Table { headers, rows })
}

/// Read the first worksheet of a workbook.
#[cfg(feature = "xlsx")]
pub fn read_xlsx(path: impl AsRef<Path>) -> Result<Table> {
    use calamine::{Data, Reader};

    let path = path.as_ref();
    let mut workbook = calamine::open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .with_context(|| format!("{} has no worksheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("reading sheet `{}`", sheet))?;

    let cell_text = |c: &Data| match c {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    };

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(r) => r.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => Vec::new(),
    };
    let rows = rows
        .map(|r| r.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
        .collect();

    Ok(Table { headers, rows })
}

#[cfg(not(feature = "xlsx"))]
pub fn read_xlsx(path: impl AsRef<Path>) -> Result<Table> {
    bail!(
        "{}: spreadsheet support not compiled in (enable the `xlsx` feature)",
        path.as_ref().display()
    )
}
