use chrono::NaiveDate;
use rebate_core::Transaction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a statement file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceFormat {
    /// Comma-separated rows with a header line.
    Csv,
    /// Spreadsheet workbook, first sheet, first row as header.
    Xlsx,
    /// Text already extracted from a statement document.
    Text,
}

impl SourceFormat {
    /// Guess from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::Csv),
            "xlsx" | "xls" | "xlsm" | "ods" => Some(SourceFormat::Xlsx),
            "txt" | "text" => Some(SourceFormat::Text),
            _ => None,
        }
    }
}

/// Normalized output of statement readers (issuer-agnostic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementTransaction {
    /// Transaction date, when the source carries one.
    pub date: Option<NaiveDate>,
    pub description: String,
    /// Positive number means charge/spend. Unparseable amounts are stored as zero.
    pub amount: Decimal,
    /// Last digits (or masked number) of the issuing card.
    pub card_tag: Option<String>,
}

impl StatementTransaction {
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            description: self.description,
            amount: self.amount,
            card_tag: self.card_tag,
        }
    }
}
