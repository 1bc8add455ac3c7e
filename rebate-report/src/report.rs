//! Machine-readable output.

use anyhow::{Context, Result};
use rebate_core::{RunSummary, TransactionResult};
use serde::Serialize;

use crate::headline::Headline;

/// Everything computed for one statement file.
#[derive(Debug, Clone, Serialize)]
pub struct StatementReport<'a> {
    pub source: &'a str,
    pub results: &'a [TransactionResult],
    pub summary: &'a RunSummary,
    pub headline: Headline,
}

pub fn to_json(reports: &[StatementReport<'_>]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("serialize report")
}
