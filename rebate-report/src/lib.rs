//! rebate-report: text tables, headline metrics and JSON for rebate runs.

pub mod fmt;
pub mod headline;
pub mod report;
pub mod table;

pub use headline::Headline;
pub use report::{StatementReport, to_json};
pub use table::format_results;
