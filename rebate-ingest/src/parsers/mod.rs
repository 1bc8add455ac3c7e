pub mod statement_text;

pub use statement_text::{parse_statement_date, parse_statement_text};
