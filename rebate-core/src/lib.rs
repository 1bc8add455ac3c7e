//! rebate-core: rate schedule, keyword matching and the bonus-cap allocator.
//!
//! The allocator is a pure function of its inputs. Ingestion and reporting live
//! in sibling crates.

pub mod allocator;
pub mod error;
pub mod keywords;
pub mod schedule;
pub mod transaction;

pub use allocator::{process, process_statements, remaining_full_rate_spend, round_points};
pub use error::ConfigError;
pub use keywords::{KeywordMatch, KeywordMatcher, KeywordSets};
pub use schedule::RateSchedule;
pub use transaction::{RewardCategory, RunSummary, Transaction, TransactionResult};
