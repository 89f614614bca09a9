//! GitHub data as seen by the domain.
//!
//! - `records` - typed user and repository records
//! - `languages` - language frequency aggregation

mod languages;
mod records;

pub use languages::{aggregate_languages, LanguageCounts};
pub use records::{RepoRecord, UserRecord};
