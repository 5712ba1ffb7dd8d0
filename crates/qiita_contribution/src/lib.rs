//! Simplified Qiita Contribution report.
//!
//! For each requested user the items they authored are listed page by page,
//! filtered to an inclusive day range, and their LGTM and stock counts are
//! folded into `items + lgtms + 0.5 * stocks`. One CSV row is written per
//! user that could be processed.

pub mod aggregate;
pub mod batch;
pub mod cli;
pub mod error;
pub mod query;
pub mod report;
pub mod score;

mod test_utils;

pub use aggregate::{AggregateOptions, Tally, aggregate_user};
pub use batch::{BatchOutcome, RunRequest, UserFailure, collect_contributions, run};
pub use error::{ContributionError, ContributionResult};
pub use query::{DateRange, UserQuery};
pub use report::{DEFAULT_OUTPUT_PATH, ReportLayout, write_report, write_report_file};
pub use score::{ContributionRecord, contribution_score};
