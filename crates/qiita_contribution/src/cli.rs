//! Command-line arguments and their validation into a [`RunRequest`].

use crate::aggregate::AggregateOptions;
use crate::batch::RunRequest;
use crate::error::{ContributionError, ContributionResult};
use crate::query::{DateRange, UserQuery, parse_day, parse_user_ids};
use crate::report::{DEFAULT_OUTPUT_PATH, ReportLayout};
use clap::Parser;
use qiita_client::config::Config;
use std::path::PathBuf;

/// `qiita_contribution` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "qiita_contribution",
    about = "Retrieve information via Qiita API v2 and calculate simplified Qiita Contribution",
    version
)]
pub struct CliArgs {
    /// Qiita personal access token. Falls back to `QIITA_ACCESS_TOKEN`.
    #[arg(short, long, value_name = "token")]
    pub token: Option<String>,
    /// Qiita user ids, comma separated.
    #[arg(short, long)]
    pub users: String,
    /// First day to count items from, inclusive (YYYY-MM-DD or YYYYMMDD). Unlimited when omitted.
    #[arg(short, long)]
    pub start: Option<String>,
    /// Last day to count items up to, inclusive (YYYY-MM-DD or YYYYMMDD). Unlimited when omitted.
    #[arg(short, long)]
    pub end: Option<String>,
    /// Output CSV path.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,
    /// Page size used when listing items (1-100). Falls back to `QIITA_PER_PAGE`, then 100.
    #[arg(long)]
    pub per_page: Option<u32>,
    /// API site root. Falls back to `QIITA_BASE_URL`, then https://qiita.com.
    #[arg(long, value_name = "url")]
    pub base_url: Option<String>,
    /// Add a rank column and sort rows by contribution.
    #[arg(long)]
    pub rank: bool,
    /// Stop listing a user's items at the first one older than --start.
    #[arg(long)]
    pub assume_newest_first: bool,
}

impl CliArgs {
    /// Validate everything offline against the process environment. Any
    /// failure here happens before the first network call.
    pub fn into_parts(self) -> ContributionResult<(Config, RunRequest)> {
        self.into_parts_with(|k| std::env::var(k).ok())
    }

    /// Like [`CliArgs::into_parts`], reading environment values through `env`.
    /// Flags given on the command line take precedence over the environment.
    pub fn into_parts_with<F>(self, mut env: F) -> ContributionResult<(Config, RunRequest)>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let flags = [
            ("QIITA_ACCESS_TOKEN", self.token),
            ("QIITA_BASE_URL", self.base_url),
            ("QIITA_PER_PAGE", self.per_page.map(|p| p.to_string())),
        ];
        let config = Config::from_env_with(|key| {
            flags
                .iter()
                .find(|(name, _)| *name == key)
                .and_then(|(_, value)| value.clone())
                .or_else(|| env(key))
        })
        .map_err(|e| ContributionError::Argument(e.to_string()))?;

        let user_ids = parse_user_ids(&self.users)?;
        let start = self.start.as_deref().map(parse_day).transpose()?;
        let end = self.end.as_deref().map(parse_day).transpose()?;
        let range = DateRange::new(start, end)?;

        let request = RunRequest {
            queries: user_ids
                .into_iter()
                .map(|id| UserQuery::new(id, range))
                .collect(),
            options: AggregateOptions {
                per_page: config.per_page,
                assume_newest_first: self.assume_newest_first,
            },
            output: self.output,
            layout: if self.rank {
                ReportLayout::Ranked
            } else {
                ReportLayout::Plain
            },
        };
        Ok((config, request))
    }
}
