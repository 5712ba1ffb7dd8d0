//! Operator input: which users to report on and over which days.

use crate::error::{ContributionError, ContributionResult};
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse a calendar day given as `YYYY-MM-DD` or `YYYYMMDD`.
pub fn parse_day(s: &str) -> ContributionResult<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .map_err(|_| {
            ContributionError::Argument(format!(
                "invalid date {s:?}, expected YYYY-MM-DD or YYYYMMDD"
            ))
        })
}

/// Split a comma-separated user list, trimming blanks and dropping empty entries.
pub fn parse_user_ids(raw: &str) -> ContributionResult<Vec<String>> {
    let ids: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() {
        return Err(ContributionError::Argument("no user ids given".into()));
    }
    Ok(ids)
}

/// Inclusive range of calendar days. A missing bound is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> ContributionResult<Self> {
        if let (Some(s), Some(e)) = (start, end) {
            if s > e {
                return Err(ContributionError::Argument(format!(
                    "start date {s} is after end date {e}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Whether the timestamp falls on a day inside the range. The day is taken
    /// in the offset the timestamp carries.
    pub fn contains(&self, at: &DateTime<FixedOffset>) -> bool {
        let day = at.date_naive();
        self.start.is_none_or(|s| s <= day) && self.end.is_none_or(|e| day <= e)
    }

    /// Whether the timestamp falls on a day before the start bound.
    pub fn is_before_start(&self, at: &DateTime<FixedOffset>) -> bool {
        self.start.is_some_and(|s| at.date_naive() < s)
    }
}

/// One user to report on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserQuery {
    pub user_id: String,
    pub range: DateRange,
}

impl UserQuery {
    pub fn new(user_id: impl Into<String>, range: DateRange) -> Self {
        Self {
            user_id: user_id.into(),
            range,
        }
    }
}
