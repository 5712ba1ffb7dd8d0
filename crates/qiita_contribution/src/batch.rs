//! Sequential per-user processing with failure isolation.

use crate::aggregate::{AggregateOptions, aggregate_user};
use crate::error::{ContributionError, ContributionResult};
use crate::query::UserQuery;
use crate::report::{ReportLayout, write_report_file};
use crate::score::ContributionRecord;
use qiita_client::{QiitaClient, QiitaError};
use std::path::PathBuf;

/// A user whose record was dropped.
#[derive(Debug)]
pub struct UserFailure {
    pub user_id: String,
    pub error: QiitaError,
}

/// Records in input order plus the users that could not be processed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<ContributionRecord>,
    pub failures: Vec<UserFailure>,
}

/// Everything a run needs once operator input has been validated.
#[derive(Clone, Debug)]
pub struct RunRequest {
    pub queries: Vec<UserQuery>,
    pub options: AggregateOptions,
    pub output: PathBuf,
    pub layout: ReportLayout,
}

async fn process_user<C>(
    client: &C,
    query: &UserQuery,
    options: &AggregateOptions,
) -> Result<ContributionRecord, QiitaError>
where
    C: QiitaClient + ?Sized,
{
    let profile = client.get_user(&query.user_id).await?;
    tracing::info!(
        user_id = %profile.id,
        items = profile.items_count,
        followers = profile.followers_count,
        followees = profile.followees_count,
        "retrieving user"
    );
    let tally = aggregate_user(client, query, options).await?;
    Ok(ContributionRecord::new(query.user_id.clone(), tally).with_profile(&profile))
}

/// Process users one at a time, in order. An API failure drops that user's
/// record, is logged as a warning, and processing moves on.
pub async fn collect_contributions<C>(
    client: &C,
    queries: &[UserQuery],
    options: &AggregateOptions,
) -> BatchOutcome
where
    C: QiitaClient + ?Sized,
{
    let mut outcome = BatchOutcome::default();
    for query in queries {
        match process_user(client, query, options).await {
            Ok(record) => {
                tracing::info!(
                    user_id = %record.user_id,
                    items = record.item_count,
                    lgtms = record.endorsement_total,
                    stocks = record.stock_total,
                    contribution = record.score,
                    "user done"
                );
                outcome.records.push(record);
            }
            Err(error) => {
                tracing::warn!(user_id = %query.user_id, %error, "skipping user");
                outcome.failures.push(UserFailure {
                    user_id: query.user_id.clone(),
                    error,
                });
            }
        }
    }
    outcome
}

/// Collect every user's record and write the report.
///
/// Fails without writing anything when no user could be processed.
pub async fn run<C>(client: &C, request: &RunRequest) -> ContributionResult<BatchOutcome>
where
    C: QiitaClient + ?Sized,
{
    let outcome = collect_contributions(client, &request.queries, &request.options).await;
    if outcome.records.is_empty() {
        return Err(ContributionError::NoContributions);
    }
    write_report_file(&request.output, &outcome.records, request.layout)?;
    tracing::info!(
        path = %request.output.display(),
        rows = outcome.records.len(),
        skipped = outcome.failures.len(),
        "report written"
    );
    Ok(outcome)
}
