//! Folds a user's items and their stock counts into a [`Tally`].

use crate::query::UserQuery;
use futures_util::TryStreamExt;
use qiita_client::config::DEFAULT_PER_PAGE;
use qiita_client::pagination::user_items;
use qiita_client::{QiitaClient, QiitaError};

/// Running totals for one user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub item_count: u64,
    pub endorsement_total: u64,
    pub stock_total: u64,
    /// Not part of the score; carried to the ranked report.
    pub comments_total: u64,
}

impl Tally {
    fn add(&mut self, endorsements: u64, stocks: u64, comments: u64) {
        self.item_count += 1;
        self.endorsement_total += endorsements;
        self.stock_total += stocks;
        self.comments_total += comments;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AggregateOptions {
    pub per_page: u32,
    /// Stop paging at the first item dated before the start bound. Only sound
    /// when the listing really is newest-first.
    pub assume_newest_first: bool,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            assume_newest_first: false,
        }
    }
}

/// Walk every item of `query.user_id`, count those created inside the range and
/// look up their stock counts.
///
/// Out-of-range items never cost a stock lookup. Any failing call aborts the
/// whole user; no partial tally is returned.
pub async fn aggregate_user<C>(
    client: &C,
    query: &UserQuery,
    options: &AggregateOptions,
) -> Result<Tally, QiitaError>
where
    C: QiitaClient + ?Sized,
{
    let mut tally = Tally::default();
    let items = user_items(client, &query.user_id, options.per_page);
    futures_util::pin_mut!(items);

    while let Some(item) = items.try_next().await? {
        if !query.range.contains(&item.created_at) {
            if options.assume_newest_first && query.range.is_before_start(&item.created_at) {
                tracing::debug!(user_id = %query.user_id, item_id = %item.id, "reached items older than start; stopping");
                break;
            }
            continue;
        }
        let stocks = client.get_stock_count(&item.id).await?;
        tracing::debug!(
            user_id = %query.user_id,
            item_id = %item.id,
            likes = item.endorsement_count,
            stocks,
            "counted item"
        );
        tally.add(item.endorsement_count, stocks, item.comments_count);
    }
    Ok(tally)
}
