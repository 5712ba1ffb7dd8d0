//! Lazy traversal of a user's paged item listing.
//!
//! [`user_items`] turns repeated [`QiitaClient::list_items`] calls into a single
//! stream of [`Item`]s. A page is only requested once the consumer has drained
//! the previous one, so dropping the stream early stops further network calls.

use crate::config::MAX_PAGE;
use crate::{Item, QiitaClient, QiitaError};
use futures_util::{Stream, TryStreamExt, stream};

/// Stream every item authored by `user_id`, page by page, in the order the
/// API returns them.
///
/// The listing ends at the first page holding fewer than `per_page` entries,
/// an empty page included, or after page [`MAX_PAGE`], the last one the API
/// serves. An error from a page call is yielded once and ends the stream. The
/// stream is not restartable.
pub fn user_items<'a, C>(
    client: &'a C,
    user_id: &'a str,
    per_page: u32,
) -> impl Stream<Item = Result<Item, QiitaError>> + Send + 'a
where
    C: QiitaClient + ?Sized,
{
    stream::try_unfold(Some(1u32), move |next_page| async move {
        let Some(page) = next_page else {
            return Ok(None);
        };
        let items = client.list_items(user_id, page, per_page).await?;
        tracing::debug!(user_id, page, count = items.len(), "fetched item page");
        let next = if items.len() < per_page as usize {
            None
        } else if page >= MAX_PAGE {
            tracing::warn!(user_id, page, per_page, "page limit reached; listing truncated");
            None
        } else {
            Some(page + 1)
        };
        let page_items = stream::iter(items.into_iter().map(Ok::<Item, QiitaError>));
        Ok::<_, QiitaError>(Some((page_items, next)))
    })
    .try_flatten()
}
