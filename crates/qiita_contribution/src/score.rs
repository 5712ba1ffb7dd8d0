//! Simplified Qiita contribution score.

use crate::aggregate::Tally;
use qiita_client::UserProfile;

/// Weight of one stock relative to one item or one LGTM.
pub const STOCK_WEIGHT: f64 = 0.5;

/// `items + lgtms + 0.5 * stocks`.
///
/// Every term is a multiple of one half, so the result is exact for any count
/// below 2^52.
pub fn contribution_score(item_count: u64, endorsement_total: u64, stock_total: u64) -> f64 {
    item_count as f64 + endorsement_total as f64 + STOCK_WEIGHT * stock_total as f64
}

/// One reported row.
#[derive(Clone, Debug, PartialEq)]
pub struct ContributionRecord {
    pub user_id: String,
    pub item_count: u64,
    pub endorsement_total: u64,
    pub stock_total: u64,
    pub score: f64,
    pub comments_total: u64,
    pub followees: u64,
    pub followers: u64,
}

impl ContributionRecord {
    pub fn new(user_id: impl Into<String>, tally: Tally) -> Self {
        Self {
            user_id: user_id.into(),
            item_count: tally.item_count,
            endorsement_total: tally.endorsement_total,
            stock_total: tally.stock_total,
            score: contribution_score(tally.item_count, tally.endorsement_total, tally.stock_total),
            comments_total: tally.comments_total,
            followees: 0,
            followers: 0,
        }
    }

    /// Attach the follow counts of the user's profile.
    pub fn with_profile(mut self, profile: &UserProfile) -> Self {
        self.followees = profile.followees_count;
        self.followers = profile.followers_count;
        self
    }
}
