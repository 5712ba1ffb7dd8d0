//! Minimal `QiitaClient` trait over the Qiita API v2 and its reqwest implementation.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use thiserror::Error;

pub mod config;
pub mod http_client;
pub mod pagination;

#[derive(Debug, Error)]
pub enum QiitaError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },
    #[error("not found ({status}): {body}")]
    NotFound { status: u16, body: String },
    #[error("rate limited ({status}): {body}")]
    RateLimited { status: u16, body: String },
    #[error("server error ({status}): {body}")]
    Server { status: u16, body: String },
    #[error("unexpected status ({status}): {body}")]
    Unexpected { status: u16, body: String },
    #[error("configuration error: {0}")]
    Config(String),
}

impl QiitaError {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::Auth { status, body },
            404 => Self::NotFound { status, body },
            429 => Self::RateLimited { status, body },
            500..=599 => Self::Server { status, body },
            _ => Self::Unexpected { status, body },
        }
    }

    /// HTTP status carried by the error, if the remote side answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. }
            | Self::NotFound { status, .. }
            | Self::RateLimited { status, .. }
            | Self::Server { status, .. }
            | Self::Unexpected { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Config(_) => None,
        }
    }
}

/// Public counters of a Qiita user.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub followees_count: u64,
    #[serde(default)]
    pub followers_count: u64,
    #[serde(default)]
    pub items_count: u64,
}

/// A post authored by a user, as returned by the item listing.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub created_at: DateTime<FixedOffset>,
    /// LGTM count. The listing reports it inline.
    #[serde(rename = "likes_count")]
    pub endorsement_count: u64,
    #[serde(default)]
    pub comments_count: u64,
}

#[async_trait]
pub trait QiitaClient: Send + Sync + 'static {
    /// Resolve a user by id.
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, QiitaError>;

    /// Fetch one page of the items authored by `user_id`. Pages start at 1.
    async fn list_items(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Item>, QiitaError>;

    /// Number of users who stocked the item. Not part of the item listing.
    async fn get_stock_count(&self, item_id: &str) -> Result<u64, QiitaError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn item_deserializes_likes_as_endorsements() {
        let payload = json!({
            "id": "c686397e4a0f4f11683d",
            "title": "Example title",
            "created_at": "2000-01-01T00:00:00+09:00",
            "likes_count": 7,
            "comments_count": 2,
            "tags": [{"name": "Rust"}]
        });
        let item: Item = serde_json::from_value(payload).expect("deserialize item");
        assert_eq!(item.endorsement_count, 7);
        assert_eq!(item.comments_count, 2);
        assert_eq!(item.created_at.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn item_without_likes_count_is_rejected() {
        let payload = json!({"id": "x", "created_at": "2000-01-01T00:00:00+00:00"});
        let res: Result<Item, _> = serde_json::from_value(payload);
        assert!(res.is_err());
    }

    #[test]
    fn from_status_classifies_codes() {
        assert!(matches!(
            QiitaError::from_status(401, String::new()),
            QiitaError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            QiitaError::from_status(403, String::new()),
            QiitaError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            QiitaError::from_status(429, String::new()),
            QiitaError::RateLimited { .. }
        ));
        assert!(matches!(
            QiitaError::from_status(503, String::new()),
            QiitaError::Server { .. }
        ));
        assert!(matches!(
            QiitaError::from_status(418, String::new()),
            QiitaError::Unexpected { .. }
        ));
        assert_eq!(QiitaError::from_status(404, "gone".into()).status(), Some(404));
        assert_eq!(QiitaError::Config("x".into()).status(), None);
    }
}
