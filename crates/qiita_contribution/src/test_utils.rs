//! In-memory `QiitaClient` used by unit tests.
#![cfg(test)]

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use qiita_client::{Item, QiitaClient, QiitaError, UserProfile};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub fn ts(s: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(s).expect("rfc3339 timestamp")
}

pub fn item(id: &str, created_at: &str, likes: u64) -> Item {
    Item {
        id: id.to_string(),
        title: format!("post {id}"),
        created_at: ts(created_at),
        endorsement_count: likes,
        comments_count: 0,
    }
}

pub fn item_with_comments(id: &str, created_at: &str, likes: u64, comments: u64) -> Item {
    Item {
        comments_count: comments,
        ..item(id, created_at, likes)
    }
}

/// Users own item lists which are served in pages of the requested size.
#[derive(Default)]
pub struct FakeClient {
    items: HashMap<String, Vec<Item>>,
    stocks: HashMap<String, u64>,
    failing_stocks: HashSet<String>,
    missing_users: HashSet<String>,
    follows: HashMap<String, (u64, u64)>,
    page_calls: Mutex<Vec<(String, u32)>>,
    stock_calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn with_user(mut self, user_id: &str, items: Vec<(Item, u64)>) -> Self {
        let mut list = Vec::with_capacity(items.len());
        for (item, stocks) in items {
            self.stocks.insert(item.id.clone(), stocks);
            list.push(item);
        }
        self.items.insert(user_id.to_string(), list);
        self
    }

    pub fn failing_stock_lookup(mut self, item_id: &str) -> Self {
        self.failing_stocks.insert(item_id.to_string());
        self
    }

    pub fn with_follows(mut self, user_id: &str, followees: u64, followers: u64) -> Self {
        self.follows
            .insert(user_id.to_string(), (followees, followers));
        self
    }

    pub fn missing_user(mut self, user_id: &str) -> Self {
        self.missing_users.insert(user_id.to_string());
        self
    }

    pub fn stock_calls(&self) -> Vec<String> {
        self.stock_calls.lock().expect("lock").clone()
    }

    pub fn page_calls(&self) -> Vec<(String, u32)> {
        self.page_calls.lock().expect("lock").clone()
    }
}

#[async_trait]
impl QiitaClient for FakeClient {
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, QiitaError> {
        if self.missing_users.contains(user_id) {
            return Err(QiitaError::from_status(404, "Not found".into()));
        }
        let (followees, followers) = self.follows.get(user_id).copied().unwrap_or_default();
        Ok(UserProfile {
            id: user_id.to_string(),
            followees_count: followees,
            followers_count: followers,
            items_count: self.items.get(user_id).map_or(0, |v| v.len() as u64),
        })
    }

    async fn list_items(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Item>, QiitaError> {
        self.page_calls
            .lock()
            .expect("lock")
            .push((user_id.to_string(), page));
        let all = self.items.get(user_id).cloned().unwrap_or_default();
        let skip = (page as usize - 1) * per_page as usize;
        Ok(all.into_iter().skip(skip).take(per_page as usize).collect())
    }

    async fn get_stock_count(&self, item_id: &str) -> Result<u64, QiitaError> {
        self.stock_calls
            .lock()
            .expect("lock")
            .push(item_id.to_string());
        if self.failing_stocks.contains(item_id) {
            return Err(QiitaError::from_status(500, "boom".into()));
        }
        Ok(self.stocks.get(item_id).copied().unwrap_or(0))
    }
}
