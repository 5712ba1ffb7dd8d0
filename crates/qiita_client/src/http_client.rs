//! HTTP client implementation for the Qiita API v2.
//!
//! This module provides a reqwest-based implementation of the [`QiitaClient`](crate::QiitaClient) trait.

use crate::config::MAX_PAGE;
use crate::{Item, QiitaClient, QiitaError, UserProfile};
use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

/// Header Qiita sets on paginated responses with the size of the whole collection.
const TOTAL_COUNT_HEADER: &str = "Total-Count";
const STOCKERS_PER_PAGE: u32 = crate::config::MAX_PER_PAGE;

/// Client for the Qiita API using reqwest.
#[derive(Clone, Debug)]
pub struct ReqwestQiitaClient {
    base_url: Url,
    access_token: SecretString,
    client: reqwest::Client,
}

impl ReqwestQiitaClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - Site root, e.g. "https://qiita.com". `/api/v2` is appended per request.
    /// * `access_token` - Personal access token sent as a bearer credential
    ///
    /// Fails with [`QiitaError::Config`] when `base_url` is not an absolute
    /// http(s)-style URL that can carry a path.
    pub fn new(base_url: &str, access_token: SecretString) -> Result<Self, QiitaError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| QiitaError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(QiitaError::Config(format!(
                "base URL {base_url} cannot carry a path"
            )));
        }
        let client = reqwest::Client::builder()
            .user_agent(concat!("qiita_client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url,
            access_token,
            client,
        })
    }

    pub fn from_config(cfg: &crate::config::Config) -> Result<Self, QiitaError> {
        Self::new(&cfg.base_url, cfg.access_token.clone())
    }

    /// `{base}/api/v2/{segments...}` with every segment percent-encoded, so an
    /// id containing `/`, `?` or `#` stays a single path segment.
    fn api_url(&self, segments: &[&str]) -> Result<Url, QiitaError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                QiitaError::Config(format!("base URL {} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "v2"])
            .extend(segments);
        Ok(url)
    }

    /// Build an authenticated GET request.
    fn get_request(&self, url: Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .bearer_auth(self.access_token.expose_secret())
    }

    /// Send a request, turning non-success statuses into errors.
    async fn send(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, QiitaError> {
        metrics::counter!("qiita_api_requests_total", "endpoint" => endpoint).increment(1);
        let resp = request.send().await?;
        if !resp.status().is_success() {
            return Err(self.error_from_response(resp).await);
        }
        Ok(resp)
    }

    /// Execute a request and expect a JSON response.
    async fn execute_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, QiitaError> {
        let resp = self.send(endpoint, request).await?;
        Ok(resp.json::<T>().await?)
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> QiitaError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        metrics::counter!("qiita_api_errors_total", "status" => status.to_string()).increment(1);
        QiitaError::from_status(status, body_snippet)
    }

    fn page_query(page: u32, per_page: u32) -> [(&'static str, String); 2] {
        [("page", page.to_string()), ("per_page", per_page.to_string())]
    }
}

fn total_count(resp: &reqwest::Response) -> Option<u64> {
    resp.headers()
        .get(TOTAL_COUNT_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

#[async_trait]
impl QiitaClient for ReqwestQiitaClient {
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, QiitaError> {
        let url = self.api_url(&["users", user_id])?;
        self.execute_json("users", self.get_request(url)).await
    }

    async fn list_items(
        &self,
        user_id: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Item>, QiitaError> {
        let url = self.api_url(&["users", user_id, "items"])?;
        let req = self
            .get_request(url)
            .query(&Self::page_query(page, per_page));
        self.execute_json("user_items", req).await
    }

    async fn get_stock_count(&self, item_id: &str) -> Result<u64, QiitaError> {
        let url = self.api_url(&["items", item_id, "stockers"])?;
        let mut page = 1u32;
        let mut counted = 0u64;
        loop {
            let req = self
                .get_request(url.clone())
                .query(&Self::page_query(page, STOCKERS_PER_PAGE));
            let resp = self.send("item_stockers", req).await?;
            if page == 1 {
                if let Some(total) = total_count(&resp) {
                    return Ok(total);
                }
            }
            // Only the length matters; stocker objects are not inspected.
            let stockers: Vec<serde_json::Value> = resp.json().await?;
            counted += stockers.len() as u64;
            if stockers.len() < STOCKERS_PER_PAGE as usize {
                return Ok(counted);
            }
            if page >= MAX_PAGE {
                tracing::warn!(item_id, counted, "stocker page limit reached; count truncated");
                return Ok(counted);
            }
            page += 1;
        }
    }
}
