use crate::QiitaError;
use secrecy::SecretString;

pub const DEFAULT_BASE_URL: &str = "https://qiita.com";
/// Largest page size the Qiita API accepts.
pub const MAX_PER_PAGE: u32 = 100;
pub const DEFAULT_PER_PAGE: u32 = MAX_PER_PAGE;
/// Highest `page` number the Qiita API serves for paged listings.
pub const MAX_PAGE: u32 = 100;

#[derive(Clone, Debug)]
pub struct Config {
    pub access_token: SecretString,
    pub base_url: String,
    pub per_page: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, QiitaError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, QiitaError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let token = get("QIITA_ACCESS_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| QiitaError::Config("QIITA_ACCESS_TOKEN missing".into()))?;
        let base_url = get("QIITA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let per_page = match get("QIITA_PER_PAGE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| QiitaError::Config(format!("QIITA_PER_PAGE: {e}")))?,
            None => DEFAULT_PER_PAGE,
        };
        Ok(Self {
            access_token: SecretString::new(token.into()),
            base_url,
            per_page: validate_per_page(per_page)?,
        })
    }
}

/// Page sizes outside `1..=100` are rejected by the API, and zero would never
/// produce a short page.
pub fn validate_per_page(per_page: u32) -> Result<u32, QiitaError> {
    if (1..=MAX_PER_PAGE).contains(&per_page) {
        Ok(per_page)
    } else {
        Err(QiitaError::Config(format!(
            "per_page must be between 1 and {MAX_PER_PAGE}, got {per_page}"
        )))
    }
}
