use std::env;

use crate::domain::EntryId;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8787";

/// Environment variables consulted, in order, when no base URL is configured.
pub const BASE_URL_ENV_VARS: [&str; 2] = ["TAGTIME_API_HOST", "API_HOST"];

/// Join `path` onto `base`, tolerating a trailing slash on the base and a
/// missing leading slash on the path.
pub fn build_api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// Resolved backend URLs for tags and time entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoints {
    base_url: String,
    tags: String,
    time_entries: String,
}

impl ApiEndpoints {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            tags: build_api_url(&base_url, "/api/tags"),
            time_entries: build_api_url(&base_url, "/api/time-entries"),
            base_url,
        }
    }

    /// Resolve the base URL from an explicit value, then the environment,
    /// then [`DEFAULT_BASE_URL`].
    pub fn resolve(configured: Option<&str>) -> Self {
        let from_env = || {
            BASE_URL_ENV_VARS
                .iter()
                .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
        };
        let base_url = configured
            .map(str::to_string)
            .filter(|value| !value.trim().is_empty())
            .or_else(from_env)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self::new(base_url.trim())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tags(&self) -> &str {
        &self.tags
    }

    pub fn time_entries(&self) -> &str {
        &self.time_entries
    }

    pub fn time_entry(&self, id: &EntryId) -> String {
        format!(
            "{}/{}",
            self.time_entries,
            urlencoding::encode(id.as_str())
        )
    }
}
