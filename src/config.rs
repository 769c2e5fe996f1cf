//! Client configuration resolved at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle cannot read process env at runtime, so overrides are baked
//! in with `option_env!` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const TOKEN_KEY: &str = "authToken";
pub const USER_DATA_KEY: &str = "userData";

/// Number of days ahead counted as an "upcoming" birthday.
pub const DEFAULT_UPCOMING_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the user record service, without a trailing slash.
    pub api_base_url: String,
    pub upcoming_window_days: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
        }
    }
}

impl AppConfig {
    /// Build config from compile-time environment variables.
    ///
    /// Optional:
    /// - `FRIENDS_API_BASE_URL`: default `http://localhost:3000`
    /// - `FRIENDS_UPCOMING_DAYS`: default 30
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("FRIENDS_API_BASE_URL"), option_env!("FRIENDS_UPCOMING_DAYS"))
    }

    fn from_values(base_url: Option<&str>, upcoming_days: Option<&str>) -> Self {
        let api_base_url = normalize_base_url(base_url.unwrap_or(DEFAULT_API_BASE_URL));
        let upcoming_window_days = upcoming_days
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|days| *days > 0)
            .unwrap_or(DEFAULT_UPCOMING_WINDOW_DAYS);
        Self { api_base_url, upcoming_window_days }
    }

    /// Absolute URL of the users collection.
    pub fn users_url(&self) -> String {
        format!("{}/users", self.api_base_url)
    }
}

fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_owned()
    } else {
        trimmed.to_owned()
    }
}
