//! Runtime configuration for a single stats run
//!
//! The configuration is built once in `main` and passed explicitly to the
//! GitHub client and the generator. The domain layer never sees it.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_OUTPUT_PATH: &str = "github-stats.svg";

/// Days of contribution calendar to fetch. GitHub refuses windows longer
/// than one year.
pub const DEFAULT_CALENDAR_DAYS: i64 = 365;
pub const MAX_CALENDAR_DAYS: i64 = 365;

/// Errors raised when the configuration is unusable
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GitHub username must not be empty")]
    MissingUsername,

    #[error("GitHub token must not be empty (set GH_TOKEN or pass --token)")]
    MissingToken,

    #[error("Calendar window must be 1-{max} days, got {days}")]
    InvalidCalendarWindow { days: i64, max: i64 },
}

/// Everything needed to fetch, render and write the stats card
#[derive(Clone)]
pub struct Config {
    /// GitHub login whose stats are collected
    pub username: String,
    /// Personal access token sent as a bearer token
    pub token: String,
    /// Base URL of the REST API
    pub api_base_url: String,
    /// GraphQL endpoint
    pub graphql_url: String,
    /// Custom SVG template; the built-in card is used when absent
    pub template_path: Option<PathBuf>,
    /// Where the rendered SVG is written
    pub output_path: PathBuf,
    /// Length of the contribution calendar window in days
    pub calendar_days: i64,
}

impl Config {
    /// Create a configuration with default endpoints and output path
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            api_base_url: DEFAULT_API_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            template_path: None,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            calendar_days: DEFAULT_CALENDAR_DAYS,
        }
    }

    /// Check that the configuration can be used for a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::MissingUsername);
        }

        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if !(1..=MAX_CALENDAR_DAYS).contains(&self.calendar_days) {
            return Err(ConfigError::InvalidCalendarWindow {
                days: self.calendar_days,
                max: MAX_CALENDAR_DAYS,
            });
        }

        Ok(())
    }

    /// REST base URL without a trailing slash
    pub fn api_base(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

// Keep the token out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("graphql_url", &self.graphql_url)
            .field("template_path", &self.template_path)
            .field("output_path", &self.output_path)
            .field("calendar_days", &self.calendar_days)
            .finish()
    }
}
