//! GitHub data source
//!
//! This module fetches everything the stats card needs from GitHub: the
//! contribution calendar and totals over GraphQL, and star and workflow run
//! counts by walking the paginated REST repository listing.

pub mod client;
pub mod graphql;
pub mod pagination;

// Re-export the main source types
pub use client::*;
pub use pagination::{parse_next_link, Repository};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Response;
use thiserror::Error;

use crate::domain::ContributionCalendar;

/// Errors that can occur while talking to GitHub
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("GraphQL query failed: {0}")]
    GraphQl(String),

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("Token contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("No valid contribution window for year {0}")]
    InvalidWindow(i32),
}

/// Contribution data returned by a single source query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionsData {
    /// Provider-computed total since the account was created
    pub lifetime_total: u64,
    /// Provider-computed total since January 1st of the current year
    pub this_year_total: u64,
    /// Daily calendar for the configured window
    pub calendar: ContributionCalendar,
}

/// Trait defining where stats come from
///
/// `GitHubClient` is the real implementation; tests plug in a fixed source
/// so the whole pipeline can run without the network.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch contribution totals and the daily calendar ending at `now`
    async fn fetch_contributions(&self, now: DateTime<Utc>)
        -> Result<ContributionsData, FetchError>;

    /// Sum of stargazers over every repository the user owns
    async fn fetch_total_stars(&self) -> Result<u64, FetchError>;

    /// Sum of workflow runs over every repository the user owns
    async fn fetch_workflow_runs(&self) -> Result<u64, FetchError>;
}

/// Pass successful responses through, turn anything else into `FetchError::Status`
pub(crate) async fn ensure_success(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    Err(FetchError::Status {
        url,
        status: status.as_u16(),
        body,
    })
}
