//! reqwest-backed implementation of the stats source
//!
//! Every request is awaited before the next one is sent. There is no retry
//! or rate limit handling; the first failure ends the run.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::github::graphql::{
    self, CalendarUser, CalendarVariables, GraphQlRequest, GraphQlResponse, WindowUser,
    WindowVariables,
};
use crate::github::pagination::{self, Repository};
use crate::github::{ensure_success, ContributionsData, FetchError, StatsSource};

/// GitHub rejects requests without a User-Agent
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Response of `GET /repos/{owner}/{repo}/actions/runs`
#[derive(Debug, Deserialize)]
struct WorkflowRuns {
    #[serde(default)]
    total_count: u64,
}

/// GitHub API client for one user
pub struct GitHubClient {
    http: Client,
    username: String,
    api_base_url: String,
    graphql_url: String,
    calendar_days: i64,
}

impl GitHubClient {
    /// Create a client from the run configuration
    ///
    /// The bearer token and GitHub media type are installed as default
    /// headers so every request carries them.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token.trim()))
            .map_err(|_| FetchError::InvalidToken)?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(header::ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            username: config.username.clone(),
            api_base_url: config.api_base().to_string(),
            graphql_url: config.graphql_url.clone(),
            calendar_days: config.calendar_days,
        })
    }

    /// First page of the user's repository listing
    fn repos_url(&self) -> String {
        format!("{}/users/{}/repos?per_page=100", self.api_base_url, self.username)
    }

    fn workflow_runs_url(&self, repo: &Repository) -> String {
        format!(
            "{}/repos/{}/actions/runs?per_page=1",
            self.api_base_url, repo.full_name
        )
    }

    /// Post a GraphQL query and unwrap the `user` object of the response
    async fn query_user<V, U>(&self, query: &str, variables: V) -> Result<U, FetchError>
    where
        V: Serialize + Send,
        U: DeserializeOwned,
    {
        let request = GraphQlRequest { query, variables };
        let response = self.http.post(&self.graphql_url).json(&request).send().await?;
        let body: GraphQlResponse<U> = ensure_success(response).await?.json().await?;

        body.into_user(&self.username)
    }

    /// Sum the provider's totals over one window per year of account history
    async fn lifetime_total(
        &self,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, FetchError> {
        let mut total = 0u64;

        for (from, to) in graphql::yearly_windows(created_at, now)? {
            let variables = WindowVariables {
                username: &self.username,
                from,
                to,
            };
            let user: WindowUser = self
                .query_user(graphql::WINDOW_TOTAL_QUERY, variables)
                .await?;
            let window_total = user.contributions_collection.total_contributions;

            debug!("Contributions {} .. {}: {}", from, to, window_total);
            total += window_total;
        }

        Ok(total)
    }

    /// Workflow runs for one repository; a non-success status counts as zero
    async fn workflow_run_count(&self, repo: &Repository) -> Result<u64, FetchError> {
        let response = self.http.get(self.workflow_runs_url(repo)).send().await?;

        if !response.status().is_success() {
            warn!(
                "Skipping workflow runs for {}: HTTP {}",
                repo.full_name,
                response.status()
            );
            return Ok(0);
        }

        let runs: WorkflowRuns = response.json().await?;
        debug!("{} has {} workflow runs", repo.full_name, runs.total_count);

        Ok(runs.total_count)
    }
}

#[async_trait]
impl StatsSource for GitHubClient {
    async fn fetch_contributions(
        &self,
        now: DateTime<Utc>,
    ) -> Result<ContributionsData, FetchError> {
        info!("Fetching contribution calendar for {}", self.username);

        let variables = CalendarVariables::ending_at(&self.username, now, self.calendar_days)?;
        let user: CalendarUser = self.query_user(graphql::CALENDAR_QUERY, variables).await?;

        let lifetime_total = self.lifetime_total(user.created_at, now).await?;

        Ok(ContributionsData {
            lifetime_total,
            this_year_total: user.contributions_this_year.total_contributions,
            calendar: user.contributions_collection.contribution_calendar,
        })
    }

    async fn fetch_total_stars(&self) -> Result<u64, FetchError> {
        info!("Counting stars across repositories of {}", self.username);

        pagination::repositories(&self.http, self.repos_url())
            .try_fold(0u64, |total, repo| async move { Ok(total + repo.stargazers_count) })
            .await
    }

    async fn fetch_workflow_runs(&self) -> Result<u64, FetchError> {
        info!("Counting workflow runs across repositories of {}", self.username);

        pagination::repositories(&self.http, self.repos_url())
            .try_fold(0u64, |total, repo| async move {
                self.workflow_run_count(&repo)
                    .await
                    .map(|runs| total + runs)
            })
            .await
    }
}
