//! Public library interface for the GitHub stats card generator
//!
//! This module exports the generator that runs the whole pipeline
//! (fetch, analyze, render, write) and the public types used by the binary
//! and by tests.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

// Internal modules
mod analytics;
mod config;
mod domain;
mod github;
mod render;

// Re-export public modules and types
pub use analytics::{GitHubStats, CARD_DATE_FORMAT, NO_DATE};
pub use config::{
    Config, ConfigError, DEFAULT_API_URL, DEFAULT_CALENDAR_DAYS, DEFAULT_GRAPHQL_URL,
    DEFAULT_OUTPUT_PATH, MAX_CALENDAR_DAYS,
};
pub use domain::*;
pub use github::{
    parse_next_link, ContributionsData, FetchError, GitHubClient, Repository, StatsSource,
};
pub use render::{escape_xml, RenderError, SvgTemplate, TemplateValues, DEFAULT_TEMPLATE};

/// Errors that can occur during a generator run
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GitHub API error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Contribution data error: {0}")]
    Domain(#[from] DomainError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Failed to write {}: {}", .path.display(), .source)]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Runs one fetch, analyze, render and write pass
///
/// Steps run strictly in order and the first error aborts the run, so a
/// partially rendered card is never written.
pub struct StatsGenerator<S> {
    source: S,
    username: String,
    template: SvgTemplate,
    output_path: PathBuf,
}

impl StatsGenerator<GitHubClient> {
    /// Create a generator backed by the GitHub API
    ///
    /// Validates the configuration and loads the template up front.
    pub async fn from_config(config: &Config) -> Result<Self, GeneratorError> {
        config.validate()?;
        info!("Initializing stats generator: {:?}", config);

        let client = GitHubClient::new(config)?;
        let template = match &config.template_path {
            Some(path) => SvgTemplate::load(path).await?,
            None => SvgTemplate::builtin(),
        };

        Ok(Self::new(
            client,
            config.username.clone(),
            template,
            config.output_path.clone(),
        ))
    }
}

impl<S: StatsSource> StatsGenerator<S> {
    pub fn new(
        source: S,
        username: impl Into<String>,
        template: SvgTemplate,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source,
            username: username.into(),
            template,
            output_path: output_path.into(),
        }
    }

    /// Fetch everything and compute the card values
    pub async fn collect(&self, now: DateTime<Utc>) -> Result<GitHubStats, GeneratorError> {
        let contributions = self.source.fetch_contributions(now).await?;
        let total_stars = self.source.fetch_total_stars().await?;
        let total_workflow_runs = self.source.fetch_workflow_runs().await?;

        let stats = GitHubStats::assemble(
            self.username.as_str(),
            &contributions,
            total_stars,
            total_workflow_runs,
        )?;

        Ok(stats)
    }

    /// Collect stats and render them into the template
    pub async fn render(&self, now: DateTime<Utc>) -> Result<String, GeneratorError> {
        let stats = self.collect(now).await?;
        Ok(self.template.render(&stats.template_values())?)
    }

    /// Collect, render and write the card, returning the output path
    pub async fn generate(&self, now: DateTime<Utc>) -> Result<&Path, GeneratorError> {
        let svg = self.render(now).await?;

        tokio::fs::write(&self.output_path, svg)
            .await
            .map_err(|source| GeneratorError::Write {
                path: self.output_path.clone(),
                source,
            })?;

        info!("Wrote stats card to {}", self.output_path.display());
        Ok(&self.output_path)
    }

    /// Get a reference to the stats source (useful for testing)
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}
