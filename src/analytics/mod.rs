//! Stats assembly
//!
//! Turns fetched GitHub data into the values shown on the card: normalizes
//! the calendar, runs the streak analysis and keeps the provider totals next
//! to the calculated ones under their own names.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{DomainError, StreakResult, StreakSummary};
use crate::github::ContributionsData;
use crate::render::TemplateValues;

/// Shown on the card when a streak has no date range
pub const NO_DATE: &str = "-";

/// Format for streak boundary dates on the card, e.g. `Jan 5, 2024`
pub const CARD_DATE_FORMAT: &str = "%b %-d, %Y";

/// Everything rendered onto the stats card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitHubStats {
    pub username: String,
    /// Provider-computed total over the whole account history
    pub total_contributions: u64,
    /// Provider-computed total since January 1st
    pub contributions_this_year: u64,
    /// Sum of the daily calendar counts for the fetched window
    pub calendar_contributions: u64,
    pub total_stars: u64,
    pub current_streak: StreakResult,
    pub longest_streak: StreakResult,
    pub total_workflow_runs: u64,
}

impl GitHubStats {
    /// Build stats from fetched data
    ///
    /// Fails if the calendar is malformed; nothing is produced in that case.
    pub fn assemble(
        username: impl Into<String>,
        contributions: &ContributionsData,
        total_stars: u64,
        total_workflow_runs: u64,
    ) -> Result<Self, DomainError> {
        let series = contributions.calendar.normalize()?;
        let summary = StreakSummary::calculate(&series);

        tracing::info!(
            "Analyzed {} days: current streak {}, longest streak {}",
            series.len(),
            summary.current_streak.length,
            summary.longest_streak.length
        );
        if !summary.current_streak.is_active() {
            tracing::debug!("No contributions on the last calendar day, current streak is 0");
        }

        Ok(Self {
            username: username.into(),
            total_contributions: contributions.lifetime_total,
            contributions_this_year: contributions.this_year_total,
            calendar_contributions: summary.total,
            total_stars,
            current_streak: summary.current_streak,
            longest_streak: summary.longest_streak,
            total_workflow_runs,
        })
    }

    /// Flatten into template placeholder values
    pub fn template_values(&self) -> TemplateValues {
        let mut values = TemplateValues::new();

        values.insert("username", self.username.clone());
        values.insert("total_contributions", self.total_contributions.to_string());
        values.insert("contributions_this_year", self.contributions_this_year.to_string());
        values.insert("calendar_contributions", self.calendar_contributions.to_string());
        values.insert("total_stars", self.total_stars.to_string());
        values.insert("total_workflow_runs", self.total_workflow_runs.to_string());

        values.insert("current_streak", self.current_streak.length.to_string());
        values.insert("current_streak_start", format_date(self.current_streak.start_date));
        values.insert("current_streak_end", format_date(self.current_streak.end_date));

        values.insert("longest_streak", self.longest_streak.length.to_string());
        values.insert("longest_streak_start", format_date(self.longest_streak.start_date));
        values.insert("longest_streak_end", format_date(self.longest_streak.end_date));

        values
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(CARD_DATE_FORMAT).to_string())
        .unwrap_or_else(|| NO_DATE.to_string())
}
