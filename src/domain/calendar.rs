//! Calendar normalization
//!
//! GitHub returns the contribution calendar as weeks of days. This module
//! holds that nested shape as it comes off the wire and flattens it into a
//! `ContributionSeries`.

use serde::{Deserialize, Serialize};

use crate::domain::{ContributionDay, ContributionSeries, DomainError};

/// The provider's contribution calendar, as returned by the GraphQL API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionCalendar {
    pub weeks: Vec<ContributionWeek>,
}

/// One week column of the calendar (up to seven days)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionWeek {
    pub contribution_days: Vec<CalendarDay>,
}

/// A raw calendar cell with the date still in string form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: String,
    pub contribution_count: u32,
}

impl ContributionCalendar {
    /// Flatten weeks into a validated series
    ///
    /// The provider's order is kept as-is, never re-sorted. The first
    /// malformed date aborts, then the series itself rejects duplicates,
    /// reordering and gaps.
    pub fn normalize(&self) -> Result<ContributionSeries, DomainError> {
        let days = self
            .weeks
            .iter()
            .flat_map(|week| &week.contribution_days)
            .map(|raw| ContributionDay::parse(&raw.date, raw.contribution_count))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            "Normalized {} contribution days from {} weeks",
            days.len(),
            self.weeks.len()
        );

        ContributionSeries::new(days)
    }

    /// Total number of raw day cells across all weeks
    pub fn day_count(&self) -> usize {
        self.weeks.iter().map(|w| w.contribution_days.len()).sum()
    }
}
