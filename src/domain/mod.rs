//! Domain module containing the contribution calendar and streak logic
//!
//! This module defines the core types (ContributionDay, ContributionSeries,
//! StreakResult) and the rules that keep a series well formed. Nothing in
//! here knows about HTTP, configuration or rendering; it works purely on
//! already-fetched data.

pub mod calendar;
pub mod streak;
pub mod types;

// Re-export public types for easy access
pub use calendar::*;
pub use streak::*;
pub use types::*;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a contribution series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed date '{0}', expected YYYY-MM-DD")]
    MalformedDate(String),

    #[error("Duplicate contribution date: {date}")]
    DuplicateDate { date: NaiveDate },

    #[error("Contribution dates out of order: {date} follows {previous}")]
    OutOfOrder { previous: NaiveDate, date: NaiveDate },

    #[error("Gap in contribution calendar between {previous} and {date}")]
    CalendarGap { previous: NaiveDate, date: NaiveDate },
}
