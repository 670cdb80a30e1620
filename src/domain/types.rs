//! Core contribution types used throughout the domain layer
//!
//! A `ContributionDay` is one calendar date with its activity count, and a
//! `ContributionSeries` is a validated, gap-free run of those days in
//! ascending order.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::DomainError;

/// Date format used by the contribution calendar
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One calendar date with an associated non-negative contribution count
///
/// Fields are private so a day can't be changed after it has been placed
/// in a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionDay {
    date: NaiveDate,
    count: u32,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    /// Build a day from a `YYYY-MM-DD` string
    ///
    /// The shape is checked before handing the string to chrono, which on
    /// its own would also accept forms like `2024-1-5` or `+2024-01-05`.
    pub fn parse(date: &str, count: u32) -> Result<Self, DomainError> {
        if !has_calendar_shape(date) {
            return Err(DomainError::MalformedDate(date.to_string()));
        }

        let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| DomainError::MalformedDate(date.to_string()))?;

        Ok(Self::new(parsed, count))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Whether anything was contributed on this day
    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

fn has_calendar_shape(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// An ordered run of contribution days
///
/// Invariant: dates are strictly ascending and each day is exactly one
/// calendar day after the previous one. Construction fails fast on
/// duplicates, reordering or gaps rather than trying to repair the data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributionSeries {
    days: Vec<ContributionDay>,
}

impl ContributionSeries {
    /// Create a series, validating chronological order
    pub fn new(days: Vec<ContributionDay>) -> Result<Self, DomainError> {
        for pair in days.windows(2) {
            check_successor(&pair[0], &pair[1])?;
        }

        Ok(Self { days })
    }

    /// Create a series from flat `(date, count)` records
    pub fn from_records<'a, I>(records: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let days = records
            .into_iter()
            .map(|(date, count)| ContributionDay::parse(date, count))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(days)
    }

    pub fn days(&self) -> &[ContributionDay] {
        &self.days
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContributionDay> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn first(&self) -> Option<&ContributionDay> {
        self.days.first()
    }

    pub fn last(&self) -> Option<&ContributionDay> {
        self.days.last()
    }
}

impl<'a> IntoIterator for &'a ContributionSeries {
    type Item = &'a ContributionDay;
    type IntoIter = std::slice::Iter<'a, ContributionDay>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// Check that `next` is the calendar day right after `previous`
fn check_successor(previous: &ContributionDay, next: &ContributionDay) -> Result<(), DomainError> {
    match (next.date - previous.date).num_days() {
        1 => Ok(()),
        0 => Err(DomainError::DuplicateDate { date: next.date }),
        diff if diff < 0 => Err(DomainError::OutOfOrder {
            previous: previous.date,
            date: next.date,
        }),
        _ => Err(DomainError::CalendarGap {
            previous: previous.date,
            date: next.date,
        }),
    }
}
