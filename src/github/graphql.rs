//! GraphQL queries and response shapes for contribution data

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ContributionCalendar;
use crate::github::FetchError;

/// This-year total plus the daily calendar, in one round trip
pub const CALENDAR_QUERY: &str = r#"
query ($username: String!, $fromYear: DateTime!, $toYear: DateTime!, $fromCalendar: DateTime!, $toCalendar: DateTime!) {
  user(login: $username) {
    createdAt
    contributionsThisYear: contributionsCollection(from: $fromYear, to: $toYear) {
      totalContributions
    }
    contributionsCollection(from: $fromCalendar, to: $toCalendar) {
      contributionCalendar {
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// Total for one window of at most a year
pub const WINDOW_TOTAL_QUERY: &str = r#"
query ($username: String!, $from: DateTime!, $to: DateTime!) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      totalContributions
    }
  }
}
"#;

/// Request body posted to the GraphQL endpoint
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub variables: V,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarVariables<'a> {
    pub username: &'a str,
    pub from_year: DateTime<Utc>,
    pub to_year: DateTime<Utc>,
    pub from_calendar: DateTime<Utc>,
    pub to_calendar: DateTime<Utc>,
}

impl<'a> CalendarVariables<'a> {
    /// Variables for the calendar query ending at `now`
    pub fn ending_at(
        username: &'a str,
        now: DateTime<Utc>,
        calendar_days: i64,
    ) -> Result<Self, FetchError> {
        Ok(Self {
            username,
            from_year: year_start(now.year())?,
            to_year: now,
            from_calendar: now - chrono::Duration::days(calendar_days),
            to_calendar: now,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WindowVariables<'a> {
    pub username: &'a str,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

/// Year-long windows covering `created_at..=now`
///
/// GitHub limits a contributions collection to one year, so lifetime totals
/// are summed over one window per calendar year.
pub fn yearly_windows(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>, FetchError> {
    let mut windows = Vec::new();

    for year in created_at.year()..=now.year() {
        let from = year_start(year)?.max(created_at);
        let to = (year_start(year + 1)? - chrono::Duration::seconds(1)).min(now);
        if from <= to {
            windows.push((from, to));
        }
    }

    Ok(windows)
}

/// Midnight UTC on January 1st of `year`
pub fn year_start(year: i32) -> Result<DateTime<Utc>, FetchError> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or(FetchError::InvalidWindow(year))
}

/// Top-level GraphQL response envelope
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<U> {
    pub data: Option<UserData<U>>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct UserData<U> {
    pub user: Option<U>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<U> GraphQlResponse<U> {
    /// Unwrap the `user` object, turning GraphQL errors into `FetchError`
    pub fn into_user(self, username: &str) -> Result<U, FetchError> {
        if let Some(errors) = self.errors.filter(|errors| !errors.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FetchError::GraphQl(messages));
        }

        self.data
            .and_then(|data| data.user)
            .ok_or_else(|| FetchError::UserNotFound(username.to_string()))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarUser {
    pub created_at: DateTime<Utc>,
    pub contributions_this_year: TotalContributions,
    pub contributions_collection: CalendarCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCollection {
    pub contribution_calendar: ContributionCalendar,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowUser {
    pub contributions_collection: TotalContributions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalContributions {
    pub total_contributions: u64,
}
