//! Streak calculation over a contribution series
//!
//! This module defines the StreakResult struct that describes one streak
//! (length plus date range) and the StreakSummary produced for a series:
//! current streak, longest streak and the summed contribution count.

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ContributionSeries;

/// A run of consecutive active days
///
/// When `length` is zero both boundary dates are `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakResult {
    /// Number of consecutive days with at least one contribution
    pub length: u32,
    /// First day of the run
    pub start_date: Option<NaiveDate>,
    /// Last day of the run
    pub end_date: Option<NaiveDate>,
}

impl StreakResult {
    /// An empty streak with no date range
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.length > 0
    }

    /// Calculate the streak that ends on the most recent day of the series
    ///
    /// Walks backwards from the last day and stops at the first zero-count
    /// day. If the last day itself has no contributions the streak is empty,
    /// no matter what came before it.
    pub fn current(series: &ContributionSeries) -> Self {
        let mut streak = Self::none();

        for day in series.iter().rev() {
            if !day.is_active() {
                break;
            }

            streak.length += 1;
            streak.start_date = Some(day.date());
            if streak.end_date.is_none() {
                streak.end_date = Some(day.date());
            }
        }

        streak
    }

    /// Calculate the longest streak anywhere in the series
    ///
    /// Single forward pass. A run closed by a zero-count day ends on the day
    /// before that zero day; a run still open when the series ends is closed
    /// on the last day of the series. Ties keep the earliest run.
    pub fn longest(series: &ContributionSeries) -> Self {
        let mut best = Self::none();
        let mut run = 0u32;
        let mut run_start: Option<NaiveDate> = None;
        let mut previous: Option<NaiveDate> = None;

        for day in series {
            if day.is_active() {
                if run == 0 {
                    run_start = Some(day.date());
                }
                run += 1;
            } else {
                // the series is gap-free, so `previous` is the day before this one
                if run > best.length {
                    best = Self {
                        length: run,
                        start_date: run_start,
                        end_date: previous,
                    };
                }
                run = 0;
            }

            previous = Some(day.date());
        }

        if run > best.length {
            best = Self {
                length: run,
                start_date: run_start,
                end_date: series.last().map(|d| d.date()),
            };
        }

        best
    }
}

/// Everything the analyzer derives from one series
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreakSummary {
    pub current_streak: StreakResult,
    pub longest_streak: StreakResult,
    /// Sum of every day's count in the series
    pub total: u64,
}

impl StreakSummary {
    /// Analyze a series
    ///
    /// Pure function of its input; an empty series gives zero/none results.
    pub fn calculate(series: &ContributionSeries) -> Self {
        Self {
            current_streak: StreakResult::current(series),
            longest_streak: StreakResult::longest(series),
            total: Self::calculate_total(series),
        }
    }

    fn calculate_total(series: &ContributionSeries) -> u64 {
        series.iter().map(|d| u64::from(d.count())).sum()
    }
}
