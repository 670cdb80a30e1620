/// Streak analysis checks over whole series
use chrono::{Duration, NaiveDate};
use github_stats_card::*;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Consecutive days from 2024-01-01 with the given counts
fn series_of(counts: &[u32]) -> ContributionSeries {
    let days = counts
        .iter()
        .enumerate()
        .map(|(i, count)| ContributionDay::new(start() + Duration::days(i as i64), *count))
        .collect();

    ContributionSeries::new(days).expect("consecutive days")
}

fn day(offset: i64) -> Option<NaiveDate> {
    Some(start() + Duration::days(offset))
}

#[cfg(test)]
mod streak_property_tests {
    use super::*;

    #[test]
    fn test_all_zero_series_have_no_streaks() {
        for len in [1, 2, 7, 365] {
            let summary = StreakSummary::calculate(&series_of(&vec![0; len]));

            assert_eq!(summary.current_streak, StreakResult::none());
            assert_eq!(summary.longest_streak, StreakResult::none());
        }
    }

    #[test]
    fn test_all_active_series_span_everything() {
        for len in [1usize, 3, 31, 366] {
            let series = series_of(&vec![2; len]);
            let summary = StreakSummary::calculate(&series);

            assert_eq!(summary.current_streak.length as usize, len);
            assert_eq!(summary.longest_streak.length as usize, len);
            assert_eq!(summary.longest_streak.start_date, day(0));
            assert_eq!(summary.longest_streak.end_date, day(len as i64 - 1));
            assert_eq!(summary.total, 2 * len as u64);
        }
    }

    #[test]
    fn test_longest_never_shorter_than_current() {
        let patterns: [&[u32]; 5] = [
            &[1, 1, 0, 1, 1, 1],
            &[0, 1, 1, 1, 0, 1],
            &[1, 0, 1, 0, 1, 0],
            &[5, 5, 5, 0, 0, 5, 5],
            &[0, 0, 0, 3],
        ];

        for counts in patterns {
            let summary = StreakSummary::calculate(&series_of(counts));
            assert!(summary.longest_streak.length >= summary.current_streak.length);
        }
    }

    #[test]
    fn test_later_longer_run_replaces_earlier() {
        let summary = StreakSummary::calculate(&series_of(&[1, 1, 0, 1, 1, 1, 0, 1, 1]));

        assert_eq!(summary.longest_streak.length, 3);
        assert_eq!(summary.longest_streak.start_date, day(3));
        assert_eq!(summary.longest_streak.end_date, day(5));
        assert_eq!(summary.current_streak.length, 2);
        assert_eq!(summary.current_streak.start_date, day(7));
        assert_eq!(summary.current_streak.end_date, day(8));
    }

    #[test]
    fn test_trailing_run_equal_to_best_does_not_replace_it() {
        let summary = StreakSummary::calculate(&series_of(&[4, 4, 0, 4, 4]));

        assert_eq!(summary.longest_streak.length, 2);
        assert_eq!(summary.longest_streak.start_date, day(0));
        assert_eq!(summary.longest_streak.end_date, day(1));
    }

    #[test]
    fn test_repeated_analysis_matches() {
        let series = series_of(&[3, 0, 2, 2, 0, 1]);
        let first = StreakSummary::calculate(&series);

        for _ in 0..3 {
            assert_eq!(StreakSummary::calculate(&series), first);
        }
    }
}
