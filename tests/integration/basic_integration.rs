/// Basic integration tests
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use github_stats_card::*;
use tempfile::TempDir;

/// Stats source that answers from fixed data and counts calls
struct FixedSource {
    data: ContributionsData,
    stars: u64,
    runs: u64,
    calls: AtomicUsize,
}

impl FixedSource {
    fn new(days: &[(&str, u32)]) -> Self {
        let week = ContributionWeek {
            contribution_days: days
                .iter()
                .map(|(date, count)| CalendarDay {
                    date: date.to_string(),
                    contribution_count: *count,
                })
                .collect(),
        };

        Self {
            data: ContributionsData {
                lifetime_total: 4321,
                this_year_total: 87,
                calendar: ContributionCalendar { weeks: vec![week] },
            },
            stars: 56,
            runs: 789,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StatsSource for FixedSource {
    async fn fetch_contributions(&self, _now: DateTime<Utc>) -> Result<ContributionsData, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.clone())
    }

    async fn fetch_total_stars(&self) -> Result<u64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.stars)
    }

    async fn fetch_workflow_runs(&self) -> Result<u64, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.runs)
    }
}

/// Stats source whose repository listing always fails
struct FailingSource;

#[async_trait]
impl StatsSource for FailingSource {
    async fn fetch_contributions(&self, _now: DateTime<Utc>) -> Result<ContributionsData, FetchError> {
        Ok(ContributionsData::default())
    }

    async fn fetch_total_stars(&self) -> Result<u64, FetchError> {
        Err(FetchError::Status {
            url: "https://api.github.com/users/octocat/repos".to_string(),
            status: 502,
            body: "Bad Gateway".to_string(),
        })
    }

    async fn fetch_workflow_runs(&self) -> Result<u64, FetchError> {
        Ok(0)
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 6, 18, 0, 0).unwrap()
}

fn sample_days() -> Vec<(&'static str, u32)> {
    vec![
        ("2024-01-01", 1),
        ("2024-01-02", 4),
        ("2024-01-03", 0),
        ("2024-01-04", 2),
        ("2024-01-05", 2),
        ("2024-01-06", 3),
    ]
}

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_stats() {
        let generator = StatsGenerator::new(
            FixedSource::new(&sample_days()),
            "octocat",
            SvgTemplate::builtin(),
            "unused.svg",
        );

        let stats = generator.collect(now()).await.expect("stats");

        assert_eq!(stats.total_contributions, 4321);
        assert_eq!(stats.contributions_this_year, 87);
        assert_eq!(stats.calendar_contributions, 12);
        assert_eq!(stats.total_stars, 56);
        assert_eq!(stats.total_workflow_runs, 789);
        assert_eq!(stats.current_streak.length, 3);
        assert_eq!(stats.longest_streak.length, 3);
        assert_eq!(stats.longest_streak.start_date, stats.current_streak.start_date);
        assert_eq!(generator.source().calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_generate_writes_builtin_card() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let output = dir.path().join("github-stats.svg");
        let generator = StatsGenerator::new(
            FixedSource::new(&sample_days()),
            "octocat",
            SvgTemplate::builtin(),
            output.clone(),
        );

        let written = generator.generate(now()).await.expect("generate");
        assert_eq!(written, output.as_path());

        let svg = std::fs::read_to_string(&output).expect("read output");
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("octocat"));
        assert!(svg.contains("4321"));
        assert!(svg.contains(">3 days<"));
        assert!(svg.contains("Jan 4, 2024 - Jan 6, 2024"));
        assert!(!svg.contains("{{"));
    }

    #[tokio::test]
    async fn test_generate_with_template_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let template_path = dir.path().join("card.svg");
        std::fs::write(
            &template_path,
            "<svg>{{ current_streak }}/{{ longest_streak }}/{{ total_stars }}</svg>",
        )
        .unwrap();

        let template = SvgTemplate::load(&template_path).await.expect("template");
        let output = dir.path().join("out.svg");
        let generator = StatsGenerator::new(
            FixedSource::new(&[("2024-01-05", 1), ("2024-01-06", 0)]),
            "octocat",
            template,
            output.clone(),
        );

        generator.generate(now()).await.expect("generate");

        assert_eq!(std::fs::read_to_string(&output).unwrap(), "<svg>0/1/56</svg>");
    }

    #[tokio::test]
    async fn test_empty_calendar_renders_placeholders_for_dates() {
        let generator = StatsGenerator::new(
            FixedSource::new(&[]),
            "octocat",
            SvgTemplate::new("{{ current_streak_start }}|{{ longest_streak_end }}|{{ longest_streak }}"),
            "unused.svg",
        );

        assert_eq!(generator.render(now()).await.unwrap(), "-|-|0");
    }

    #[tokio::test]
    async fn test_malformed_calendar_writes_nothing() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let output = dir.path().join("out.svg");
        let generator = StatsGenerator::new(
            FixedSource::new(&[("2024-01-05", 1), ("2024-01-05", 2)]),
            "octocat",
            SvgTemplate::builtin(),
            output.clone(),
        );

        let result = generator.generate(now()).await;

        assert!(matches!(
            result,
            Err(GeneratorError::Domain(DomainError::DuplicateDate { .. }))
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_run() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let output = dir.path().join("out.svg");
        let generator =
            StatsGenerator::new(FailingSource, "octocat", SvgTemplate::builtin(), output.clone());

        let result = generator.generate(now()).await;

        assert!(matches!(
            result,
            Err(GeneratorError::Fetch(FetchError::Status { status: 502, .. }))
        ));
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_unknown_placeholder_is_an_error() {
        let generator = StatsGenerator::new(
            FixedSource::new(&sample_days()),
            "octocat",
            SvgTemplate::new("{{ followers }}"),
            "unused.svg",
        );

        assert!(matches!(
            generator.render(now()).await,
            Err(GeneratorError::Render(RenderError::UnknownPlaceholder(_)))
        ));
    }

    #[tokio::test]
    async fn test_from_config_rejects_missing_token() {
        let config = Config::new("octocat", "");

        assert!(matches!(
            StatsGenerator::from_config(&config).await,
            Err(GeneratorError::Config(ConfigError::MissingToken))
        ));
    }
}
