//! Training-pattern metrics
//!
//! Turns a per-day training series into a weekly consistency score and a
//! distribution of rest intervals between training days.

use chrono::{Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::models::FrequencyDataPoint;
use crate::repository::WorkoutRepository;

/// Length of the consistency window, ending today
pub const CONSISTENCY_WINDOW_WEEKS: i64 = 12;

/// Rest-interval buckets, shortest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestBucket {
  OneDay,
  TwoToThreeDays,
  FourToFiveDays,
  SixToSevenDays,
  EightPlusDays,
}

impl RestBucket {
  pub const ALL: [RestBucket; 5] = [
    RestBucket::OneDay,
    RestBucket::TwoToThreeDays,
    RestBucket::FourToFiveDays,
    RestBucket::SixToSevenDays,
    RestBucket::EightPlusDays,
  ];

  /// Bucket for a gap of `days` between consecutive training days (gap ≥ 1)
  pub fn from_gap(days: i64) -> Self {
    match days {
      d if d <= 1 => RestBucket::OneDay,
      2..=3 => RestBucket::TwoToThreeDays,
      4..=5 => RestBucket::FourToFiveDays,
      6..=7 => RestBucket::SixToSevenDays,
      _ => RestBucket::EightPlusDays,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      RestBucket::OneDay => "1 day",
      RestBucket::TwoToThreeDays => "2-3 days",
      RestBucket::FourToFiveDays => "4-5 days",
      RestBucket::SixToSevenDays => "6-7 days",
      RestBucket::EightPlusDays => "8+ days",
    }
  }

  fn index(&self) -> usize {
    *self as usize
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestIntervalShare {
  pub bucket: RestBucket,
  pub label: String,
  pub count: usize,
  /// Share of all gaps, 0-100
  pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPatternMetrics {
  /// Percentage of the last 12 weeks with at least one training day
  pub consistency_score: f64,

  /// Non-empty buckets in bucket order; empty with fewer than two days
  pub rest_distribution: Vec<RestIntervalShare>,

  /// Label of the most common rest interval
  pub typical_rest: Option<String>,
}

impl TrainingPatternMetrics {
  /// Compute metrics for a window ending on `today`.
  ///
  /// Deterministic for a given input and `today`.
  pub fn compute(points: &[FrequencyDataPoint], today: NaiveDate) -> Self {
    let consistency_score = Self::compute_consistency(points, today);
    let rest_distribution = Self::compute_rest_distribution(points);

    // Strictly-greater keeps the shortest interval on ties
    let typical_rest = rest_distribution
      .iter()
      .fold(None::<&RestIntervalShare>, |best, share| match best {
        Some(b) if share.percentage <= b.percentage => Some(b),
        _ => Some(share),
      })
      .map(|share| share.label.clone());

    Self {
      consistency_score,
      rest_distribution,
      typical_rest,
    }
  }

  pub fn compute_today(points: &[FrequencyDataPoint]) -> Self {
    Self::compute(points, Local::now().date_naive())
  }

  fn compute_consistency(points: &[FrequencyDataPoint], today: NaiveDate) -> f64 {
    let window_start = today - Duration::weeks(CONSISTENCY_WINDOW_WEEKS);

    let mut weeks: Vec<NaiveDate> = points
      .iter()
      .map(|p| p.date)
      .filter(|d| *d > window_start && *d <= today)
      .map(week_start)
      .collect();
    weeks.sort();
    weeks.dedup();

    // A window not aligned to Monday can touch 13 calendar weeks
    (weeks.len() as f64 / CONSISTENCY_WINDOW_WEEKS as f64 * 100.0).min(100.0)
  }

  fn compute_rest_distribution(points: &[FrequencyDataPoint]) -> Vec<RestIntervalShare> {
    let mut dates: Vec<NaiveDate> = points.iter().map(|p| p.date).collect();
    dates.sort();
    dates.dedup();

    if dates.len() < 2 {
      return Vec::new();
    }

    let mut counts = [0usize; 5];
    for pair in dates.windows(2) {
      let gap = (pair[1] - pair[0]).num_days();
      counts[RestBucket::from_gap(gap).index()] += 1;
    }

    let total = (dates.len() - 1) as f64;

    RestBucket::ALL
      .iter()
      .zip(counts)
      .filter(|(_, count)| *count > 0)
      .map(|(bucket, count)| RestIntervalShare {
        bucket: *bucket,
        label: bucket.label().to_string(),
        count,
        percentage: count as f64 / total * 100.0,
      })
      .collect()
  }
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Load the full training history and compute pattern metrics for `today`
pub async fn load_training_patterns<R>(repo: &R, today: NaiveDate) -> Result<TrainingPatternMetrics, DataError>
where
  R: WorkoutRepository + ?Sized,
{
  let points = repo.get_training_frequency(None).await?;
  let metrics = TrainingPatternMetrics::compute(&points, today);

  tracing::debug!(
    training_days = points.len(),
    consistency_score = metrics.consistency_score,
    typical_rest = ?metrics.typical_rest,
    "Computed training patterns"
  );

  Ok(metrics)
}
