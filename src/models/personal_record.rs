use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrType {
  /// Heaviest weight lifted for the logged reps
  Weight,
  /// Best estimated one-rep max
  #[serde(rename = "ESTIMATED_1RM")]
  Estimated1rm,
}

impl PrType {
  pub fn as_str(&self) -> &'static str {
    match self {
      PrType::Weight => "WEIGHT",
      PrType::Estimated1rm => "ESTIMATED_1RM",
    }
  }
}

impl std::fmt::Display for PrType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for PrType {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "WEIGHT" => Ok(Self::Weight),
      "ESTIMATED_1RM" => Ok(Self::Estimated1rm),
      _ => Err(format!("Unknown record type: {}", s)),
    }
  }
}

/// A best-ever achievement for an exercise.
///
/// `record_type` decides which numbers are authoritative: `weight`/`reps` for
/// [`PrType::Weight`], `estimated_1rm` for [`PrType::Estimated1rm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
  pub id: i64,
  pub exercise_id: i64,
  pub exercise_name: Option<String>,
  pub workout_id: Option<i64>,
  pub record_type: PrType,
  pub weight: Option<f64>,
  pub reps: Option<i64>,
  pub estimated_1rm: Option<f64>,
  // Comparison against the record this one beat
  pub previous_weight: Option<f64>,
  pub previous_reps: Option<i64>,
  pub previous_date: Option<NaiveDate>,
  pub improvement_percentage: Option<f64>,
  pub recorded_at: DateTime<Utc>,
}

impl PersonalRecord {
  /// The number this record is ranked by within its type
  pub fn ranking_value(&self) -> f64 {
    match self.record_type {
      PrType::Weight => self.weight.unwrap_or(0.0),
      PrType::Estimated1rm => self.estimated_1rm.unwrap_or(0.0),
    }
  }
}
