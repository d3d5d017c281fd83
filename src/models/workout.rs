use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkoutStatus {
  NotStarted,
  InProgress,
  Completed,
}

impl WorkoutStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      WorkoutStatus::NotStarted => "NOT_STARTED",
      WorkoutStatus::InProgress => "IN_PROGRESS",
      WorkoutStatus::Completed => "COMPLETED",
    }
  }
}

impl std::fmt::Display for WorkoutStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for WorkoutStatus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "NOT_STARTED" => Ok(Self::NotStarted),
      "IN_PROGRESS" => Ok(Self::InProgress),
      "COMPLETED" => Ok(Self::Completed),
      _ => Err(format!("Unknown workout status: {}", s)),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
  pub id: i64,
  pub name: Option<String>,
  pub status: WorkoutStatus,
  pub started_at: DateTime<Utc>,
  pub duration_seconds: Option<i64>,
}
