use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Training aggregated over one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyDataPoint {
  pub date: NaiveDate,
  pub volume: f64,
  pub session_count: i64,
}
