use serde::{Deserialize, Serialize};

/// One exercise performed within a workout
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseLog {
  pub id: i64,
  pub workout_id: i64,
  pub exercise_id: i64,
  /// Catalogue name, absent when the exercise row is missing
  pub exercise_name: Option<String>,
  pub exercise_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SetLog {
  pub id: i64,
  pub exercise_log_id: i64,
  pub set_order: i64,
  pub actual_reps: i64,
  pub actual_weight: f64,
  pub actual_rpe: Option<f64>,
  pub is_completed: bool,
}

impl SetLog {
  /// Weight moved across all reps of the set
  pub fn volume(&self) -> f64 {
    self.actual_weight * self.actual_reps as f64
  }
}
