//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Row seeding helpers
//! - Mock data factories
//! - Helper assertions

use crate::models::{ExerciseLog, FrequencyDataPoint, PersonalRecord, PrType, SetLog, Workout, WorkoutStatus};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

pub async fn seed_exercise(pool: &SqlitePool, name: &str) -> i64 {
  sqlx::query("INSERT INTO exercises (name) VALUES (?1)")
    .bind(name)
    .execute(pool)
    .await
    .expect("Failed to insert exercise")
    .last_insert_rowid()
}

pub async fn seed_workout(
  pool: &SqlitePool,
  status: &str,
  started_at: DateTime<Utc>,
  duration_seconds: Option<i64>,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO workouts (name, status, started_at, duration_seconds)
    VALUES ('Test Workout', ?1, ?2, ?3)
    "#,
  )
  .bind(status)
  .bind(started_at.to_rfc3339())
  .bind(duration_seconds)
  .execute(pool)
  .await
  .expect("Failed to insert workout")
  .last_insert_rowid()
}

pub async fn seed_exercise_log(pool: &SqlitePool, workout_id: i64, exercise_id: i64, order: i64) -> i64 {
  sqlx::query(
    "INSERT INTO exercise_logs (workout_id, exercise_id, exercise_order) VALUES (?1, ?2, ?3)",
  )
  .bind(workout_id)
  .bind(exercise_id)
  .bind(order)
  .execute(pool)
  .await
  .expect("Failed to insert exercise log")
  .last_insert_rowid()
}

pub async fn seed_set(
  pool: &SqlitePool,
  exercise_log_id: i64,
  order: i64,
  reps: i64,
  weight: f64,
  rpe: Option<f64>,
  completed: bool,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO set_logs (exercise_log_id, set_order, actual_reps, actual_weight, actual_rpe, is_completed)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
  )
  .bind(exercise_log_id)
  .bind(order)
  .bind(reps)
  .bind(weight)
  .bind(rpe)
  .bind(completed)
  .execute(pool)
  .await
  .expect("Failed to insert set")
  .last_insert_rowid()
}

pub async fn seed_personal_record(
  pool: &SqlitePool,
  exercise_id: i64,
  workout_id: i64,
  record_type: PrType,
  weight: Option<f64>,
  estimated_1rm: Option<f64>,
) -> i64 {
  sqlx::query(
    r#"
    INSERT INTO personal_records (exercise_id, workout_id, record_type, weight, reps, estimated_1rm, recorded_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
  )
  .bind(exercise_id)
  .bind(workout_id)
  .bind(record_type.as_str())
  .bind(weight)
  .bind(weight.map(|_| 5_i64))
  .bind(estimated_1rm)
  .bind(Utc::now().to_rfc3339())
  .execute(pool)
  .await
  .expect("Failed to insert personal record")
  .last_insert_rowid()
}

pub async fn seed_one_rm(pool: &SqlitePool, exercise_id: i64, estimate: f64, recorded_at: DateTime<Utc>) {
  sqlx::query(
    "INSERT INTO exercise_max_history (exercise_id, one_rm_estimate, recorded_at) VALUES (?1, ?2, ?3)",
  )
  .bind(exercise_id)
  .bind(estimate)
  .bind(recorded_at.to_rfc3339())
  .execute(pool)
  .await
  .expect("Failed to insert one-rep-max estimate");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

pub fn mock_workout(id: i64, duration_seconds: Option<i64>) -> Workout {
  Workout {
    id,
    name: Some("Push Day".to_string()),
    status: WorkoutStatus::Completed,
    started_at: Utc::now(),
    duration_seconds,
  }
}

pub fn mock_exercise_log(id: i64, exercise_id: i64, name: Option<&str>) -> ExerciseLog {
  ExerciseLog {
    id,
    workout_id: 1,
    exercise_id,
    exercise_name: name.map(str::to_string),
    exercise_order: id,
  }
}

pub fn mock_set(exercise_log_id: i64, reps: i64, weight: f64, completed: bool) -> SetLog {
  SetLog {
    id: 0,
    exercise_log_id,
    set_order: 0,
    actual_reps: reps,
    actual_weight: weight,
    actual_rpe: None,
    is_completed: completed,
  }
}

pub fn mock_set_with_rpe(exercise_log_id: i64, reps: i64, weight: f64, rpe: Option<f64>) -> SetLog {
  SetLog {
    actual_rpe: rpe,
    ..mock_set(exercise_log_id, reps, weight, true)
  }
}

pub fn mock_weight_pr(id: i64, exercise_id: i64, weight: f64) -> PersonalRecord {
  PersonalRecord {
    id,
    exercise_id,
    exercise_name: None,
    workout_id: Some(1),
    record_type: PrType::Weight,
    weight: Some(weight),
    reps: Some(5),
    estimated_1rm: None,
    previous_weight: None,
    previous_reps: None,
    previous_date: None,
    improvement_percentage: None,
    recorded_at: Utc::now(),
  }
}

pub fn mock_one_rm_pr(id: i64, exercise_id: i64, estimated_1rm: Option<f64>) -> PersonalRecord {
  PersonalRecord {
    record_type: PrType::Estimated1rm,
    weight: None,
    reps: None,
    estimated_1rm,
    ..mock_weight_pr(id, exercise_id, 0.0)
  }
}

pub fn frequency_point(date: NaiveDate) -> FrequencyDataPoint {
  FrequencyDataPoint {
    date,
    volume: 5000.0,
    session_count: 1,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Create a DateTime N days ago from now
pub fn datetime_days_ago(days: i64) -> DateTime<Utc> {
  Utc::now() - Duration::days(days)
}

/// Midday UTC N days ago, clear of date boundaries
pub fn noon_days_ago(days: i64) -> DateTime<Utc> {
  let date = Utc::now().date_naive() - Duration::days(days);
  date
    .and_hms_opt(12, 0, 0)
    .expect("noon is a valid time")
    .and_utc()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('workouts', 'exercise_logs', 'set_logs', 'personal_records', 'exercise_max_history')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 5, "Expected 5 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_set_log_rejects_negative_reps() {
    let pool = setup_test_db().await;
    let workout_id = seed_workout(&pool, "COMPLETED", datetime_days_ago(0), None).await;
    let log_id = seed_exercise_log(&pool, workout_id, 1, 0).await;

    let result = sqlx::query(
      "INSERT INTO set_logs (exercise_log_id, actual_reps, actual_weight, is_completed) VALUES (?1, -1, 50.0, 1)",
    )
    .bind(log_id)
    .execute(&pool)
    .await;

    assert!(result.is_err());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_noon_helper_is_midday() {
    let noon = noon_days_ago(3);
    assert_eq!(noon.format("%H:%M").to_string(), "12:00");
    assert_eq!(noon.date_naive(), Utc::now().date_naive() - Duration::days(3));
  }
}
