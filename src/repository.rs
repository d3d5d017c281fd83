//! Data-access boundary for the aggregation layer
//!
//! [`WorkoutRepository`] is the read surface the summary and pattern
//! calculators depend on. [`SqliteRepository`] implements it over the sqlx pool.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::Row;

use crate::db::DbPool;
use crate::error::DataError;
use crate::models::{ExerciseLog, FrequencyDataPoint, PersonalRecord, PrType, SetLog, Workout, WorkoutStatus};

/// Placeholder used when an exercise name cannot be resolved
pub const UNKNOWN_EXERCISE: &str = "Unknown Exercise";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Returns `None` if the workout doesn't exist
    async fn get_workout_by_id(&self, id: i64) -> Result<Option<Workout>, DataError>;

    async fn get_exercises_for_workout(&self, workout_id: i64) -> Result<Vec<ExerciseLog>, DataError>;

    async fn get_sets_for_workout(&self, workout_id: i64) -> Result<Vec<SetLog>, DataError>;

    async fn get_personal_records_for_workout(
        &self,
        workout_id: i64,
    ) -> Result<Vec<PersonalRecord>, DataError>;

    /// Latest one-rep-max estimate for an exercise, if any has been recorded
    async fn get_current_one_rm_estimate(&self, exercise_id: i64) -> Result<Option<f64>, DataError>;

    /// Best-effort name resolution; never fails, falls back to [`UNKNOWN_EXERCISE`]
    async fn exercise_name_or_id(&self, exercise_log: &ExerciseLog) -> String;

    /// Per-day volume and session counts of completed workouts, ascending by date
    async fn get_training_frequency(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<FrequencyDataPoint>, DataError>;
}

// ---------------------------------------------------------------------------
// SQLite Implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkoutRepository for SqliteRepository {
    async fn get_workout_by_id(&self, id: i64) -> Result<Option<Workout>, DataError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, status, started_at, duration_seconds
            FROM workouts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status_str: String = row.try_get("status")?;
        let status: WorkoutStatus = status_str.parse().map_err(DataError::Decode)?;
        let started_at: String = row.try_get("started_at")?;

        Ok(Some(Workout {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            status,
            started_at: parse_timestamp(&started_at)?,
            duration_seconds: row.try_get("duration_seconds")?,
        }))
    }

    async fn get_exercises_for_workout(&self, workout_id: i64) -> Result<Vec<ExerciseLog>, DataError> {
        let logs = sqlx::query_as::<_, ExerciseLog>(
            r#"
            SELECT el.id, el.workout_id, el.exercise_id,
                   e.name AS exercise_name, el.exercise_order
            FROM exercise_logs el
            LEFT JOIN exercises e ON e.id = el.exercise_id
            WHERE el.workout_id = ?
            ORDER BY el.exercise_order, el.id
            "#,
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    async fn get_sets_for_workout(&self, workout_id: i64) -> Result<Vec<SetLog>, DataError> {
        let sets = sqlx::query_as::<_, SetLog>(
            r#"
            SELECT s.id, s.exercise_log_id, s.set_order, s.actual_reps,
                   CAST(s.actual_weight AS REAL) AS actual_weight,
                   s.actual_rpe, s.is_completed
            FROM set_logs s
            JOIN exercise_logs el ON el.id = s.exercise_log_id
            WHERE el.workout_id = ?
            ORDER BY el.exercise_order, el.id, s.set_order, s.id
            "#,
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sets)
    }

    async fn get_personal_records_for_workout(
        &self,
        workout_id: i64,
    ) -> Result<Vec<PersonalRecord>, DataError> {
        let rows = sqlx::query(
            r#"
            SELECT
                pr.id, pr.exercise_id, e.name AS exercise_name, pr.workout_id,
                pr.record_type, pr.weight, pr.reps, pr.estimated_1rm,
                pr.previous_weight, pr.previous_reps, pr.previous_date,
                pr.improvement_percentage, pr.recorded_at
            FROM personal_records pr
            LEFT JOIN exercises e ON e.id = pr.exercise_id
            WHERE pr.workout_id = ?
            ORDER BY pr.recorded_at, pr.id
            "#,
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let record_type_str: String = row.try_get("record_type")?;
            let record_type: PrType = record_type_str.parse().map_err(DataError::Decode)?;
            let previous_date: Option<String> = row.try_get("previous_date")?;
            let recorded_at: String = row.try_get("recorded_at")?;

            records.push(PersonalRecord {
                id: row.try_get("id")?,
                exercise_id: row.try_get("exercise_id")?,
                exercise_name: row.try_get("exercise_name")?,
                workout_id: row.try_get("workout_id")?,
                record_type,
                weight: row.try_get("weight")?,
                reps: row.try_get("reps")?,
                estimated_1rm: row.try_get("estimated_1rm")?,
                previous_weight: row.try_get("previous_weight")?,
                previous_reps: row.try_get("previous_reps")?,
                previous_date: previous_date.as_deref().map(parse_date).transpose()?,
                improvement_percentage: row.try_get("improvement_percentage")?,
                recorded_at: parse_timestamp(&recorded_at)?,
            });
        }

        Ok(records)
    }

    async fn get_current_one_rm_estimate(&self, exercise_id: i64) -> Result<Option<f64>, DataError> {
        let estimate: Option<f64> = sqlx::query_scalar(
            r#"
            SELECT CAST(one_rm_estimate AS REAL)
            FROM exercise_max_history
            WHERE exercise_id = ?
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(estimate)
    }

    async fn exercise_name_or_id(&self, exercise_log: &ExerciseLog) -> String {
        if let Some(name) = &exercise_log.exercise_name {
            return name.clone();
        }

        let lookup: Result<Option<String>, sqlx::Error> =
            sqlx::query_scalar("SELECT name FROM exercises WHERE id = ?")
                .bind(exercise_log.exercise_id)
                .fetch_optional(&self.pool)
                .await;

        match lookup {
            Ok(Some(name)) => name,
            Ok(None) => UNKNOWN_EXERCISE.to_string(),
            Err(e) => {
                tracing::warn!(
                    exercise_id = exercise_log.exercise_id,
                    "Failed to resolve exercise name: {}",
                    e
                );
                UNKNOWN_EXERCISE.to_string()
            }
        }
    }

    async fn get_training_frequency(
        &self,
        since: Option<NaiveDate>,
    ) -> Result<Vec<FrequencyDataPoint>, DataError> {
        let since_str = since.map(|d| d.format("%Y-%m-%d").to_string());

        let rows: Vec<(String, f64, i64)> = sqlx::query_as(
            r#"
            SELECT
                date(w.started_at) AS day,
                CAST(COALESCE(SUM(
                    CASE WHEN s.is_completed = 1
                         THEN s.actual_weight * s.actual_reps
                         ELSE 0 END
                ), 0) AS REAL) AS volume,
                COUNT(DISTINCT w.id) AS session_count
            FROM workouts w
            LEFT JOIN exercise_logs el ON el.workout_id = w.id
            LEFT JOIN set_logs s ON s.exercise_log_id = el.id
            WHERE w.status = 'COMPLETED'
              AND (?1 IS NULL OR date(w.started_at) >= ?1)
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(since_str)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(day, volume, session_count)| -> Result<FrequencyDataPoint, DataError> {
                Ok(FrequencyDataPoint {
                    date: parse_date(&day)?,
                    volume,
                    session_count,
                })
            })
            .collect()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DataError::Decode(format!("invalid date '{}': {}", s, e)))
}

/// Accepts RFC 3339 or SQLite's `CURRENT_TIMESTAMP` format (assumed UTC)
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| DataError::Decode(format!("invalid timestamp '{}': {}", s, e)))
}
