//! Workout completion summary
//!
//! Reduces a finished workout's logged sets and personal records into the
//! numbers shown on the completion screen. The calculator is pure; the
//! `load_*` functions fetch its inputs through a [`WorkoutRepository`].

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::SummaryError;
use crate::models::{ExerciseLog, PersonalRecord, PrType, SetLog, Workout};
use crate::repository::{WorkoutRepository, UNKNOWN_EXERCISE};

/// ---------------------------------------------------------------------------
/// Summary Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaviestSet {
  pub exercise_name: String,
  pub weight: f64,
  pub reps: i64,
  /// weight × reps
  pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeLeader {
  pub exercise_name: String,
  pub volume: f64,
  pub set_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionSummary {
  pub workout_id: i64,

  /// Σ weight × reps over completed sets
  pub total_volume: f64,

  pub duration_seconds: i64,

  pub total_reps: i64,

  pub completed_sets: usize,

  /// Mean of logged RPE values; sets without RPE are skipped, not zeroed
  pub average_rpe: Option<f64>,

  pub heaviest_set: Option<HeaviestSet>,

  pub volume_leader: Option<VolumeLeader>,

  /// Mean load as a percentage of each exercise's current 1RM estimate
  pub average_intensity: Option<f64>,

  /// One best record per (exercise, record type)
  pub personal_records: Vec<PersonalRecord>,
}

/// Resolved per-item lookups.
///
/// Missing entries are normal: a set whose exercise log has no name resolves
/// to [`UNKNOWN_EXERCISE`], and an exercise without a 1RM estimate is left out
/// of the intensity average.
#[derive(Debug, Clone, Default)]
pub struct ExerciseLookups {
  /// exercise log id → display name
  pub names: HashMap<i64, String>,
  /// exercise id → current one-rep-max estimate
  pub one_rep_maxes: HashMap<i64, f64>,
}

impl ExerciseLookups {
  fn name_for(&self, exercise_log_id: i64) -> &str {
    self
      .names
      .get(&exercise_log_id)
      .map(String::as_str)
      .unwrap_or(UNKNOWN_EXERCISE)
  }
}

/// ---------------------------------------------------------------------------
/// Calculator
/// ---------------------------------------------------------------------------

impl CompletionSummary {
  /// Compute the summary from already-loaded workout data.
  ///
  /// Ties in heaviest set and volume leader go to the first candidate in
  /// set order.
  pub fn compute(
    workout: &Workout,
    exercises: &[ExerciseLog],
    sets: &[SetLog],
    records: &[PersonalRecord],
    lookups: &ExerciseLookups,
  ) -> Self {
    let completed: Vec<&SetLog> = sets.iter().filter(|s| s.is_completed).collect();

    let total_volume: f64 = completed.iter().map(|s| s.volume()).sum();
    let total_reps: i64 = completed.iter().map(|s| s.actual_reps).sum();

    let rpes: Vec<f64> = completed.iter().filter_map(|s| s.actual_rpe).collect();
    let average_rpe = mean(&rpes);

    let heaviest_set = completed
      .iter()
      .copied()
      .reduce(|best, s| if s.volume() > best.volume() { s } else { best })
      .map(|s| HeaviestSet {
        exercise_name: lookups.name_for(s.exercise_log_id).to_string(),
        weight: s.actual_weight,
        reps: s.actual_reps,
        volume: s.volume(),
      });

    let volume_leader = Self::compute_volume_leader(&completed, lookups);
    let average_intensity = Self::compute_average_intensity(&completed, exercises, lookups);

    Self {
      workout_id: workout.id,
      total_volume,
      duration_seconds: workout.duration_seconds.unwrap_or(0),
      total_reps,
      completed_sets: completed.len(),
      average_rpe,
      heaviest_set,
      volume_leader,
      average_intensity,
      personal_records: best_personal_records(records),
    }
  }

  fn compute_volume_leader(completed: &[&SetLog], lookups: &ExerciseLookups) -> Option<VolumeLeader> {
    // Insertion-ordered groups keep the tie-break stable
    let mut groups: Vec<VolumeLeader> = Vec::new();

    for set in completed {
      let name = lookups.name_for(set.exercise_log_id);
      match groups.iter_mut().find(|g| g.exercise_name == name) {
        Some(group) => {
          group.volume += set.volume();
          group.set_count += 1;
        }
        None => groups.push(VolumeLeader {
          exercise_name: name.to_string(),
          volume: set.volume(),
          set_count: 1,
        }),
      }
    }

    groups
      .into_iter()
      .reduce(|best, g| if g.volume > best.volume { g } else { best })
  }

  fn compute_average_intensity(
    completed: &[&SetLog],
    exercises: &[ExerciseLog],
    lookups: &ExerciseLookups,
  ) -> Option<f64> {
    let exercise_ids: HashMap<i64, i64> = exercises.iter().map(|e| (e.id, e.exercise_id)).collect();

    let intensities: Vec<f64> = completed
      .iter()
      .filter_map(|s| {
        let exercise_id = exercise_ids.get(&s.exercise_log_id)?;
        let one_rm = *lookups.one_rep_maxes.get(exercise_id)?;
        if one_rm > 0.0 {
          Some(s.actual_weight / one_rm * 100.0)
        } else {
          None
        }
      })
      .collect();

    mean(&intensities)
  }
}

fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

/// Keep the best record per (exercise, record type).
///
/// WEIGHT records rank by `weight`, ESTIMATED_1RM records by `estimated_1rm`
/// (missing counts as 0). Groups come back in first-seen order and the first
/// record wins a tie, so applying the filter twice changes nothing.
pub fn best_personal_records(records: &[PersonalRecord]) -> Vec<PersonalRecord> {
  let mut best: Vec<PersonalRecord> = Vec::new();
  let mut index: HashMap<(i64, PrType), usize> = HashMap::new();

  for record in records {
    let key = (record.exercise_id, record.record_type);
    match index.get(&key) {
      Some(&i) => {
        if record.ranking_value() > best[i].ranking_value() {
          best[i] = record.clone();
        }
      }
      None => {
        index.insert(key, best.len());
        best.push(record.clone());
      }
    }
  }

  best
}

/// ---------------------------------------------------------------------------
/// Loading
/// ---------------------------------------------------------------------------

/// Fetch everything the calculator needs and compute the summary.
///
/// A missing workout is [`SummaryError::WorkoutNotFound`]; storage failures
/// while fetching the workout, its exercises, sets or records abort with
/// [`SummaryError::Data`]. Name and 1RM lookups are best-effort.
pub async fn load_completion_summary<R>(repo: &R, workout_id: i64) -> Result<CompletionSummary, SummaryError>
where
  R: WorkoutRepository + ?Sized,
{
  let workout = repo
    .get_workout_by_id(workout_id)
    .await?
    .ok_or(SummaryError::WorkoutNotFound(workout_id))?;

  let exercises = repo.get_exercises_for_workout(workout_id).await?;
  let sets = repo.get_sets_for_workout(workout_id).await?;
  let records = repo.get_personal_records_for_workout(workout_id).await?;

  let mut lookups = ExerciseLookups::default();
  let mut seen_exercises = HashSet::new();

  for exercise in &exercises {
    let name = repo.exercise_name_or_id(exercise).await;
    lookups.names.insert(exercise.id, name);

    if !seen_exercises.insert(exercise.exercise_id) {
      continue;
    }
    match repo.get_current_one_rm_estimate(exercise.exercise_id).await {
      Ok(Some(one_rm)) => {
        lookups.one_rep_maxes.insert(exercise.exercise_id, one_rm);
      }
      Ok(None) => {}
      Err(e) => {
        tracing::warn!(
          exercise_id = exercise.exercise_id,
          "Skipping 1RM lookup: {}",
          e
        );
      }
    }
  }

  let summary = CompletionSummary::compute(&workout, &exercises, &sets, &records, &lookups);

  tracing::debug!(
    workout_id,
    total_volume = summary.total_volume,
    completed_sets = summary.completed_sets,
    personal_records = summary.personal_records.len(),
    "Computed completion summary"
  );

  Ok(summary)
}

/// What the completion screen shows once loading finishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SummaryState {
  Loaded { summary: CompletionSummary },
  NotFound { workout_id: i64 },
  Failed { message: String },
}

/// Like [`load_completion_summary`], with errors converted once into a state
pub async fn load_summary_state<R>(repo: &R, workout_id: i64) -> SummaryState
where
  R: WorkoutRepository + ?Sized,
{
  match load_completion_summary(repo, workout_id).await {
    Ok(summary) => SummaryState::Loaded { summary },
    Err(SummaryError::WorkoutNotFound(id)) => {
      tracing::info!(workout_id = id, "Workout not found");
      SummaryState::NotFound { workout_id: id }
    }
    Err(e) => {
      tracing::error!(workout_id, "{}", e);
      SummaryState::Failed {
        message: e.to_string(),
      }
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
