//! Workout summary and training-pattern aggregation for Featherweight.
//!
//! - [`summary`]: completion summary of a single workout
//! - [`patterns`]: weekly consistency and rest-interval distribution
//! - [`repository`]: the read boundary both calculators load through

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod patterns;
pub mod repository;
pub mod summary;

#[cfg(test)]
mod test_utils;

pub use config::Config;
pub use error::{ConfigError, DataError, SummaryError};
pub use patterns::{load_training_patterns, TrainingPatternMetrics};
pub use repository::{SqliteRepository, WorkoutRepository};
pub use summary::{best_personal_records, load_completion_summary, load_summary_state, CompletionSummary, SummaryState};
