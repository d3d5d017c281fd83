pub mod exercise;
pub mod frequency;
pub mod personal_record;
pub mod workout;

pub use exercise::{ExerciseLog, SetLog};
pub use frequency::FrequencyDataPoint;
pub use personal_record::{PersonalRecord, PrType};
pub use workout::{Workout, WorkoutStatus};
