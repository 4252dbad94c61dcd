pub mod workout;
pub mod preferences;

pub use workout::{ExerciseEntry, SetEntry, WorkoutSession};
pub use preferences::{FreezeState, PreferencesRecord, WeeklyStreakData};
