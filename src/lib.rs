//! Strength-training analytics engine.
//!
//! Two families of derived state over a user's workout history:
//! - Windowed performance analytics: rolling-week and custom-period
//!   volume/set/weight comparisons with trend classification, feeding the
//!   weekly check-in and progression recommendations.
//! - A consistency streak against a weekly goal, with a one-per-month
//!   "freeze" credit that keeps one missed week from resetting it.
//!
//! Pure computation lives in `aggregate`, `trend`, `weekly`, `compare`, and
//! `streak`; the store-backed entry points wrap it with one read and at most
//! one write-back per invocation.

pub mod aggregate;
pub mod compare;
pub mod dates;
pub mod db;
pub mod error;
pub mod models;
pub mod store;
pub mod streak;
pub mod trend;
pub mod weekly;

#[cfg(test)]
pub mod test_utils;

pub use aggregate::{AggregatedExerciseStats, PeriodSummary};
pub use compare::{compare_custom, CustomPeriodComparison, ExerciseComparison};
pub use error::{EngineError, Result};
pub use models::{ExerciseEntry, FreezeState, PreferencesRecord, SetEntry, WeeklyStreakData, WorkoutSession};
pub use streak::{compute_streak, refresh_streak, reserve_freeze, StreakComputation};
pub use trend::{classify, TrendDirection, TrendResult};
pub use weekly::{analyze_rolling_week, analyze_rolling_week_for_user, WeeklyAnalysisResult};
