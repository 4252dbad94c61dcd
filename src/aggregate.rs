//! Period aggregation over raw workout history.
//!
//! Pure functions: filter sessions into an inclusive `[start, end]` window
//! and fold their sets into per-exercise or whole-period accumulators. All
//! accumulation is commutative, so results are identical regardless of the
//! order sessions arrive in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::workout::WorkoutSession;

/// ---------------------------------------------------------------------------
/// Per-Exercise Stats
/// ---------------------------------------------------------------------------

/// Accumulated stats for one exercise name over a period.
///
/// Validity gating: only sets with weight > 0 and reps > 0 contribute to
/// `total_volume`, `max_weight`, and `total_reps`. `total_sets` counts every
/// set touched, valid or not, and `completed_sets` counts checked-off sets
/// regardless of validity.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AggregatedExerciseStats {
  pub total_volume: f64,
  pub total_sets: i64,
  pub completed_sets: i64,
  pub max_weight: f64,
  pub total_reps: i64,
}

impl AggregatedExerciseStats {
  fn add_set(&mut self, set: &crate::models::workout::SetEntry) {
    self.total_sets += 1;
    if set.completed {
      self.completed_sets += 1;
    }
    if set.is_valid() {
      let weight = set.weight_value();
      if weight > self.max_weight {
        self.max_weight = weight;
      }
      self.total_volume += set.volume();
      self.total_reps += set.reps_value();
    }
  }

  /// Average reps per set. The denominator is deliberately *all* sets, not
  /// just valid ones, while the numerator only counts valid-set reps - the
  /// logging UI reads this as "reps per set attempted".
  pub fn average_reps(&self) -> f64 {
    if self.total_sets > 0 {
      self.total_reps as f64 / self.total_sets as f64
    } else {
      0.0
    }
  }
}

/// ---------------------------------------------------------------------------
/// Whole-Period Summary
/// ---------------------------------------------------------------------------

/// Roll-up of a closed date range `[start_date, end_date]`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PeriodSummary {
  pub start_date: String,
  pub end_date: String,
  pub workout_count: i64,
  pub total_volume: f64,
  pub total_sets: i64,
  pub total_duration_minutes: i64,
}

/// ---------------------------------------------------------------------------
/// Aggregation
/// ---------------------------------------------------------------------------

fn in_range(date: &str, start: &str, end: &str) -> bool {
  // Lexicographic compare on YYYY-MM-DD is a date compare
  date >= start && date <= end
}

/// Aggregate per-exercise stats for every session with
/// `start <= date <= end`. One exercise name accumulates across all sessions
/// in the window; identity is the exact string.
pub fn aggregate_period(
  history: &[WorkoutSession],
  start: &str,
  end: &str,
) -> BTreeMap<String, AggregatedExerciseStats> {
  let mut stats: BTreeMap<String, AggregatedExerciseStats> = BTreeMap::new();

  for session in history.iter().filter(|s| in_range(&s.date, start, end)) {
    for exercise in &session.exercises {
      let entry = stats.entry(exercise.name.clone()).or_default();
      for set in &exercise.sets {
        entry.add_set(set);
      }
    }
  }

  stats
}

/// Fold a window into one `PeriodSummary`.
pub fn summarize_period(history: &[WorkoutSession], start: &str, end: &str) -> PeriodSummary {
  let mut summary = PeriodSummary {
    start_date: start.to_string(),
    end_date: end.to_string(),
    ..Default::default()
  };

  for session in history.iter().filter(|s| in_range(&s.date, start, end)) {
    summary.workout_count += 1;
    summary.total_duration_minutes += session.duration_minutes;
    for exercise in &session.exercises {
      for set in &exercise.sets {
        summary.total_sets += 1;
        if set.is_valid() {
          summary.total_volume += set.volume();
        }
      }
    }
  }

  summary
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
