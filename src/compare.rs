//! Custom period comparison: same aggregation and classification machinery
//! as the weekly engine, but over two caller-supplied date ranges. Ranges
//! may overlap, touch, or be any length. Unlike the weekly diff, every
//! exercise seen in *either* period appears in the output with full stat
//! blocks on both sides (zeros where absent).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::aggregate::{aggregate_period, summarize_period, AggregatedExerciseStats, PeriodSummary};
use crate::dates;
use crate::error::{EngineError, Result};
use crate::models::workout::WorkoutSession;
use crate::trend::{self, TrendResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseComparison {
  pub name: String,
  pub current: AggregatedExerciseStats,
  pub previous: AggregatedExerciseStats,
  pub weight_delta: f64,
  pub volume_percent: f64,
  /// True iff the exercise appears only in the current period.
  pub is_new: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPeriodComparison {
  pub current: PeriodSummary,
  pub previous: PeriodSummary,
  pub trend: TrendResult,
  pub exercises: Vec<ExerciseComparison>,
}

fn validate_range(label: &str, start: &str, end: &str) -> Result<()> {
  let (Some(s), Some(e)) = (dates::parse_day(start), dates::parse_day(end)) else {
    return Err(EngineError::InvalidDateRange(format!(
      "{} range has a malformed date ({} / {})",
      label, start, end
    )));
  };
  if e < s {
    return Err(EngineError::InvalidDateRange(format!(
      "{} range ends before it starts ({} > {})",
      label, start, end
    )));
  }
  Ok(())
}

/// Compare two arbitrary inclusive date ranges. Rejects reversed or
/// malformed ranges before any aggregation runs.
pub fn compare_custom(
  history: &[WorkoutSession],
  cur_start: &str,
  cur_end: &str,
  prev_start: &str,
  prev_end: &str,
) -> Result<CustomPeriodComparison> {
  validate_range("current", cur_start, cur_end)?;
  validate_range("previous", prev_start, prev_end)?;

  let current = summarize_period(history, cur_start, cur_end);
  let previous = summarize_period(history, prev_start, prev_end);

  let trend = trend::classify(
    current.total_volume,
    previous.total_volume,
    current.workout_count,
    previous.workout_count,
  );

  let current_stats = aggregate_period(history, cur_start, cur_end);
  let previous_stats = aggregate_period(history, prev_start, prev_end);

  let names: BTreeSet<String> = current_stats
    .keys()
    .chain(previous_stats.keys())
    .cloned()
    .collect();

  let mut exercises: Vec<ExerciseComparison> = names
    .into_iter()
    .map(|name| {
      let cur = current_stats.get(&name).cloned().unwrap_or_default();
      let prev = previous_stats.get(&name).cloned().unwrap_or_default();
      let is_new = current_stats.contains_key(&name) && !previous_stats.contains_key(&name);

      ExerciseComparison {
        weight_delta: cur.max_weight - prev.max_weight,
        volume_percent: trend::volume_change_percent(cur.total_volume, prev.total_volume),
        is_new,
        name,
        current: cur,
        previous: prev,
      }
    })
    .collect();

  exercises.sort_by(|a, b| {
    b.current
      .total_volume
      .partial_cmp(&a.current.total_volume)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.name.cmp(&b.name))
  });

  Ok(CustomPeriodComparison {
    current,
    previous,
    trend,
    exercises,
  })
}
