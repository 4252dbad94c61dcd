//! Weekly analysis engine: compares a rolling 7-day window against the
//! 7 days before it, plus a day-to-day sub-comparison used by the weekly
//! check-in screen. "Rolling" means the window ends today - it is not
//! anchored to the calendar week the streak engine uses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate_period, summarize_period, AggregatedExerciseStats, PeriodSummary};
use crate::dates;
use crate::db::DbPool;
use crate::error::Result;
use crate::models::workout::WorkoutSession;
use crate::store;
use crate::trend::{self, TrendResult};

/// ---------------------------------------------------------------------------
/// Result Types
/// ---------------------------------------------------------------------------

/// Per-exercise movement between the two windows. Only exercises present in
/// the current window appear; an exercise absent last week is `is_new` with
/// the +100% baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseTrend {
  pub name: String,
  pub current: AggregatedExerciseStats,
  /// Current-window max weight minus previous-window max weight.
  pub weight_delta: f64,
  pub volume_percent: f64,
  pub is_new: bool,
}

/// Progress through the current week measured against the same number of
/// elapsed days from the previous week, with the previous week's full total
/// as the completion target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayToDayProgress {
  /// Days elapsed from the current window's start through today, inclusive.
  pub days_elapsed: i64,
  pub this_week_so_far: PeriodSummary,
  pub last_week_same_span: PeriodSummary,
  pub last_week_full: PeriodSummary,
  /// This week's volume so far as a percentage of last week's full total;
  /// 0 when last week had no volume.
  pub progress_percent: f64,
  /// Clamped to zero - never negative even when this week already exceeds
  /// last week's full total.
  pub remaining_workouts: i64,
  pub remaining_volume: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAnalysisResult {
  pub current: PeriodSummary,
  pub previous: PeriodSummary,
  pub trend: TrendResult,
  pub exercises: Vec<ExerciseTrend>,
  pub day_to_day: DayToDayProgress,
  /// Surfaced for the check-in UI; does not alter any of the math above.
  pub weekly_goal: i64,
}

/// ---------------------------------------------------------------------------
/// Analysis
/// ---------------------------------------------------------------------------

/// Analyze the rolling week ending `today` against the week before it.
///
/// Current window is `[today - 6, today]`; previous is the 7 days
/// immediately preceding it. An empty history produces an all-zero result
/// with the distinguished no-data trend rather than an error.
pub fn analyze_rolling_week(
  history: &[WorkoutSession],
  weekly_goal: i64,
  today: NaiveDate,
) -> WeeklyAnalysisResult {
  let current_start = dates::days_ago(today, 6);
  let previous_start = dates::days_ago(today, 13);
  let previous_end = dates::days_ago(today, 7);

  let cur_start = dates::format_day(current_start);
  let cur_end = dates::format_day(today);
  let prev_start = dates::format_day(previous_start);
  let prev_end = dates::format_day(previous_end);

  let current = summarize_period(history, &cur_start, &cur_end);
  let previous = summarize_period(history, &prev_start, &prev_end);

  let trend = if history.is_empty() {
    TrendResult::no_data()
  } else {
    trend::classify(
      current.total_volume,
      previous.total_volume,
      current.workout_count,
      previous.workout_count,
    )
  };

  let exercises = exercise_trends(history, &cur_start, &cur_end, &prev_start, &prev_end);
  let day_to_day = day_to_day_progress(history, current_start, today, previous_start);

  WeeklyAnalysisResult {
    current,
    previous,
    trend,
    exercises,
    day_to_day,
    weekly_goal,
  }
}

/// Diff the current window's exercises against the previous window, sorted
/// by current-window volume descending.
fn exercise_trends(
  history: &[WorkoutSession],
  cur_start: &str,
  cur_end: &str,
  prev_start: &str,
  prev_end: &str,
) -> Vec<ExerciseTrend> {
  let current_stats = aggregate_period(history, cur_start, cur_end);
  let previous_stats = aggregate_period(history, prev_start, prev_end);

  let mut trends: Vec<ExerciseTrend> = current_stats
    .into_iter()
    .map(|(name, stats)| match previous_stats.get(&name) {
      Some(prev) => ExerciseTrend {
        weight_delta: stats.max_weight - prev.max_weight,
        volume_percent: trend::volume_change_percent(stats.total_volume, prev.total_volume),
        is_new: false,
        name,
        current: stats,
      },
      None => ExerciseTrend {
        weight_delta: stats.max_weight,
        volume_percent: 100.0,
        is_new: true,
        name,
        current: stats,
      },
    })
    .collect();

  trends.sort_by(|a, b| {
    b.current
      .total_volume
      .partial_cmp(&a.current.total_volume)
      .unwrap_or(std::cmp::Ordering::Equal)
      .then_with(|| a.name.cmp(&b.name))
  });

  trends
}

/// The day-to-day sub-comparison: `[current_start, today]` against the same
/// number of elapsed days taken from the previous week, with the previous
/// week's full 7-day totals as the target to beat.
fn day_to_day_progress(
  history: &[WorkoutSession],
  current_start: NaiveDate,
  today: NaiveDate,
  previous_start: NaiveDate,
) -> DayToDayProgress {
  let days_elapsed = dates::days_inclusive(current_start, today);
  let same_span_end = previous_start + chrono::Duration::days(days_elapsed - 1);
  let previous_end = previous_start + chrono::Duration::days(6);

  let this_week_so_far = summarize_period(
    history,
    &dates::format_day(current_start),
    &dates::format_day(today),
  );
  let last_week_same_span = summarize_period(
    history,
    &dates::format_day(previous_start),
    &dates::format_day(same_span_end),
  );
  let last_week_full = summarize_period(
    history,
    &dates::format_day(previous_start),
    &dates::format_day(previous_end),
  );

  let progress_percent = if last_week_full.total_volume > 0.0 {
    (this_week_so_far.total_volume / last_week_full.total_volume) * 100.0
  } else {
    0.0
  };

  let remaining_workouts =
    (last_week_full.workout_count - this_week_so_far.workout_count).max(0);
  let remaining_volume = (last_week_full.total_volume - this_week_so_far.total_volume).max(0.0);

  DayToDayProgress {
    days_elapsed,
    this_week_so_far,
    last_week_same_span,
    last_week_full,
    progress_percent,
    remaining_workouts,
    remaining_volume,
  }
}

/// ---------------------------------------------------------------------------
/// Store-Backed Entry Point
/// ---------------------------------------------------------------------------

/// Run the rolling-week analysis for a stored user: one history read, one
/// preferences read, pure computation, no write-back.
pub async fn analyze_rolling_week_for_user(
  pool: &DbPool,
  user_key: &str,
) -> Result<WeeklyAnalysisResult> {
  let today = dates::local_today();
  let history = store::load_history(pool, user_key).await?;
  let prefs = store::load_preferences(pool, user_key, today).await?;

  Ok(analyze_rolling_week(
    &history,
    prefs.weekly_workout_goal,
    today,
  ))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
