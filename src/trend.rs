//! Trend classification between two periods.
//!
//! A deliberate ±5% dead-zone keeps the weekly check-in from flapping
//! between "up" and "down" on ordinary week-to-week noise.

use serde::{Deserialize, Serialize};

/// Classification thresholds: beyond +5% is Up, below -5% is Down.
const UP_THRESHOLD_PCT: f64 = 5.0;
const DOWN_THRESHOLD_PCT: f64 = -5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
  Up,
  Down,
  Flat,
}

impl TrendDirection {
  pub fn as_str(&self) -> &'static str {
    match self {
      TrendDirection::Up => "up",
      TrendDirection::Down => "down",
      TrendDirection::Flat => "flat",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendResult {
  pub direction: TrendDirection,
  pub volume_change_percent: f64,
  pub workout_count_delta: i64,
  pub title: String,
  pub subtitle: String,
}

impl TrendResult {
  /// Distinguished result for a user with no logged history yet. Well-formed
  /// and all-zero rather than an error.
  pub fn no_data() -> Self {
    Self {
      direction: TrendDirection::Flat,
      volume_change_percent: 0.0,
      workout_count_delta: 0,
      title: "No data yet".to_string(),
      subtitle: "Log a workout to start tracking your weekly trend".to_string(),
    }
  }
}

/// Percent change from `previous` to `current` with the first-time baseline
/// rule: a jump from zero to anything positive reads as +100%, not a
/// division error, and zero-to-zero is 0%.
pub fn volume_change_percent(current: f64, previous: f64) -> f64 {
  if previous > 0.0 {
    ((current - previous) / previous) * 100.0
  } else if current > 0.0 {
    100.0
  } else {
    0.0
  }
}

/// Compare two periods' volume and workout counts.
pub fn classify(
  current_volume: f64,
  previous_volume: f64,
  current_workouts: i64,
  previous_workouts: i64,
) -> TrendResult {
  let pct = volume_change_percent(current_volume, previous_volume);

  let direction = if pct > UP_THRESHOLD_PCT {
    TrendDirection::Up
  } else if pct < DOWN_THRESHOLD_PCT {
    TrendDirection::Down
  } else {
    TrendDirection::Flat
  };

  let (title, subtitle) = match direction {
    TrendDirection::Up => (
      "Trending up".to_string(),
      format!("Volume up {:.0}% on last week", pct),
    ),
    TrendDirection::Down => (
      "Trending down".to_string(),
      format!("Volume down {:.0}% on last week", pct.abs()),
    ),
    TrendDirection::Flat => (
      "Holding steady".to_string(),
      "Volume is about level with last week".to_string(),
    ),
  };

  TrendResult {
    direction,
    volume_change_percent: pct,
    workout_count_delta: current_workouts - previous_workouts,
    title,
    subtitle,
  }
}
