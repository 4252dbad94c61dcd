use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::dates;

/// Default weekly workout goal for users who never set one.
pub const DEFAULT_WEEKLY_GOAL: i64 = 4;

/// Persisted streak state. Recomputed from raw history on every refresh
/// rather than incremented - only `longest_streak` carries forward
/// monotonically from the stored value.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct WeeklyStreakData {
  pub current_streak: i64,
  pub longest_streak: i64,
  /// Week-start (Sunday) key of the newest week that counted, if any.
  pub last_completed_week: Option<String>,
  pub total_workouts: i64,
  pub this_week_workouts: i64,
}

/// The monthly freeze credit and everything it has touched.
///
/// `frozen_weeks` and `pending_freeze_week` survive the monthly reset; only
/// the credit itself replenishes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FreezeState {
  /// 0 or 1 - one credit per calendar month.
  pub freezes_available: i64,
  /// `YYYY-MM` month the credit was last replenished.
  pub last_reset_month: String,
  /// Week-start keys that have been frozen, reactively or proactively.
  #[serde(default)]
  pub frozen_weeks: BTreeSet<String>,
  /// Week-start key reserved ahead of time, if any.
  #[serde(default)]
  pub pending_freeze_week: Option<String>,
}

impl FreezeState {
  /// First-use state: one credit, stamped with the current month.
  pub fn new(today: NaiveDate) -> Self {
    Self {
      freezes_available: 1,
      last_reset_month: dates::month_key(today),
      frozen_weeks: BTreeSet::new(),
      pending_freeze_week: None,
    }
  }

  /// Replenish the credit exactly once per calendar month. Frozen-week
  /// history and any pending reservation are untouched.
  pub fn apply_monthly_reset(&mut self, today: NaiveDate) {
    let month = dates::month_key(today);
    if self.last_reset_month != month {
      self.freezes_available = 1;
      self.last_reset_month = month;
    }
  }

  pub fn is_frozen(&self, week_key: &str) -> bool {
    self.frozen_weeks.contains(week_key)
  }
}

/// A user's preferences row, resolved at the load boundary: absent rows and
/// absent JSON blobs become defaults here, never deeper in the algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesRecord {
  pub user_key: String,
  pub weekly_workout_goal: i64,
  pub weekly_streak_data: WeeklyStreakData,
  pub streak_freeze_data: FreezeState,
}

impl PreferencesRecord {
  pub fn new(user_key: &str, today: NaiveDate) -> Self {
    Self {
      user_key: user_key.to_string(),
      weekly_workout_goal: DEFAULT_WEEKLY_GOAL,
      weekly_streak_data: WeeklyStreakData::default(),
      streak_freeze_data: FreezeState::new(today),
    }
  }
}

/// Raw preferences row as stored; streak and freeze state are JSON columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PreferencesRow {
  pub user_key: String,
  pub weekly_workout_goal: Option<i64>,
  pub weekly_streak_json: Option<String>,
  pub streak_freeze_json: Option<String>,
  pub updated_at: Option<DateTime<Utc>>,
}
