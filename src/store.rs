//! Storage collaborators: the read-only History Store and the Preferences
//! Store. All get/set-by-key; absent or corrupt data resolves to defaults
//! here, at the boundary, so the engines never see a missing record.

use chrono::NaiveDate;

use crate::db::DbPool;
use crate::error::Result;
use crate::models::preferences::{
  FreezeState, PreferencesRecord, PreferencesRow, WeeklyStreakData, DEFAULT_WEEKLY_GOAL,
};
use crate::models::workout::{ExerciseEntry, WorkoutSession, WorkoutSessionRow};

/// ---------------------------------------------------------------------------
/// History Store (read-only)
/// ---------------------------------------------------------------------------

/// Load a user's full workout history, newest first.
///
/// Rows are sorted date-descending defensively even though the query orders
/// them, since history is an unordered multiset as far as callers are
/// concerned. A session with corrupt `exercises_json` is logged and skipped;
/// a user with no rows gets an empty history, never an error.
pub async fn load_history(pool: &DbPool, user_key: &str) -> Result<Vec<WorkoutSession>> {
  let rows = sqlx::query_as::<_, WorkoutSessionRow>(
    "SELECT * FROM workout_sessions WHERE user_key = ? ORDER BY date DESC",
  )
  .bind(user_key)
  .fetch_all(pool)
  .await?;

  let mut sessions: Vec<WorkoutSession> = Vec::with_capacity(rows.len());
  for row in rows {
    let exercises: Vec<ExerciseEntry> = match row.exercises_json.as_deref() {
      Some(json) => match serde_json::from_str(json) {
        Ok(parsed) => parsed,
        Err(e) => {
          log::warn!("Skipping session {} with corrupt exercises: {}", row.id, e);
          continue;
        }
      },
      None => Vec::new(),
    };

    sessions.push(WorkoutSession {
      id: row.id,
      date: row.date,
      duration_minutes: row.duration_minutes,
      exercises,
    });
  }

  sessions.sort_by(|a, b| b.date.cmp(&a.date));
  Ok(sessions)
}

/// ---------------------------------------------------------------------------
/// Preferences Store
/// ---------------------------------------------------------------------------

/// Load a user's preferences, substituting defaults for anything absent:
/// no row at all, a NULL goal, or missing/corrupt streak and freeze blobs.
/// `today` stamps the month on a freshly created freeze state.
pub async fn load_preferences(
  pool: &DbPool,
  user_key: &str,
  today: NaiveDate,
) -> Result<PreferencesRecord> {
  let row = sqlx::query_as::<_, PreferencesRow>(
    "SELECT * FROM user_preferences WHERE user_key = ?",
  )
  .bind(user_key)
  .fetch_optional(pool)
  .await?;

  let Some(row) = row else {
    return Ok(PreferencesRecord::new(user_key, today));
  };

  let weekly_streak_data = row
    .weekly_streak_json
    .as_deref()
    .and_then(|json| {
      serde_json::from_str::<WeeklyStreakData>(json)
        .map_err(|e| log::warn!("Corrupt streak data for {}: {}", user_key, e))
        .ok()
    })
    .unwrap_or_default();

  let streak_freeze_data = row
    .streak_freeze_json
    .as_deref()
    .and_then(|json| {
      serde_json::from_str::<FreezeState>(json)
        .map_err(|e| log::warn!("Corrupt freeze data for {}: {}", user_key, e))
        .ok()
    })
    .unwrap_or_else(|| FreezeState::new(today));

  Ok(PreferencesRecord {
    user_key: row.user_key,
    weekly_workout_goal: row.weekly_workout_goal.unwrap_or(DEFAULT_WEEKLY_GOAL),
    weekly_streak_data,
    streak_freeze_data,
  })
}

/// Set the weekly workout goal, leaving the other columns alone.
pub async fn save_weekly_goal(pool: &DbPool, user_key: &str, goal: i64) -> Result<()> {
  sqlx::query(
    r#"
    INSERT INTO user_preferences (user_key, weekly_workout_goal, updated_at)
    VALUES (?, ?, CURRENT_TIMESTAMP)
    ON CONFLICT(user_key) DO UPDATE SET
      weekly_workout_goal = excluded.weekly_workout_goal,
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(user_key)
  .bind(goal)
  .execute(pool)
  .await?;

  Ok(())
}

/// Persist recomputed streak state. Partial update: only the streak column.
pub async fn save_streak_data(
  pool: &DbPool,
  user_key: &str,
  data: &WeeklyStreakData,
) -> Result<()> {
  let json = serde_json::to_string(data)?;

  sqlx::query(
    r#"
    INSERT INTO user_preferences (user_key, weekly_streak_json, updated_at)
    VALUES (?, ?, CURRENT_TIMESTAMP)
    ON CONFLICT(user_key) DO UPDATE SET
      weekly_streak_json = excluded.weekly_streak_json,
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(user_key)
  .bind(&json)
  .execute(pool)
  .await?;

  Ok(())
}

/// Persist freeze state. Partial update: only the freeze column.
pub async fn save_freeze_state(
  pool: &DbPool,
  user_key: &str,
  state: &FreezeState,
) -> Result<()> {
  let json = serde_json::to_string(state)?;

  sqlx::query(
    r#"
    INSERT INTO user_preferences (user_key, streak_freeze_json, updated_at)
    VALUES (?, ?, CURRENT_TIMESTAMP)
    ON CONFLICT(user_key) DO UPDATE SET
      streak_freeze_json = excluded.streak_freeze_json,
      updated_at = CURRENT_TIMESTAMP
    "#,
  )
  .bind(user_key)
  .bind(&json)
  .execute(pool)
  .await?;

  Ok(())
}

/// Number of preference writes recorded for a user. Test hook for the
/// no-redundant-write property.
#[cfg(test)]
pub async fn preferences_row_version(pool: &DbPool, user_key: &str) -> Result<Option<String>> {
  use sqlx::Row;

  let row = sqlx::query("SELECT updated_at FROM user_preferences WHERE user_key = ?")
    .bind(user_key)
    .fetch_optional(pool)
    .await?;

  Ok(row.map(|r| r.get::<String, _>("updated_at")))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
