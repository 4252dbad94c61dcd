//! Test utilities and helpers for integration and unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Session factories and seeders
//! - Helper assertions

use sqlx::SqlitePool;

use crate::models::workout::{ExerciseEntry, SetEntry, WorkoutSession};

/// Exercises described as `(name, [(weight, reps, completed)])`.
pub type ExerciseSpec<'a> = (&'a str, &'a [(&'a str, &'a str, bool)]);

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Insert one session row for a user
pub async fn seed_session(
  pool: &SqlitePool,
  user_key: &str,
  id: &str,
  date: &str,
  exercises: &[ExerciseSpec<'_>],
) {
  let session = session_on(id, date, exercises);
  let exercises_json =
    serde_json::to_string(&session.exercises).expect("Failed to serialize exercises");

  sqlx::query(
    r#"
    INSERT INTO workout_sessions (id, user_key, date, duration_minutes, exercises_json)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
  )
  .bind(id)
  .bind(user_key)
  .bind(date)
  .bind(session.duration_minutes)
  .bind(&exercises_json)
  .execute(pool)
  .await
  .expect("Failed to insert test session");
}

/// ---------------------------------------------------------------------------
/// Session Factories
/// ---------------------------------------------------------------------------

/// Build a session from `(name, [(weight, reps, completed)])` specs
pub fn session_on(id: &str, date: &str, exercises: &[ExerciseSpec<'_>]) -> WorkoutSession {
  WorkoutSession {
    id: id.to_string(),
    date: date.to_string(),
    duration_minutes: 60,
    exercises: exercises
      .iter()
      .map(|(name, sets)| ExerciseEntry {
        name: name.to_string(),
        sets: sets
          .iter()
          .map(|(weight, reps, completed)| SetEntry::new(weight, reps, *completed))
          .collect(),
      })
      .collect(),
  }
}

/// A session with a single completed set of one lift
pub fn single_lift_session(
  id: &str,
  date: &str,
  name: &str,
  weight: &str,
  reps: &str,
) -> WorkoutSession {
  session_on(id, date, &[(name, &[(weight, reps, true)])])
}

/// A minimal session where only the date matters (streak tests)
pub fn session_on_date(id: &str, date: &str) -> WorkoutSession {
  single_lift_session(id, date, "Squat", "225", "5")
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('workout_sessions', 'user_preferences')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_session_roundtrips_exercises() {
    let pool = setup_test_db().await;

    seed_session(&pool, "u1", "s1", "2025-03-10", &[("Squat", &[("225", "5", true)])]).await;

    let history = crate::store::load_history(&pool, "u1")
      .await
      .expect("Should load");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].exercises[0].name, "Squat");
    assert_eq!(history[0].exercises[0].sets[0].weight_value(), 225.0);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_factories_build_valid_sessions() {
    let session = single_lift_session("a", "2025-03-10", "Bench Press", "185", "8");
    assert_eq!(session.date, "2025-03-10");
    assert!(session.exercises[0].sets[0].is_valid());

    let session = session_on(
      "b",
      "2025-03-11",
      &[("Squat", &[("225", "5", true), ("", "", false)])],
    );
    assert_eq!(session.exercises[0].sets.len(), 2);
    assert!(!session.exercises[0].sets[1].is_valid());
  }
}
