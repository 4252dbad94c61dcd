use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single logged set within an exercise.
///
/// Weight and reps come straight from the logging UI as free text, so both
/// may be empty or unparseable. Parsing happens at read time via
/// `weight_value` / `reps_value`, never at ingest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
  #[serde(default)]
  pub weight: String,
  #[serde(default)]
  pub reps: String,
  #[serde(default)]
  pub completed: bool,
}

impl SetEntry {
  pub fn new(weight: &str, reps: &str, completed: bool) -> Self {
    Self {
      weight: weight.to_string(),
      reps: reps.to_string(),
      completed,
    }
  }

  /// Weight in whatever unit the user logs; empty or garbage input reads as 0.
  pub fn weight_value(&self) -> f64 {
    self.weight.trim().parse::<f64>().unwrap_or(0.0)
  }

  /// Rep count; empty or garbage input reads as 0.
  pub fn reps_value(&self) -> i64 {
    self.reps.trim().parse::<i64>().unwrap_or(0)
  }

  /// A set counts toward volume and max-weight stats only when both weight
  /// and reps are positive. Completion does not factor in.
  pub fn is_valid(&self) -> bool {
    self.weight_value() > 0.0 && self.reps_value() > 0
  }

  pub fn volume(&self) -> f64 {
    self.weight_value() * self.reps_value() as f64
  }
}

/// One exercise within a session. The name is the identity key across the
/// whole history: exact, case-sensitive string match only. No fuzzy or
/// substring matching - "Bench Press" and "bench press" are different lifts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
  pub name: String,
  #[serde(default)]
  pub sets: Vec<SetEntry>,
}

/// A logged workout session. `date` is a local calendar day in `YYYY-MM-DD`
/// form; lexicographic comparison on it is a valid date comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSession {
  pub id: String,
  pub date: String,
  pub duration_minutes: i64,
  #[serde(default)]
  pub exercises: Vec<ExerciseEntry>,
}

/// Storage row for a session; exercises are kept as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSessionRow {
  pub id: String,
  pub user_key: String,
  pub date: String,
  pub duration_minutes: i64,
  pub exercises_json: Option<String>,
  pub created_at: Option<DateTime<Utc>>,
}
