//! Streak & Freeze Engine
//!
//! Weekly-goal consistency tracking over Sunday-anchored week buckets, with
//! a one-per-calendar-month "freeze" credit that lets a missed week still
//! count. The streak is derived state: every refresh recomputes it from raw
//! history rather than incrementing a stored counter. Only `longest_streak`
//! carries forward monotonically.
//!
//! Key rules:
//! - The current (incomplete) week is always skipped by the walk
//! - A week counts if it hit the goal or holds a freeze
//! - At most one freeze is consumed per walk, and at most one per month
//! - Reactive (during the walk) and proactive (reserved ahead) freezes
//!   spend the same monthly credit - first one wins

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::dates;
use crate::db::DbPool;
use crate::error::Result;
use crate::models::preferences::{FreezeState, WeeklyStreakData};
use crate::models::workout::WorkoutSession;
use crate::store;

// ---------------------------------------------------------------------------
/// Week Bucketing
// ---------------------------------------------------------------------------

/// Sessions per week, keyed by the week's Sunday. Sessions with malformed
/// dates are logged and dropped; they can never break or extend a streak.
pub fn bucket_by_week(history: &[WorkoutSession]) -> BTreeMap<NaiveDate, i64> {
    let mut buckets: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for session in history {
        match dates::parse_day(&session.date) {
            Some(day) => {
                *buckets.entry(dates::week_start(day)).or_insert(0) += 1;
            }
            None => {
                log::warn!(
                    "Skipping session {} with malformed date {:?}",
                    session.id,
                    session.date
                );
            }
        }
    }

    buckets
}

// ---------------------------------------------------------------------------
/// Streak Computation (pure)
// ---------------------------------------------------------------------------

/// Result of one streak walk. `freeze` is the (possibly mutated) freeze
/// state; `freeze_consumed` records whether this walk spent the credit.
#[derive(Debug, Clone, PartialEq)]
pub struct StreakComputation {
    pub streak: WeeklyStreakData,
    pub freeze: FreezeState,
    pub freeze_consumed: bool,
}

/// Recompute the streak from scratch against `goal`.
///
/// Walks week buckets newest-first starting at the last complete week (the
/// week containing `today` is skipped unconditionally - it can't be judged
/// until it ends). A week extends the streak if it hit the goal or is
/// frozen; a missed week consumes the freeze credit if one remains this
/// month; otherwise the streak is broken there. The walk never visits weeks
/// earlier than the earliest bucketed week, so the credit cannot be spent on
/// the void before the user's first workout.
///
/// `previous_longest` is the stored longest streak; the result's
/// `longest_streak` never goes below it.
pub fn compute_streak(
    history: &[WorkoutSession],
    freeze_state: &FreezeState,
    goal: i64,
    previous_longest: i64,
    today: NaiveDate,
) -> StreakComputation {
    let buckets = bucket_by_week(history);
    let current_week = dates::week_start(today);

    let total_workouts: i64 = buckets.values().sum();
    let this_week_workouts = buckets.get(&current_week).copied().unwrap_or(0);

    let mut freeze = freeze_state.clone();
    let mut current_streak: i64 = 0;
    let mut last_completed_week: Option<String> = None;
    // One-shot guard: a single walk consumes at most one freeze. Under the
    // monthly reset rule this is implied by freezes_available hitting 0,
    // but the guard states the intent on its own.
    let mut freeze_consumed = false;

    if let Some(earliest_week) = buckets.keys().next().copied() {
        let mut week = current_week - Duration::days(7);

        while week >= earliest_week {
            let count = buckets.get(&week).copied().unwrap_or(0);
            let week_key = dates::format_day(week);

            if count >= goal || freeze.is_frozen(&week_key) {
                current_streak += 1;
                if last_completed_week.is_none() {
                    last_completed_week = Some(week_key);
                }
            } else if !freeze_consumed && freeze.freezes_available > 0 {
                // Reactive freeze: save the just-missed week and count it
                freeze.frozen_weeks.insert(week_key.clone());
                freeze.freezes_available = 0;
                freeze_consumed = true;
                current_streak += 1;
                if last_completed_week.is_none() {
                    last_completed_week = Some(week_key);
                }
            } else {
                // Streak broken at this week
                break;
            }

            week -= Duration::days(7);
        }
    }

    let streak = WeeklyStreakData {
        current_streak,
        longest_streak: previous_longest.max(current_streak),
        last_completed_week,
        total_workouts,
        this_week_workouts,
    };

    StreakComputation {
        streak,
        freeze,
        freeze_consumed,
    }
}

// ---------------------------------------------------------------------------
/// Store-Backed Entry Points
// ---------------------------------------------------------------------------

/// Refresh a user's streak: read history and preferences, apply the monthly
/// freeze reset, recompute, and write back only what changed. Returns the
/// recomputed streak data either way.
pub async fn refresh_streak(pool: &DbPool, user_key: &str) -> Result<WeeklyStreakData> {
    refresh_streak_at(pool, user_key, dates::local_today()).await
}

/// `refresh_streak` with an explicit "today" so tests can fix the clock.
pub async fn refresh_streak_at(
    pool: &DbPool,
    user_key: &str,
    today: NaiveDate,
) -> Result<WeeklyStreakData> {
    let history = store::load_history(pool, user_key).await?;
    let prefs = store::load_preferences(pool, user_key, today).await?;

    let mut freeze = prefs.streak_freeze_data.clone();
    freeze.apply_monthly_reset(today);

    let computation = compute_streak(
        &history,
        &freeze,
        prefs.weekly_workout_goal,
        prefs.weekly_streak_data.longest_streak,
        today,
    );

    if computation.streak != prefs.weekly_streak_data {
        store::save_streak_data(pool, user_key, &computation.streak).await?;
    }
    if computation.freeze != prefs.streak_freeze_data {
        store::save_freeze_state(pool, user_key, &computation.freeze).await?;
    }

    Ok(computation.streak)
}

/// Reserve the freeze credit ahead of time for the week containing `week`.
pub async fn reserve_freeze(pool: &DbPool, user_key: &str, week: NaiveDate) -> Result<FreezeState> {
    reserve_freeze_at(pool, user_key, week, dates::local_today()).await
}

/// Proactive freeze: if this month's credit is unspent, mark the target
/// week as frozen and record it as pending. With no credit left the state
/// comes back unchanged and nothing is written - the reactive path may
/// already have spent it, or an earlier reservation did.
pub async fn reserve_freeze_at(
    pool: &DbPool,
    user_key: &str,
    week: NaiveDate,
    today: NaiveDate,
) -> Result<FreezeState> {
    let prefs = store::load_preferences(pool, user_key, today).await?;

    let mut freeze = prefs.streak_freeze_data.clone();
    freeze.apply_monthly_reset(today);

    if freeze.freezes_available > 0 {
        let week_key = dates::week_start_key(week);
        freeze.frozen_weeks.insert(week_key.clone());
        freeze.pending_freeze_week = Some(week_key);
        freeze.freezes_available = 0;
    }

    if freeze != prefs.streak_freeze_data {
        store::save_freeze_state(pool, user_key, &freeze).await?;
    }

    Ok(freeze)
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
