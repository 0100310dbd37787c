//! Derived workout and nutrition figures.
//!
//! All functions take the reference time explicitly so callers (and tests)
//! decide what "now" is.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{Food, MacroTotals, MealEntry, WeeklyGoal, WorkoutSession};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Counts sessions dated on or after `now - days`.
pub fn count_within_days<'a, I>(history: I, now: DateTime<Utc>, days: i64) -> usize
where
    I: IntoIterator<Item = &'a WorkoutSession>,
{
    let start = now - Duration::days(days);
    history.into_iter().filter(|s| s.date >= start).count()
}

pub fn this_week(history: &[WorkoutSession], now: DateTime<Utc>) -> usize {
    count_within_days(history, now, 7)
}

pub fn this_month(history: &[WorkoutSession], now: DateTime<Utc>) -> usize {
    count_within_days(history, now, 30)
}

pub fn completed_count(history: &[WorkoutSession]) -> usize {
    history.iter().filter(|s| s.completed).count()
}

/// Mean session duration in minutes, rounded. Zero for an empty history.
pub fn average_duration(history: &[WorkoutSession]) -> u32 {
    if history.is_empty() {
        return 0;
    }
    let total: u64 = history.iter().map(|s| u64::from(s.duration)).sum();
    (total as f64 / history.len() as f64).round() as u32
}

/// Number of consecutive workout days ending at `now`.
///
/// Completed sessions are walked newest first. A session extends the streak
/// while its whole-day gap from the previous reference is at most
/// `streak + 1`; the first larger gap ends the walk.
pub fn current_streak(history: &[WorkoutSession], now: DateTime<Utc>) -> u32 {
    let dates = history.iter().filter(|s| s.completed).map(|s| s.date);
    streak_from_dates(dates, now)
}

pub fn streak_from_dates<I>(dates: I, now: DateTime<Utc>) -> u32
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut dates: Vec<DateTime<Utc>> = dates.into_iter().collect();
    dates.sort_by(|a, b| b.cmp(a));

    let mut streak = 0u32;
    let mut reference = now;
    for date in dates {
        let gap = (reference - date)
            .num_milliseconds()
            .div_euclid(MILLIS_PER_DAY);
        if gap <= i64::from(streak) + 1 {
            streak += 1;
            reference = date;
        } else {
            break;
        }
    }
    streak
}

/// Progress towards the weekly workout goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub done: usize,
    pub goal: u8,
    /// Capped at 100.
    pub percent: u8,
    pub remaining: usize,
}

pub fn goal_progress(done: usize, goal: WeeklyGoal) -> GoalProgress {
    let target = usize::from(goal.get());
    let percent = (done * 100 / target).min(100) as u8;
    GoalProgress {
        done,
        goal: goal.get(),
        percent,
        remaining: target.saturating_sub(done),
    }
}

/// Sums `food × quantity` over `entries`. Entries whose food id is not in
/// `foods` contribute nothing.
pub fn macro_totals<'a, I>(entries: I, foods: &[Food]) -> MacroTotals
where
    I: IntoIterator<Item = &'a MealEntry>,
{
    let mut totals = MacroTotals::default();
    for entry in entries {
        if let Some(food) = foods.iter().find(|f| f.id == entry.food_id) {
            totals += food.macros_for(entry.quantity);
        }
    }
    totals
}

/// Dashboard summary of a workout history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutStats {
    pub this_week: usize,
    pub this_month: usize,
    pub total: usize,
    pub completed: usize,
    pub streak: u32,
    pub average_duration: u32,
}

impl WorkoutStats {
    pub fn compute(history: &[WorkoutSession], now: DateTime<Utc>) -> Self {
        Self {
            this_week: this_week(history, now),
            this_month: this_month(history, now),
            total: history.len(),
            completed: completed_count(history),
            streak: current_streak(history, now),
            average_duration: average_duration(history),
        }
    }
}
