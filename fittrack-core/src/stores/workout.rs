use chrono::{DateTime, Utc};

use crate::catalog::CatalogSource;
use crate::error::StoreError;
use crate::models::{Difficulty, SetLog, WeeklyGoal, WorkoutPlan, WorkoutSession};
use crate::stats::{self, GoalProgress, WorkoutStats};
use crate::storage::{keys, save_json, KeyValueStore};

use super::{fetch_or_cached, load_or_warn};

/// Criteria for browsing workout plans. `None` fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PlanFilter {
    pub query: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<Difficulty>,
}

impl PlanFilter {
    pub fn matches(&self, plan: &WorkoutPlan) -> bool {
        let matches_query = match &self.query {
            Some(q) => {
                let q = q.to_lowercase();
                plan.name.to_lowercase().contains(&q)
                    || plan.description.to_lowercase().contains(&q)
            }
            None => true,
        };
        let matches_category = self
            .category
            .as_ref()
            .map_or(true, |c| plan.category.eq_ignore_ascii_case(c));
        let matches_difficulty = self.difficulty.map_or(true, |d| plan.difficulty == d);

        matches_query && matches_category && matches_difficulty
    }
}

/// Workout plans, the session in progress, history, favourites and the weekly goal.
pub struct WorkoutStore<S, C> {
    storage: S,
    catalog: C,
    plans: Vec<WorkoutPlan>,
    history: Vec<WorkoutSession>,
    current: Option<WorkoutSession>,
    favorites: Vec<String>,
    weekly_goal: WeeklyGoal,
}

impl<S: KeyValueStore, C: CatalogSource> WorkoutStore<S, C> {
    pub fn new(storage: S, catalog: C) -> Self {
        Self {
            storage,
            catalog,
            plans: Vec::new(),
            history: Vec::new(),
            current: None,
            favorites: Vec::new(),
            weekly_goal: WeeklyGoal::default(),
        }
    }

    /// Loads everything the store persists.
    pub async fn load_all(&mut self) {
        self.load_workout_plans().await;
        self.load_workout_history().await;
        self.load_current_workout().await;
        self.load_favorites().await;
        self.load_weekly_goal().await;
    }

    /// Fetches plans from the catalog, falling back to the cached copy.
    pub async fn load_workout_plans(&mut self) {
        let fetched = self.catalog.workout_plans();
        if let Some(plans) = fetch_or_cached(&self.storage, keys::WORKOUT_PLANS, fetched).await {
            tracing::debug!("Loaded {} workout plan(s)", plans.len());
            self.plans = plans;
        }
    }

    pub fn plans(&self) -> &[WorkoutPlan] {
        &self.plans
    }

    pub fn plan(&self, id: &str) -> Option<&WorkoutPlan> {
        self.plans.iter().find(|p| p.id == id)
    }

    /// Finds a plan by id, or by case-insensitive name.
    pub fn find_plan(&self, id_or_name: &str) -> Option<&WorkoutPlan> {
        self.plan(id_or_name).or_else(|| {
            self.plans
                .iter()
                .find(|p| p.name.eq_ignore_ascii_case(id_or_name))
        })
    }

    pub fn filter_plans(&self, filter: &PlanFilter) -> Vec<&WorkoutPlan> {
        self.plans.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Distinct plan categories in catalog order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for plan in &self.plans {
            if !categories.contains(&plan.category.as_str()) {
                categories.push(&plan.category);
            }
        }
        categories
    }

    pub fn current_workout(&self) -> Option<&WorkoutSession> {
        self.current.as_ref()
    }

    /// Begins a new session for `plan_id`, replacing any session in progress.
    pub async fn start_workout(
        &mut self,
        plan_id: &str,
        now: DateTime<Utc>,
    ) -> Result<&WorkoutSession, StoreError> {
        let plan = self
            .plan(plan_id)
            .ok_or_else(|| StoreError::not_found("Workout plan", plan_id))?;
        let session = WorkoutSession::start(plan, now);

        save_json(&self.storage, keys::CURRENT_WORKOUT, &session).await?;
        tracing::debug!("Started workout {} for plan {}", session.id, plan_id);
        Ok(self.current.insert(session))
    }

    /// Restores the session in progress. Call after [`Self::load_workout_history`]:
    /// a stored session that already made it into history is dropped.
    pub async fn load_current_workout(&mut self) {
        let stored: Option<WorkoutSession> =
            load_or_warn(&self.storage, keys::CURRENT_WORKOUT).await;
        if let Some(session) = stored {
            if self.history.iter().any(|s| s.id == session.id) {
                tracing::warn!("Workout {} is already completed, dropping it", session.id);
                self.clear_stored_current().await;
            } else {
                self.current = Some(session);
            }
        }
    }

    /// Records a set against an exercise of the session in progress.
    pub async fn log_set(
        &mut self,
        exercise_id: &str,
        set: SetLog,
    ) -> Result<&WorkoutSession, StoreError> {
        let mut session = self.current.clone().ok_or(StoreError::NoActiveWorkout)?;
        if !session.log_set(exercise_id, set) {
            return Err(StoreError::not_found("Exercise", exercise_id));
        }

        save_json(&self.storage, keys::CURRENT_WORKOUT, &session).await?;
        Ok(self.current.insert(session))
    }

    /// Marks `session` completed and appends it to history.
    ///
    /// A zero duration is replaced by the minutes elapsed since the session
    /// started. The session in progress is cleared. A session whose id is
    /// already in history is not appended again.
    pub async fn complete_workout(
        &mut self,
        session: WorkoutSession,
        now: DateTime<Utc>,
    ) -> Result<&WorkoutSession, StoreError> {
        if let Some(pos) = self.history.iter().position(|s| s.id == session.id) {
            tracing::warn!("Workout {} is already in history", session.id);
            self.clear_stored_current().await;
            self.current = None;
            return Ok(&self.history[pos]);
        }

        let mut completed = session;
        completed.completed = true;
        if completed.duration == 0 {
            completed.duration = completed.elapsed_minutes(now);
        }

        let mut history = self.history.clone();
        history.push(completed);
        save_json(&self.storage, keys::WORKOUT_HISTORY, &history).await?;

        // A leftover current workout is dropped on the next load
        self.clear_stored_current().await;

        self.history = history;
        self.current = None;
        let last = self.history.len() - 1;
        Ok(&self.history[last])
    }

    /// Completes the session in progress, optionally overriding its duration.
    pub async fn finish_current(
        &mut self,
        duration: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<&WorkoutSession, StoreError> {
        let mut session = self.current.clone().ok_or(StoreError::NoActiveWorkout)?;
        if let Some(minutes) = duration {
            session.duration = minutes;
        }
        self.complete_workout(session, now).await
    }

    async fn clear_stored_current(&self) {
        if let Err(e) = self.storage.remove(keys::CURRENT_WORKOUT).await {
            tracing::warn!("Failed to clear current workout: {}", e);
        }
    }

    /// Discards the session in progress without logging it.
    pub async fn cancel_workout(&mut self) -> Result<(), StoreError> {
        if self.current.is_none() {
            return Err(StoreError::NoActiveWorkout);
        }
        self.storage.remove(keys::CURRENT_WORKOUT).await?;
        self.current = None;
        Ok(())
    }

    pub async fn load_workout_history(&mut self) {
        if let Some(history) = load_or_warn(&self.storage, keys::WORKOUT_HISTORY).await {
            self.history = history;
        }
    }

    pub fn history(&self) -> &[WorkoutSession] {
        &self.history
    }

    /// Adds or removes a plan from favourites. Returns whether it is now a favourite.
    pub async fn toggle_favorite(&mut self, plan_id: &str) -> Result<bool, StoreError> {
        let mut favorites = self.favorites.clone();
        let now_favorite = match favorites.iter().position(|id| id == plan_id) {
            Some(pos) => {
                favorites.remove(pos);
                false
            }
            None => {
                favorites.push(plan_id.to_string());
                true
            }
        };

        save_json(&self.storage, keys::FAVORITE_PLANS, &favorites).await?;
        self.favorites = favorites;
        Ok(now_favorite)
    }

    pub async fn load_favorites(&mut self) {
        if let Some(favorites) = load_or_warn(&self.storage, keys::FAVORITE_PLANS).await {
            self.favorites = favorites;
        }
    }

    pub fn is_favorite(&self, plan_id: &str) -> bool {
        self.favorites.iter().any(|id| id == plan_id)
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Parses and saves the weekly workout goal. Only integers in `1..=14`
    /// are accepted; anything else leaves the goal unchanged.
    pub async fn set_weekly_goal(&mut self, input: &str) -> Result<WeeklyGoal, StoreError> {
        let goal: WeeklyGoal = input.parse().map_err(StoreError::Validation)?;
        save_json(&self.storage, keys::WEEKLY_GOAL, &goal).await?;
        self.weekly_goal = goal;
        Ok(goal)
    }

    pub async fn load_weekly_goal(&mut self) {
        if let Some(goal) = load_or_warn(&self.storage, keys::WEEKLY_GOAL).await {
            self.weekly_goal = goal;
        }
    }

    pub fn weekly_goal(&self) -> WeeklyGoal {
        self.weekly_goal
    }

    pub fn stats(&self, now: DateTime<Utc>) -> WorkoutStats {
        WorkoutStats::compute(&self.history, now)
    }

    pub fn goal_progress(&self, now: DateTime<Utc>) -> GoalProgress {
        stats::goal_progress(stats::this_week(&self.history, now), self.weekly_goal)
    }
}
