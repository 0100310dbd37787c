use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::workout_plan::WorkoutPlan;

/// One performed set. Weight and duration are optional depending on the exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetLog {
    pub reps: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

impl SetLog {
    pub fn reps(reps: u32) -> Self {
        Self {
            reps,
            weight: None,
            duration: None,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = Some(seconds);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub exercise_id: String,
    pub sets: Vec<SetLog>,
}

/// A single performed instance of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: Uuid,
    pub plan_id: String,
    pub date: DateTime<Utc>,
    /// minutes
    pub duration: u32,
    pub completed: bool,
    pub exercises: Vec<ExerciseLog>,
}

impl WorkoutSession {
    /// Starts an empty session for `plan` with one log per plan exercise.
    pub fn start(plan: &WorkoutPlan, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            plan_id: plan.id.clone(),
            date: now,
            duration: 0,
            completed: false,
            exercises: plan
                .exercises
                .iter()
                .map(|e| ExerciseLog {
                    exercise_id: e.id.clone(),
                    sets: Vec::new(),
                })
                .collect(),
        }
    }

    /// Appends a set to the log for `exercise_id`. Returns false if the
    /// session has no such exercise.
    pub fn log_set(&mut self, exercise_id: &str, set: SetLog) -> bool {
        match self
            .exercises
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id)
        {
            Some(log) => {
                log.sets.push(set);
                true
            }
            None => false,
        }
    }

    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    /// Whole minutes elapsed between the session start and `now`.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> u32 {
        (now - self.date).num_minutes().max(0) as u32
    }
}
