use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::exercise::Exercise;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(format!(
                "Invalid difficulty '{}'. Valid options: beginner, intermediate, advanced",
                s
            )),
        }
    }
}

/// A named, fixed collection of exercises used as a workout template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    /// minutes
    pub duration: u32,
    pub exercises: Vec<Exercise>,
    pub category: String,
}

impl WorkoutPlan {
    pub fn new(id: impl Into<String>, name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            difficulty,
            duration: 0,
            exercises: Vec::new(),
            category: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_exercises(mut self, exercises: Vec<Exercise>) -> Self {
        self.exercises = exercises;
        self
    }

    pub fn exercise(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len().max(10)))?;
        if !self.description.is_empty() {
            writeln!(f, "{}", self.description)?;
        }
        writeln!(
            f,
            "Category: {}  Difficulty: {}  Duration: {} min",
            self.category, self.difficulty, self.duration
        )?;

        if !self.exercises.is_empty() {
            writeln!(f, "\nExercises:")?;
            for exercise in &self.exercises {
                write!(f, "\n[{}] {}", exercise.id, exercise)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_parse_and_wire_format() {
        assert_eq!(
            "ADVANCED".parse::<Difficulty>().unwrap(),
            Difficulty::Advanced
        );
        assert!("elite".parse::<Difficulty>().is_err());
        assert_eq!(
            serde_json::to_string(&Difficulty::Beginner).unwrap(),
            "\"Beginner\""
        );
    }

    #[test]
    fn test_plan_display_lists_exercises() {
        let plan = WorkoutPlan::new("1", "Full Body Strength", Difficulty::Intermediate)
            .with_duration(45)
            .with_category("Strength")
            .with_exercises(vec![Exercise::new("1", "Push-ups")
                .with_instructions(["Start in a plank position", "Lower your body"])]);

        let output = plan.to_string();
        assert!(output.contains("Full Body Strength"));
        assert!(output.contains("Duration: 45 min"));
        assert!(output.contains("[1] Push-ups"));
        assert!(output.contains("2. Lower your body"));
        assert!(plan.exercise("1").is_some());
        assert!(plan.exercise("9").is_none());
    }
}
