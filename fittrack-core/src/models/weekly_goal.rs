use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target number of workouts per week, always within `1..=14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct WeeklyGoal(u8);

impl WeeklyGoal {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 14;

    pub fn new(workouts: u8) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&workouts) {
            Ok(Self(workouts))
        } else {
            Err(Self::range_message())
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    fn range_message() -> String {
        format!(
            "Please enter a valid goal between {} and {} workouts.",
            Self::MIN,
            Self::MAX
        )
    }
}

impl Default for WeeklyGoal {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for WeeklyGoal {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WeeklyGoal> for u8 {
    fn from(goal: WeeklyGoal) -> Self {
        goal.0
    }
}

impl FromStr for WeeklyGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.trim().parse().map_err(|_| Self::range_message())?;
        Self::new(value)
    }
}

impl fmt::Display for WeeklyGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
