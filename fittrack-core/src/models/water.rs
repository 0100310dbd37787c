use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Water consumed on one calendar day, in millilitres.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WaterIntake {
    pub date: NaiveDate,
    pub amount: u32,
}

impl WaterIntake {
    pub fn new(date: NaiveDate, amount: u32) -> Self {
        Self { date, amount }
    }
}
