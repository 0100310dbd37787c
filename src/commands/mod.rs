mod auth;
mod config_cmd;
mod nutrition;
mod reflection;
mod workout;

pub use auth::AuthCommand;
pub use config_cmd::ConfigCommand;
pub use nutrition::NutritionCommand;
pub use reflection::ReflectionCommand;
pub use workout::WorkoutCommand;

use chrono::NaiveDate;
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", s))
}
