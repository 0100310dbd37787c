//! Catalog selection: the built-in catalog or a YAML file.

use fittrack_core::catalog::{builtin_foods, builtin_workout_plans};
use fittrack_core::{BuiltinCatalog, CatalogError, CatalogSource, Food, WorkoutPlan};
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::Config;

/// A YAML catalog file. Either section may be omitted, in which case the
/// built-in entries are used for it.
///
/// ```yaml
/// workout_plans:
///   - id: "10"
///     name: Morning Mobility
///     ...
/// foods:
///   - id: "20"
///     name: Oats
///     ...
/// ```
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CatalogFile {
    workout_plans: Option<Vec<WorkoutPlan>>,
    foods: Option<Vec<Food>>,
}

/// Reads the catalog from disk on every fetch. An unreadable file makes the
/// stores fall back to their cached copy.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn read(&self) -> Result<CatalogFile, CatalogError> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| CatalogError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}

impl CatalogSource for FileCatalog {
    fn workout_plans(&self) -> Result<Vec<WorkoutPlan>, CatalogError> {
        Ok(self
            .read()?
            .workout_plans
            .unwrap_or_else(builtin_workout_plans))
    }

    fn foods(&self) -> Result<Vec<Food>, CatalogError> {
        Ok(self.read()?.foods.unwrap_or_else(builtin_foods))
    }
}

/// The catalog chosen by configuration.
#[derive(Debug, Clone)]
pub enum AppCatalog {
    Builtin(BuiltinCatalog),
    File(FileCatalog),
}

impl AppCatalog {
    pub fn from_config(config: &Config) -> Self {
        match &config.catalog_path {
            Some(path) => {
                tracing::debug!("Using catalog file {}", path.value.display());
                AppCatalog::File(FileCatalog::new(path.value.clone()))
            }
            None => AppCatalog::Builtin(BuiltinCatalog),
        }
    }
}

impl CatalogSource for AppCatalog {
    fn workout_plans(&self) -> Result<Vec<WorkoutPlan>, CatalogError> {
        match self {
            AppCatalog::Builtin(c) => c.workout_plans(),
            AppCatalog::File(c) => c.workout_plans(),
        }
    }

    fn foods(&self) -> Result<Vec<Food>, CatalogError> {
        match self {
            AppCatalog::Builtin(c) => c.foods(),
            AppCatalog::File(c) => c.foods(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_file_catalog_reads_foods_and_defaults_plans() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("catalog.yaml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"foods:
  - id: "20"
    name: Oats
    calories: 389
    protein: 16.9
    carbs: 66.3
    fat: 6.9
    serving: 100g"#
        )
        .unwrap();

        let catalog = FileCatalog::new(path);
        let foods = catalog.foods().unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0].name, "Oats");
        assert_eq!(foods[0].fiber, 0.0);

        let plans = catalog.workout_plans().unwrap();
        assert_eq!(plans.len(), builtin_workout_plans().len());
    }

    #[test]
    fn test_file_catalog_plans() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("catalog.yaml");

        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"workout_plans:
  - id: "10"
    name: Morning Mobility
    description: Gentle stretching
    difficulty: Beginner
    duration: 15
    category: Flexibility
    exercises:
      - id: "100"
        name: Cat-Cow
        category: Flexibility
        muscle: Back
        equipment: Mat
        instructions: ["Start on all fours", "Alternate arching and rounding"]"#
        )
        .unwrap();

        let plans = FileCatalog::new(path).workout_plans().unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].exercises[0].equipment, "Mat");
    }

    #[test]
    fn test_missing_or_broken_file_is_unavailable() {
        let temp_dir = tempdir().unwrap();
        let missing = FileCatalog::new(temp_dir.path().join("missing.yaml"));
        assert!(matches!(
            missing.foods(),
            Err(CatalogError::Unavailable(_))
        ));

        let path = temp_dir.path().join("broken.yaml");
        std::fs::write(&path, "foods: [").unwrap();
        assert!(FileCatalog::new(path).workout_plans().is_err());
    }
}
