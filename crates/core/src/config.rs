//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Services never read process-wide environment variables during
//! request handling; the binaries resolve `MEALPLANPATH` and hand the result to
//! [`CoreConfig::new`].

use crate::constants::{DISHES_DIR_NAME, IGNORED_INGREDIENTS_FILENAME};
use crate::error::{MealplanError, MealplanResult, ValidationReason};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Root directory holding every dish, meal plan and grocery list.
    ///
    /// # Errors
    ///
    /// Returns `MealplanError::Validation` with [`ValidationReason::InvalidConfig`] if the
    /// path is empty, missing, or not a directory.
    pub fn new(data_dir: PathBuf) -> MealplanResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(MealplanError::validation(
                ValidationReason::InvalidConfig,
                "data directory cannot be empty",
            ));
        }

        if !data_dir.is_dir() {
            return Err(MealplanError::validation(
                ValidationReason::InvalidConfig,
                format!(
                    "data directory does not exist or is not a directory: {}",
                    data_dir.display()
                ),
            ));
        }

        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn dishes_dir(&self) -> PathBuf {
        self.data_dir.join(DISHES_DIR_NAME)
    }

    pub fn ignored_ingredients_file(&self) -> PathBuf {
        self.data_dir.join(IGNORED_INGREDIENTS_FILENAME)
    }

    /// Resolves a root-relative path against the data directory.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.data_dir.join(relative)
    }
}

/// Resolve the data directory from an optional override value.
///
/// Blank or absent values fall back to the current working directory.
pub fn data_dir_from_env_value(value: Option<String>) -> MealplanResult<PathBuf> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => Ok(PathBuf::from(v)),
        None => std::env::current_dir().map_err(|e| {
            MealplanError::validation(
                ValidationReason::InvalidConfig,
                format!("cannot determine current directory: {}", e),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_accepts_existing_dir() {
        let temp = TempDir::new().unwrap();
        let cfg = CoreConfig::new(temp.path().to_path_buf()).unwrap();
        assert_eq!(cfg.data_dir(), temp.path());
        assert_eq!(cfg.dishes_dir(), temp.path().join("dishes"));
        assert_eq!(
            cfg.ignored_ingredients_file(),
            temp.path().join("ignored_ingredients.json")
        );
    }

    #[test]
    fn test_new_rejects_missing_dir() {
        let temp = TempDir::new().unwrap();
        let err = CoreConfig::new(temp.path().join("nope")).unwrap_err();
        assert_eq!(err.validation_reason(), Some(ValidationReason::InvalidConfig));
    }

    #[test]
    fn test_new_rejects_file_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(CoreConfig::new(file).is_err());
    }

    #[test]
    fn test_new_rejects_empty_path() {
        assert!(CoreConfig::new(PathBuf::new()).is_err());
    }

    #[test]
    fn test_data_dir_from_env_value() {
        assert_eq!(
            data_dir_from_env_value(Some(" /tmp/meals ".into())).unwrap(),
            PathBuf::from("/tmp/meals")
        );
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(data_dir_from_env_value(Some("  ".into())).unwrap(), cwd);
        assert_eq!(data_dir_from_env_value(None).unwrap(), cwd);
    }
}
