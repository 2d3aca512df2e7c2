//! Meal plan on-disk paths.
//!
//! Meal plans are partitioned by calendar date, one markdown file per meal type:
//! ```text
//! 2025/
//!     05-May/
//!         05-12-2025/
//!             breakfast.md
//!             dinner.md
//! ```
//!
//! Re-creating a plan for the same date and meal type targets the same file.

use super::common::{month_dir, MarkdownExt};
use crate::models::MealType;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Relative paths for every meal plan on one calendar date.
#[derive(Debug, Clone)]
pub struct MealPlanPaths {
    day_dir: PathBuf,
}

impl MealPlanPaths {
    /// Creates the path set for `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            day_dir: month_dir(date).join(date.format("%m-%d-%Y").to_string()),
        }
    }

    /// Returns `{YYYY}/{MM-MonthName}/{MM-DD-YYYY}`.
    pub fn day_dir(&self) -> &Path {
        &self.day_dir
    }

    /// Returns `{YYYY}/{MM-MonthName}/{MM-DD-YYYY}/{meal_type}.md`.
    pub fn file(&self, meal_type: MealType) -> PathBuf {
        self.day_dir
            .join(format!("{}.{}", meal_type.as_str(), MarkdownExt::NAME))
    }
}
