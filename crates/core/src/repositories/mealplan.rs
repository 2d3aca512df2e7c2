//! Meal plan store.
//!
//! One markdown file per (date, meal type), under a date-partitioned tree:
//!
//! ```text
//! 2025/
//!     05-May/
//!         05-12-2025/
//!             breakfast.md
//!             dinner.md
//! ```
//!
//! Creating a plan for an existing (date, meal type) overwrites the file. Reading is
//! tolerant: a missing file is "no plan", an unreadable one is logged and skipped.

use super::helpers::{read_optional, write_atomic};
use crate::config::CoreConfig;
use crate::error::MealplanResult;
use crate::markdown::MarkdownService;
use crate::models::{MealPlan, MealPlanInput, MealPlanSummary, MealType, StoredMealPlan};
use crate::paths::mealplan::MealPlanPaths;
use crate::validation::parse_date_range;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::Arc;

/// Outcome of [`MealPlanService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedMealPlan {
    /// Path written, relative to the data directory.
    pub path: PathBuf,
    /// Plain-text confirmation of what was planned.
    pub summary: String,
}

#[derive(Clone, Debug)]
pub struct MealPlanService {
    cfg: Arc<CoreConfig>,
    markdown: MarkdownService,
}

impl MealPlanService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            markdown: MarkdownService::new(),
        }
    }

    /// Validates and writes a meal plan, replacing any plan already stored for the same
    /// date and meal type.
    ///
    /// # Errors
    ///
    /// Returns `MealplanError::Validation` for a bad date or meal type, or an I/O error if
    /// the file cannot be written.
    pub fn create(&self, input: MealPlanInput) -> MealplanResult<CreatedMealPlan> {
        let plan = MealPlan::from_input(input)?;
        let relative = MealPlanPaths::new(plan.date).file(plan.meal_type);

        let content = self.markdown.mealplan_render(&plan);
        write_atomic(&self.cfg.resolve(&relative), &content)?;

        tracing::info!(
            path = %relative.display(),
            date = %plan.date,
            meal_type = %plan.meal_type,
            dishes = plan.dishes.len(),
            "created meal plan"
        );

        Ok(CreatedMealPlan {
            path: relative,
            summary: self.markdown.mealplan_summary(&plan),
        })
    }

    /// Reads the plan for `date` and `meal_type`, if one is stored and readable.
    pub fn read(&self, date: NaiveDate, meal_type: MealType) -> Option<StoredMealPlan> {
        let relative = MealPlanPaths::new(date).file(meal_type);
        let path = self.cfg.resolve(&relative);

        match read_optional(&path) {
            Ok(Some(content)) => Some(self.markdown.mealplan_parse(date, meal_type, &content)),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable meal plan");
                None
            }
        }
    }

    /// Returns every stored plan for `date` in meal type order.
    pub fn plans_on(&self, date: NaiveDate) -> Vec<StoredMealPlan> {
        let day_dir = self.cfg.resolve(MealPlanPaths::new(date).day_dir());
        if !day_dir.is_dir() {
            return Vec::new();
        }

        MealType::ALL
            .into_iter()
            .filter_map(|meal_type| self.read(date, meal_type))
            .collect()
    }

    /// Lists plans in the inclusive range `start..=end` (`YYYY-MM-DD`).
    ///
    /// Results are ordered by date, then meal type, then title.
    ///
    /// # Errors
    ///
    /// - [`crate::ValidationReason::InvalidDate`] for a malformed bound
    /// - [`crate::ValidationReason::InvalidDateRange`] if `end` is before `start`
    pub fn list_range(&self, start: &str, end: &str) -> MealplanResult<Vec<MealPlanSummary>> {
        let (start, end) = parse_date_range(start, end)?;
        let plans = self.plans_in_range(start, end);

        tracing::debug!(count = plans.len(), %start, %end, "listed meal plans");
        Ok(plans.into_iter().map(MealPlanSummary::from).collect())
    }

    /// Reads every plan dated `start..=end`, ordered by date, then meal type, then title.
    pub fn plans_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<StoredMealPlan> {
        let mut plans: Vec<StoredMealPlan> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .flat_map(|d| self.plans_on(d))
            .collect();

        plans.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.meal_type.cmp(&b.meal_type))
                .then_with(|| a.title.cmp(&b.title))
        });
        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> MealPlanService {
        MealPlanService::new(Arc::new(
            CoreConfig::new(temp.path().to_path_buf()).unwrap(),
        ))
    }

    fn input(value: Value) -> MealPlanInput {
        MealPlanInput::from_value(value).unwrap()
    }

    #[test]
    fn test_create_writes_dated_path() {
        let temp = TempDir::new().unwrap();
        let created = service(&temp)
            .create(input(json!({
                "date": "2025-05-12",
                "meal_type": "dinner",
                "title": "Chili Night",
                "cook": "Sam",
                "dishes": ["chili-con-carne"]
            })))
            .unwrap();

        assert_eq!(created.path, PathBuf::from("2025/05-May/05-12-2025/dinner.md"));
        let content = fs::read_to_string(temp.path().join(&created.path)).unwrap();
        assert!(content.contains("# Chili Night\n"));
        assert!(content.contains("### 1. chili-con-carne\n"));
        assert!(created
            .summary
            .starts_with("Meal Plan: Chili Night (dinner) on 2025-05-12 cooked by Sam"));
    }

    #[test]
    fn test_create_overwrites_same_slot() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(input(json!({"date": "2025-05-12", "meal_type": "lunch", "title": "First"})))
            .unwrap();
        let created = svc
            .create(input(json!({"date": "2025-05-12", "meal_type": "LUNCH", "title": "Second"})))
            .unwrap();

        let content = fs::read_to_string(temp.path().join(created.path)).unwrap();
        assert!(content.contains("# Second\n"));
        assert!(!content.contains("First"));
    }

    #[test]
    fn test_create_rejects_unknown_meal_type() {
        let temp = TempDir::new().unwrap();
        let err = service(&temp)
            .create(input(json!({"date": "2025-05-12", "meal_type": "brunch"})))
            .unwrap_err();
        assert_eq!(err.validation_reason(), Some(ValidationReason::UnknownMealType));
        assert!(!temp.path().join("2025").exists());
    }

    #[test]
    fn test_plans_on_meal_type_order() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        for meal_type in ["snack", "breakfast", "dinner"] {
            svc.create(input(json!({"date": "2025-05-12", "meal_type": meal_type})))
                .unwrap();
        }

        let types: Vec<MealType> = svc
            .plans_on(NaiveDate::from_ymd_opt(2025, 5, 12).unwrap())
            .into_iter()
            .map(|p| p.meal_type)
            .collect();
        assert_eq!(types, vec![MealType::Breakfast, MealType::Dinner, MealType::Snack]);
    }

    #[test]
    fn test_list_range() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        svc.create(input(json!({
            "date": "2025-05-14", "meal_type": "lunch", "title": "Soup", "cook": "Ana",
            "dishes": ["Tomato Soup", "Bread"]
        })))
        .unwrap();
        svc.create(input(json!({"date": "2025-05-12", "meal_type": "dinner", "title": "Chili"})))
            .unwrap();
        svc.create(input(json!({"date": "2025-05-20", "meal_type": "dinner"})))
            .unwrap();

        let plans = svc.list_range("2025-05-10", "2025-05-17").unwrap();
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].date, "2025-05-12");
        assert_eq!(plans[0].title, "Chili");
        assert_eq!(plans[0].cook, "Unknown");
        assert_eq!(plans[1].meal_type, MealType::Lunch);
        assert_eq!(plans[1].dishes, vec!["Tomato Soup", "Bread"]);
    }

    #[test]
    fn test_list_range_errors() {
        let temp = TempDir::new().unwrap();
        let svc = service(&temp);
        assert_eq!(
            svc.list_range("2025-05-17", "2025-05-10")
                .unwrap_err()
                .validation_reason(),
            Some(ValidationReason::InvalidDateRange)
        );
        assert_eq!(
            svc.list_range("May 10", "2025-05-10")
                .unwrap_err()
                .validation_reason(),
            Some(ValidationReason::InvalidDate)
        );
        assert!(svc.list_range("2025-05-10", "2025-05-10").unwrap().is_empty());
    }
}
