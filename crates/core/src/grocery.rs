//! Grocery list generation.
//!
//! For each date in an inclusive range the generator visits the stored meal plans in meal
//! type order. Every planned dish is resolved by slug against the dish store; when no
//! valid stored dish matches, the ingredients written inline in the meal plan are used
//! instead. Ignored ingredients are removed, then dishes and dates left with nothing are
//! dropped. Ingredients are never merged across dishes or dates.

use crate::config::CoreConfig;
use crate::error::MealplanResult;
use crate::markdown::MarkdownService;
use crate::models::{GroceryDay, GroceryDish, Ingredient, StoredPlannedDish};
use crate::paths::grocery::GroceryListPaths;
use crate::repositories::dish::DishService;
use crate::repositories::helpers::write_atomic;
use crate::repositories::ignored::IgnoredService;
use crate::repositories::mealplan::MealPlanService;
use crate::text::{clean_amount, clean_field, slugify};
use crate::validation::parse_date_range;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct GroceryService {
    cfg: Arc<CoreConfig>,
    dishes: DishService,
    ignored: IgnoredService,
    mealplans: MealPlanService,
    markdown: MarkdownService,
}

impl GroceryService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            dishes: DishService::new(cfg.clone()),
            ignored: IgnoredService::new(cfg.clone()),
            mealplans: MealPlanService::new(cfg.clone()),
            markdown: MarkdownService::new(),
            cfg,
        }
    }

    /// Generates the grocery list for `start..=end` and writes it, overwriting any list
    /// previously generated for the same range.
    ///
    /// # Arguments
    ///
    /// * `start` - First date, `YYYY-MM-DD`
    /// * `end` - Last date (inclusive), `YYYY-MM-DD`
    ///
    /// # Returns
    ///
    /// The path written, relative to the data directory.
    ///
    /// # Errors
    ///
    /// - [`crate::ValidationReason::InvalidDate`] for a malformed bound
    /// - [`crate::ValidationReason::InvalidDateRange`] if `end` is before `start`
    /// - an I/O error if the list cannot be written
    pub fn generate(&self, start: &str, end: &str) -> MealplanResult<PathBuf> {
        let (start, end) = parse_date_range(start, end)?;
        let days = self.collect(start, end);

        let content = self.markdown.grocery_render(start, end, &days);
        let relative = GroceryListPaths::new(start, end).file().to_path_buf();
        write_atomic(&self.cfg.resolve(&relative), &content)?;

        tracing::info!(
            path = %relative.display(),
            days = days.len(),
            "generated grocery list"
        );
        Ok(relative)
    }

    /// Collects the surviving ingredients for each date in range.
    pub fn collect(&self, start: NaiveDate, end: NaiveDate) -> Vec<GroceryDay> {
        let ignored = self.ignored.set();

        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter_map(|date| {
                let dishes: Vec<GroceryDish> = self
                    .mealplans
                    .plans_on(date)
                    .into_iter()
                    .flat_map(|plan| plan.dishes)
                    .filter_map(|dish| self.resolve_dish(&dish, &ignored))
                    .collect();

                (!dishes.is_empty()).then_some(GroceryDay { date, dishes })
            })
            .collect()
    }

    /// Resolves one planned dish into its filtered shopping items.
    ///
    /// Returns `None` when nothing survives.
    fn resolve_dish(
        &self,
        planned: &StoredPlannedDish,
        ignored: &BTreeSet<String>,
    ) -> Option<GroceryDish> {
        let slug = slugify(&planned.name);
        if slug.is_empty() {
            return None;
        }

        let source = match self.dishes.get(&slug) {
            Some(dish) => dish.ingredients,
            None => {
                tracing::debug!(slug = %slug, "no stored dish; using meal plan ingredients");
                planned.ingredients.clone()
            }
        };

        let items: Vec<Ingredient> = source
            .into_iter()
            .filter_map(|i| {
                let name = clean_field(&i.name);
                (!name.is_empty() && !ignored.contains(&name)).then(|| Ingredient {
                    name,
                    amount: clean_amount(&i.amount),
                })
            })
            .collect();

        if items.is_empty() {
            return None;
        }

        Some(GroceryDish {
            heading: slug.replace('-', " "),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationReason;
    use crate::models::{DishInput, MealPlanInput};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        temp: TempDir,
        cfg: Arc<CoreConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            let cfg = Arc::new(CoreConfig::new(temp.path().to_path_buf()).unwrap());
            Self { temp, cfg }
        }

        fn store_dish(&self, value: Value) {
            DishService::new(self.cfg.clone())
                .store(DishInput::from_value(value).unwrap())
                .unwrap();
        }

        fn plan(&self, value: Value) {
            MealPlanService::new(self.cfg.clone())
                .create(MealPlanInput::from_value(value).unwrap())
                .unwrap();
        }

        fn ignore(&self, name: &str) {
            IgnoredService::new(self.cfg.clone()).add(name).unwrap();
        }

        fn generate(&self, start: &str, end: &str) -> String {
            let path = GroceryService::new(self.cfg.clone())
                .generate(start, end)
                .unwrap();
            fs::read_to_string(self.temp.path().join(path)).unwrap()
        }
    }

    #[test]
    fn test_generate_filters_ignored_ingredients() {
        let fx = Fixture::new();
        fx.store_dish(json!({
            "name": "Chili Con Carne",
            "ingredients": [
                {"name": "Beans", "amount": "1 cup"},
                {"name": "Salt", "amount": "1 tsp"}
            ],
            "instructions": "Cook it"
        }));
        fx.plan(json!({
            "date": "2025-05-12",
            "meal_type": "dinner",
            "dishes": ["chili-con-carne"]
        }));
        fx.ignore("salt");

        let path = GroceryService::new(fx.cfg.clone())
            .generate("2025-05-10", "2025-05-17")
            .unwrap();
        assert_eq!(path, PathBuf::from("2025/05-May/2025-05-10_to_2025-05-17.md"));

        let md = fx.generate("2025-05-10", "2025-05-17");
        assert_eq!(md.matches("## 2025-").count(), 1);
        assert!(md.contains("## 2025-05-12\n"));
        assert_eq!(md.matches("### ").count(), 1);
        assert!(md.contains("### chili con carne\n"));
        assert_eq!(md.matches("- [ ] ").count(), 1);
        assert!(md.contains("- [ ] 1 cup beans\n"));
        assert!(!md.contains("salt"));
    }

    #[test]
    fn test_generate_uses_inline_ingredients_without_stored_dish() {
        let fx = Fixture::new();
        fx.plan(json!({
            "date": "2025-05-11",
            "meal_type": "lunch",
            "dishes": [{
                "name": "Tomato Soup",
                "ingredients": [{"name": " Tomatoes ", "amount": "4"}, {"name": "SALT", "amount": "pinch"}]
            }]
        }));
        fx.ignore("Salt");

        let md = fx.generate("2025-05-11", "2025-05-11");
        assert_eq!(
            md,
            "# Grocery List: 2025-05-11\n\n## 2025-05-11\n\n### tomato soup\n\n- [ ] 4 tomatoes\n"
        );
    }

    #[test]
    fn test_generate_keeps_duplicates_and_meal_order() {
        let fx = Fixture::new();
        fx.store_dish(json!({
            "name": "Toast",
            "ingredients": [{"name": "Bread", "amount": "2 slices"}],
            "instructions": "toast"
        }));
        fx.plan(json!({"date": "2025-05-12", "meal_type": "snack", "dishes": ["Toast"]}));
        fx.plan(json!({"date": "2025-05-12", "meal_type": "breakfast", "dishes": ["Toast", "Mystery"]}));

        let md = fx.generate("2025-05-12", "2025-05-13");
        assert_eq!(md.matches("### toast\n\n- [ ] 2 slices bread\n").count(), 2);
        assert!(!md.contains("mystery"));
        assert!(!md.contains("## 2025-05-13"));
    }

    #[test]
    fn test_generate_without_plans() {
        let fx = Fixture::new();
        let md = fx.generate("2025-05-10", "2025-05-17");
        assert_eq!(
            md,
            "# Grocery List: 2025-05-10 to 2025-05-17\n\nNo meal plans found for this period.\n"
        );
    }

    #[test]
    fn test_generate_all_ingredients_ignored_drops_date() {
        let fx = Fixture::new();
        fx.store_dish(json!({
            "name": "Salted Water",
            "ingredients": [{"name": "salt", "amount": "1 tsp"}],
            "instructions": "dissolve"
        }));
        fx.plan(json!({"date": "2025-05-12", "meal_type": "dinner", "dishes": ["Salted Water"]}));
        fx.ignore("salt");

        let md = fx.generate("2025-05-12", "2025-05-12");
        assert!(md.contains("No meal plans found for this period."));
        assert!(!md.contains("## 2025-05-12"));
    }

    #[test]
    fn test_generate_ignores_inline_names_containing_colons() {
        let fx = Fixture::new();
        fx.plan(json!({
            "date": "2025-05-12",
            "meal_type": "dinner",
            "dishes": [{
                "name": "Fries",
                "ingredients": [
                    {"name": "Salt: coarse", "amount": "1 tsp"},
                    {"name": "Pepper: black", "amount": "1 pinch"}
                ]
            }]
        }));
        fx.ignore("salt: coarse");

        let md = fx.generate("2025-05-12", "2025-05-12");
        assert!(md.contains("### fries\n\n- [ ] 1 pinch pepper: black\n"));
        assert!(!md.contains("salt"));
        assert!(!md.contains("coarse"));
    }

    #[test]
    fn test_generate_matches_ignored_names_with_extra_spacing() {
        let fx = Fixture::new();
        fx.store_dish(json!({
            "name": "Salad",
            "ingredients": [
                {"name": "Olive Oil", "amount": "1 tbsp"},
                {"name": "Lettuce", "amount": "1 head"}
            ],
            "instructions": "toss"
        }));
        fx.plan(json!({"date": "2025-05-12", "meal_type": "lunch", "dishes": ["Salad"]}));
        fx.ignore("Olive  Oil");

        let md = fx.generate("2025-05-12", "2025-05-12");
        assert!(md.contains("- [ ] 1 head lettuce\n"));
        assert!(!md.contains("olive"));
    }

    #[test]
    fn test_generate_rejects_reversed_range() {
        let fx = Fixture::new();
        let err = GroceryService::new(fx.cfg.clone())
            .generate("2025-05-17", "2025-05-10")
            .unwrap_err();
        assert_eq!(err.validation_reason(), Some(ValidationReason::InvalidDateRange));
    }

    #[test]
    fn test_generate_overwrites_previous_list() {
        let fx = Fixture::new();
        let first = fx.generate("2025-05-12", "2025-05-12");
        assert!(first.contains("No meal plans"));

        fx.plan(json!({
            "date": "2025-05-12",
            "meal_type": "dinner",
            "dishes": [{"name": "Rice", "ingredients": [{"name": "rice", "amount": "1 cup"}]}]
        }));
        let second = fx.generate("2025-05-12", "2025-05-12");
        assert!(second.contains("- [ ] 1 cup rice\n"));
        assert!(!second.contains("No meal plans"));
    }
}
