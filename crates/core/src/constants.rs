//! Constants used throughout the mealplan core crate.
//!
//! This module contains path, filename and text-limit constants to ensure
//! consistency across the codebase.

/// Directory name for stored dish records.
pub const DISHES_DIR_NAME: &str = "dishes";

/// Filename for the ignored-ingredients list at the data root.
pub const IGNORED_INGREDIENTS_FILENAME: &str = "ignored_ingredients.json";

/// Environment variable naming the data root, read only by binaries at startup.
pub const DATA_DIR_ENV: &str = "MEALPLANPATH";

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 100;

/// Maximum length of dish names and meal plan titles.
pub const MAX_NAME_LEN: usize = 100;

/// Title used when a meal plan has none.
pub const DEFAULT_MEAL_TITLE: &str = "Untitled Meal";

/// Cook used when a meal plan has none.
pub const DEFAULT_COOK: &str = "Unknown";

/// Dish name used inside a meal plan when the dish has none.
pub const DEFAULT_DISH_NAME: &str = "Unnamed Dish";

/// Calendar date format accepted on all date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
