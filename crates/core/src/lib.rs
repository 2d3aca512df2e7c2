//! # Mealplan Core
//!
//! Core data operations for the mealplan tool service.
//!
//! This crate contains pure data operations and file/folder management under a single
//! data directory:
//! - Dish records stored as pretty JSON, keyed by slug
//! - An ignore list of ingredients left off grocery lists
//! - Meal plans written as date-partitioned markdown
//! - Grocery lists generated from meal plans over a date range
//! - PDF exports of the meal plans in a date range
//!
//! **No transport concerns**: tool dispatch, HTTP hosting and the command line belong in
//! `mealplan-tools`, the root binary and `mealplan-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod grocery;
pub mod markdown;
pub mod models;
pub mod paths;
pub mod pdf;
pub mod repositories;
pub mod text;
pub mod validation;

pub use config::{data_dir_from_env_value, CoreConfig};
pub use error::{MealplanError, MealplanResult, ValidationReason};
pub use grocery::GroceryService;
pub use markdown::MarkdownService;
pub use mealplan_types::{NonEmptyText, TextError};
pub use pdf::PdfExportService;
pub use repositories::dish::DishService;
pub use repositories::ignored::{IgnoreOutcome, IgnoredService};
pub use repositories::mealplan::{CreatedMealPlan, MealPlanService};
