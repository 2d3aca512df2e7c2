//! On-disk path definitions for mealplan artefacts.
//!
//! This module defines relative filesystem paths under the data root.
//! It contains **no I/O logic** - only typed path construction. Callers
//! join these paths onto [`CoreConfig::data_dir`](crate::CoreConfig::data_dir)
//! and create directories themselves, immediately before writing.
//!
//! ```text
//! dishes/{slug}.json
//! ignored_ingredients.json
//! {YYYY}/{MM-MonthName}/{MM-DD-YYYY}/{meal_type}.md
//! {YYYY}/{MM-MonthName}/{start}_to_{end}.md
//! {YYYY}/{MM-MonthName}/mealplans_{start}[_to_{end}].pdf
//! ```

pub mod common;
pub mod dish;
pub mod grocery;
pub mod ignored;
pub mod mealplan;
pub mod pdf;
