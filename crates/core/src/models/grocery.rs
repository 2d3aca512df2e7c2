//! Grocery list model.

use super::dish::Ingredient;
use chrono::NaiveDate;

/// Ingredients for one date, grouped by dish in meal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryDay {
    pub date: NaiveDate,
    pub dishes: Vec<GroceryDish>,
}

/// One dish section. `heading` is the display form of the dish slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroceryDish {
    pub heading: String,
    pub items: Vec<Ingredient>,
}
