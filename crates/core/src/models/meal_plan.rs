//! Meal plan models.
//!
//! A [`MealPlan`] is a dated, meal-type-scoped set of dishes with presentation metadata.
//! It is written as markdown and read back as a [`StoredMealPlan`].

use super::dish::{Ingredient, IngredientInput, Nutrient, NutrientInput};
use super::meal_type::MealType;
use crate::constants::{DEFAULT_COOK, DEFAULT_DISH_NAME, DEFAULT_MEAL_TITLE, MAX_NAME_LEN};
use crate::error::{MealplanError, MealplanResult, ValidationReason};
use crate::text::{clean_amount, clean_display_name};
use crate::validation::parse_meal_plan_date;
use chrono::NaiveDate;
use mealplan_types::NonEmptyText;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw meal plan input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MealPlanInput {
    pub date: String,
    pub meal_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub cook: Option<String>,
    #[serde(default)]
    pub dishes: Vec<PlannedDishInput>,
}

/// A dish inside a meal plan: either a bare reference (`"chili-con-carne"`) or a full
/// dish-like object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlannedDishInput {
    Reference(String),
    Inline(InlineDishInput),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InlineDishInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, alias = "nutrition")]
    pub nutrients: Option<Vec<NutrientInput>>,
}

impl MealPlanInput {
    pub fn from_value(value: Value) -> MealplanResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            MealplanError::validation(
                ValidationReason::MalformedInput,
                format!("meal plan: {}", e),
            )
        })
    }
}

/// A validated meal plan ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealPlan {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub title: NonEmptyText,
    pub cook: NonEmptyText,
    pub dishes: Vec<PlannedDish>,
}

/// A dish as rendered inside a meal plan. Names keep their case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDish {
    pub name: NonEmptyText,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Option<NonEmptyText>,
    pub nutrients: Vec<Nutrient>,
}

impl MealPlan {
    /// Validates raw input.
    ///
    /// Blank titles and cooks fall back to `"Untitled Meal"` and `"Unknown"`; titles are
    /// capped at 100 characters. Dishes without a name become `"Unnamed Dish"`.
    ///
    /// # Errors
    ///
    /// - [`ValidationReason::InvalidDate`] for an unparseable date
    /// - [`ValidationReason::UnknownMealType`] for a meal type outside the enum
    pub fn from_input(input: MealPlanInput) -> MealplanResult<Self> {
        let date = parse_meal_plan_date(&input.date)?;
        let meal_type: MealType = input.meal_type.parse()?;

        let title = NonEmptyText::or_fallback(
            input.title.as_deref().map(clean_display_name).as_deref(),
            DEFAULT_MEAL_TITLE,
        )
        .truncated(MAX_NAME_LEN);
        let cook = NonEmptyText::or_fallback(
            input.cook.as_deref().map(clean_display_name).as_deref(),
            DEFAULT_COOK,
        );

        let dishes = input.dishes.into_iter().map(PlannedDish::from_input).collect();

        Ok(Self {
            date,
            meal_type,
            title,
            cook,
            dishes,
        })
    }
}

impl PlannedDish {
    fn from_input(input: PlannedDishInput) -> Self {
        let inline = match input {
            PlannedDishInput::Reference(name) => InlineDishInput {
                name: Some(name),
                ..InlineDishInput::default()
            },
            PlannedDishInput::Inline(inline) => inline,
        };

        let name = NonEmptyText::or_fallback(
            inline.name.as_deref().map(clean_display_name).as_deref(),
            DEFAULT_DISH_NAME,
        );

        let ingredients = inline
            .ingredients
            .into_iter()
            .filter_map(|i| {
                let name = clean_display_name(i.name.as_deref().unwrap_or_default());
                (!name.is_empty()).then(|| Ingredient {
                    name,
                    amount: clean_display_name(&clean_amount(&i.amount)),
                })
            })
            .collect();

        let nutrients = inline
            .nutrients
            .unwrap_or_default()
            .into_iter()
            .filter_map(|n| {
                let name = clean_display_name(n.name.as_deref().unwrap_or_default());
                (!name.is_empty()).then(|| Nutrient {
                    name,
                    amount: clean_display_name(&n.amount),
                    unit: clean_display_name(n.unit.as_deref().unwrap_or_default()),
                })
            })
            .collect();

        let instructions = inline
            .instructions
            .and_then(|s| NonEmptyText::new(s).ok());

        Self {
            name,
            ingredients,
            instructions,
            nutrients,
        }
    }
}

/// A meal plan read back from disk.
///
/// Date and meal type come from the file location; the rest is parsed from the markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMealPlan {
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub title: String,
    pub cook: String,
    pub dishes: Vec<StoredPlannedDish>,
}

/// A dish name plus any ingredients written inline in the meal plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPlannedDish {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// Listing entry returned by `list_mealplans`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealPlanSummary {
    pub title: String,
    pub date: String,
    pub meal_type: MealType,
    pub cook: String,
    pub dishes: Vec<String>,
}

impl From<StoredMealPlan> for MealPlanSummary {
    fn from(plan: StoredMealPlan) -> Self {
        Self {
            title: plan.title,
            date: plan.date.format(crate::constants::DATE_FORMAT).to_string(),
            meal_type: plan.meal_type,
            cook: plan.cook,
            dishes: plan.dishes.into_iter().map(|d| d.name).collect(),
        }
    }
}
