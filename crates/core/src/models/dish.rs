//! Dish records and their raw input form.
//!
//! [`DishInput`] is what callers send: loosely typed, amounts may be JSON strings or
//! numbers, optional parts may be missing. [`Dish::from_input`] cleans it into the
//! canonical [`Dish`] that is persisted under `dishes/{slug}.json`.

use crate::error::{MealplanError, MealplanResult, ValidationReason};
use crate::text::{clean_amount, clean_display_name, clean_field, slugify};
use chrono::{DateTime, FixedOffset};
use mealplan_types::NonEmptyText;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// STORED RECORD
// ============================================================================

/// An ingredient line. `amount` is always text ("1 1/2 cups", "200g", "2").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "amount_from_string_or_number")]
    pub amount: String,
}

/// A nutrient line, with the same string-amount rule as [`Ingredient`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrient {
    pub name: String,
    #[serde(default, deserialize_with = "amount_from_string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub unit: String,
}

/// A persisted dish.
///
/// Dishes are immutable once written; the slug derived from `name` is the storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub name: NonEmptyText,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub instructions: NonEmptyText,
    #[serde(
        default,
        alias = "nutrients",
        skip_serializing_if = "Option::is_none"
    )]
    pub nutrition: Option<Vec<Nutrient>>,
    pub created_at: DateTime<FixedOffset>,
}

impl Dish {
    /// Cleans and validates raw input into a dish stamped with `created_at`.
    ///
    /// Cleaning rules:
    /// - `name`: whitespace collapsed, control characters stripped, case kept, max 100 chars
    /// - ingredient/nutrient names and units, and `instructions`: trimmed, lowercased,
    ///   whitespace collapsed, control characters stripped
    /// - amounts: kept verbatim (trimmed)
    /// - ingredient/nutrient entries with a blank name are dropped
    ///
    /// # Errors
    ///
    /// Returns `MealplanError::Validation` with:
    /// - [`ValidationReason::EmptyName`] if the name is blank or slugifies to nothing
    /// - [`ValidationReason::EmptyDish`] if nothing meaningful remains after cleaning
    /// - [`ValidationReason::BlankInstructions`] if instructions are blank
    pub fn from_input(input: DishInput, created_at: DateTime<FixedOffset>) -> MealplanResult<Self> {
        let name = NonEmptyText::new(clean_display_name(&input.name)).map_err(|_| {
            MealplanError::validation(ValidationReason::EmptyName, "dish name is blank")
        })?;

        if slugify(name.as_str()).is_empty() {
            return Err(MealplanError::validation(
                ValidationReason::EmptyName,
                format!("dish name '{}' has no usable characters for a slug", name),
            ));
        }

        let ingredients = clean_ingredients(input.ingredients);
        let nutrition = input
            .nutrition
            .map(clean_nutrients)
            .filter(|n| !n.is_empty());
        let instructions = input
            .instructions
            .as_deref()
            .map(clean_field)
            .and_then(|s| NonEmptyText::new(s).ok());

        let Some(instructions) = instructions else {
            if ingredients.is_empty() && nutrition.is_none() {
                return Err(MealplanError::validation(
                    ValidationReason::EmptyDish,
                    "dish has no ingredients, instructions or nutrition",
                ));
            }
            return Err(MealplanError::validation(
                ValidationReason::BlankInstructions,
                "dish instructions are blank",
            ));
        };

        Ok(Self {
            name,
            ingredients,
            instructions,
            nutrition,
            created_at,
        })
    }

    /// Returns the base slug for this dish (before disambiguation).
    pub fn slug(&self) -> String {
        slugify(self.name.as_str())
    }
}

// ============================================================================
// RAW INPUT
// ============================================================================

/// Raw ingredient input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IngredientInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "amount_from_string_or_number")]
    pub amount: String,
}

/// Raw nutrient input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NutrientInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "amount_from_string_or_number")]
    pub amount: String,
    #[serde(default)]
    pub unit: Option<String>,
}

/// Raw dish input as received from a caller.
///
/// Only `name` is structurally required; the remaining checks happen in
/// [`Dish::from_input`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DishInput {
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default, alias = "nutrients")]
    pub nutrition: Option<Vec<NutrientInput>>,
}

impl DishInput {
    /// Parses a JSON value into `DishInput`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationReason::MalformedInput`] when required keys are missing or
    /// values have the wrong JSON type.
    pub fn from_value(value: Value) -> MealplanResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            MealplanError::validation(ValidationReason::MalformedInput, format!("dish: {}", e))
        })
    }
}

fn clean_ingredients(raw: Vec<IngredientInput>) -> Vec<Ingredient> {
    raw.into_iter()
        .filter_map(|i| {
            let name = clean_field(i.name.as_deref().unwrap_or_default());
            if name.is_empty() {
                return None;
            }
            Some(Ingredient {
                name,
                amount: clean_amount(&i.amount),
            })
        })
        .collect()
}

fn clean_nutrients(raw: Vec<NutrientInput>) -> Vec<Nutrient> {
    raw.into_iter()
        .filter_map(|n| {
            let name = clean_field(n.name.as_deref().unwrap_or_default());
            if name.is_empty() {
                return None;
            }
            Some(Nutrient {
                name,
                amount: clean_amount(&n.amount),
                unit: clean_field(n.unit.as_deref().unwrap_or_default()),
            })
        })
        .collect()
}

/// Accepts a JSON string or number and keeps its textual form.
///
/// `null` becomes an empty string. Numbers keep serde_json's rendering (`2`, `1.5`).
pub(crate) fn amount_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(de::Error::custom(format!(
            "amount must be a string or number, got {}",
            other
        ))),
    }
}
