//! Meal type enumeration.

use crate::error::{MealplanError, ValidationReason};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The meal slot a plan occupies on a given day.
///
/// Declaration order is the presentation order used when a day holds several plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Every meal type in presentation order.
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = MealplanError;

    /// Parses a meal type, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| {
                MealplanError::validation(
                    ValidationReason::UnknownMealType,
                    format!(
                        "meal type must be one of breakfast, lunch, dinner, snack; got '{}'",
                        s.trim()
                    ),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(" Dinner ".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!("SNACK".parse::<MealType>().unwrap(), MealType::Snack);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "brunch".parse::<MealType>().unwrap_err();
        assert_eq!(err.validation_reason(), Some(ValidationReason::UnknownMealType));
    }

    #[test]
    fn test_order_and_serde() {
        assert!(MealType::Breakfast < MealType::Snack);
        assert_eq!(serde_json::to_string(&MealType::Lunch).unwrap(), "\"lunch\"");
        let parsed: MealType = serde_json::from_str("\"breakfast\"").unwrap();
        assert_eq!(parsed, MealType::Breakfast);
    }
}
