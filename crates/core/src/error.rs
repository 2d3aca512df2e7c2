//! Error types for the mealplan core.
//!
//! Validation failures carry a closed, machine-readable [`ValidationReason`] and a short
//! human hint. Everything else wraps the underlying I/O or serde error.

use std::fmt;

/// Machine-readable reason attached to a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationReason {
    /// A required name was blank after cleaning (or produced an empty slug).
    EmptyName,
    /// Dish instructions were blank after cleaning.
    BlankInstructions,
    /// A dish had no ingredients, instructions or nutrition after cleaning.
    EmptyDish,
    /// An ignored-ingredient name was blank.
    BlankIngredient,
    /// A date was not in an accepted format.
    InvalidDate,
    /// A meal type outside breakfast/lunch/dinner/snack.
    UnknownMealType,
    /// The end of a date range fell before its start.
    InvalidDateRange,
    /// Input was structurally malformed (missing keys, wrong JSON types).
    MalformedInput,
    /// Startup configuration was unusable.
    InvalidConfig,
}

impl ValidationReason {
    /// Returns the stable snake_case code for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationReason::EmptyName => "empty_name",
            ValidationReason::BlankInstructions => "blank_instructions",
            ValidationReason::EmptyDish => "empty_dish",
            ValidationReason::BlankIngredient => "blank_ingredient",
            ValidationReason::InvalidDate => "invalid_date",
            ValidationReason::UnknownMealType => "unknown_meal_type",
            ValidationReason::InvalidDateRange => "invalid_date_range",
            ValidationReason::MalformedInput => "malformed_input",
            ValidationReason::InvalidConfig => "invalid_config",
        }
    }
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MealplanError {
    #[error("validation failed ({reason}): {hint}")]
    Validation {
        reason: ValidationReason,
        hint: String,
    },
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize record: {0}")]
    Deserialization(serde_json::Error),
    #[error("failed to render PDF: {0}")]
    PdfRender(String),
}

impl MealplanError {
    /// Builds a validation error from a reason and hint.
    pub fn validation(reason: ValidationReason, hint: impl Into<String>) -> Self {
        MealplanError::Validation {
            reason,
            hint: hint.into(),
        }
    }

    /// Returns the validation reason, if this is a validation failure.
    pub fn validation_reason(&self) -> Option<ValidationReason> {
        match self {
            MealplanError::Validation { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

pub type MealplanResult<T> = std::result::Result<T, MealplanError>;
