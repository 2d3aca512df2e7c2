//! Structured tool errors.
//!
//! Every failure leaving a tool is a [`ToolError`]: a closed `kind`, an optional
//! machine-readable `reason` and a short human hint. Core error details are logged, not
//! returned.

use mealplan_core::{MealplanError, ValidationReason};
use serde::Serialize;
use std::fmt;

/// Broad category of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolErrorKind {
    ValidationError,
    UnknownTool,
    InternalError,
}

impl ToolErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorKind::ValidationError => "validation_error",
            ToolErrorKind::UnknownTool => "unknown_tool",
            ToolErrorKind::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {hint}")]
pub struct ToolError {
    pub kind: ToolErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    pub hint: String,
}

impl ToolError {
    pub fn validation(reason: ValidationReason, hint: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::ValidationError,
            reason: Some(reason.as_str()),
            hint: hint.into(),
        }
    }

    /// Arguments that do not match the tool's input shape.
    pub fn invalid_arguments(hint: impl Into<String>) -> Self {
        Self::validation(ValidationReason::MalformedInput, hint)
    }

    pub fn unknown_tool(name: &str) -> Self {
        Self {
            kind: ToolErrorKind::UnknownTool,
            reason: None,
            hint: format!("no tool named '{}'", name),
        }
    }

    pub fn internal(hint: impl Into<String>) -> Self {
        Self {
            kind: ToolErrorKind::InternalError,
            reason: None,
            hint: hint.into(),
        }
    }
}

impl From<MealplanError> for ToolError {
    fn from(err: MealplanError) -> Self {
        match err {
            MealplanError::Validation { reason, hint } => ToolError::validation(reason, hint),
            other => {
                tracing::error!(error = %other, "tool failed");
                ToolError::internal("storage operation failed; see server logs")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validation_error_shape() {
        let err: ToolError =
            MealplanError::validation(ValidationReason::EmptyName, "dish name is blank").into();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"kind": "validation_error", "reason": "empty_name", "hint": "dish name is blank"})
        );
    }

    #[test]
    fn test_io_error_is_internal_without_details() {
        let err: ToolError =
            MealplanError::FileWrite(std::io::Error::other("/secret/path denied")).into();
        assert_eq!(err.kind, ToolErrorKind::InternalError);
        assert!(!err.hint.contains("/secret"));
        assert!(serde_json::to_value(&err).unwrap().get("reason").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ToolError::unknown_tool("bake").to_string(),
            "unknown_tool: no tool named 'bake'"
        );
    }
}
