//! Tool registry trait.
//!
//! A [`ToolRegistry`] lists the tools it provides and dispatches calls by name with JSON
//! arguments. [`CompositeRegistry`] stacks several registries behind one interface so
//! hosts (the HTTP server, tests) only ever hold a single registry.

use crate::error::ToolError;
use serde::Serialize;
use serde_json::Value;

/// Result of a tool call: a JSON payload or a structured error.
pub type ToolResult = Result<Value, ToolError>;

/// Description of one tool, as listed to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object.
    pub input_schema: Value,
}

impl ToolInfo {
    pub fn new(name: impl Into<String>, description: impl Into<String>, input_schema: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

/// Trait for registering and dispatching tools.
///
/// # Example
///
/// ```rust,ignore
/// struct MyTools;
///
/// impl ToolRegistry for MyTools {
///     fn tools(&self) -> Vec<ToolInfo> {
///         vec![ToolInfo::new("ping", "Reply with pong", json!({"type": "object"}))]
///     }
///
///     fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
///         match name {
///             "ping" => Some(Ok(json!("pong"))),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ToolRegistry: Send + Sync {
    /// Returns information about all available tools.
    fn tools(&self) -> Vec<ToolInfo>;

    /// Dispatches a tool call by name.
    ///
    /// Returns `None` if the tool is not recognised by this registry.
    fn call(&self, name: &str, args: Value) -> Option<ToolResult>;

    /// Dispatches a call, turning an unrecognised name into [`ToolError::unknown_tool`].
    fn dispatch(&self, name: &str, args: Value) -> ToolResult {
        tracing::debug!(tool = %name, "dispatching tool call");
        self.call(name, args)
            .unwrap_or_else(|| Err(ToolError::unknown_tool(name)))
    }

    /// Returns the number of registered tools.
    fn tool_count(&self) -> usize {
        self.tools().len()
    }

    /// Check if a tool exists by name.
    fn has_tool(&self, name: &str) -> bool {
        self.tools().iter().any(|t| t.name == name)
    }
}

/// A registry that combines multiple sub-registries.
///
/// Sub-registries are consulted in insertion order; the first to recognise a name
/// handles the call.
#[derive(Default)]
pub struct CompositeRegistry {
    registries: Vec<Box<dyn ToolRegistry>>,
}

impl CompositeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sub-registry.
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: ToolRegistry + 'static>(mut self, registry: R) -> Self {
        self.registries.push(Box::new(registry));
        self
    }
}

impl ToolRegistry for CompositeRegistry {
    fn tools(&self) -> Vec<ToolInfo> {
        self.registries.iter().flat_map(|r| r.tools()).collect()
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        self.registries
            .iter()
            .find(|r| r.has_tool(name))
            .and_then(|r| r.call(name, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolErrorKind;
    use serde_json::json;

    struct Echo(&'static str);

    impl ToolRegistry for Echo {
        fn tools(&self) -> Vec<ToolInfo> {
            vec![ToolInfo::new(self.0, "Echo arguments", json!({"type": "object"}))]
        }

        fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
            (name == self.0).then(|| Ok(json!({"tool": self.0, "args": args})))
        }
    }

    #[test]
    fn test_composite_lists_all_tools() {
        let registry = CompositeRegistry::new().add(Echo("a")).add(Echo("b"));
        assert_eq!(registry.tool_count(), 2);
        assert!(registry.has_tool("b"));
        assert!(!registry.has_tool("c"));
    }

    #[test]
    fn test_composite_routes_by_name() {
        let registry = CompositeRegistry::new().add(Echo("a")).add(Echo("b"));
        let out = registry.dispatch("b", json!({"x": 1})).unwrap();
        assert_eq!(out, json!({"tool": "b", "args": {"x": 1}}));
    }

    #[test]
    fn test_dispatch_unknown_tool() {
        let registry = CompositeRegistry::new().add(Echo("a"));
        let err = registry.dispatch("missing", json!({})).unwrap_err();
        assert_eq!(err.kind, ToolErrorKind::UnknownTool);
        assert!(registry.call("missing", json!({})).is_none());
    }
}
