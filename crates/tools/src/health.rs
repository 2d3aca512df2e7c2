//! Health check tool.
//!
//! Provides a built-in `health` tool that reports server status, tool count and version
//! information.

use crate::error::ToolError;
use crate::registry::{ToolInfo, ToolRegistry, ToolResult};
use serde::Serialize;
use serde_json::{json, Value};

/// Health check response.
#[derive(Clone, Debug, Serialize)]
pub struct HealthResponse {
    /// Server status ("healthy").
    pub status: String,
    pub server_name: String,
    pub version: String,
    /// Number of registered tools.
    pub tool_count: usize,
}

/// A tool registry that provides the `health` tool.
///
/// Captures server metadata at construction time and reports it when the tool is called.
pub struct HealthTools {
    server_name: String,
    version: String,
    total_tool_count: usize,
}

impl HealthTools {
    /// Create health tools with server metadata.
    ///
    /// `total_tool_count` should include the health tool itself.
    pub fn new(
        server_name: impl Into<String>,
        version: impl Into<String>,
        total_tool_count: usize,
    ) -> Self {
        Self {
            server_name: server_name.into(),
            version: version.into(),
            total_tool_count,
        }
    }
}

impl ToolRegistry for HealthTools {
    fn tools(&self) -> Vec<ToolInfo> {
        vec![ToolInfo::new(
            "health",
            "Check server health and status",
            json!({"type": "object", "properties": {}}),
        )]
    }

    fn call(&self, name: &str, _args: Value) -> Option<ToolResult> {
        if name != "health" {
            return None;
        }

        let response = HealthResponse {
            status: "healthy".to_string(),
            server_name: self.server_name.clone(),
            version: self.version.clone(),
            tool_count: self.total_tool_count,
        };
        Some(serde_json::to_value(response).map_err(|e| ToolError::internal(e.to_string())))
    }
}
