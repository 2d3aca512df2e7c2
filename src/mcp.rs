//! MCP host for the tool registry.
//!
//! [`McpHost`] implements the rmcp server handler over a shared [`CompositeRegistry`].
//! Results are returned as a single text block holding pretty JSON. Tool failures
//! (validation, storage) become error results carrying the JSON error body. An unknown
//! tool name is a protocol error.

use mealplan_tools::{CompositeRegistry, SERVER_NAME, ToolErrorKind, ToolInfo, ToolRegistry};
use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, JsonObject, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData, RoleServer, ServerHandler};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

const INSTRUCTIONS: &str = "Stores dishes and meal plans as files, keeps an ignored-ingredient \
list, generates markdown grocery lists and exports meal plans to PDF.";

#[derive(Clone)]
pub struct McpHost {
    registry: Arc<CompositeRegistry>,
}

impl McpHost {
    pub fn new(registry: Arc<CompositeRegistry>) -> Self {
        Self { registry }
    }

    /// Every registered tool in MCP form.
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.tools().into_iter().map(to_mcp_tool).collect()
    }

    /// Runs one tool call on the blocking pool.
    pub async fn call(
        &self,
        name: String,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let registry = self.registry.clone();
        let args = arguments.map(Value::Object).unwrap_or(Value::Null);
        let result = tokio::task::spawn_blocking(move || registry.dispatch(&name, args))
            .await
            .map_err(|e| ErrorData::internal_error(format!("tool task failed: {}", e), None))?;

        match result {
            Ok(value) => Ok(CallToolResult::success(vec![Content::text(to_text(&value)?)])),
            Err(err) if err.kind == ToolErrorKind::UnknownTool => {
                Err(ErrorData::invalid_params(err.hint, None))
            }
            Err(err) => Ok(CallToolResult::error(vec![Content::text(to_text(&err)?)])),
        }
    }
}

impl ServerHandler for McpHost {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        tracing::debug!(tool = %request.name, "mcp tool call");
        self.call(request.name.into_owned(), request.arguments).await
    }
}

fn to_mcp_tool(info: ToolInfo) -> Tool {
    let schema = match info.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(info.name, info.description, Arc::new(schema))
}

fn to_text<T: Serialize>(value: &T) -> Result<String, ErrorData> {
    serde_json::to_string_pretty(value).map_err(|e| ErrorData::internal_error(e.to_string(), None))
}
