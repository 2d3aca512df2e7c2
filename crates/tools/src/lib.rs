//! # Mealplan Tools
//!
//! The tool surface: named operations taking JSON arguments and returning JSON results,
//! dispatched through a [`ToolRegistry`]. Hosts build one registry with [`build_registry`]
//! and never reach into the core services directly.

pub mod error;
pub mod health;
pub mod mealplan;
pub mod registry;

pub use error::{ToolError, ToolErrorKind};
pub use health::{HealthResponse, HealthTools};
pub use mealplan::MealplanTools;
pub use registry::{CompositeRegistry, ToolInfo, ToolRegistry, ToolResult};

use mealplan_core::CoreConfig;
use std::sync::Arc;

/// Server name reported by the `health` tool.
pub const SERVER_NAME: &str = "mealplan";

/// Builds the full registry: every mealplan tool plus `health`.
pub fn build_registry(cfg: Arc<CoreConfig>) -> CompositeRegistry {
    let tools = MealplanTools::new(cfg);
    let total = tools.tool_count() + 1;

    CompositeRegistry::new()
        .add(tools)
        .add(HealthTools::new(SERVER_NAME, env!("CARGO_PKG_VERSION"), total))
}
