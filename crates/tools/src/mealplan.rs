//! Mealplan tools.
//!
//! Exposes the core stores as named tools taking a JSON arguments object:
//!
//! | Tool | Arguments | Result |
//! |---|---|---|
//! | `store_dish` | `dish_data` | `{ok: path}` |
//! | `list_dishes` | none | dish records |
//! | `add_ignored_ingredient` | `ingredient` | `{ok: name, added: bool}` |
//! | `get_ignored_ingredients` | none | sorted names |
//! | `generate_grocery_list` | `start_date`, `end_date` | `{ok: path}` |
//! | `create_mealplan` | `meal_plan` | `{ok: path, summary}` |
//! | `list_mealplans` | `start_date`, `end_date` | plan summaries |
//! | `export_mealplans_pdf` | `start_date`, `end_date` | `{ok: path}` |
//!
//! `start` and `end` are accepted as aliases for the date arguments.

use crate::error::ToolError;
use crate::registry::{ToolInfo, ToolRegistry, ToolResult};
use mealplan_core::models::{DishInput, MealPlanInput};
use mealplan_core::text::clean_field;
use mealplan_core::{
    CoreConfig, DishService, GroceryService, IgnoredService, MealPlanService, PdfExportService,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

const STORE_DISH: &str = "store_dish";
const LIST_DISHES: &str = "list_dishes";
const ADD_IGNORED_INGREDIENT: &str = "add_ignored_ingredient";
const GET_IGNORED_INGREDIENTS: &str = "get_ignored_ingredients";
const GENERATE_GROCERY_LIST: &str = "generate_grocery_list";
const CREATE_MEALPLAN: &str = "create_mealplan";
const LIST_MEALPLANS: &str = "list_mealplans";
const EXPORT_MEALPLANS_PDF: &str = "export_mealplans_pdf";

#[derive(Deserialize)]
struct StoreDishArgs {
    dish_data: Value,
}

#[derive(Deserialize)]
struct IngredientArgs {
    ingredient: String,
}

#[derive(Deserialize)]
struct DateRangeArgs {
    #[serde(alias = "start")]
    start_date: String,
    #[serde(alias = "end")]
    end_date: String,
}

#[derive(Deserialize)]
struct MealPlanArgs {
    meal_plan: Value,
}

/// Tool registry backed by the core services.
#[derive(Clone, Debug)]
pub struct MealplanTools {
    dishes: DishService,
    ignored: IgnoredService,
    mealplans: MealPlanService,
    grocery: GroceryService,
    pdf: PdfExportService,
}

impl MealplanTools {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            dishes: DishService::new(cfg.clone()),
            ignored: IgnoredService::new(cfg.clone()),
            mealplans: MealPlanService::new(cfg.clone()),
            grocery: GroceryService::new(cfg.clone()),
            pdf: PdfExportService::new(cfg),
        }
    }

    fn store_dish(&self, args: Value) -> ToolResult {
        let args: StoreDishArgs = parse_args(STORE_DISH, args)?;
        let input = DishInput::from_value(args.dish_data)?;
        let path = self.dishes.store(input)?;
        Ok(json!({ "ok": path_string(&path) }))
    }

    fn list_dishes(&self) -> ToolResult {
        let dishes = self.dishes.list()?;
        to_json(&dishes)
    }

    fn add_ignored_ingredient(&self, args: Value) -> ToolResult {
        let args: IngredientArgs = parse_args(ADD_IGNORED_INGREDIENT, args)?;
        let outcome = self.ignored.add(&args.ingredient)?;
        Ok(json!({
            "ok": clean_field(&args.ingredient),
            "added": outcome.was_added(),
        }))
    }

    fn get_ignored_ingredients(&self) -> ToolResult {
        to_json(&self.ignored.list())
    }

    fn generate_grocery_list(&self, args: Value) -> ToolResult {
        let args: DateRangeArgs = parse_args(GENERATE_GROCERY_LIST, args)?;
        let path = self.grocery.generate(&args.start_date, &args.end_date)?;
        Ok(json!({ "ok": path_string(&path) }))
    }

    fn create_mealplan(&self, args: Value) -> ToolResult {
        let args: MealPlanArgs = parse_args(CREATE_MEALPLAN, args)?;
        let input = MealPlanInput::from_value(args.meal_plan)?;
        let created = self.mealplans.create(input)?;
        Ok(json!({
            "ok": path_string(&created.path),
            "summary": created.summary,
        }))
    }

    fn list_mealplans(&self, args: Value) -> ToolResult {
        let args: DateRangeArgs = parse_args(LIST_MEALPLANS, args)?;
        let plans = self.mealplans.list_range(&args.start_date, &args.end_date)?;
        to_json(&plans)
    }

    fn export_mealplans_pdf(&self, args: Value) -> ToolResult {
        let args: DateRangeArgs = parse_args(EXPORT_MEALPLANS_PDF, args)?;
        let path = self.pdf.export(&args.start_date, &args.end_date)?;
        Ok(json!({ "ok": path_string(&path) }))
    }
}

impl ToolRegistry for MealplanTools {
    fn tools(&self) -> Vec<ToolInfo> {
        let date_range = json!({
            "type": "object",
            "properties": {
                "start_date": {"type": "string", "format": "date"},
                "end_date": {"type": "string", "format": "date"}
            },
            "required": ["start_date", "end_date"]
        });
        let no_args = json!({"type": "object", "properties": {}});

        vec![
            ToolInfo::new(
                STORE_DISH,
                "Store a dish with ingredients, instructions and optional nutrition",
                json!({
                    "type": "object",
                    "properties": {"dish_data": {"type": "object"}},
                    "required": ["dish_data"]
                }),
            ),
            ToolInfo::new(LIST_DISHES, "List all stored dishes", no_args.clone()),
            ToolInfo::new(
                ADD_IGNORED_INGREDIENT,
                "Leave an ingredient off generated grocery lists",
                json!({
                    "type": "object",
                    "properties": {"ingredient": {"type": "string"}},
                    "required": ["ingredient"]
                }),
            ),
            ToolInfo::new(
                GET_IGNORED_INGREDIENTS,
                "List ignored ingredients",
                no_args,
            ),
            ToolInfo::new(
                GENERATE_GROCERY_LIST,
                "Generate a markdown grocery list for an inclusive date range",
                date_range.clone(),
            ),
            ToolInfo::new(
                CREATE_MEALPLAN,
                "Write a meal plan for a date and meal type",
                json!({
                    "type": "object",
                    "properties": {"meal_plan": {"type": "object"}},
                    "required": ["meal_plan"]
                }),
            ),
            ToolInfo::new(
                LIST_MEALPLANS,
                "List meal plans in an inclusive date range",
                date_range.clone(),
            ),
            ToolInfo::new(
                EXPORT_MEALPLANS_PDF,
                "Export the meal plans in an inclusive date range to one PDF",
                date_range,
            ),
        ]
    }

    fn call(&self, name: &str, args: Value) -> Option<ToolResult> {
        let result = match name {
            STORE_DISH => self.store_dish(args),
            LIST_DISHES => self.list_dishes(),
            ADD_IGNORED_INGREDIENT => self.add_ignored_ingredient(args),
            GET_IGNORED_INGREDIENTS => self.get_ignored_ingredients(),
            GENERATE_GROCERY_LIST => self.generate_grocery_list(args),
            CREATE_MEALPLAN => self.create_mealplan(args),
            LIST_MEALPLANS => self.list_mealplans(args),
            EXPORT_MEALPLANS_PDF => self.export_mealplans_pdf(args),
            _ => return None,
        };

        if let Err(e) = &result {
            tracing::warn!(tool = %name, kind = %e.kind, hint = %e.hint, "tool call failed");
        }
        Some(result)
    }
}

/// Deserialises a tool's arguments object. `null` is read as `{}`.
fn parse_args<T: DeserializeOwned>(tool: &str, args: Value) -> Result<T, ToolError> {
    let args = if args.is_null() { json!({}) } else { args };
    serde_json::from_value(args)
        .map_err(|e| ToolError::invalid_arguments(format!("{}: {}", tool, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> ToolResult {
    serde_json::to_value(value).map_err(|e| ToolError::internal(e.to_string()))
}

/// Relative paths are reported with `/` separators on every platform.
fn path_string(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
