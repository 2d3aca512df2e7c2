use clap::{Parser, Subcommand};
use mealplan_core::constants::DATA_DIR_ENV;
use mealplan_core::models::{DishInput, MealPlanInput};
use mealplan_core::text::clean_field;
use mealplan_core::{
    data_dir_from_env_value, CoreConfig, DishService, GroceryService, IgnoreOutcome,
    IgnoredService, MealPlanService, MealplanError, PdfExportService, ValidationReason,
};
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mealplan")]
#[command(about = "Mealplan dish, meal plan and grocery list CLI")]
struct Cli {
    /// Data directory (defaults to the current directory)
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a dish
    StoreDish {
        /// Path to a JSON file, or the JSON itself
        dish: String,
    },
    /// List stored dishes
    ListDishes,
    /// Add an ingredient to the ignore list
    Ignore {
        /// Ingredient name
        ingredient: String,
    },
    /// List ignored ingredients
    Ignored,
    /// Generate a grocery list
    Grocery {
        /// Start date (YYYY-MM-DD)
        start_date: String,
        /// End date (YYYY-MM-DD, inclusive)
        end_date: String,
    },
    /// Create a meal plan
    CreateMealplan {
        /// Path to a JSON file, or the JSON itself
        meal_plan: String,
    },
    /// List meal plans in a date range
    ListMealplans {
        /// Start date (YYYY-MM-DD)
        start_date: String,
        /// End date (YYYY-MM-DD, inclusive)
        end_date: String,
    },
    /// Export the meal plans in a date range to PDF
    ExportPdf {
        /// Start date (YYYY-MM-DD)
        start_date: String,
        /// End date (YYYY-MM-DD, inclusive)
        end_date: String,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Some(command) = cli.command else {
        println!("Use 'mealplan --help' for commands");
        return Ok(());
    };

    let data_dir = data_dir_from_env_value(cli.data_dir)?;
    let cfg = Arc::new(CoreConfig::new(data_dir)?);
    tracing::debug!(data_dir = %cfg.data_dir().display(), "resolved data directory");

    match command {
        Commands::StoreDish { dish } => {
            let input = DishInput::from_value(read_json_source(&dish)?)?;
            let path = DishService::new(cfg).store(input)?;
            println!("Stored dish: {}", path.display());
        }
        Commands::ListDishes => {
            let dishes = DishService::new(cfg).list()?;
            if dishes.is_empty() {
                println!("No dishes found.");
            } else {
                for dish in dishes {
                    println!(
                        "{} ({} ingredients, created {})",
                        dish.name,
                        dish.ingredients.len(),
                        dish.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        Commands::Ignore { ingredient } => {
            let name = clean_field(&ingredient);
            match IgnoredService::new(cfg).add(&ingredient)? {
                IgnoreOutcome::Added => println!("Ignoring: {}", name),
                IgnoreOutcome::AlreadyPresent => println!("Already ignored: {}", name),
            }
        }
        Commands::Ignored => {
            for name in IgnoredService::new(cfg).list() {
                println!("{}", name);
            }
        }
        Commands::Grocery {
            start_date,
            end_date,
        } => {
            let path = GroceryService::new(cfg).generate(&start_date, &end_date)?;
            println!("Wrote grocery list: {}", path.display());
        }
        Commands::CreateMealplan { meal_plan } => {
            let input = MealPlanInput::from_value(read_json_source(&meal_plan)?)?;
            let created = MealPlanService::new(cfg).create(input)?;
            println!("Wrote meal plan: {}\n\n{}", created.path.display(), created.summary);
        }
        Commands::ListMealplans {
            start_date,
            end_date,
        } => {
            let plans = MealPlanService::new(cfg).list_range(&start_date, &end_date)?;
            if plans.is_empty() {
                println!("No meal plans found.");
            }
            for plan in plans {
                println!(
                    "{} {}: {} (cook: {}) [{}]",
                    plan.date,
                    plan.meal_type,
                    plan.title,
                    plan.cook,
                    plan.dishes.join(", ")
                );
            }
        }
        Commands::ExportPdf {
            start_date,
            end_date,
        } => {
            let path = PdfExportService::new(cfg).export(&start_date, &end_date)?;
            println!("Wrote PDF: {}", path.display());
        }
    }

    Ok(())
}

/// Reads JSON from a file path, or parses the argument itself as JSON.
fn read_json_source(source: &str) -> Result<Value, MealplanError> {
    let path = Path::new(source);
    let text = if path.is_file() {
        std::fs::read_to_string(path).map_err(MealplanError::FileRead)?
    } else {
        source.to_string()
    };

    serde_json::from_str(&text).map_err(|e| {
        MealplanError::validation(
            ValidationReason::MalformedInput,
            format!("expected a JSON file or JSON text: {}", e),
        )
    })
}
