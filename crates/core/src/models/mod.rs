//! Domain models.
//!
//! Raw `*Input` types mirror what callers send and are deserialised leniently. Each has a
//! validated counterpart built by a `from_input` constructor.

mod dish;
mod grocery;
mod meal_plan;
mod meal_type;

pub use dish::{Dish, DishInput, Ingredient, IngredientInput, Nutrient, NutrientInput};
pub use grocery::{GroceryDay, GroceryDish};
pub use meal_plan::{
    InlineDishInput, MealPlan, MealPlanInput, MealPlanSummary, PlannedDish, PlannedDishInput,
    StoredMealPlan, StoredPlannedDish,
};
pub use meal_type::MealType;
