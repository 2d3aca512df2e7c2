//! Markdown rendering and parsing for meal plans and grocery lists.
//!
//! Meal plan files are written by [`MarkdownService::mealplan_render`] and read back by
//! [`MarkdownService::mealplan_parse`]; the two agree on the layout below. Grocery lists
//! are write-only.
//!
//! Meal plan format produced:
//! ```markdown
//! - [ ] Family Dinner (dinner,Sam) #mealplan [scheduled:: 2025-05-12]
//!
//! # Family Dinner
//!
//! **Date:** 2025-05-12
//! **Meal Type:** dinner
//! **Cook:** Sam
//!
//! ## Dishes (1)
//!
//! ### 1. Chili Con Carne
//!
//! #### Ingredients
//!
//! - beans: 1 cup
//!
//! #### Instructions
//!
//! Cook it
//!
//! #### Nutrients
//!
//! - calories: 450 kcal
//! ```
//!
//! The `**Date:**`, `**Meal Type:**` and `**Cook:**` lines end with two spaces (a markdown
//! hard line break). In ingredient lines `:` and `\` inside the name are backslash-escaped,
//! so the first unescaped `": "` always separates name from amount.

use crate::constants::DATE_FORMAT;
use crate::models::{
    GroceryDay, Ingredient, MealPlan, MealType, PlannedDish, StoredMealPlan, StoredPlannedDish,
};
use chrono::NaiveDate;

const NO_INGREDIENTS: &str = "None specified";
const NO_INSTRUCTIONS: &str = "No instructions provided";
const NO_MEAL_PLANS: &str = "No meal plans found for this period.";

/// Which `####` section of a dish the parser is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DishSection {
    None,
    Ingredients,
    Other,
}

/// Service for meal plan and grocery list markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownService;

impl MarkdownService {
    pub fn new() -> Self {
        Self
    }

    /// Renders a validated meal plan as a complete markdown document.
    pub fn mealplan_render(&self, plan: &MealPlan) -> String {
        let date = plan.date.format(DATE_FORMAT).to_string();
        let mut out = String::new();

        out.push_str(&format!("{}\n\n", self.mealplan_task_line(plan)));
        out.push_str(&format!("# {}\n\n", plan.title));
        out.push_str(&format!("**Date:** {}  \n", date));
        out.push_str(&format!("**Meal Type:** {}  \n", plan.meal_type));
        out.push_str(&format!("**Cook:** {}  \n\n", plan.cook));
        out.push_str(&format!("## Dishes ({})\n\n", plan.dishes.len()));

        for (i, dish) in plan.dishes.iter().enumerate() {
            out.push_str(&self.dish_section_render(dish, i + 1));
        }

        out
    }

    /// Renders the plain-text confirmation returned after a meal plan is written.
    ///
    /// ```text
    /// Meal Plan: Family Dinner (dinner) on 2025-05-12 cooked by Sam
    ///
    /// Dishes (2):
    /// 1. Chili Con Carne
    /// 2. Rice
    /// ```
    pub fn mealplan_summary(&self, plan: &MealPlan) -> String {
        let mut out = format!(
            "Meal Plan: {} ({}) on {} cooked by {}\n\nDishes ({}):",
            plan.title,
            plan.meal_type,
            plan.date.format(DATE_FORMAT),
            plan.cook,
            plan.dishes.len()
        );
        for (i, dish) in plan.dishes.iter().enumerate() {
            out.push_str(&format!("\n{}. {}", i + 1, dish.name));
        }
        out
    }

    /// Parses a meal plan document back into its stored form.
    ///
    /// `date` and `meal_type` come from the file location. Missing title or cook lines
    /// yield empty strings; the parser never fails, it reports what it finds.
    pub fn mealplan_parse(
        &self,
        date: NaiveDate,
        meal_type: MealType,
        content: &str,
    ) -> StoredMealPlan {
        let mut title = None;
        let mut cook = None;
        let mut dishes: Vec<StoredPlannedDish> = Vec::new();
        let mut section = DishSection::None;

        for line in content.lines() {
            let trimmed = line.trim();

            if let Some(heading) = trimmed.strip_prefix("### ") {
                dishes.push(StoredPlannedDish {
                    name: strip_dish_number(heading).to_string(),
                    ingredients: Vec::new(),
                });
                section = DishSection::None;
                continue;
            }

            if let Some(heading) = trimmed.strip_prefix("#### ") {
                section = if heading.trim() == "Ingredients" {
                    DishSection::Ingredients
                } else {
                    DishSection::Other
                };
                continue;
            }

            if title.is_none() && dishes.is_empty() {
                if let Some(t) = trimmed.strip_prefix("# ") {
                    title = Some(t.trim().to_string());
                    continue;
                }
            }

            if cook.is_none() && dishes.is_empty() {
                if let Some(c) = trimmed.strip_prefix("**Cook:**") {
                    cook = Some(c.trim().to_string());
                    continue;
                }
            }

            if section != DishSection::Ingredients {
                continue;
            }
            let Some(item) = trimmed.strip_prefix("- ") else {
                continue;
            };
            if item.trim() == NO_INGREDIENTS {
                continue;
            }
            if let Some(current) = dishes.last_mut() {
                let (name, amount) = split_ingredient_line(item);
                current.ingredients.push(Ingredient {
                    name: name.trim().to_string(),
                    amount: amount.trim().to_string(),
                });
            }
        }

        StoredMealPlan {
            date,
            meal_type,
            title: title.unwrap_or_default(),
            cook: cook.unwrap_or_default(),
            dishes,
        }
    }

    /// Renders a grocery list.
    ///
    /// One `##` heading per date, one `###` heading per dish and one checkbox per
    /// ingredient. `days` is rendered as given; callers drop empty days and dishes.
    pub fn grocery_render(&self, start: NaiveDate, end: NaiveDate, days: &[GroceryDay]) -> String {
        let range = if start == end {
            start.format(DATE_FORMAT).to_string()
        } else {
            format!("{} to {}", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
        };
        let mut out = format!("# Grocery List: {}\n\n", range);

        if days.is_empty() {
            out.push_str(NO_MEAL_PLANS);
            out.push('\n');
            return out;
        }

        for day in days {
            out.push_str(&format!("## {}\n\n", day.date.format(DATE_FORMAT)));
            for dish in &day.dishes {
                out.push_str(&format!("### {}\n\n", dish.heading));
                for item in &dish.items {
                    if item.amount.is_empty() {
                        out.push_str(&format!("- [ ] {}\n", item.name));
                    } else {
                        out.push_str(&format!("- [ ] {} {}\n", item.amount, item.name));
                    }
                }
                out.push('\n');
            }
        }

        // Single trailing newline.
        let trimmed_len = out.trim_end().len();
        out.truncate(trimmed_len);
        out.push('\n');
        out
    }
}

// Helper methods for meal plan sections
impl MarkdownService {
    fn mealplan_task_line(&self, plan: &MealPlan) -> String {
        format!(
            "- [ ] {} ({},{}) #mealplan [scheduled:: {}]",
            plan.title,
            plan.meal_type,
            plan.cook,
            plan.date.format(DATE_FORMAT)
        )
    }

    fn dish_section_render(&self, dish: &PlannedDish, index: usize) -> String {
        let mut out = format!("### {}. {}\n\n", index, dish.name);

        out.push_str("#### Ingredients\n\n");
        if dish.ingredients.is_empty() {
            out.push_str(&format!("- {}\n", NO_INGREDIENTS));
        }
        for ingredient in &dish.ingredients {
            let name = escape_ingredient_name(&ingredient.name);
            if ingredient.amount.is_empty() {
                out.push_str(&format!("- {}\n", name));
            } else {
                out.push_str(&format!("- {}: {}\n", name, ingredient.amount));
            }
        }
        out.push('\n');

        out.push_str("#### Instructions\n\n");
        match &dish.instructions {
            Some(text) => out.push_str(&self.escape_instructions(text.as_str())),
            None => out.push_str(NO_INSTRUCTIONS),
        }
        out.push_str("\n\n");

        if !dish.nutrients.is_empty() {
            out.push_str("#### Nutrients\n\n");
            for nutrient in &dish.nutrients {
                let line = format!("{} {}", nutrient.amount, nutrient.unit);
                out.push_str(&format!("- {}: {}\n", nutrient.name, line.trim()));
            }
            out.push('\n');
        }

        out
    }

    /// Escapes instruction prose so it cannot open headings or horizontal rules, and
    /// turns each line break into a paragraph break.
    fn escape_instructions(&self, text: &str) -> String {
        text.lines()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.starts_with('#') {
                    line.replacen('#', r"\#", 1)
                } else if trimmed == "---" || trimmed == "***" || trimmed == "___" {
                    format!(r"\{}", trimmed)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

fn escape_ingredient_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '\\' || c == ':' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Splits `name: amount` at the first unescaped `": "`, unescaping the name.
fn split_ingredient_line(item: &str) -> (String, &str) {
    let mut name = String::with_capacity(item.len());
    let mut chars = item.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    name.push(escaped);
                }
            }
            ':' if item[i + 1..].starts_with(' ') => return (name, &item[i + 2..]),
            _ => name.push(c),
        }
    }
    (name, "")
}

/// Strips a leading `"{n}. "` from a dish heading.
fn strip_dish_number(heading: &str) -> &str {
    let heading = heading.trim();
    match heading.split_once(". ") {
        Some((n, rest)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => rest.trim(),
        _ => heading,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GroceryDish, MealPlanInput};
    use serde_json::json;

    fn plan() -> MealPlan {
        MealPlan::from_input(
            MealPlanInput::from_value(json!({
                "date": "2025-05-12",
                "meal_type": "dinner",
                "title": "Family Dinner",
                "cook": "Sam",
                "dishes": [
                    {
                        "name": "Chili Con Carne",
                        "ingredients": [
                            {"name": "Beans", "amount": "1 cup"},
                            {"name": "Salt", "amount": ""}
                        ],
                        "instructions": "Brown the meat\n# then simmer",
                        "nutrients": [{"name": "Calories", "amount": 450, "unit": "kcal"}]
                    },
                    "Rice"
                ]
            }))
            .unwrap(),
        )
        .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mealplan_render_layout() {
        let md = MarkdownService::new().mealplan_render(&plan());

        assert!(md.starts_with(
            "- [ ] Family Dinner (dinner,Sam) #mealplan [scheduled:: 2025-05-12]\n\n# Family Dinner\n\n"
        ));
        assert!(md.contains("**Date:** 2025-05-12  \n**Meal Type:** dinner  \n**Cook:** Sam  \n\n"));
        assert!(md.contains("## Dishes (2)\n\n### 1. Chili Con Carne\n\n#### Ingredients\n\n- Beans: 1 cup\n- Salt\n\n"));
        assert!(md.contains("#### Instructions\n\nBrown the meat\n\n\\# then simmer\n\n"));
        assert!(md.contains("#### Nutrients\n\n- Calories: 450 kcal\n"));
        assert!(md.contains("### 2. Rice\n\n#### Ingredients\n\n- None specified\n\n#### Instructions\n\nNo instructions provided\n\n"));
    }

    #[test]
    fn test_mealplan_summary() {
        let summary = MarkdownService::new().mealplan_summary(&plan());
        assert_eq!(
            summary,
            "Meal Plan: Family Dinner (dinner) on 2025-05-12 cooked by Sam\n\nDishes (2):\n1. Chili Con Carne\n2. Rice"
        );
    }

    #[test]
    fn test_mealplan_parse_reads_rendered_plan() {
        let svc = MarkdownService::new();
        let md = svc.mealplan_render(&plan());
        let stored = svc.mealplan_parse(date(2025, 5, 12), MealType::Dinner, &md);

        assert_eq!(stored.title, "Family Dinner");
        assert_eq!(stored.cook, "Sam");
        assert_eq!(stored.dishes.len(), 2);
        assert_eq!(stored.dishes[0].name, "Chili Con Carne");
        assert_eq!(
            stored.dishes[0].ingredients,
            vec![
                Ingredient { name: "Beans".into(), amount: "1 cup".into() },
                Ingredient { name: "Salt".into(), amount: "".into() },
            ]
        );
        assert_eq!(stored.dishes[1].name, "Rice");
        assert!(stored.dishes[1].ingredients.is_empty());
    }

    #[test]
    fn test_mealplan_parse_tolerates_sparse_files() {
        let stored = MarkdownService::new().mealplan_parse(
            date(2025, 5, 12),
            MealType::Lunch,
            "just some notes\n",
        );
        assert_eq!(stored.title, "");
        assert_eq!(stored.cook, "");
        assert!(stored.dishes.is_empty());
    }

    #[test]
    fn test_mealplan_parse_keeps_colons_in_ingredient_names() {
        let svc = MarkdownService::new();
        let plan = MealPlan::from_input(
            MealPlanInput::from_value(json!({
                "date": "2025-05-12",
                "meal_type": "dinner",
                "dishes": [{
                    "name": "Seasoned Fries",
                    "ingredients": [
                        {"name": "Salt: coarse", "amount": "1 tsp"},
                        {"name": "Pepper: black", "amount": ""},
                        {"name": "odd \\ name", "amount": "2: heaped"}
                    ]
                }]
            }))
            .unwrap(),
        )
        .unwrap();

        let md = svc.mealplan_render(&plan);
        assert!(md.contains("- Salt\\: coarse: 1 tsp\n"));
        assert!(md.contains("- Pepper\\: black\n"));

        let stored = svc.mealplan_parse(date(2025, 5, 12), MealType::Dinner, &md);
        assert_eq!(
            stored.dishes[0].ingredients,
            vec![
                Ingredient { name: "Salt: coarse".into(), amount: "1 tsp".into() },
                Ingredient { name: "Pepper: black".into(), amount: "".into() },
                Ingredient { name: "odd \\ name".into(), amount: "2: heaped".into() },
            ]
        );
    }

    #[test]
    fn test_split_ingredient_line() {
        assert_eq!(split_ingredient_line("beans: 1 cup"), ("beans".to_string(), "1 cup"));
        assert_eq!(split_ingredient_line("salt"), ("salt".to_string(), ""));
        assert_eq!(split_ingredient_line(r"a\: b: c: d"), ("a: b".to_string(), "c: d"));
        assert_eq!(split_ingredient_line("ratio 1:2: 3 g"), ("ratio 1:2".to_string(), "3 g"));
    }

    #[test]
    fn test_strip_dish_number() {
        assert_eq!(strip_dish_number("1. Chili"), "Chili");
        assert_eq!(strip_dish_number("12. Pie No. 2"), "Pie No. 2");
        assert_eq!(strip_dish_number("Mr. Soup"), "Mr. Soup");
    }

    #[test]
    fn test_grocery_render() {
        let days = vec![GroceryDay {
            date: date(2025, 5, 12),
            dishes: vec![GroceryDish {
                heading: "chili con carne".into(),
                items: vec![
                    Ingredient { name: "beans".into(), amount: "1 cup".into() },
                    Ingredient { name: "onion".into(), amount: "".into() },
                ],
            }],
        }];
        let md = MarkdownService::new().grocery_render(date(2025, 5, 10), date(2025, 5, 17), &days);
        assert_eq!(
            md,
            "# Grocery List: 2025-05-10 to 2025-05-17\n\n## 2025-05-12\n\n### chili con carne\n\n- [ ] 1 cup beans\n- [ ] onion\n"
        );
    }

    #[test]
    fn test_grocery_render_empty_single_day() {
        let md = MarkdownService::new().grocery_render(date(2025, 5, 10), date(2025, 5, 10), &[]);
        assert_eq!(
            md,
            "# Grocery List: 2025-05-10\n\nNo meal plans found for this period.\n"
        );
    }
}
