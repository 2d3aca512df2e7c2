//! Meal plan PDF export paths.
//!
//! Exports sit next to the grocery lists, under the month of `start`:
//! ```text
//! 2025/05-May/mealplans_2025-05-12.pdf
//! 2025/05-May/mealplans_2025-05-10_to_2025-05-17.pdf
//! ```

use super::common::month_dir;
use crate::constants::DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub struct PdfExt;

impl PdfExt {
    pub const NAME: &'static str = "pdf";
}

/// Relative path of a meal plan export for an inclusive date range.
#[derive(Debug, Clone)]
pub struct MealPlanPdfPaths {
    relative_file: PathBuf,
}

impl MealPlanPdfPaths {
    pub const PREFIX: &'static str = "mealplans";

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let range = if start == end {
            start.format(DATE_FORMAT).to_string()
        } else {
            format!("{}_to_{}", start.format(DATE_FORMAT), end.format(DATE_FORMAT))
        };
        let filename = format!("{}_{}.{}", Self::PREFIX, range, PdfExt::NAME);
        Self {
            relative_file: month_dir(start).join(filename),
        }
    }

    pub fn file(&self) -> &Path {
        &self.relative_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_pdf_path_range() {
        assert_eq!(
            MealPlanPdfPaths::new(date(2025, 5, 10), date(2025, 5, 17)).file(),
            Path::new("2025/05-May/mealplans_2025-05-10_to_2025-05-17.pdf")
        );
    }

    #[test]
    fn test_pdf_path_single_day() {
        assert_eq!(
            MealPlanPdfPaths::new(date(2025, 5, 12), date(2025, 5, 12)).file(),
            Path::new("2025/05-May/mealplans_2025-05-12.pdf")
        );
    }

    #[test]
    fn test_pdf_path_uses_start_month() {
        assert_eq!(
            MealPlanPdfPaths::new(date(2024, 12, 30), date(2025, 1, 2)).file(),
            Path::new("2024/12-December/mealplans_2024-12-30_to_2025-01-02.pdf")
        );
    }
}
