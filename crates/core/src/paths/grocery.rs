//! Grocery list on-disk paths.
//!
//! A grocery list is keyed by its `(start, end)` range and filed under the
//! month of `start`:
//! ```text
//! 2025/05-May/2025-05-10_to_2025-05-17.md
//! ```

use super::common::{month_dir, MarkdownExt};
use crate::constants::DATE_FORMAT;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Relative path of a grocery list for an inclusive date range.
#[derive(Debug, Clone)]
pub struct GroceryListPaths {
    relative_file: PathBuf,
}

impl GroceryListPaths {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let filename = format!(
            "{}_to_{}.{}",
            start.format(DATE_FORMAT),
            end.format(DATE_FORMAT),
            MarkdownExt::NAME
        );
        Self {
            relative_file: month_dir(start).join(filename),
        }
    }

    pub fn file(&self) -> &Path {
        &self.relative_file
    }
}
