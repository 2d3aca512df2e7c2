//! Calendar directory components shared by meal plan and grocery paths.
//!
//! Dates are plain calendar dates, so the local-calendar semantics of the
//! layout come from whoever produced the [`NaiveDate`].

use chrono::NaiveDate;
use std::path::PathBuf;

/// Markdown file extension used by meal plans and grocery lists.
pub struct MarkdownExt;

impl MarkdownExt {
    pub const NAME: &'static str = "md";
}

/// `{YYYY}` directory component.
pub fn year_dir_name(date: NaiveDate) -> String {
    date.format("%Y").to_string()
}

/// `{MM-MonthName}` directory component, e.g. `05-May`.
pub fn month_dir_name(date: NaiveDate) -> String {
    date.format("%m-%B").to_string()
}

/// Relative `{YYYY}/{MM-MonthName}` directory for a date.
pub fn month_dir(date: NaiveDate) -> PathBuf {
    PathBuf::from(year_dir_name(date)).join(month_dir_name(date))
}
