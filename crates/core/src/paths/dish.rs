//! Dish record on-disk paths.
//!
//! Each dish is a single pretty-printed JSON file named by its slug:
//! ```text
//! dishes/
//!     chili-con-carne.json
//!     chili-con-carne-1.json
//! ```

use std::path::{Path, PathBuf};

/// Top-level dish directory.
#[derive(Debug, Clone, Copy)]
pub struct DishesDir;

impl DishesDir {
    pub const NAME: &'static str = crate::constants::DISHES_DIR_NAME;
}

/// JSON extension used by dish files.
#[derive(Debug, Clone, Copy)]
pub struct DishFileExt;

impl DishFileExt {
    pub const NAME: &'static str = "json";
}

/// Relative path of a single dish record.
#[derive(Debug, Clone)]
pub struct DishPaths {
    relative_file: PathBuf,
}

impl DishPaths {
    /// Creates the relative path for the dish stored under `slug`.
    ///
    /// The slug is not validated here; [`crate::text::slugify`] produces it.
    pub fn new(slug: &str) -> Self {
        Self {
            relative_file: PathBuf::from(DishesDir::NAME)
                .join(format!("{}.{}", slug, DishFileExt::NAME)),
        }
    }

    /// Returns the relative dish directory.
    pub fn dir() -> &'static Path {
        Path::new(DishesDir::NAME)
    }

    /// Returns `dishes/{slug}.json`.
    pub fn file(&self) -> &Path {
        &self.relative_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_file_path() {
        let paths = DishPaths::new("chili-con-carne");
        assert_eq!(paths.file(), Path::new("dishes/chili-con-carne.json"));
        assert_eq!(DishPaths::dir(), Path::new("dishes"));
    }

    #[test]
    fn test_dish_path_is_relative() {
        assert!(DishPaths::new("soup").file().is_relative());
    }
}
