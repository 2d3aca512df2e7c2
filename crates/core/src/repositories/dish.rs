//! Dish store.
//!
//! Dishes are stored one per file under `dishes/` and never modified after creation:
//!
//! ```text
//! dishes/
//!     chili-con-carne.json
//!     chili-con-carne-1.json
//! ```
//!
//! The filename stem is the storage key. A second dish whose name slugifies to an
//! existing stem receives the smallest free numeric suffix.
//!
//! Listing is tolerant of damaged data: a file that fails to parse, or parses but does not
//! match the dish schema, is skipped with a warning.

use super::helpers::{read_optional, to_pretty_json, write_atomic};
use crate::config::CoreConfig;
use crate::error::{MealplanError, MealplanResult};
use crate::models::{Dish, DishInput};
use crate::paths::dish::{DishFileExt, DishPaths};
use crate::text::{disambiguate, natural_cmp, slugify};
use chrono::Local;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Service for storing and listing dish records.
#[derive(Clone, Debug)]
pub struct DishService {
    cfg: Arc<CoreConfig>,
}

impl DishService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Cleans, validates and persists a new dish.
    ///
    /// # Arguments
    ///
    /// * `input` - Raw dish input; see [`Dish::from_input`] for the cleaning rules.
    ///
    /// # Returns
    ///
    /// The path written, relative to the data directory (`dishes/{slug}.json`).
    ///
    /// # Errors
    ///
    /// Returns `MealplanError::Validation` for unusable input, or an I/O or serialisation
    /// error if the record cannot be written.
    pub fn store(&self, input: DishInput) -> MealplanResult<PathBuf> {
        let dish = Dish::from_input(input, Local::now().fixed_offset())?;

        let existing = self.existing_slugs()?;
        let slug = disambiguate(&dish.slug(), &existing);
        let paths = DishPaths::new(&slug);

        let json = to_pretty_json(&dish)?;
        write_atomic(&self.cfg.resolve(paths.file()), &json)?;

        tracing::info!(slug = %slug, name = %dish.name, "stored dish");
        Ok(paths.file().to_path_buf())
    }

    /// Lists every readable dish, ordered by name.
    ///
    /// Names compare case-insensitively with digit runs compared by value; equal names
    /// fall back to slug order. A missing dish directory yields an empty list.
    pub fn list(&self) -> MealplanResult<Vec<Dish>> {
        let mut dishes: Vec<(String, Dish)> = self
            .dish_files()?
            .into_iter()
            .filter_map(|(slug, path)| load_dish(&path).map(|dish| (slug, dish)))
            .collect();

        dishes.sort_by(|(slug_a, a), (slug_b, b)| {
            natural_cmp(a.name.as_str(), b.name.as_str()).then_with(|| slug_a.cmp(slug_b))
        });

        Ok(dishes.into_iter().map(|(_, dish)| dish).collect())
    }

    /// Loads the dish stored under `slug`.
    ///
    /// Returns `None` when the file is missing or does not hold a valid dish.
    pub fn get(&self, slug: &str) -> Option<Dish> {
        if slugify(slug) != slug || slug.is_empty() {
            return None;
        }
        load_dish(&self.cfg.resolve(DishPaths::new(slug).file()))
    }

    fn existing_slugs(&self) -> MealplanResult<HashSet<String>> {
        Ok(self
            .dish_files()?
            .into_iter()
            .map(|(slug, _)| slug)
            .collect())
    }

    /// Returns `(stem, path)` for every `*.json` file in the dish directory.
    fn dish_files(&self) -> MealplanResult<Vec<(String, PathBuf)>> {
        let dir = self.cfg.resolve(DishPaths::dir());
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(MealplanError::FileRead(e)),
        };

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(MealplanError::FileRead)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(DishFileExt::NAME)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        Ok(files)
    }
}

/// Loads a dish file, logging and skipping anything that is not a valid dish.
fn load_dish(path: &Path) -> Option<Dish> {
    match parse_dish_file(path) {
        Ok(dish) => dish,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "skipping dish file");
            None
        }
    }
}

fn parse_dish_file(path: &Path) -> MealplanResult<Option<Dish>> {
    let Some(contents) = read_optional(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&contents)
        .map(Some)
        .map_err(MealplanError::Deserialization)
}
