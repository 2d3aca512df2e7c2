//! Ignored-ingredient store.
//!
//! A single JSON array at `ignored_ingredients.json` holding ingredient names that grocery
//! lists leave out. Names are normalised with [`clean_field`], the same cleaning grocery
//! generation applies to ingredient names before comparing. Entries are kept in insertion
//! order on disk and returned sorted.

use super::helpers::{read_optional, to_pretty_json, write_atomic};
use crate::config::CoreConfig;
use crate::error::{MealplanError, MealplanResult, ValidationReason};
use crate::paths::ignored::IgnoredIngredientsFile;
use crate::text::clean_field;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Result of adding an ignored ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOutcome {
    /// The name was new and the list was rewritten.
    Added,
    /// The name was already present; nothing was written.
    AlreadyPresent,
}

impl IgnoreOutcome {
    pub fn was_added(&self) -> bool {
        matches!(self, IgnoreOutcome::Added)
    }
}

#[derive(Clone, Debug)]
pub struct IgnoredService {
    cfg: Arc<CoreConfig>,
}

impl IgnoredService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Adds an ingredient to the ignore list.
    ///
    /// The name is cleaned with [`clean_field`]. Adding a name that is already present is a
    /// successful no-op.
    ///
    /// # Errors
    ///
    /// - [`ValidationReason::BlankIngredient`] if the name is blank
    /// - an I/O or serialisation error if the list cannot be written
    pub fn add(&self, raw: &str) -> MealplanResult<IgnoreOutcome> {
        let name = clean_field(raw);
        if name.is_empty() {
            return Err(MealplanError::validation(
                ValidationReason::BlankIngredient,
                "ingredient name is blank",
            ));
        }

        let mut entries = self.load();
        if entries.iter().any(|e| *e == name) {
            tracing::debug!(ingredient = %name, "ingredient already ignored");
            return Ok(IgnoreOutcome::AlreadyPresent);
        }

        entries.push(name.clone());
        let json = to_pretty_json(&entries)?;
        write_atomic(&self.path(), &json)?;

        tracing::info!(ingredient = %name, "added ignored ingredient");
        Ok(IgnoreOutcome::Added)
    }

    /// Returns the ignore list sorted. An absent file is an empty list.
    pub fn list(&self) -> Vec<String> {
        let mut entries = self.load();
        entries.sort();
        entries
    }

    /// Returns the ignore list as a set for membership checks.
    pub fn set(&self) -> BTreeSet<String> {
        self.load().into_iter().collect()
    }

    fn path(&self) -> std::path::PathBuf {
        self.cfg.resolve(IgnoredIngredientsFile::path())
    }

    /// Loads entries in file order, normalised and deduplicated.
    ///
    /// A missing or corrupt file yields an empty list; corruption is logged.
    fn load(&self) -> Vec<String> {
        let path = self.path();
        let contents = match read_optional(&path) {
            Ok(Some(contents)) => contents,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "cannot read ignored ingredients");
                return Vec::new();
            }
        };

        let raw: Vec<String> = match serde_json::from_str(&contents) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignored ingredients file is corrupt; treating as empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        raw.into_iter()
            .map(|e| clean_field(&e))
            .filter(|e| !e.is_empty() && seen.insert(e.clone()))
            .collect()
    }
}
