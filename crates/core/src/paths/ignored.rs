//! Ignored-ingredients file path.

use std::path::Path;

/// Single JSON list at the data root.
#[derive(Debug, Clone, Copy)]
pub struct IgnoredIngredientsFile;

impl IgnoredIngredientsFile {
    pub const NAME: &'static str = crate::constants::IGNORED_INGREDIENTS_FILENAME;

    pub fn path() -> &'static Path {
        Path::new(Self::NAME)
    }
}
