//! File-writing utilities shared by every store.
//!
//! All artifacts go through [`write_atomic`] so a reader never observes a half-written
//! file. JSON artifacts are rendered by [`to_pretty_json`] (4-space indent, trailing
//! newline).

use crate::error::{MealplanError, MealplanResult};
use serde::Serialize;
use std::{
    fs,
    io::{self, ErrorKind, Write},
    path::Path,
};
use tempfile::NamedTempFile;

/// Serialises `value` as pretty JSON with a 4-space indent and a trailing newline.
///
/// # Errors
///
/// Returns `MealplanError::Serialization` if serde fails.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> MealplanResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(MealplanError::Serialization)?;
    buf.push(b'\n');

    // serde_json only emits valid UTF-8.
    String::from_utf8(buf).map_err(|e| {
        MealplanError::FileWrite(io::Error::new(ErrorKind::InvalidData, e.to_string()))
    })
}

/// Writes `contents` to `target` via a temp file in the same directory, then renames it
/// over the target.
///
/// Intervening directories are created first. An existing file at `target` is replaced.
///
/// # Errors
///
/// - `MealplanError::StorageDirCreation` if the parent directory cannot be created
/// - `MealplanError::FileWrite` if writing, syncing or renaming fails
pub(crate) fn write_atomic(target: &Path, contents: impl AsRef<[u8]>) -> MealplanResult<()> {
    let contents = contents.as_ref();
    let parent = target.parent().ok_or_else(|| {
        MealplanError::FileWrite(io::Error::new(
            ErrorKind::InvalidInput,
            format!("target has no parent directory: {}", target.display()),
        ))
    })?;
    fs::create_dir_all(parent).map_err(MealplanError::StorageDirCreation)?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(MealplanError::FileWrite)?;
    tmp.write_all(contents)
        .map_err(MealplanError::FileWrite)?;
    tmp.as_file().sync_all().map_err(MealplanError::FileWrite)?;
    tmp.persist(target)
        .map_err(|e| MealplanError::FileWrite(e.error))?;

    tracing::debug!(path = %target.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// Reads a file, mapping "not found" to `None`.
///
/// # Errors
///
/// Returns `MealplanError::FileRead` for any other I/O failure.
pub(crate) fn read_optional(path: &Path) -> MealplanResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MealplanError::FileRead(e)),
    }
}
