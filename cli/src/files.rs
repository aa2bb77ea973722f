//! Local page files: patch in place, list tagged elements.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use surgeon::{DialectKind, Surgeon};
use wire::{ElementSummary, LayoutPatch};

use crate::CliError;

#[cfg(test)]
#[path = "files_test.rs"]
mod files_test;

/// Merge `patch` into the element tagged `id` in the file at `path`.
///
/// Returns `true` when the file was rewritten.
pub fn apply_to_file(path: &Path, id: &str, patch: &LayoutPatch, id_attribute: &str) -> Result<bool, CliError> {
    patch.validate()?;
    let source = read(path)?;
    let patched = surgeon_for(path, id_attribute).apply(&source, id, patch)?;
    if patched == source {
        return Ok(false);
    }
    write_atomic(path, &patched).map_err(|e| CliError::Io { path: path.to_owned(), source: e })?;
    Ok(true)
}

pub fn inspect_file(path: &Path, id_attribute: &str) -> Result<Vec<ElementSummary>, CliError> {
    let source = read(path)?;
    Ok(surgeon_for(path, id_attribute).inspect(&source)?)
}

fn surgeon_for<'a>(path: &Path, id_attribute: &'a str) -> Surgeon<'a> {
    Surgeon::new(DialectKind::from_path(path).dialect()).with_id_attribute(id_attribute)
}

fn read(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::Io { path: path.to_owned(), source: e })
}

/// Write to a uniquely named sibling, then rename over `path`.
fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let temp = temp_sibling(path);
    let written = write_then_rename(&temp, path, contents);
    if written.is_err() {
        if let Err(e) = std::fs::remove_file(&temp) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(temp = %temp.display(), error = %e, "failed to remove temp file");
            }
        }
    }
    written
}

/// Flush the temp file to disk and give it the original's permissions
/// before it takes the original's place.
fn write_then_rename(temp: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = File::create(temp)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    drop(file);
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => std::fs::set_permissions(temp, meta.permissions())?,
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    std::fs::rename(temp, path)
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("page");
    path.with_file_name(format!(".{name}.{}.tmp", uuid::Uuid::new_v4().simple()))
}
