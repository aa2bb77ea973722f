//! Document service: resolve a project's page, patch it, write it back.
//!
//! DESIGN
//! ======
//! Each commit is a stateless read → patch → write cycle against the page
//! file. The patch engine is pure; this module owns all file I/O. The page
//! is only rewritten when the patched text differs from what was read.
//!
//! ERROR HANDLING
//! ==============
//! Writes go to a uniquely named sibling temp file that is renamed over the
//! page, so readers see either the old or the new text. If writing or
//! renaming fails, the temp file is removed and the page is untouched.
//! There is no locking: a single editor per project is assumed, and two
//! overlapping commits resolve as last-rename-wins.

use std::path::{Path, PathBuf};

use axum::http::StatusCode;
use surgeon::{DialectKind, PatchError, Surgeon};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};
use uuid::Uuid;
use wire::{ElementSummary, UpdateElementRequest, WireError};

use crate::error::ErrorCode;

#[cfg(test)]
#[path = "document_test.rs"]
mod document_test;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("project not found: {0}")]
    ProjectNotFound(String),
    #[error("invalid patch: {0}")]
    InvalidPatch(#[from] WireError),
    #[error(transparent)]
    Patch(#[from] PatchError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {path}: {source}")]
    Persist { path: PathBuf, source: std::io::Error },
}

impl ErrorCode for DocumentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ProjectNotFound(_) => "E_PROJECT_NOT_FOUND",
            Self::InvalidPatch(_) => "E_INVALID_PATCH",
            Self::Patch(e) => e.code(),
            Self::Read { .. } | Self::Persist { .. } => "E_PERSIST",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidPatch(_) => StatusCode::BAD_REQUEST,
            Self::Patch(_) | Self::Read { .. } | Self::Persist { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What a successful commit did to the page file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Written,
    /// The patch was already applied; the file was not touched.
    Unchanged,
}

// =============================================================================
// PROJECT RESOLUTION
// =============================================================================

/// Maps project names to page files under a root directory.
#[derive(Debug, Clone)]
pub struct ProjectResolver {
    root: PathBuf,
    page: String,
}

impl ProjectResolver {
    #[must_use]
    pub fn new(root: PathBuf, page: String) -> Self {
        Self { root, page }
    }

    /// `{root}/{project}/{page}`, or `None` when the name could escape the root.
    #[must_use]
    pub fn resolve(&self, project: &str) -> Option<PathBuf> {
        let valid = !project.is_empty()
            && project != "."
            && !project.contains("..")
            && !project.contains(['/', '\\', '\0']);
        valid.then(|| self.root.join(project).join(&self.page))
    }
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Debug)]
pub struct DocumentService {
    resolver: ProjectResolver,
    id_attribute: String,
}

impl DocumentService {
    #[must_use]
    pub fn new(resolver: ProjectResolver, id_attribute: String) -> Self {
        Self { resolver, id_attribute }
    }

    /// Merge one commit into the project's page.
    ///
    /// # Errors
    ///
    /// [`DocumentError::InvalidPatch`] before any I/O, then resolution, patch
    /// and persistence failures.
    pub async fn update_element(
        &self,
        project: &str,
        request: &UpdateElementRequest,
    ) -> Result<CommitOutcome, DocumentError> {
        request.validate()?;
        let path = self.page_path(project)?;
        let source = read_page(project, &path).await?;

        let patched = self.surgeon(&path).apply(&source, &request.selected_id, &request.patch)?;
        if patched == source {
            debug!(%project, id = %request.selected_id, "patch already applied");
            return Ok(CommitOutcome::Unchanged);
        }

        write_atomic(&path, &patched)
            .await
            .map_err(|e| DocumentError::Persist { path: path.clone(), source: e })?;
        info!(
            %project,
            id = %request.selected_id,
            fields = request.patch.fields().count(),
            "page updated"
        );
        Ok(CommitOutcome::Written)
    }

    /// Tagged elements of the project's page with their literal styles.
    ///
    /// # Errors
    ///
    /// Resolution, read and parse failures.
    pub async fn list_elements(&self, project: &str) -> Result<Vec<ElementSummary>, DocumentError> {
        let path = self.page_path(project)?;
        let source = read_page(project, &path).await?;
        Ok(self.surgeon(&path).inspect(&source)?)
    }

    fn page_path(&self, project: &str) -> Result<PathBuf, DocumentError> {
        self.resolver
            .resolve(project)
            .ok_or_else(|| DocumentError::ProjectNotFound(project.to_owned()))
    }

    fn surgeon(&self, path: &Path) -> Surgeon<'_> {
        Surgeon::new(DialectKind::from_path(path).dialect()).with_id_attribute(&self.id_attribute)
    }
}

async fn read_page(project: &str, path: &Path) -> Result<String, DocumentError> {
    match tokio::fs::read_to_string(path).await {
        Ok(source) => Ok(source),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(DocumentError::ProjectNotFound(project.to_owned()))
        }
        Err(source) => Err(DocumentError::Read { path: path.to_owned(), source }),
    }
}

// =============================================================================
// ATOMIC WRITE
// =============================================================================

/// Replace `path` with `contents` via a sibling temp file and a rename.
pub(crate) async fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let temp = temp_sibling(path);
    if let Err(e) = write_then_rename(&temp, path, contents).await {
        if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(temp = %temp.display(), error = %cleanup, "failed to remove temp file");
            }
        }
        return Err(e);
    }
    Ok(())
}

/// Flush the temp file to disk and give it the original's permissions
/// before it takes the original's place.
async fn write_then_rename(temp: &Path, path: &Path, contents: &str) -> std::io::Result<()> {
    let mut file = tokio::fs::File::create(temp).await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;
    drop(file);
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => tokio::fs::set_permissions(temp, meta.permissions()).await?,
        Ok(_) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    tokio::fs::rename(temp, path).await
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("page");
    path.with_file_name(format!(".{name}.{}.tmp", Uuid::new_v4().simple()))
}
