//! Idempotent project directory scaffolding.
//!
//! A keystone project keeps a conventional directory tree under its root.
//! Bootstrap creates any missing directories and leaves existing ones (and
//! their contents) untouched, so running it against an already-initialized
//! project is a no-op.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Directories created under the project root at bootstrap.
///
/// `views` is the only one the rendering core depends on; the rest are the
/// conventional homes for handlers, assets, and runtime state.
pub const PROJECT_DIRS: &[&str] = &[
    "handlers",
    "migrations",
    "views",
    "data",
    "public",
    "tmp",
    "logs",
    "middleware",
];

/// Error type for bootstrap scaffolding.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// A project directory could not be created.
    #[error("failed to create {path}: {source}")]
    CreateDir {
        /// The directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Creates the conventional project directories under `root`.
///
/// Idempotent: directories that already exist are skipped silently.
pub fn init_project_dirs(root: &Path) -> Result<(), SetupError> {
    for dir in PROJECT_DIRS {
        let path = root.join(dir);
        std::fs::create_dir_all(&path).map_err(|source| SetupError::CreateDir {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "project directory ready");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_all_project_dirs() {
        let root = TempDir::new().unwrap();
        init_project_dirs(root.path()).unwrap();

        for dir in PROJECT_DIRS {
            assert!(root.path().join(dir).is_dir(), "missing {}", dir);
        }
    }

    #[test]
    fn test_idempotent_and_preserves_contents() {
        let root = TempDir::new().unwrap();
        init_project_dirs(root.path()).unwrap();

        let marker = root.path().join("views/home.page.jinja");
        std::fs::write(&marker, "kept").unwrap();

        init_project_dirs(root.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "kept");
    }

    #[test]
    fn test_unwritable_root_reports_path() {
        // A file where a directory should go forces a creation failure.
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("views"), "not a dir").unwrap();

        let err = init_project_dirs(root.path()).unwrap_err();
        let SetupError::CreateDir { path, .. } = err;
        assert!(path.ends_with("views"));
    }
}
