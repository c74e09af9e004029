//! Connection URL to filesystem path mapping.
//!
//! # Responsibility
//! - Validate the `sqlite:` scheme.
//! - Produce a normalized absolute database path anchored at the project root.
//! - Derive the engine's `-wal`/`-shm` sidecar paths.
//!
//! # Invariants
//! - Scheme validation happens before any filesystem access.
//! - Sidecar suffixes are appended to the full file name (`todos.db-wal`).

use super::{DbError, DbResult};
use crate::config::{resolve_database_url, ProjectLayout};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

const SQLITE_SCHEME: &str = "sqlite";
const WAL_SUFFIX: &str = "-wal";
const SHM_SUFFIX: &str = "-shm";

/// Resolves a `sqlite:<path>` URL to an absolute, normalized path.
///
/// Relative paths are joined onto `root`. Symlinks in the existing part of
/// the path are resolved before `..` steps back, so `link/..` lands in the
/// link target's parent. Missing segments are kept lexically.
///
/// # Errors
/// - [`DbError::Configuration`] when the scheme is not `sqlite` or the path
///   part is empty.
/// - [`DbError::Io`] when a relative root cannot be made absolute.
pub fn resolve_sqlite_path(root: &Path, url: &str) -> DbResult<PathBuf> {
    let (scheme, path_part) = url.split_once(':').ok_or_else(|| unsupported_scheme(url))?;
    if scheme != SQLITE_SCHEME {
        return Err(unsupported_scheme(url));
    }
    if path_part.is_empty() {
        return Err(DbError::Configuration(format!(
            "database url `{url}` does not name a file"
        )));
    }

    let candidate = Path::new(path_part);
    let joined = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        root.join(candidate)
    };
    let absolute =
        std::path::absolute(&joined).map_err(|err| DbError::io("resolve", &joined, err))?;

    Ok(normalize(&absolute))
}

/// The database file and its sidecars for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseLocation {
    url: String,
    primary: PathBuf,
}

impl DatabaseLocation {
    /// Resolves the configured URL for `layout` into a location.
    pub fn resolve(layout: &ProjectLayout) -> DbResult<Self> {
        let url = resolve_database_url(layout);
        Self::from_url(layout.root(), url)
    }

    /// Builds a location from an explicit URL.
    pub fn from_url(root: &Path, url: impl Into<String>) -> DbResult<Self> {
        let url = url.into();
        let primary = resolve_sqlite_path(root, &url)?;
        Ok(Self { url, primary })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Primary database file path.
    pub fn primary(&self) -> &Path {
        &self.primary
    }

    /// Write-ahead-log sidecar path.
    pub fn wal(&self) -> PathBuf {
        with_suffix(&self.primary, WAL_SUFFIX)
    }

    /// Shared-memory sidecar path.
    pub fn shm(&self) -> PathBuf {
        with_suffix(&self.primary, SHM_SUFFIX)
    }

    /// All on-disk artifacts, primary first.
    pub fn artifacts(&self) -> [PathBuf; 3] {
        [self.primary.clone(), self.wal(), self.shm()]
    }
}

fn unsupported_scheme(url: &str) -> DbError {
    DbError::Configuration(format!(
        "unsupported scheme in database url `{url}`; only sqlite URLs are supported (e.g. sqlite:./database/todos.db)"
    ))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Walks `path` one component at a time, resolving symlinks on every
/// existing prefix before a following `..` is applied.
fn normalize(path: &Path) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other.as_os_str());
                if let Ok(canonical) = resolved.canonicalize() {
                    resolved = canonical;
                }
            }
        }
    }
    resolved
}
