//! Project layout and database URL resolution.
//!
//! # Responsibility
//! - Anchor every on-disk artifact to an explicit project root.
//! - Resolve the SQLite connection URL from `Rocket.toml`.
//!
//! # Invariants
//! - `resolve_database_url` never fails and never panics.
//! - Resolution strategies run in declaration order; first hit wins.
//! - The config file is read fresh on every call.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application config file name, relative to the project root.
pub const CONFIG_FILE_NAME: &str = "Rocket.toml";
/// Migration script directory name, relative to the project root.
pub const MIGRATIONS_DIR_NAME: &str = "migrations";
/// URL used when the config file is absent or yields nothing usable.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./database/todos.db";

static URL_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*url\s*=\s*"([^"]+)""#).expect("valid url line regex"));

/// Filesystem anchors for one invocation.
///
/// Every resolver takes this explicitly, so tests can point at any root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    config_file: PathBuf,
    migrations_dir: PathBuf,
}

impl ProjectLayout {
    /// Creates a layout using the conventional file names under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config_file: root.join(CONFIG_FILE_NAME),
            migrations_dir: root.join(MIGRATIONS_DIR_NAME),
            root,
        }
    }

    /// Overrides the config file location.
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }
}

/// One named way of extracting a URL from raw config bytes.
#[derive(Debug, Clone, Copy)]
struct UrlStrategy {
    name: &'static str,
    extract: fn(&[u8]) -> Option<String>,
}

const URL_STRATEGIES: &[UrlStrategy] = &[
    UrlStrategy {
        name: "toml",
        extract: url_from_toml,
    },
    UrlStrategy {
        name: "line_scan",
        extract: url_from_line_scan,
    },
];

/// Resolves the database connection URL for `layout`.
///
/// Falls back to [`DEFAULT_DATABASE_URL`] when the config file is missing,
/// unreadable, or neither strategy finds a value.
pub fn resolve_database_url(layout: &ProjectLayout) -> String {
    let path = layout.config_file();
    let raw = match std::fs::read(path) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(
                "event=config_resolve module=config status=default reason=unreadable path={} error={}",
                path.display(),
                err
            );
            return DEFAULT_DATABASE_URL.to_string();
        }
    };

    match url_from_bytes(&raw) {
        Some((strategy, url)) => {
            info!(
                "event=config_resolve module=config status=ok strategy={} path={}",
                strategy,
                path.display()
            );
            url
        }
        None => {
            info!(
                "event=config_resolve module=config status=default reason=no_url path={}",
                path.display()
            );
            DEFAULT_DATABASE_URL.to_string()
        }
    }
}

/// Runs the strategy chain over raw config bytes.
///
/// Returns the winning strategy name with its URL.
fn url_from_bytes(raw: &[u8]) -> Option<(&'static str, String)> {
    URL_STRATEGIES
        .iter()
        .find_map(|strategy| (strategy.extract)(raw).map(|url| (strategy.name, url)))
}

#[derive(Debug, Deserialize)]
struct RocketConfig {
    default: Option<RocketProfile>,
}

#[derive(Debug, Deserialize)]
struct RocketProfile {
    databases: Option<RocketDatabases>,
}

#[derive(Debug, Deserialize)]
struct RocketDatabases {
    sqlite_db: Option<RocketDatabase>,
}

#[derive(Debug, Deserialize)]
struct RocketDatabase {
    url: Option<String>,
}

fn url_from_toml(raw: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(raw).ok()?;
    let config: RocketConfig = toml::from_str(text).ok()?;
    config
        .default?
        .databases?
        .sqlite_db?
        .url
        .filter(|url| !url.is_empty())
}

fn url_from_line_scan(raw: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(raw).ok()?;
    URL_LINE_RE
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| value.as_str().to_string())
}
