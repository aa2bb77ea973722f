//! Server configuration parsed from environment variables.
//!
//! Every key has a default so the server starts with no environment at all.
//! Malformed numeric values fall back to the default rather than aborting.

use std::path::PathBuf;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROJECTS_ROOT: &str = "projects";
pub const DEFAULT_PROJECT_PAGE: &str = "page.tsx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    /// Directory holding one sub-directory per project.
    pub projects_root: PathBuf,
    /// File name of the editable page inside a project directory.
    pub project_page: String,
    /// Attribute that carries stable element identifiers.
    pub id_attribute: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            projects_root: PathBuf::from(DEFAULT_PROJECTS_ROOT),
            project_page: DEFAULT_PROJECT_PAGE.to_owned(),
            id_attribute: surgeon::DEFAULT_ID_ATTRIBUTE.to_owned(),
        }
    }
}

impl Config {
    /// Build config from `PORT`, `PROJECTS_ROOT`, `PROJECT_PAGE` and `ID_ATTRIBUTE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            projects_root: PathBuf::from(env_string("PROJECTS_ROOT", DEFAULT_PROJECTS_ROOT)),
            project_page: env_string("PROJECT_PAGE", DEFAULT_PROJECT_PAGE),
            id_attribute: env_string("ID_ATTRIBUTE", surgeon::DEFAULT_ID_ATTRIBUTE),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

/// Non-blank value of `key`, or `default`.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_owned())
}
