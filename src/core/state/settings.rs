use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::error::{MatrixError, MatrixResult};
use crate::core::http::APP_USER_AGENT;
use crate::core::pack::{DependencyExceptions, ResolveOptions};
use crate::core::registry::MODRINTH_API_BASE;
use crate::core::version::VersionRewrites;

pub const SETTINGS_FILE: &str = "matrix_settings.json";

/// User configuration, stored as JSON in the data directory.
///
/// Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MatrixSettings {
    pub api_base: String,
    pub user_agent: String,
    /// Where files go, relative to the pack directory.
    pub mods_dir: PathBuf,
    /// Extra or replacement rewrite programs, by slug.
    pub version_rewrites: BTreeMap<String, String>,
    pub dependency_exceptions: DependencyExceptions,
    pub only_sync_empty: bool,
    pub ignore_externals: bool,
}

impl Default for MatrixSettings {
    fn default() -> Self {
        Self {
            api_base: MODRINTH_API_BASE.to_string(),
            user_agent: APP_USER_AGENT.to_string(),
            mods_dir: PathBuf::from("mods"),
            version_rewrites: BTreeMap::new(),
            dependency_exceptions: DependencyExceptions::default(),
            only_sync_empty: false,
            ignore_externals: false,
        }
    }
}

impl MatrixSettings {
    /// Settings from `data_dir`, or the defaults when the file is missing
    /// or unreadable.
    pub fn load(data_dir: &Path) -> Self {
        load_settings_from_disk(data_dir).unwrap_or_default()
    }

    pub fn save(&self, data_dir: &Path) -> MatrixResult<()> {
        let path = data_dir.join(SETTINGS_FILE);
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, json).map_err(|e| MatrixError::Io { path, source: e })
    }

    /// Built-in rewrite programs with the user's overrides on top.
    pub fn rewrites(&self) -> VersionRewrites {
        VersionRewrites::default().with_overrides(
            self.version_rewrites
                .iter()
                .map(|(slug, program)| (slug.as_str(), program.as_str())),
        )
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            only_sync_empty: self.only_sync_empty,
            ignore_externals: self.ignore_externals,
        }
    }
}

fn load_settings_from_disk(data_dir: &Path) -> Option<MatrixSettings> {
    let path = data_dir.join(SETTINGS_FILE);
    let raw = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(settings) => Some(settings),
        Err(e) => {
            warn!("Ignoring unreadable settings at {:?}: {}", path, e);
            None
        }
    }
}
