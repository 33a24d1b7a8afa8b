use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::registry::Project;
use crate::core::version::VersionNumber;

/// Mod loaders a pack can target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LoaderType {
    Forge,
    Fabric,
    NeoForge,
    Quilt,
}

impl LoaderType {
    /// Loader id as the registry spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderType::Forge => "forge",
            LoaderType::Fabric => "fabric",
            LoaderType::NeoForge => "neoforge",
            LoaderType::Quilt => "quilt",
        }
    }
}

impl fmt::Display for LoaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoaderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forge" => Ok(LoaderType::Forge),
            "fabric" => Ok(LoaderType::Fabric),
            "neoforge" => Ok(LoaderType::NeoForge),
            "quilt" => Ok(LoaderType::Quilt),
            other => Err(format!("unknown loader '{}'", other)),
        }
    }
}

/// One package reference of a pack.
///
/// A record may start out as little more than an id or a slug; resolution
/// fills in the rest. The slug is the preferred identity when both exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub slug: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Upstream version string of the installed build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// File written for the installed build.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Registry build id that bypasses filtering and version comparison.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_version: Option<String>,
    /// Loader override, inherited by every dependency of this record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_loader: Option<LoaderType>,
}

impl PackageRecord {
    pub fn from_slug(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Placeholder for a dependency discovered during resolution.
    pub fn dependency(project_id: &str, force_loader: Option<LoaderType>) -> Self {
        Self {
            id: project_id.to_string(),
            force_loader,
            ..Default::default()
        }
    }

    pub fn with_force_version(mut self, version_id: impl Into<String>) -> Self {
        self.force_version = Some(version_id.into());
        self
    }

    pub fn with_force_loader(mut self, loader: LoaderType) -> Self {
        self.force_loader = Some(loader);
        self
    }

    /// Slug when present, otherwise the id.
    pub fn identity(&self) -> &str {
        if !self.slug.is_empty() {
            &self.slug
        } else {
            &self.id
        }
    }

    /// Every non-empty key this record is known by.
    pub fn identities(&self) -> impl Iterator<Item = &str> {
        [self.id.as_str(), self.slug.as_str()]
            .into_iter()
            .filter(|k| !k.is_empty())
    }

    /// No id/slug or no name yet: still waiting to be resolved.
    pub fn is_empty(&self) -> bool {
        (self.id.trim().is_empty() && self.slug.trim().is_empty()) || self.name.trim().is_empty()
    }

    pub fn forced_version(&self) -> Option<&str> {
        self.force_version.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn effective_loader(&self, target: LoaderType) -> LoaderType {
        self.force_loader.unwrap_or(target)
    }

    pub fn fill_from(&mut self, project: &Project) {
        self.id = project.id.clone();
        self.slug = project.slug.clone();
        self.name = project.title.clone();
        self.description = project.description.clone();
    }
}

/// In-memory modpack: target platform plus the packages to install.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub name: String,
    pub version: VersionNumber,
    pub game_version: VersionNumber,
    pub loader: LoaderType,
    #[serde(default)]
    pub records: Vec<PackageRecord>,
    /// Files hosted outside the registry: file name -> download URL.
    #[serde(default)]
    pub externals: BTreeMap<String, String>,
}

impl Pack {
    pub fn new(
        name: String,
        version: VersionNumber,
        game_version: VersionNumber,
        loader: LoaderType,
    ) -> Self {
        Self {
            name,
            version,
            game_version,
            loader,
            records: Vec::new(),
            externals: BTreeMap::new(),
        }
    }

    /// Ids and slugs of the records already listed, so that dependencies
    /// naming them are left to the top-level entry.
    pub fn known_identities(&self) -> HashSet<String> {
        self.records
            .iter()
            .flat_map(|r| r.identities())
            .map(String::from)
            .collect()
    }
}
