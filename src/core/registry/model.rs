use serde::{Deserialize, Serialize};

/// Project metadata as reported by the registry.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Project {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Every game version any build of the project supports.
    #[serde(default)]
    pub game_versions: Vec<String>,
}

/// One downloadable build ("version" in Modrinth terms) of a project.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Build {
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Free-form upstream version string, e.g. `mc1.20.1-0.5.13`.
    pub version_number: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<BuildDependency>,
    #[serde(default)]
    pub files: Vec<BuildFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildDependency {
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub version_id: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(rename = "dependency_type")]
    pub kind: DependencyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Required,
    Optional,
    /// incompatible, embedded and anything the registry adds later
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildFile {
    pub filename: String,
    pub url: String,
}

impl Build {
    /// True when the build lists both the game version and the loader.
    pub fn supports(&self, game_version: &str, loader: &str) -> bool {
        self.game_versions.iter().any(|v| v == game_version)
            && self.loaders.iter().any(|l| l == loader)
    }

    /// Only the first listed file is ever downloaded.
    pub fn primary_file(&self) -> Option<&BuildFile> {
        self.files.first()
    }

    /// Project ids of the `required` dependencies, in listed order.
    pub fn required_projects(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .filter(|d| d.kind == DependencyKind::Required)
            .filter_map(|d| d.project_id.as_deref())
    }
}
