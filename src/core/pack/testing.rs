//! In-memory registry, fetcher and sink for resolver tests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::downloader::{FileSink, Fetcher};
use crate::core::error::{MatrixError, MatrixResult};
use crate::core::registry::{
    Build, BuildDependency, BuildFile, DependencyKind, PackageRegistry, Project,
};

pub fn cdn_url(build_id: &str) -> String {
    format!("https://cdn.test/{}.jar", build_id)
}

/// A build with one file named `<id>.jar` and the given required deps.
pub fn build(
    id: &str,
    project_id: &str,
    version: &str,
    game_versions: &[&str],
    loaders: &[&str],
    required: &[&str],
) -> Build {
    Build {
        id: id.to_string(),
        project_id: Some(project_id.to_string()),
        version_number: version.to_string(),
        game_versions: game_versions.iter().map(|s| s.to_string()).collect(),
        loaders: loaders.iter().map(|s| s.to_string()).collect(),
        dependencies: required
            .iter()
            .map(|p| BuildDependency {
                project_id: Some(p.to_string()),
                version_id: None,
                file_name: None,
                kind: DependencyKind::Required,
            })
            .collect(),
        files: vec![BuildFile {
            filename: format!("{}.jar", id),
            url: cdn_url(id),
        }],
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    projects: HashMap<String, Project>,
    listings: HashMap<String, Vec<Build>>,
    versions: HashMap<String, Build>,
    calls: Mutex<Vec<String>>,
}

impl FakeRegistry {
    pub fn project(mut self, id: &str, slug: &str, game_versions: &[&str]) -> Self {
        let project = Project {
            id: id.to_string(),
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: format!("{} description", slug),
            game_versions: game_versions.iter().map(|s| s.to_string()).collect(),
        };
        self.projects.insert(id.to_string(), project.clone());
        self.projects.insert(slug.to_string(), project);
        self
    }

    /// Append a build to the listing of an already registered project.
    pub fn build(mut self, build: Build) -> Self {
        let project_id = build.project_id.clone().unwrap_or_default();
        let slug = self
            .projects
            .get(&project_id)
            .map(|p| p.slug.clone())
            .unwrap_or_default();
        for key in [project_id, slug] {
            self.listings.entry(key).or_default().push(build.clone());
        }
        self.versions.insert(build.id.clone(), build);
        self
    }

    /// A build only reachable through `get_version`.
    pub fn unlisted_build(mut self, build: Build) -> Self {
        self.versions.insert(build.id.clone(), build);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn missing(path: String) -> MatrixError {
    MatrixError::DownloadFailed {
        url: format!("https://api.test/{}", path),
        status: 404,
    }
}

#[async_trait]
impl PackageRegistry for FakeRegistry {
    async fn get_project(&self, id_or_slug: &str) -> MatrixResult<Project> {
        self.record(format!("project:{}", id_or_slug));
        self.projects
            .get(id_or_slug)
            .cloned()
            .ok_or_else(|| missing(format!("project/{}", id_or_slug)))
    }

    async fn get_versions(&self, id_or_slug: &str) -> MatrixResult<Vec<Build>> {
        self.record(format!("versions:{}", id_or_slug));
        Ok(self.listings.get(id_or_slug).cloned().unwrap_or_default())
    }

    async fn get_version(&self, version_id: &str) -> MatrixResult<Build> {
        self.record(format!("version:{}", version_id));
        self.versions
            .get(version_id)
            .cloned()
            .ok_or_else(|| missing(format!("version/{}", version_id)))
    }
}

/// Serves the URL itself as the body unless a status is configured.
#[derive(Default)]
pub struct FakeFetcher {
    statuses: HashMap<String, u16>,
    fetched: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn failing(mut self, url: &str, status: u16) -> Self {
        self.statuses.insert(url.to_string(), status);
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> MatrixResult<Vec<u8>> {
        self.fetched.lock().unwrap().push(url.to_string());
        match self.statuses.get(url) {
            Some(&status) => Err(MatrixError::DownloadFailed {
                url: url.to_string(),
                status,
            }),
            None => Ok(url.as_bytes().to_vec()),
        }
    }
}

#[derive(Default)]
pub struct MemorySink {
    files: Mutex<Vec<(PathBuf, Vec<u8>)>>,
    read_only: bool,
}

impl MemorySink {
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }
}

#[async_trait]
impl FileSink for MemorySink {
    async fn write(&self, path: &Path, bytes: &[u8]) -> MatrixResult<()> {
        if self.read_only {
            return Err(MatrixError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.files
            .lock()
            .unwrap()
            .push((path.to_path_buf(), bytes.to_vec()));
        Ok(())
    }
}
