mod model;
mod modrinth;

use async_trait::async_trait;

pub use model::{Build, BuildDependency, BuildFile, DependencyKind, Project};
pub use modrinth::{ModrinthRegistry, MODRINTH_API_BASE};

use crate::core::error::MatrixResult;

/// Source of project metadata and build listings.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    async fn get_project(&self, id_or_slug: &str) -> MatrixResult<Project>;

    /// Every build of the project, in registry order.
    async fn get_versions(&self, id_or_slug: &str) -> MatrixResult<Vec<Build>>;

    /// One build by its registry id.
    async fn get_version(&self, version_id: &str) -> MatrixResult<Build>;
}
