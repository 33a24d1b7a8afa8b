use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::model::{Build, Project};
use super::PackageRegistry;
use crate::core::error::{MatrixError, MatrixResult};

pub const MODRINTH_API_BASE: &str = "https://api.modrinth.com/v2";

/// Registry client for the Modrinth v2 API.
pub struct ModrinthRegistry {
    client: Client,
    base: String,
}

impl ModrinthRegistry {
    pub fn new(client: Client) -> Self {
        Self::with_base(client, MODRINTH_API_BASE)
    }

    pub fn with_base(client: Client, base: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn project_url(&self, id_or_slug: &str) -> String {
        format!("{}/project/{}", self.base, id_or_slug)
    }

    pub fn versions_url(&self, id_or_slug: &str) -> String {
        format!("{}/project/{}/version", self.base, id_or_slug)
    }

    pub fn version_url(&self, version_id: &str) -> String {
        format!("{}/version/{}", self.base, version_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> MatrixResult<T> {
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MatrixError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PackageRegistry for ModrinthRegistry {
    async fn get_project(&self, id_or_slug: &str) -> MatrixResult<Project> {
        self.get_json(&self.project_url(id_or_slug)).await
    }

    async fn get_versions(&self, id_or_slug: &str) -> MatrixResult<Vec<Build>> {
        self.get_json(&self.versions_url(id_or_slug)).await
    }

    async fn get_version(&self, version_id: &str) -> MatrixResult<Build> {
        self.get_json(&self.version_url(version_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_urls() {
        let registry = ModrinthRegistry::with_base(Client::new(), "https://api.example.com/v2/");
        assert_eq!(
            registry.project_url("sodium"),
            "https://api.example.com/v2/project/sodium"
        );
        assert_eq!(
            registry.versions_url("AANobbMI"),
            "https://api.example.com/v2/project/AANobbMI/version"
        );
        assert_eq!(
            registry.version_url("tQTXpBGo"),
            "https://api.example.com/v2/version/tQTXpBGo"
        );
    }
}
