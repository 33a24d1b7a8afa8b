use std::path::{Path, PathBuf};

use reqwest::Client;
use tracing::info;

use super::settings::MatrixSettings;
use crate::core::downloader::{FsSink, HttpFetcher};
use crate::core::error::{MatrixError, MatrixResult};
use crate::core::http::build_http_client;
use crate::core::pack::{DependencyResolver, Pack, ResolveContext, SyncReport};
use crate::core::registry::ModrinthRegistry;
use crate::core::version::VersionRewrites;

const APP_DIR_NAME: &str = "matrix";

/// Shared state: data directory, settings and the HTTP-backed services.
pub struct AppState {
    pub data_dir: PathBuf,
    pub http_client: Client,
    pub settings: MatrixSettings,
    pub registry: ModrinthRegistry,
    pub fetcher: HttpFetcher,
}

impl AppState {
    pub fn new() -> MatrixResult<Self> {
        Self::with_data_dir(default_data_dir())
    }

    /// State rooted at `data_dir`, loading settings from it.
    pub fn with_data_dir(data_dir: PathBuf) -> MatrixResult<Self> {
        std::fs::create_dir_all(&data_dir).map_err(|e| MatrixError::Io {
            path: data_dir.clone(),
            source: e,
        })?;
        let settings = MatrixSettings::load(&data_dir);
        Self::with_settings(data_dir, settings)
    }

    pub fn with_settings(data_dir: PathBuf, settings: MatrixSettings) -> MatrixResult<Self> {
        let http_client = build_http_client(&settings.user_agent)?;
        let registry = ModrinthRegistry::with_base(http_client.clone(), &settings.api_base);
        let fetcher = HttpFetcher::new(http_client.clone());

        Ok(Self {
            data_dir,
            http_client,
            settings,
            registry,
            fetcher,
        })
    }

    pub fn save_settings(&self) -> MatrixResult<()> {
        self.settings.save(&self.data_dir)
    }

    pub fn rewrites(&self) -> VersionRewrites {
        self.settings.rewrites()
    }

    /// Directory files of the pack at `pack_dir` are written to.
    pub fn mods_dir(&self, pack_dir: &Path) -> PathBuf {
        pack_dir.join(&self.settings.mods_dir)
    }

    /// Resolve and download `pack` into `pack_dir`.
    pub async fn sync_pack(&self, pack: &mut Pack, pack_dir: &Path) -> MatrixResult<SyncReport> {
        let rewrites = self.rewrites();
        let mods_dir = self.mods_dir(pack_dir);
        info!("Syncing '{}' into {:?}", pack.name, mods_dir);

        let resolver = DependencyResolver::new(ResolveContext {
            registry: &self.registry,
            fetcher: &self.fetcher,
            sink: &FsSink,
            rewrites: &rewrites,
            exceptions: &self.settings.dependency_exceptions,
            mods_dir: &mods_dir,
            options: self.settings.resolve_options(),
        });
        resolver.populate(pack).await
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
