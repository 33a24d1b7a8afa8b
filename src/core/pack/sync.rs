use serde::Serialize;
use tracing::{info, warn};

use super::model::Pack;
use super::resolver::DependencyResolver;
use crate::core::error::MatrixResult;

/// Outcome of populating a pack.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    /// Records left in the pack after resolution.
    pub resolved: usize,
    /// External file names that were written.
    pub externals_downloaded: Vec<String>,
    /// External file names the host refused to serve.
    pub externals_skipped: Vec<String>,
}

impl<'a> DependencyResolver<'a> {
    /// Resolve every record of `pack` for its own game version and loader,
    /// replace the record list with the result, then fetch the externals.
    ///
    /// Records already listed in the pack are seeded as visited, so a
    /// dependency that names one of them is left to the top-level entry.
    pub async fn populate(&self, pack: &mut Pack) -> MatrixResult<SyncReport> {
        info!(
            "Populating '{}' ({} records) for {} on {}",
            pack.name,
            pack.records.len(),
            pack.game_version,
            pack.loader
        );

        let mut visited = pack.known_identities();
        pack.records = self
            .resolve(
                pack.records.clone(),
                &pack.game_version.to_string(),
                pack.loader,
                &mut visited,
            )
            .await?;

        let mut report = SyncReport {
            resolved: pack.records.len(),
            ..Default::default()
        };

        if self.ctx.options.ignore_externals {
            info!("Ignoring {} external files", pack.externals.len());
            return Ok(report);
        }

        for (name, url) in &pack.externals {
            info!("Downloading external '{}'...", name);
            match self.ctx.fetcher.fetch(url).await {
                Ok(bytes) => {
                    self.ctx
                        .sink
                        .write(&self.ctx.mods_dir.join(name), &bytes)
                        .await?;
                    report.externals_downloaded.push(name.clone());
                }
                Err(e) if e.is_forbidden() => {
                    warn!("Skipped external '{}': {}", name, e);
                    report.externals_skipped.push(name.clone());
                }
                Err(e) => return Err(e),
            }
        }

        Ok(report)
    }
}
