use std::collections::HashSet;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use tracing::{debug, info};

use super::exceptions::DependencyExceptions;
use super::model::{LoaderType, PackageRecord};
use crate::core::downloader::{FileSink, Fetcher};
use crate::core::error::{MatrixError, MatrixResult};
use crate::core::registry::{Build, PackageRegistry, Project};
use crate::core::version::{canonical_version, VersionRewrites};

/// Switches that change which records get touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Leave records that are already populated alone.
    pub only_sync_empty: bool,
    /// Don't download the pack's externally hosted files.
    pub ignore_externals: bool,
}

/// Everything a resolution pass talks to.
pub struct ResolveContext<'a> {
    pub registry: &'a dyn PackageRegistry,
    pub fetcher: &'a dyn Fetcher,
    pub sink: &'a dyn FileSink,
    pub rewrites: &'a VersionRewrites,
    pub exceptions: &'a DependencyExceptions,
    /// Directory every downloaded file is written to.
    pub mods_dir: &'a Path,
    pub options: ResolveOptions,
}

/// Resolves package records against the registry, depth first, downloading
/// each project at most once per pass.
pub struct DependencyResolver<'a> {
    pub(super) ctx: ResolveContext<'a>,
}

/// Mutable bookkeeping of one `resolve` call.
#[derive(Default)]
struct Pass {
    /// Ids and slugs that must not be queued again.
    visited: HashSet<String>,
    /// Ids and slugs whose file was written during this pass.
    downloaded: HashSet<String>,
    /// Dependency records, in download order.
    discovered: Vec<PackageRecord>,
}

type PassFuture<'b> = Pin<Box<dyn Future<Output = MatrixResult<()>> + Send + 'b>>;

impl<'a> DependencyResolver<'a> {
    pub fn new(ctx: ResolveContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolve `records` for `game_version` / `loader`.
    ///
    /// Records are updated in place; dependencies found along the way are
    /// appended after them. The result drops records that stayed empty and
    /// later duplicates of an identity. `visited` is shared with the caller
    /// and ends up holding every id and slug seen during the pass.
    pub async fn resolve(
        &self,
        mut records: Vec<PackageRecord>,
        game_version: &str,
        loader: LoaderType,
        visited: &mut HashSet<String>,
    ) -> MatrixResult<Vec<PackageRecord>> {
        let mut pass = Pass {
            visited: std::mem::take(visited),
            ..Default::default()
        };

        let result = self
            .traverse(&mut records, game_version, loader, &mut pass, 0)
            .await;
        *visited = std::mem::take(&mut pass.visited);
        result?;

        records.append(&mut pass.discovered);
        Ok(dedup_records(records))
    }

    fn traverse<'b>(
        &'b self,
        records: &'b mut [PackageRecord],
        game_version: &'b str,
        loader: LoaderType,
        pass: &'b mut Pass,
        depth: usize,
    ) -> PassFuture<'b> {
        Box::pin(async move {
            let kind = if depth == 0 { "mod" } else { "dependency" };

            for record in records.iter_mut() {
                if self.ctx.options.only_sync_empty && !record.is_empty() {
                    info!(
                        "Skipped '{}' because only empty records are being synced",
                        record.identity()
                    );
                    continue;
                }

                if record.identities().any(|k| pass.downloaded.contains(k)) {
                    debug!("'{}' was already downloaded in this pass", record.identity());
                    continue;
                }

                info!("Downloading {} '{}'...", kind, record.identity());

                let active_loader = record.effective_loader(loader);
                let build = self
                    .install(record, game_version, active_loader, pass)
                    .await?;
                info!(
                    "Downloaded {} '{}'",
                    kind,
                    record.file_name.as_deref().unwrap_or_default()
                );

                let mut queued = self.queue_dependencies(record, &build, active_loader, pass);

                if depth > 0 {
                    pass.discovered.push(record.clone());
                }

                self.traverse(&mut queued, game_version, loader, pass, depth + 1)
                    .await?;
            }

            Ok(())
        })
    }

    /// Pick a build for `record`, download its file and fill the record in.
    async fn install(
        &self,
        record: &mut PackageRecord,
        game_version: &str,
        loader: LoaderType,
        pass: &mut Pass,
    ) -> MatrixResult<Build> {
        let (build, project) = self.pick_build(record, game_version, loader).await?;

        let file = build.primary_file().ok_or_else(|| {
            MatrixError::NotFound(format!(
                "build '{}' of '{}' has no files",
                build.id,
                record.identity()
            ))
        })?;

        let bytes = self.ctx.fetcher.fetch(&file.url).await?;
        self.ctx
            .sink
            .write(&self.ctx.mods_dir.join(&file.filename), &bytes)
            .await?;

        if record.is_empty() {
            if let Some(project) = &project {
                record.fill_from(project);
            }
        }
        record.version = Some(build.version_number.clone());
        record.file_name = Some(file.filename.clone());

        let keys = record
            .identities()
            .chain(build.project_id.as_deref())
            .map(String::from)
            .collect::<Vec<_>>();
        for key in keys {
            pass.visited.insert(key.clone());
            pass.downloaded.insert(key);
        }

        Ok(build)
    }

    async fn pick_build(
        &self,
        record: &PackageRecord,
        game_version: &str,
        loader: LoaderType,
    ) -> MatrixResult<(Build, Option<Project>)> {
        let registry = self.ctx.registry;

        if let Some(version_id) = record.forced_version() {
            info!(
                "'{}' has been forced to use version '{}'",
                record.identity(),
                version_id
            );
            let build = registry.get_version(version_id).await?;

            let project = if record.is_empty() {
                let key = match record.identity() {
                    "" => build.project_id.clone().unwrap_or_default(),
                    key => key.to_string(),
                };
                Some(registry.get_project(&key).await?)
            } else {
                None
            };

            return Ok((build, project));
        }

        if record.identity().is_empty() {
            return Err(MatrixError::NotFound(
                "package record has neither an id nor a slug".into(),
            ));
        }

        let project = registry.get_project(record.identity()).await?;

        if !project.game_versions.iter().any(|v| v == game_version) {
            return Err(MatrixError::NotFound(format!(
                "no builds found with game version {} for '{}' ('{}')",
                game_version, project.slug, project.id
            )));
        }

        let builds = registry.get_versions(record.identity()).await?;
        let build = select_build(&project.slug, builds, game_version, loader, self.ctx.rewrites)?
            .ok_or_else(|| {
                MatrixError::NotFound(format!(
                    "no builds found with game version {} and loader {} for '{}' ('{}')",
                    game_version, loader, project.slug, project.id
                ))
            })?;

        debug!(
            "Selected build '{}' ({}) of '{}'",
            build.id, build.version_number, project.slug
        );
        Ok((build, Some(project)))
    }

    /// Placeholders for the `required` dependencies of `build` that haven't
    /// been seen yet. Queued ids are marked visited right away.
    fn queue_dependencies(
        &self,
        record: &PackageRecord,
        build: &Build,
        loader: LoaderType,
        pass: &mut Pass,
    ) -> Vec<PackageRecord> {
        let mut queued = Vec::new();

        for project_id in build.required_projects() {
            if pass.visited.contains(project_id) {
                debug!(
                    "Dependency '{}' of '{}' is already handled",
                    project_id,
                    record.identity()
                );
                continue;
            }

            if self.ctx.exceptions.skips(project_id, loader) {
                info!(
                    "Skipped dependency '{}' of '{}': not installed on {}",
                    project_id,
                    record.identity(),
                    loader
                );
                continue;
            }

            pass.visited.insert(project_id.to_string());
            queued.push(PackageRecord::dependency(project_id, record.force_loader));
        }

        queued
    }
}

/// Keep builds for `game_version` + `loader` and return the newest one by
/// canonical version. Equal versions resolve to the one listed first.
pub fn select_build(
    slug: &str,
    builds: Vec<Build>,
    game_version: &str,
    loader: LoaderType,
    rewrites: &VersionRewrites,
) -> MatrixResult<Option<Build>> {
    let mut keyed = builds
        .into_iter()
        .enumerate()
        .filter(|(_, b)| b.supports(game_version, loader.as_str()))
        .map(|(i, b)| -> MatrixResult<_> {
            Ok((canonical_version(slug, &b.version_number, rewrites)?, i, b))
        })
        .collect::<MatrixResult<Vec<_>>>()?;

    keyed.sort_by(|(va, ia, _), (vb, ib, _)| va.cmp(vb).then_with(|| ib.cmp(ia)));

    Ok(keyed.pop().map(|(_, _, build)| build))
}

/// Drop empty records and every record whose identity was already kept.
pub fn dedup_records(records: Vec<PackageRecord>) -> Vec<PackageRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| !r.is_empty() && seen.insert(r.identity().to_string()))
        .collect()
}
