// ─── Matrix Core ───
// Modpack dependency resolution against a package registry.
//
// Architecture:
//   core/
//     version/    - Version numbers + canonical version of registry strings
//     rewrite/    - Stack-machine rewrite programs for odd version formats
//     registry/   - Registry trait, project/build model, Modrinth client
//     downloader/ - Fetcher + file sink
//     pack/       - Pack model, dependency resolver, pack sync
//     state/      - Settings + application wiring

pub mod downloader;
pub mod error;
pub mod http;
pub mod pack;
pub mod registry;
pub mod rewrite;
pub mod state;
pub mod version;
