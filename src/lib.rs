pub mod core;

use tracing_subscriber::EnvFilter;

pub use crate::core::error::{MatrixError, MatrixResult};
pub use crate::core::pack::{
    DependencyResolver, LoaderType, Pack, PackageRecord, ResolveContext, ResolveOptions,
    SyncReport,
};
pub use crate::core::state::{AppState, MatrixSettings};
pub use crate::core::version::VersionNumber;

/// Install the `fmt` subscriber. `RUST_LOG` overrides the default filter.
/// Does nothing if a global subscriber is already set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,matrix_lib=debug")),
        )
        .try_init();
}
