pub mod exceptions;
pub mod model;
pub mod resolver;
pub mod sync;

#[cfg(test)]
mod testing;

pub use exceptions::{DependencyExceptions, LoaderException, FABRIC_API_PROJECT_ID};
pub use model::{LoaderType, Pack, PackageRecord};
pub use resolver::{dedup_records, select_build, DependencyResolver, ResolveContext, ResolveOptions};
pub use sync::SyncReport;
