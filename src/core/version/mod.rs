pub mod canonical;
pub mod number;

pub use canonical::{canonical_version, VersionRewrites, CANONICAL_BASE};
pub use number::VersionNumber;
