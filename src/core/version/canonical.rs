use std::collections::HashMap;

use super::number::VersionNumber;
use crate::core::error::MatrixResult;
use crate::core::rewrite;

/// Base used for registry version tokens, so suffixes like `1.0a` still parse.
pub const CANONICAL_BASE: u32 = 20;

/// Per-slug rewrite programs for projects whose version strings don't start
/// with a plain dotted number (e.g. `mc1.20.1-0.5.13`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRewrites {
    programs: HashMap<String, String>,
}

impl VersionRewrites {
    /// A table with no programs at all.
    pub fn empty() -> Self {
        Self {
            programs: HashMap::new(),
        }
    }

    pub fn insert(&mut self, slug: impl Into<String>, program: impl Into<String>) {
        self.programs.insert(slug.into(), program.into());
    }

    /// Add or replace programs; used for user supplied settings.
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (slug, program) in overrides {
            self.insert(slug, program);
        }
        self
    }

    pub fn program_for(&self, slug: &str) -> Option<&str> {
        self.programs.get(slug).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl Default for VersionRewrites {
    fn default() -> Self {
        // `<mc version>-<mod version>` style: keep the second dash token.
        const SECOND_DASH_TOKEN: &str = "'-|1[";

        let mut table = Self::empty();
        for slug in [
            "create",
            "petrols-parts",
            "create-mechanical-extruder",
            "create-mechanical-spawner",
        ] {
            table.insert(slug, SECOND_DASH_TOKEN);
        }
        // Second dash token (the whole string when there is no dash), cut
        // down to `major.minor`. `s` becomes `s-s` before splitting so that
        // index 1 always exists.
        table.insert("create-dreams-and-desires", ".'-:m␣'-|1['.|2⌉'.j");
        table
    }
}

/// Turn a registry version string into a comparable `VersionNumber`.
///
/// The slug's rewrite program runs first when there is one. After that every
/// `-` becomes `+`, the string is split on `+` and only the first token is
/// used: one leading `v` is dropped and the rest must parse as a base-20
/// dotted number. There is no fallback to later tokens.
pub fn canonical_version(
    slug: &str,
    raw: &str,
    rewrites: &VersionRewrites,
) -> MatrixResult<VersionNumber> {
    let rewritten = match rewrites.program_for(slug) {
        Some(program) => rewrite::apply(slug, raw, program)?,
        None => raw.to_string(),
    };

    let normalized = rewritten.replace('-', "+");
    let first = normalized.split('+').next().unwrap_or_default();
    let token = first.strip_prefix('v').unwrap_or(first);

    VersionNumber::parse(token, ".", CANONICAL_BASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MatrixError;

    fn canon(slug: &str, raw: &str) -> MatrixResult<VersionNumber> {
        canonical_version(slug, raw, &VersionRewrites::default())
    }

    #[test]
    fn plain_versions_parse_in_base_20() {
        assert_eq!(canon("sodium", "1.2.3").unwrap().sections(), &[1, 2, 3]);
        // "20" in base 20 is 40
        assert_eq!(canon("sodium", "1.20").unwrap().sections(), &[1, 40]);
    }

    #[test]
    fn build_metadata_and_v_prefix_are_dropped() {
        // base 20: "15" is 25
        assert_eq!(canon("jei", "v15.3.0+mc1.20.1").unwrap().sections(), &[25, 3, 0]);
        assert_eq!(canon("jei", "2.1.0-beta.3").unwrap().to_string(), "2.1.0");
    }

    #[test]
    fn only_the_first_token_is_tried() {
        let err = canon("sodium", "mc1.20.1-0.5.8").unwrap_err();
        assert!(matches!(err, MatrixError::InvalidVersion { .. }), "{err}");
    }

    #[test]
    fn vendor_programs_pick_the_mod_version() {
        assert_eq!(canon("create", "1.20.1-0.5.1.f").unwrap().to_string(), "0.5.1.15");
        assert_eq!(
            canon("create-dreams-and-desires", "1.20.1-0.2.3c").unwrap().to_string(),
            "0.2"
        );
        assert_eq!(
            canon("create-dreams-and-desires", "0.1.4").unwrap().to_string(),
            "0.1"
        );
    }

    #[test]
    fn dreams_and_desires_takes_the_second_dash_token() {
        assert_eq!(
            canon("create-dreams-and-desires", "1.20.1-0.3.1-fix").unwrap().to_string(),
            "0.3"
        );
        assert_eq!(
            canon("create-dreams-and-desires", "1.20.1-0.3.1-fix-2").unwrap().to_string(),
            "0.3"
        );
        // a single dot section can't be cut to two
        let err = canon("create-dreams-and-desires", "1.20.1-7").unwrap_err();
        assert!(matches!(err, MatrixError::Rewrite { .. }), "{err}");
    }

    #[test]
    fn broken_vendor_program_surfaces_as_rewrite_error() {
        let rewrites = VersionRewrites::empty().with_overrides([("weird", "'-|5[")]);
        let err = canonical_version("weird", "1-2", &rewrites).unwrap_err();
        assert!(matches!(err, MatrixError::Rewrite { .. }));
        assert!(err.to_string().contains("of 'weird'"));
    }

    #[test]
    fn overrides_replace_defaults() {
        let rewrites = VersionRewrites::default().with_overrides([("create", "")]);
        assert_eq!(rewrites.program_for("create"), Some(""));
        assert_eq!(rewrites.len(), 5);
    }
}
