use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::{MatrixError, MatrixResult};

/// A dotted version made of unsigned 16-bit sections.
///
/// Ordering is length first: a version with fewer sections is always the
/// smaller one, whatever the section values are (`1.2 < 1.2.0`, `9.9 < 1.0.0`).
/// Only equal-length versions are compared section by section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct VersionNumber {
    sections: Vec<u16>,
}

impl VersionNumber {
    pub fn new(sections: Vec<u16>) -> Self {
        Self { sections }
    }

    /// Split `text` on `delimiter` and parse every piece in `base`.
    ///
    /// Bases above 10 accept letters as digits, which lets tokens such as
    /// `1.0a` parse under base 20.
    ///
    /// # Examples
    /// ```
    /// use matrix_lib::core::version::VersionNumber;
    /// let v = VersionNumber::parse("1.20.4", ".", 10).unwrap();
    /// assert_eq!(v.sections(), &[1, 20, 4]);
    /// ```
    pub fn parse(text: &str, delimiter: &str, base: u32) -> MatrixResult<Self> {
        let invalid = |reason: String| MatrixError::InvalidVersion {
            input: text.to_string(),
            reason,
        };

        if !(2..=36).contains(&base) {
            return Err(invalid(format!("unsupported base {}", base)));
        }
        if delimiter.is_empty() {
            return Err(invalid("empty delimiter".into()));
        }

        let mut sections = Vec::new();
        for piece in text.split(delimiter) {
            // from_str_radix tolerates a leading '+', section strings must not.
            if piece.starts_with('+') || piece.starts_with('-') {
                return Err(invalid(format!("invalid section '{}'", piece)));
            }
            let n = u16::from_str_radix(piece, base)
                .map_err(|e| invalid(format!("section '{}': {}", piece, e)))?;
            sections.push(n);
        }

        Ok(Self { sections })
    }

    pub fn sections(&self) -> &[u16] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sections
            .len()
            .cmp(&other.sections.len())
            .then_with(|| self.sections.cmp(&other.sections))
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}

// Serialized as its dotted decimal form, e.g. "1.20.1".
impl Serialize for VersionNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        VersionNumber::parse(&raw, ".", 10).map_err(serde::de::Error::custom)
    }
}
