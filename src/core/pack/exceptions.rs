use serde::{Deserialize, Serialize};

use super::model::LoaderType;

/// Fabric API. Connector-style setups list it as required even when the
/// pack runs on a loader that ships its own port.
pub const FABRIC_API_PROJECT_ID: &str = "P7dR8mSH";

/// A dependency that is only installed on some loaders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoaderException {
    pub project_id: String,
    pub allowed_loaders: Vec<LoaderType>,
}

/// Platform exceptions applied to `required` dependencies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct DependencyExceptions {
    rules: Vec<LoaderException>,
}

impl DependencyExceptions {
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn new(rules: Vec<LoaderException>) -> Self {
        Self { rules }
    }

    /// True when `project_id` must not be installed on `loader`.
    pub fn skips(&self, project_id: &str, loader: LoaderType) -> bool {
        self.rules
            .iter()
            .any(|r| r.project_id == project_id && !r.allowed_loaders.contains(&loader))
    }
}

impl Default for DependencyExceptions {
    fn default() -> Self {
        Self::new(vec![LoaderException {
            project_id: FABRIC_API_PROJECT_ID.to_string(),
            allowed_loaders: vec![LoaderType::Fabric, LoaderType::Quilt],
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fabric_api_only_on_fabric_and_quilt() {
        let ex = DependencyExceptions::default();
        assert!(!ex.skips(FABRIC_API_PROJECT_ID, LoaderType::Fabric));
        assert!(!ex.skips(FABRIC_API_PROJECT_ID, LoaderType::Quilt));
        assert!(ex.skips(FABRIC_API_PROJECT_ID, LoaderType::NeoForge));
        assert!(ex.skips(FABRIC_API_PROJECT_ID, LoaderType::Forge));
        assert!(!ex.skips("AANobbMI", LoaderType::Forge));
    }

    #[test]
    fn serializes_as_plain_list() {
        let json = serde_json::to_string(&DependencyExceptions::default()).unwrap();
        assert_eq!(
            json,
            r#"[{"project_id":"P7dR8mSH","allowed_loaders":["fabric","quilt"]}]"#
        );
        assert!(!DependencyExceptions::none().skips(FABRIC_API_PROJECT_ID, LoaderType::Forge));
    }
}
