//! Bundled support modules for the token-issuing service.
//!
//! The token service's own client cannot import the credential decorator
//! from the published token-service package, so the role assumer helpers
//! ship inside the generated client instead. Contents are copied verbatim:
//! generated trees must be byte-identical to the bundled templates.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::auth::facts::ServiceFacts;
use crate::util::hash::sha256_str;

/// Public role assumer module, re-exported from the package index.
pub const ROLE_ASSUMERS_FILE: &str = "defaultRoleAssumers";

/// Internal role assumer module holding the decorator used by the node runtime.
pub const STS_ROLE_ASSUMERS_FILE: &str = "defaultStsRoleAssumers";

/// A static file copied into the generated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportFile {
    /// Path relative to the generated source root
    pub path: &'static str,

    /// Bundled template name
    pub template: &'static str,

    pub contents: &'static str,
}

impl SupportFile {
    /// SHA-256 of the contents, hex-encoded.
    pub fn sha256(&self) -> String {
        sha256_str(self.contents)
    }
}

// Plans record a digest instead of the full contents.
impl Serialize for SupportFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SupportFile", 3)?;
        state.serialize_field("path", self.path)?;
        state.serialize_field("template", self.template)?;
        state.serialize_field("sha256", &self.sha256())?;
        state.end()
    }
}

/// Every bundled support file.
pub static SUPPORT_FILES: [SupportFile; 2] = [
    SupportFile {
        path: "defaultRoleAssumers.ts",
        template: "sts-client-defaultRoleAssumers.ts",
        contents: include_str!("../../assets/sts-client-defaultRoleAssumers.ts"),
    },
    SupportFile {
        path: "defaultStsRoleAssumers.ts",
        template: "sts-client-defaultStsRoleAssumers.ts",
        contents: include_str!("../../assets/sts-client-defaultStsRoleAssumers.ts"),
    },
];

/// Get the support files to write for a service.
pub fn additional_files(facts: &ServiceFacts) -> Vec<SupportFile> {
    if !facts.is_token_service() {
        return Vec::new();
    }
    SUPPORT_FILES.to_vec()
}

/// Get the package-level export statements to append for a service.
pub fn additional_exports(facts: &ServiceFacts) -> Vec<String> {
    if !facts.is_token_service() {
        return Vec::new();
    }
    vec![format!("export * from \"./{}\"", ROLE_ASSUMERS_FILE)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{signed_fixture, sts_fixture, ModelFixture};

    fn facts_for(fixture: &ModelFixture) -> ServiceFacts {
        ServiceFacts::collect(&fixture.build(), &fixture.service_id())
    }

    #[test]
    fn test_token_service_gets_support_files() {
        let files = additional_files(&facts_for(&sts_fixture()));
        let paths: Vec<_> = files.iter().map(|f| f.path).collect();
        assert_eq!(paths, vec!["defaultRoleAssumers.ts", "defaultStsRoleAssumers.ts"]);
    }

    #[test]
    fn test_support_files_match_templates() {
        let files = additional_files(&facts_for(&sts_fixture()));
        assert_eq!(
            files[0].contents.as_bytes(),
            include_bytes!("../../assets/sts-client-defaultRoleAssumers.ts")
        );
        assert_eq!(
            files[1].contents.as_bytes(),
            include_bytes!("../../assets/sts-client-defaultStsRoleAssumers.ts")
        );
    }

    #[test]
    fn test_support_files_define_decorator() {
        for file in &SUPPORT_FILES {
            assert!(file.contents.contains("export const decorateDefaultCredentialProvider"));
        }
    }

    #[test]
    fn test_token_service_export() {
        assert_eq!(
            additional_exports(&facts_for(&sts_fixture())),
            vec!["export * from \"./defaultRoleAssumers\"".to_string()]
        );
    }

    #[test]
    fn test_other_services_get_nothing() {
        let facts = facts_for(&signed_fixture());
        assert!(additional_files(&facts).is_empty());
        assert!(additional_exports(&facts).is_empty());
    }

    #[test]
    fn test_serializes_digest_not_contents() {
        let json = serde_json::to_value(SUPPORT_FILES[1]).unwrap();
        assert_eq!(json["path"], "defaultStsRoleAssumers.ts");
        assert_eq!(json["sha256"], SUPPORT_FILES[1].sha256());
        assert!(json.get("contents").is_none());
    }

    #[test]
    fn test_sha256_is_stable() {
        let file = SUPPORT_FILES[0];
        assert_eq!(file.sha256(), file.sha256());
        assert_eq!(file.sha256().len(), 64);
        assert_ne!(SUPPORT_FILES[0].sha256(), SUPPORT_FILES[1].sha256());
    }
}
