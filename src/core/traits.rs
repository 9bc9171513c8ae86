//! Trait identifiers the auth integration inspects.
//!
//! Traits are applied to shapes as `trait id -> JSON value` pairs. Only the
//! presence of a trait matters here, except for `aws.api#service` whose
//! `sdkId` member names the service for special-casing.

use serde::Deserialize;

/// Marks a service whose requests must carry a SigV4 signature.
pub const SIGV4: &str = "aws.auth#sigv4";

/// Marks an operation that may be invoked without authentication.
pub const OPTIONAL_AUTH: &str = "smithy.api#optionalAuth";

/// Carries service metadata such as the SDK identifier.
pub const AWS_SERVICE: &str = "aws.api#service";

/// The subset of `aws.api#service` this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceTrait {
    /// Short identifier used to special-case services (e.g. `STS`).
    #[serde(default)]
    pub sdk_id: String,
}

impl ServiceTrait {
    /// Read the trait from its JSON value; malformed values yield `None`.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_service_trait_reads_sdk_id() {
        let value = json!({"sdkId": "STS", "arnNamespace": "sts"});
        let service = ServiceTrait::from_value(&value).unwrap();
        assert_eq!(service.sdk_id, "STS");
    }

    #[test]
    fn test_service_trait_missing_sdk_id_is_empty() {
        let service = ServiceTrait::from_value(&json!({})).unwrap();
        assert!(service.sdk_id.is_empty());
    }

    #[test]
    fn test_service_trait_malformed() {
        assert!(ServiceTrait::from_value(&json!("STS")).is_none());
    }
}
