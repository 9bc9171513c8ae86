//! Services that get special-cased by identifier.
//!
//! Kept as plain data so the rule table never hard-codes a service name.

/// A service family matched by its SDK identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceFamily {
    /// Value of `aws.api#service` `sdkId` that identifies the family
    pub sdk_id: &'static str,

    /// Operations that never take a SigV4 signature
    pub unsigned_operations: &'static [&'static str],

    /// Generated client type handed to the family's auth config resolver
    pub client_type: &'static str,
}

impl ServiceFamily {
    /// Check whether a service's SDK id belongs to this family.
    pub fn matches(&self, sdk_id: Option<&str>) -> bool {
        sdk_id == Some(self.sdk_id)
    }

    /// Check whether an operation is exempt from signing.
    ///
    /// `name` is the operation's name in the service, after `rename`.
    pub fn is_unsigned_operation(&self, name: &str) -> bool {
        self.unsigned_operations.contains(&name)
    }
}

/// The token-issuing service. Its web-identity and SAML role assumption
/// calls authenticate with an external token instead of a signature.
pub const TOKEN_SERVICE: ServiceFamily = ServiceFamily {
    sdk_id: "STS",
    unsigned_operations: &["AssumeRoleWithWebIdentity", "AssumeRoleWithSAML"],
    client_type: "STSClient",
};
