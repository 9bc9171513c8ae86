//! npm packages the generated client code depends on.

use std::fmt;

use serde::{Serialize, Serializer};

/// Section of `package.json` a dependency belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    Dependencies,
}

/// A package dependency of generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageDependency {
    /// npm package name
    pub package: &'static str,

    /// `package.json` section
    pub kind: DependencyKind,
}

impl PackageDependency {
    const fn runtime(package: &'static str) -> Self {
        PackageDependency {
            package,
            kind: DependencyKind::Dependencies,
        }
    }
}

impl fmt::Display for PackageDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.package)
    }
}

impl Serialize for PackageDependency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.package)
    }
}

/// SigV4 signing config resolver and middleware.
pub const MIDDLEWARE_SIGNING: PackageDependency =
    PackageDependency::runtime("@aws-sdk/middleware-signing");

/// Token-service specific signing config resolver.
pub const STS_MIDDLEWARE: PackageDependency =
    PackageDependency::runtime("@aws-sdk/middleware-sdk-sts");

/// The generated token-service client, source of the shared role assumers.
pub const STS_CLIENT: PackageDependency = PackageDependency::runtime("@aws-sdk/client-sts");

/// Default credential provider chain for server processes.
pub const CREDENTIAL_PROVIDER_NODE: PackageDependency =
    PackageDependency::runtime("@aws-sdk/credential-provider-node");

/// Shared SDK type definitions.
pub const AWS_SDK_TYPES: PackageDependency = PackageDependency::runtime("@aws-sdk/types");
