//! Default credential provider bootstrapping per runtime.
//!
//! Each generated client has one runtime config per execution environment.
//! For signed services, the `credentialDefaultProvider` entry differs:
//!
//! - browser: there is no implicit credential source, so the provider
//!   always rejects.
//! - node: the default provider chain, decorated so role assumption can
//!   refresh temporary credentials. The decorator comes from the token-service
//!   client package, except for the token service itself, which imports it
//!   from its own bundled support module to avoid depending on itself.
//! - everything else: nothing.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::auth::assets::STS_ROLE_ASSUMERS_FILE;
use crate::auth::facts::ServiceFacts;
use crate::emit::dependency::{PackageDependency, CREDENTIAL_PROVIDER_NODE, STS_CLIENT};
use crate::emit::writer::{Import, TypeScriptWriter};

/// Config field holding the default credential provider.
pub const CREDENTIAL_DEFAULT_PROVIDER: &str = "credentialDefaultProvider";

/// Decorator enabling role-assumption refresh on the default provider.
pub const DECORATOR: &str = "decorateDefaultCredentialProvider";

/// Rejection message of the browser provider.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "Credential is missing";

/// Execution environment a runtime config is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageTarget {
    /// Environment-independent defaults
    Shared,
    /// Server process (Node.js)
    Node,
    /// Hosted browser
    Browser,
    /// React Native
    ReactNative,
}

impl LanguageTarget {
    /// All targets, in generation order.
    pub const ALL: [LanguageTarget; 4] = [
        LanguageTarget::Shared,
        LanguageTarget::Node,
        LanguageTarget::Browser,
        LanguageTarget::ReactNative,
    ];

    /// Get the target name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTarget::Shared => "shared",
            LanguageTarget::Node => "node",
            LanguageTarget::Browser => "browser",
            LanguageTarget::ReactNative => "react-native",
        }
    }

    /// Runtime config module generated for this target.
    pub fn runtime_config_file(&self) -> &'static str {
        match self {
            LanguageTarget::Shared => "runtimeConfig.shared.ts",
            LanguageTarget::Node => "runtimeConfig.ts",
            LanguageTarget::Browser => "runtimeConfig.browser.ts",
            LanguageTarget::ReactNative => "runtimeConfig.native.ts",
        }
    }
}

impl fmt::Display for LanguageTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageTarget {
    type Err = LanguageTargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(LanguageTarget::Shared),
            "node" => Ok(LanguageTarget::Node),
            "browser" => Ok(LanguageTarget::Browser),
            "react-native" | "reactnative" => Ok(LanguageTarget::ReactNative),
            _ => Err(LanguageTargetParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid target name.
#[derive(Debug, Clone)]
pub struct LanguageTargetParseError(pub String);

impl fmt::Display for LanguageTargetParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid target '{}', valid values: shared, node, browser, react-native",
            self.0
        )
    }
}

impl std::error::Error for LanguageTargetParseError {}

/// Initializer of one runtime config field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapExpression {
    pub target: LanguageTarget,

    /// Config field the fragment initializes
    pub field: &'static str,

    /// Source fragment, an object-literal entry with trailing comma
    pub fragment: String,

    pub imports: Vec<Import>,

    /// Packages the fragment needs at build time
    pub dependencies: Vec<PackageDependency>,
}

impl BootstrapExpression {
    /// Write the fragment with its imports and dependencies.
    pub fn write_to(&self, writer: &mut TypeScriptWriter) {
        for dependency in &self.dependencies {
            writer.add_dependency(*dependency);
        }
        for import in &self.imports {
            writer.add_import(import.clone());
        }
        writer.write(&self.fragment);
    }
}

/// Build the default credential provider initializer for a target.
///
/// `None` unless the service is signed and has at least one operation that
/// needs auth, and only for the browser and node targets.
pub fn bootstrap_expression(
    facts: &ServiceFacts,
    target: LanguageTarget,
) -> Option<BootstrapExpression> {
    if !facts.needs_credential_provider() {
        return None;
    }

    match target {
        LanguageTarget::Browser => Some(BootstrapExpression {
            target,
            field: CREDENTIAL_DEFAULT_PROVIDER,
            fragment: format!(
                "{}: (_: unknown) => () => Promise.reject(new Error(\"{}\")),",
                CREDENTIAL_DEFAULT_PROVIDER, MISSING_CREDENTIAL_MESSAGE
            ),
            imports: Vec::new(),
            dependencies: Vec::new(),
        }),
        LanguageTarget::Node => {
            let mut dependencies = Vec::new();
            let decorator_module = if facts.is_token_service() {
                format!("./{}", STS_ROLE_ASSUMERS_FILE)
            } else {
                dependencies.push(STS_CLIENT);
                STS_CLIENT.package.to_string()
            };
            dependencies.push(CREDENTIAL_PROVIDER_NODE);

            Some(BootstrapExpression {
                target,
                field: CREDENTIAL_DEFAULT_PROVIDER,
                fragment: format!(
                    "{}: {}({}),",
                    CREDENTIAL_DEFAULT_PROVIDER, DECORATOR, CREDENTIAL_DEFAULT_PROVIDER
                ),
                imports: vec![
                    Import::new(DECORATOR, DECORATOR, &decorator_module),
                    Import::new(
                        "defaultProvider",
                        CREDENTIAL_DEFAULT_PROVIDER,
                        CREDENTIAL_PROVIDER_NODE.package,
                    ),
                ],
                dependencies,
            })
        }
        LanguageTarget::Shared | LanguageTarget::ReactNative => None,
    }
}

/// Get the runtime config initializers for a target, keyed by field name.
pub fn runtime_config_writers(
    facts: &ServiceFacts,
    target: LanguageTarget,
) -> BTreeMap<&'static str, BootstrapExpression> {
    bootstrap_expression(facts, target)
        .map(|expr| (expr.field, expr))
        .into_iter()
        .collect()
}
