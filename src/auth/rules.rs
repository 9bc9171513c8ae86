//! Plugin selection rules.
//!
//! An ordered table of predicate-guarded rules. Every rule is evaluated and
//! every matching rule fires; the rules target different injection kinds so
//! they never compete. Config-field rules (1-2) always coexist with whichever
//! pipeline-stage rule (3 or 4) fires, and 3 and 4 never both fire for the
//! same service.

use serde::Serialize;

use crate::auth::facts::{OperationFacts, ServiceFacts};
use crate::auth::family::TOKEN_SERVICE;
use crate::core::ShapeId;
use crate::emit::dependency::{PackageDependency, MIDDLEWARE_SIGNING, STS_MIDDLEWARE};

/// Where a plugin hooks into the generated client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionKind {
    /// Adds a field and resolver to the client configuration object
    ConfigField,
    /// Adds a stage to the request pipeline of matching operations
    RequestPipelineStage,
}

impl InjectionKind {
    /// Get the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            InjectionKind::ConfigField => "config-field",
            InjectionKind::RequestPipelineStage => "request-pipeline-stage",
        }
    }
}

impl std::fmt::Display for InjectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which operations a plugin applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", content = "operations", rename_all = "kebab-case")]
pub enum Applicability {
    /// Applied uniformly to the whole client
    Service,
    /// Applied to the listed operations only
    Operations(Vec<ShapeId>),
}

/// A plugin the generated client must apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginDescriptor {
    /// Rule that produced this descriptor
    pub rule: &'static str,

    /// Package providing the plugin
    pub dependency: PackageDependency,

    /// Plugin base name (`AwsAuth` -> `resolveAwsAuthConfig` / `getAwsAuthPlugin`)
    pub name: &'static str,

    pub kind: InjectionKind,

    pub applicability: Applicability,

    /// Extra arguments passed to the config resolver
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_resolve_parameters: Vec<&'static str>,
}

impl PluginDescriptor {
    /// Check whether the plugin is applied client-wide.
    pub fn applies_to_service(&self) -> bool {
        matches!(self.applicability, Applicability::Service)
    }

    /// Check whether the plugin applies to an operation.
    pub fn applies_to(&self, operation: &ShapeId) -> bool {
        match &self.applicability {
            Applicability::Service => true,
            Applicability::Operations(ops) => ops.contains(operation),
        }
    }

    /// Name of the config resolver function, for config-field plugins.
    pub fn resolve_function(&self) -> Option<String> {
        match self.kind {
            InjectionKind::ConfigField => Some(format!("resolve{}Config", self.name)),
            InjectionKind::RequestPipelineStage => None,
        }
    }

    /// Name of the plugin factory, for pipeline-stage plugins.
    pub fn plugin_function(&self) -> Option<String> {
        match self.kind {
            InjectionKind::ConfigField => None,
            InjectionKind::RequestPipelineStage => Some(format!("get{}Plugin", self.name)),
        }
    }
}

/// Guard of a rule.
#[derive(Clone, Copy)]
pub enum Condition {
    /// Evaluated once per service
    Service(fn(&ServiceFacts) -> bool),
    /// Evaluated once per contained operation
    Operation(fn(&ServiceFacts, &OperationFacts) -> bool),
}

impl std::fmt::Debug for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Condition::Service(_) => f.write_str("Condition::Service"),
            Condition::Operation(_) => f.write_str("Condition::Operation"),
        }
    }
}

/// The plugin a rule attaches when it fires.
#[derive(Debug, Clone, Copy)]
pub struct PluginTemplate {
    pub dependency: PackageDependency,
    pub name: &'static str,
    pub kind: InjectionKind,
    pub additional_resolve_parameters: &'static [&'static str],
}

/// One row of the selection table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub description: &'static str,
    pub condition: Condition,
    pub plugin: PluginTemplate,
}

const AWS_AUTH: &str = "AwsAuth";
const STS_AUTH: &str = "StsAuth";

/// The selection table, in evaluation order.
pub static RULES: &[Rule] = &[
    Rule {
        name: "aws-auth-config",
        description: "signed service with at least one authenticated operation",
        condition: Condition::Service(signs_with_generic_config),
        plugin: PluginTemplate {
            dependency: MIDDLEWARE_SIGNING,
            name: AWS_AUTH,
            kind: InjectionKind::ConfigField,
            additional_resolve_parameters: &[],
        },
    },
    Rule {
        name: "sts-auth-config",
        description: "token-issuing service",
        condition: Condition::Service(is_token_service),
        plugin: PluginTemplate {
            dependency: STS_MIDDLEWARE,
            name: STS_AUTH,
            kind: InjectionKind::ConfigField,
            additional_resolve_parameters: &[TOKEN_SERVICE.client_type],
        },
    },
    Rule {
        name: "aws-auth-middleware",
        description: "signed service without optional-auth operations",
        condition: Condition::Service(signs_every_operation),
        plugin: PluginTemplate {
            dependency: MIDDLEWARE_SIGNING,
            name: AWS_AUTH,
            kind: InjectionKind::RequestPipelineStage,
            additional_resolve_parameters: &[],
        },
    },
    Rule {
        name: "aws-auth-operation-middleware",
        description: "operation that needs a signature while others don't",
        condition: Condition::Operation(signs_operation),
        plugin: PluginTemplate {
            dependency: MIDDLEWARE_SIGNING,
            name: AWS_AUTH,
            kind: InjectionKind::RequestPipelineStage,
            additional_resolve_parameters: &[],
        },
    },
];

fn signs_with_generic_config(facts: &ServiceFacts) -> bool {
    facts.is_signed() && !facts.all_operations_optional_auth() && !facts.is_token_service()
}

fn is_token_service(facts: &ServiceFacts) -> bool {
    facts.is_token_service()
}

fn signs_every_operation(facts: &ServiceFacts) -> bool {
    !facts.is_token_service() && facts.is_signed() && !facts.has_any_optional_auth_operation()
}

fn signs_operation(facts: &ServiceFacts, operation: &OperationFacts) -> bool {
    facts.operation_requires_signed_auth(operation)
}

/// Result of evaluating one rule against a service.
#[derive(Debug, Clone, Serialize)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub description: &'static str,
    /// The attached plugin, if the rule fired
    pub plugin: Option<PluginDescriptor>,
}

impl RuleOutcome {
    /// Check whether the rule fired.
    pub fn fired(&self) -> bool {
        self.plugin.is_some()
    }
}

impl Rule {
    /// Evaluate this rule against a service.
    ///
    /// Operation-scoped rules fire when at least one operation matches.
    pub fn evaluate(&self, facts: &ServiceFacts) -> RuleOutcome {
        let applicability = match self.condition {
            Condition::Service(pred) => pred(facts).then_some(Applicability::Service),
            Condition::Operation(pred) => {
                let matched: Vec<ShapeId> = facts
                    .operations
                    .iter()
                    .filter(|op| pred(facts, op))
                    .map(|op| op.id.clone())
                    .collect();
                (!matched.is_empty()).then_some(Applicability::Operations(matched))
            }
        };

        let plugin = applicability.map(|applicability| PluginDescriptor {
            rule: self.name,
            dependency: self.plugin.dependency,
            name: self.plugin.name,
            kind: self.plugin.kind,
            applicability,
            additional_resolve_parameters: self.plugin.additional_resolve_parameters.to_vec(),
        });

        RuleOutcome {
            rule: self.name,
            description: self.description,
            plugin,
        }
    }
}

/// Evaluate every rule, fired or not, in table order.
pub fn evaluate_rules(facts: &ServiceFacts) -> Vec<RuleOutcome> {
    RULES
        .iter()
        .map(|rule| {
            let outcome = rule.evaluate(facts);
            tracing::debug!(
                "{}: rule {} {}",
                facts.service,
                rule.name,
                if outcome.fired() { "fired" } else { "skipped" }
            );
            outcome
        })
        .collect()
}

/// Get the plugins a service's client must apply, in table order.
pub fn select_plugins(facts: &ServiceFacts) -> Vec<PluginDescriptor> {
    evaluate_rules(facts)
        .into_iter()
        .filter_map(|outcome| outcome.plugin)
        .collect()
}
