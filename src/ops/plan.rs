//! Per-service auth plans.
//!
//! A plan is the complete set of auth wiring decisions for one service:
//! the facts they were derived from, the rule trace, the plugins to apply,
//! the runtime config initializers per target, the config interface fields,
//! and the support files. Plans are pure data; `generate` renders them.

use std::collections::{BTreeMap, BTreeSet};

use rayon::prelude::*;
use serde::Serialize;

use crate::auth::{
    additional_exports, additional_files, config_interface_fields, evaluate_rules,
    runtime_config_writers, BootstrapExpression, ConfigInterfaceField, InjectionKind,
    LanguageTarget, PluginDescriptor, RuleOutcome, ServiceFacts, SupportFile,
};
use crate::core::{ModelQuery, ShapeId};
use crate::emit::dependency::{PackageDependency, AWS_SDK_TYPES};

/// Signing decision for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDecision {
    pub operation: ShapeId,

    /// Carries `smithy.api#optionalAuth`
    pub optional_auth: bool,

    /// Requests are signed, by a client-wide or per-operation stage
    pub signed: bool,
}

/// Auth wiring decisions for one service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPlan {
    pub service: ShapeId,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_id: Option<String>,

    pub signed: bool,

    pub token_service: bool,

    pub operations: Vec<OperationDecision>,

    /// Plugins to apply, in rule order
    pub plugins: Vec<PluginDescriptor>,

    /// Every rule, fired or not
    #[serde(skip)]
    pub rules: Vec<RuleOutcome>,

    /// Runtime config initializers, only for targets that produced output
    pub runtime_config: BTreeMap<LanguageTarget, BTreeMap<&'static str, BootstrapExpression>>,

    pub config_fields: Vec<ConfigInterfaceField>,

    pub additional_files: Vec<SupportFile>,

    pub additional_exports: Vec<String>,
}

impl AuthPlan {
    /// Lowercased service shape name, used as the output directory name.
    pub fn dir_name(&self) -> String {
        self.service.name().to_lowercase()
    }

    /// Check whether the plan wires any auth at all.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
            && self.runtime_config.is_empty()
            && self.config_fields.is_empty()
            && self.additional_files.is_empty()
    }

    /// Get every package the generated code depends on.
    pub fn dependencies(&self) -> BTreeSet<PackageDependency> {
        let mut deps: BTreeSet<PackageDependency> =
            self.plugins.iter().map(|p| p.dependency).collect();

        for exprs in self.runtime_config.values() {
            for expr in exprs.values() {
                deps.extend(expr.dependencies.iter().copied());
            }
        }

        if !self.config_fields.is_empty() {
            deps.insert(AWS_SDK_TYPES);
        }

        deps
    }
}

/// Plan auth wiring for one service.
pub fn plan_service<Q: ModelQuery + ?Sized>(
    query: &Q,
    service: &ShapeId,
    targets: &[LanguageTarget],
) -> AuthPlan {
    let facts = ServiceFacts::collect(query, service);
    let rules = evaluate_rules(&facts);
    let plugins: Vec<PluginDescriptor> = rules.iter().filter_map(|o| o.plugin.clone()).collect();

    let operations = facts
        .operations
        .iter()
        .map(|op| OperationDecision {
            operation: op.id.clone(),
            optional_auth: op.optional_auth,
            signed: plugins
                .iter()
                .any(|p| p.kind == InjectionKind::RequestPipelineStage && p.applies_to(&op.id)),
        })
        .collect();

    let mut runtime_config = BTreeMap::new();
    for target in targets {
        let writers = runtime_config_writers(&facts, *target);
        if !writers.is_empty() {
            runtime_config.insert(*target, writers);
        }
    }

    tracing::debug!(
        "{}: {} plugin(s), {} runtime target(s)",
        service,
        plugins.len(),
        runtime_config.len()
    );

    AuthPlan {
        service: facts.service.clone(),
        sdk_id: facts.sdk_id.clone(),
        signed: facts.is_signed(),
        token_service: facts.is_token_service(),
        operations,
        config_fields: config_interface_fields(&facts),
        additional_files: additional_files(&facts),
        additional_exports: additional_exports(&facts),
        plugins,
        rules,
        runtime_config,
    }
}

/// Plan several services in parallel.
///
/// Plans come back ordered by service id, whatever the input order.
pub fn plan_services<Q: ModelQuery + Sync + ?Sized>(
    query: &Q,
    services: &[ShapeId],
    targets: &[LanguageTarget],
) -> Vec<AuthPlan> {
    let mut services: Vec<&ShapeId> = services.iter().collect();
    services.sort();
    services.dedup();

    services
        .par_iter()
        .map(|service| plan_service(query, service, targets))
        .collect()
}
