//! SigV4 auth wiring decisions for generated clients.
//!
//! Given a service, this module decides:
//! - whether its requests are signed at all (`facts`)
//! - which plugins carry the signing behavior (`rules`)
//! - how the default credential provider is bootstrapped per runtime
//!   (`bootstrap`, `interface`)
//! - which support files the token-issuing service bundles (`assets`)
//!
//! Everything here is a pure function of the model; nothing fails.

pub mod assets;
pub mod bootstrap;
pub mod facts;
pub mod family;
pub mod interface;
pub mod rules;

pub use assets::{additional_exports, additional_files, SupportFile, SUPPORT_FILES};
pub use bootstrap::{
    bootstrap_expression, runtime_config_writers, BootstrapExpression, LanguageTarget,
};
pub use facts::{
    all_operations_optional_auth, has_any_optional_auth_operation, is_signed_service,
    is_token_service, operation_requires_signed_auth, OperationFacts, ServiceFacts,
};
pub use family::{ServiceFamily, TOKEN_SERVICE};
pub use interface::{config_interface_fields, ConfigInterfaceField};
pub use rules::{
    evaluate_rules, select_plugins, Applicability, InjectionKind, PluginDescriptor, Rule,
    RuleOutcome, RULES,
};
