//! Auth applicability facts.
//!
//! Boolean facts derived from trait queries: is the service signed, which of
//! its operations are optional-auth, and which operations need a signature.
//! The free functions query the model directly; [`ServiceFacts`] snapshots
//! the same answers once per service so the rule table and the bootstrap
//! writer don't walk the model again.
//!
//! Absent traits are `false`. Nothing here can fail.

use serde::Serialize;

use crate::auth::family::TOKEN_SERVICE;
use crate::core::traits::{OPTIONAL_AUTH, SIGV4};
use crate::core::{ModelQuery, ShapeId};

/// Check whether a service requires SigV4-signed requests.
pub fn is_signed_service<Q: ModelQuery + ?Sized>(query: &Q, service: &ShapeId) -> bool {
    query.has_trait(service, SIGV4)
}

/// Check whether a service is the token-issuing family.
pub fn is_token_service<Q: ModelQuery + ?Sized>(query: &Q, service: &ShapeId) -> bool {
    TOKEN_SERVICE.matches(query.sdk_id(service).as_deref())
}

/// Check whether at least one contained operation is optional-auth.
pub fn has_any_optional_auth_operation<Q: ModelQuery + ?Sized>(
    query: &Q,
    service: &ShapeId,
) -> bool {
    query
        .contained_operations(service)
        .iter()
        .any(|op| query.has_trait(op, OPTIONAL_AUTH))
}

/// Check whether every contained operation is optional-auth.
///
/// Vacuously true for a service without operations.
pub fn all_operations_optional_auth<Q: ModelQuery + ?Sized>(query: &Q, service: &ShapeId) -> bool {
    query
        .contained_operations(service)
        .iter()
        .all(|op| query.has_trait(op, OPTIONAL_AUTH))
}

/// Decide whether a single operation gets a per-operation signing stage.
///
/// For the token-issuing family every operation is signed except the
/// exemption list. For any other service this is only true when the service
/// mixes optional-auth and regular operations; uniformly signed services are
/// handled by a service-level stage instead, so this returns `false`.
pub fn operation_requires_signed_auth<Q: ModelQuery + ?Sized>(
    query: &Q,
    service: &ShapeId,
    operation: &ShapeId,
) -> bool {
    requires_signed_auth(
        is_token_service(query, service),
        is_signed_service(query, service),
        has_any_optional_auth_operation(query, service),
        &query.contextual_name(service, operation),
        query.has_trait(operation, OPTIONAL_AUTH),
    )
}

fn requires_signed_auth(
    token_service: bool,
    signed: bool,
    any_optional: bool,
    operation_name: &str,
    operation_optional: bool,
) -> bool {
    if token_service {
        return !TOKEN_SERVICE.is_unsigned_operation(operation_name);
    }
    signed && any_optional && !operation_optional
}

/// Per-operation snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationFacts {
    /// Operation shape id
    pub id: ShapeId,

    /// Name in the service, after `rename`
    pub name: String,

    /// Carries `smithy.api#optionalAuth`
    pub optional_auth: bool,
}

/// Everything the auth rules need to know about one service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceFacts {
    /// Service shape id
    pub service: ShapeId,

    /// Declared SDK id, if any
    pub sdk_id: Option<String>,

    /// Carries `aws.auth#sigv4`
    pub signed: bool,

    /// Contained operations, sorted by id
    pub operations: Vec<OperationFacts>,
}

impl ServiceFacts {
    /// Snapshot a service from the model.
    pub fn collect<Q: ModelQuery + ?Sized>(query: &Q, service: &ShapeId) -> Self {
        let operations: Vec<OperationFacts> = query
            .contained_operations(service)
            .into_iter()
            .map(|id| OperationFacts {
                name: query.contextual_name(service, &id),
                optional_auth: query.has_trait(&id, OPTIONAL_AUTH),
                id,
            })
            .collect();

        let facts = ServiceFacts {
            service: service.clone(),
            sdk_id: query.sdk_id(service),
            signed: is_signed_service(query, service),
            operations,
        };

        if facts.signed && facts.operations.is_empty() {
            tracing::debug!(
                "{} has no operations; treating it as fully optional-auth",
                service
            );
        }

        facts
    }

    /// Check whether the service requires signed requests.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Check whether the service is the token-issuing family.
    pub fn is_token_service(&self) -> bool {
        TOKEN_SERVICE.matches(self.sdk_id.as_deref())
    }

    /// Check whether at least one operation is optional-auth.
    pub fn has_any_optional_auth_operation(&self) -> bool {
        self.operations.iter().any(|op| op.optional_auth)
    }

    /// Check whether every operation is optional-auth (vacuously true).
    pub fn all_operations_optional_auth(&self) -> bool {
        self.operations.iter().all(|op| op.optional_auth)
    }

    /// Decide whether an operation gets a per-operation signing stage.
    pub fn operation_requires_signed_auth(&self, operation: &OperationFacts) -> bool {
        requires_signed_auth(
            self.is_token_service(),
            self.signed,
            self.has_any_optional_auth_operation(),
            &operation.name,
            operation.optional_auth,
        )
    }

    /// Check whether the client needs a default credential provider.
    pub fn needs_credential_provider(&self) -> bool {
        self.signed && !self.all_operations_optional_auth()
    }

    /// Look up an operation by id.
    pub fn operation(&self, id: &ShapeId) -> Option<&OperationFacts> {
        self.operations.iter().find(|op| &op.id == id)
    }
}
