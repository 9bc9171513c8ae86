//! High-level operations.
//!
//! This module contains the implementation of sigwire commands.

pub mod generate;
pub mod plan;
pub mod verify;

pub use generate::{generate, write_plan, GenerateOptions, GenerateResult};
pub use plan::{plan_service, plan_services, AuthPlan, OperationDecision};
pub use verify::{format_report, verify_assets, FileCheck, FileStatus, VerifyReport};
