//! Policy 策略领域模块

#![allow(clippy::module_inception)]

pub mod evaluation;
pub mod gateway;
pub mod policy;
pub mod template;

pub use evaluation::{ServiceHealth, TestCaseOutcome, TestResult, TestSummary, ValidationReport};
pub use gateway::PolicyGateway;
pub use policy::{DEFAULT_VERSION, Policy, PolicyDraft, PolicyId, PolicyPayload, PolicyStatus};
pub use template::DEFAULT_POLICY_TEMPLATE;

#[cfg(test)]
pub use gateway::MockPolicyGateway;
