//! 领域层

pub mod policy;
pub mod syntax;
pub mod validation;
