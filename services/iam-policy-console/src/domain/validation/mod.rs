//! Validation 本地校验模块

pub mod validator;

pub use validator::{ValidationMode, offending_lines, validate};
