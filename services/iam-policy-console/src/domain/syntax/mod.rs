//! Syntax 语法高亮模块
//!
//! 只负责着色，不做任何语义校验。

pub mod grammar;
pub mod token;
pub mod tokenizer;

pub use grammar::classify_word;
pub use token::{NumberKind, Token, TokenKind};
pub use tokenizer::tokenize;
