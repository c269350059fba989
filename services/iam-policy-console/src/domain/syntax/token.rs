//! 词法单元

use std::ops::Range;

/// 数字字面量的子类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Integer,
    Float,
    Hex,
}

/// 词法类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    String,
    /// 行尾前未闭合的字符串
    InvalidString,
    Keyword,
    Type,
    Function,
    Identifier,
    Number(NumberKind),
    Operator,
    Bracket,
    Delimiter,
    Whitespace,
}

impl TokenKind {
    /// 高亮主题使用的作用域名
    pub fn scope(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::String => "string",
            TokenKind::InvalidString => "string.invalid",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Function => "function.identifier",
            TokenKind::Identifier => "identifier",
            TokenKind::Number(NumberKind::Integer) => "number",
            TokenKind::Number(NumberKind::Float) => "number.float",
            TokenKind::Number(NumberKind::Hex) => "number.hex",
            TokenKind::Operator => "operators",
            TokenKind::Bracket => "brackets",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Whitespace => "white",
        }
    }
}

/// 一个词法单元：类别 + 源文本中的字节区间
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: start..end,
        }
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// 取出对应的源文本
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }
}
