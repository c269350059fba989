//! 策略语言的词法定义
//!
//! 纯静态数据，编辑器据此着色，不涉及语义。

use super::token::TokenKind;

/// 保留关键字
pub const KEYWORDS: &[&str] = &[
    "policy", "permit", "forbid", "when", "has", "in", "if", "else", "unless", "rule", "entity",
    "type", "namespace", "use", "as", "principal", "action", "resource",
];

/// 类型名
pub const TYPES: &[&str] = &[
    "String", "Boolean", "Integer", "Long", "Double", "Set", "Entity", "Record", "Extension",
    "Decimal",
];

/// 内置函数名
pub const FUNCTIONS: &[&str] = &[
    "size",
    "contains",
    "startsWith",
    "endsWith",
    "substring",
    "split",
    "join",
    "toLowerCase",
    "toUpperCase",
    "trim",
    "matches",
    "abs",
    "ceil",
    "floor",
    "round",
    "min",
    "max",
    "sum",
    "average",
    "now",
    "duration",
    "parseDuration",
    "formatDuration",
    "parseIPAddress",
    "isIPAddress",
    "parseCIDR",
    "isCIDR",
    "isIpv4",
    "isIpv6",
    "lessThan",
    "lessThanOrEqual",
    "greaterThan",
    "greaterThanOrEqual",
    "plus",
    "minus",
    "times",
    "dividedBy",
    "mod",
];

/// 多字符运算符，需在单字符运算符之前匹配
pub const MULTI_CHAR_OPERATORS: &[&str] = &["==", "!=", "<=", ">=", "&&", "||"];

/// 单字符运算符
pub const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '=', '<', '>', '!', '&', '|', '^', '~', '?', ':',
];

pub const BRACKET_CHARS: &[char] = &['{', '}', '[', ']', '(', ')'];

pub const DELIMITER_CHARS: &[char] = &[';', ',', '.'];

/// 按 关键字 → 类型 → 内置函数 → 标识符 的顺序归类单词
pub fn classify_word(word: &str) -> TokenKind {
    if KEYWORDS.contains(&word) {
        TokenKind::Keyword
    } else if TYPES.contains(&word) {
        TokenKind::Type
    } else if FUNCTIONS.contains(&word) {
        TokenKind::Function
    } else {
        TokenKind::Identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_word_order() {
        assert_eq!(classify_word("permit"), TokenKind::Keyword);
        assert_eq!(classify_word("principal"), TokenKind::Keyword);
        assert_eq!(classify_word("String"), TokenKind::Type);
        assert_eq!(classify_word("contains"), TokenKind::Function);
        assert_eq!(classify_word("department"), TokenKind::Identifier);
        // 大小写敏感
        assert_eq!(classify_word("Permit"), TokenKind::Identifier);
        assert_eq!(classify_word("string"), TokenKind::Identifier);
    }

    #[test]
    fn test_sets_are_disjoint() {
        for word in KEYWORDS {
            assert!(!TYPES.contains(word));
            assert!(!FUNCTIONS.contains(word));
        }
        for word in TYPES {
            assert!(!FUNCTIONS.contains(word));
        }
    }
}
