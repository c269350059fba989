//! 高亮用分词器
//!
//! 纯函数、无状态：同样的输入总是得到同样的 token 序列，且 token 区间首尾相接、
//! 覆盖整个输入。任何输入都不会失败，无法识别的字符退化为单字符标识符。

use super::grammar::{
    BRACKET_CHARS, DELIMITER_CHARS, MULTI_CHAR_OPERATORS, OPERATOR_CHARS, classify_word,
};
use super::token::{NumberKind, Token, TokenKind};

/// 对整个源文本分词
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let (kind, len) = next_token(&source[pos..]);
        tokens.push(Token::new(kind, pos, pos + len));
        pos += len;
    }

    tokens
}

/// 在剩余文本开头识别一个 token，返回类别和字节长度 (总是大于 0)
fn next_token(rest: &str) -> (TokenKind, usize) {
    let bytes = rest.as_bytes();
    let first = bytes[0];

    if first == b'#' {
        return (TokenKind::Comment, line_end(bytes, 0));
    }

    if first == b'"' {
        return scan_string(rest);
    }

    if first.is_ascii_alphabetic() || first == b'_' {
        let len = take_while(bytes, 0, |b| b.is_ascii_alphanumeric() || b == b'_');
        return (classify_word(&rest[..len]), len);
    }

    if let Some(number) = scan_number(bytes) {
        return number;
    }

    if let Some(op) = MULTI_CHAR_OPERATORS.iter().find(|op| rest.starts_with(**op)) {
        return (TokenKind::Operator, op.len());
    }

    // 首字符一定存在
    let ch = rest.chars().next().unwrap_or_default();

    if OPERATOR_CHARS.contains(&ch) {
        return (TokenKind::Operator, 1);
    }
    if BRACKET_CHARS.contains(&ch) {
        return (TokenKind::Bracket, 1);
    }
    if DELIMITER_CHARS.contains(&ch) {
        return (TokenKind::Delimiter, 1);
    }

    if ch.is_whitespace() {
        let len = rest
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        return (TokenKind::Whitespace, len);
    }

    (TokenKind::Identifier, ch.len_utf8())
}

/// 从 `start` 起连续满足条件的字节的结束位置
fn take_while(bytes: &[u8], start: usize, pred: impl Fn(u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && pred(bytes[end]) {
        end += 1;
    }
    end
}

/// 当前行结束位置 (不含换行符)
fn line_end(bytes: &[u8], start: usize) -> usize {
    take_while(bytes, start, |b| b != b'\n' && b != b'\r')
}

/// 双引号字符串，`\` 转义下一个字符
///
/// 行尾前没有闭合引号时整段标为非法字符串，下一行照常分词。
fn scan_string(rest: &str) -> (TokenKind, usize) {
    let bytes = rest.as_bytes();
    let mut i = 1;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => return (TokenKind::String, i + 1),
            b'\n' | b'\r' => return (TokenKind::InvalidString, i),
            b'\\' => match rest[i + 1..].chars().next() {
                Some('\n') | Some('\r') | None => return (TokenKind::InvalidString, i + 1),
                Some(escaped) => i += 1 + escaped.len_utf8(),
            },
            _ => i += 1,
        }
    }

    (TokenKind::InvalidString, bytes.len())
}

/// 数字字面量：浮点、十六进制必须先于整数尝试
fn scan_number(bytes: &[u8]) -> Option<(TokenKind, usize)> {
    let int_end = take_while(bytes, 0, |b| b.is_ascii_digit());

    // \d*\.\d+([eE][-+]?\d+)?
    if bytes.get(int_end) == Some(&b'.') {
        let frac_end = take_while(bytes, int_end + 1, |b| b.is_ascii_digit());
        if frac_end > int_end + 1 {
            let mut end = frac_end;
            if matches!(bytes.get(end), Some(b'e' | b'E')) {
                let mut exp_start = end + 1;
                if matches!(bytes.get(exp_start), Some(b'+' | b'-')) {
                    exp_start += 1;
                }
                let exp_end = take_while(bytes, exp_start, |b| b.is_ascii_digit());
                if exp_end > exp_start {
                    end = exp_end;
                }
            }
            return Some((TokenKind::Number(NumberKind::Float), end));
        }
    }

    // 0[xX][0-9a-fA-F]+
    if bytes.first() == Some(&b'0') && matches!(bytes.get(1), Some(b'x' | b'X')) {
        let hex_end = take_while(bytes, 2, |b| b.is_ascii_hexdigit());
        if hex_end > 2 {
            return Some((TokenKind::Number(NumberKind::Hex), hex_end));
        }
    }

    if int_end > 0 {
        return Some((TokenKind::Number(NumberKind::Integer), int_end));
    }

    None
}
