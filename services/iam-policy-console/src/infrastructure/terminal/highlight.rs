//! 终端语法高亮渲染
//!
//! 颜色取自深色编辑器主题，按 token 类别着色，空白不加样式。
//! 终端只保证 256 色，主题 RGB 映射到最接近的 xterm 调色板。

use console::Style;

use crate::domain::syntax::{NumberKind, TokenKind, tokenize};

/// 各类别的主题前景色 (RGB)
pub fn color_for(kind: TokenKind) -> Option<(u8, u8, u8)> {
    match kind {
        TokenKind::Comment => Some((0x6A, 0x99, 0x55)),
        TokenKind::Keyword => Some((0x56, 0x9C, 0xD6)),
        TokenKind::Type => Some((0x4E, 0xC9, 0xB0)),
        TokenKind::Function => Some((0xDC, 0xDC, 0xAA)),
        TokenKind::String => Some((0xCE, 0x91, 0x78)),
        TokenKind::InvalidString => Some((0xF4, 0x47, 0x47)),
        TokenKind::Number(NumberKind::Integer)
        | TokenKind::Number(NumberKind::Float)
        | TokenKind::Number(NumberKind::Hex) => Some((0xB5, 0xCE, 0xA8)),
        TokenKind::Operator | TokenKind::Bracket | TokenKind::Delimiter => {
            Some((0xD4, 0xD4, 0xD4))
        }
        TokenKind::Identifier => Some((0x9C, 0xDC, 0xFE)),
        TokenKind::Whitespace => None,
    }
}

/// xterm 6x6x6 色块每个分量的取值
const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

fn nearest_level(value: u8) -> usize {
    CUBE_LEVELS
        .iter()
        .enumerate()
        .min_by_key(|(_, level)| (i32::from(**level) - i32::from(value)).abs())
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> i32 {
    let d = |x: u8, y: u8| (i32::from(x) - i32::from(y)).pow(2);
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

/// RGB 映射到 256 色调色板 (色块或灰阶中较近的一个)
pub fn ansi256(rgb: (u8, u8, u8)) -> u8 {
    let (r, g, b) = (nearest_level(rgb.0), nearest_level(rgb.1), nearest_level(rgb.2));
    let cube = (CUBE_LEVELS[r], CUBE_LEVELS[g], CUBE_LEVELS[b]);

    let avg = (u16::from(rgb.0) + u16::from(rgb.1) + u16::from(rgb.2)) / 3;
    let gray_idx = (avg.saturating_sub(8) / 10).min(23) as u8;
    let gray_level = 8 + 10 * gray_idx;

    if distance(rgb, (gray_level, gray_level, gray_level)) < distance(rgb, cube) {
        232 + gray_idx
    } else {
        (16 + 36 * r + 6 * g + b) as u8
    }
}

/// 类别对应的终端样式；注释斜体，关键字加粗
pub fn style_for(kind: TokenKind) -> Option<Style> {
    let style = Style::new().color256(ansi256(color_for(kind)?));
    Some(match kind {
        TokenKind::Comment => style.italic(),
        TokenKind::Keyword => style.bold(),
        _ => style,
    })
}

/// 渲染着色文本；`color` 为 false 时原样返回
pub fn render(source: &str, color: bool) -> String {
    let mut out = String::with_capacity(source.len() * 2);

    for token in tokenize(source) {
        let text = token.text(source);
        match style_for(token.kind) {
            Some(style) => {
                out.push_str(&style.force_styling(color).apply_to(text).to_string());
            }
            None => out.push_str(text),
        }
    }

    out
}

/// 逐行列出非空白 token：`起止 作用域 文本`
pub fn token_listing(source: &str) -> Vec<String> {
    tokenize(source)
        .into_iter()
        .filter(|t| t.kind != TokenKind::Whitespace)
        .map(|t| {
            format!(
                "{:>5}..{:<5} {:<20} {:?}",
                t.span.start,
                t.span.end,
                t.kind.scope(),
                t.text(source)
            )
        })
        .collect()
}
