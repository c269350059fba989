//! 本地结构校验器
//!
//! 只作为保存/测试按钮的开关，不代表策略在语义上合法；
//! 权威校验由策略服务的 test/validate 接口负责。

use serde::{Deserialize, Serialize};

/// 校验启发式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// 每一行含 `policy` 的非空非注释行必须在同一行含 `{`
    #[default]
    LineBrace,
    /// 旧版：全文同时出现 `entity ` 与 `rule ` 即视为合法
    KeywordPresence,
}

impl ValidationMode {
    pub fn validate(&self, content: &str) -> bool {
        match self {
            ValidationMode::LineBrace => offending_lines(content).is_empty(),
            ValidationMode::KeywordPresence => {
                content.contains("entity ") && content.contains("rule ")
            }
        }
    }

    /// 当前启发式下可以定位到具体行的问题；关键字模式没有行级诊断
    pub fn offending_lines(&self, content: &str) -> Vec<usize> {
        match self {
            ValidationMode::LineBrace => offending_lines(content),
            ValidationMode::KeywordPresence => Vec::new(),
        }
    }
}

impl std::fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationMode::LineBrace => write!(f, "line-brace"),
            ValidationMode::KeywordPresence => write!(f, "keyword-presence"),
        }
    }
}

/// 按默认启发式校验
pub fn validate(content: &str) -> bool {
    ValidationMode::default().validate(content)
}

/// 不满足行内括号规则的行号 (从 1 开始)
pub fn offending_lines(content: &str) -> Vec<usize> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            (line.contains("policy") && !line.contains('{')).then_some(idx + 1)
        })
        .collect()
}
