//! 确认对话框 trait 定义

/// 确认框样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmVariant {
    #[default]
    Danger,
    Warning,
    Info,
}

/// 破坏性操作前展示给用户的确认提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub variant: ConfirmVariant,
}

impl ConfirmationPrompt {
    /// 危险操作确认 (删除等不可逆请求)
    pub fn danger(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
            variant: ConfirmVariant::Danger,
        }
    }
}

/// 确认者 trait，返回 true 表示用户确认
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool;
}
