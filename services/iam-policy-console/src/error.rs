//! 控制台错误类型

use cuba_errors::AppError;
use thiserror::Error;

/// 与策略服务交互的操作，用于日志、指标和用户提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyOperation {
    List,
    Get,
    Save,
    Test,
    Delete,
    Publish,
    Validate,
    Health,
}

impl PolicyOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Save => "save",
            Self::Test => "test",
            Self::Delete => "delete",
            Self::Publish => "publish",
            Self::Validate => "validate",
            Self::Health => "health",
        }
    }

    /// 后端没有给出 detail 时展示的通用失败提示
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::List => "Failed to load policies",
            Self::Get => "Failed to load policy",
            Self::Save => "Failed to save policy",
            Self::Test => "Failed to test policy",
            Self::Delete => "Failed to delete policy",
            Self::Publish => "Failed to publish policy",
            Self::Validate => "Failed to validate policy",
            Self::Health => "Policy service is unavailable",
        }
    }
}

impl std::fmt::Display for PolicyOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// 本地校验器判定内容结构不合法
    #[error("Policy content failed local validation")]
    Validation,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("A {0} request is already in progress")]
    Busy(PolicyOperation),
    #[error("Policy has not been saved yet")]
    NotAddressable,
    #[error("No policy editor is open")]
    NoOpenEditor,
    #[error("Policy API returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },
    #[error("Policy API request timed out")]
    Timeout,
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Unexpected response body: {0}")]
    Decode(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConsoleError {
    /// 面向用户的提示：优先使用后端返回的 detail
    pub fn user_message(&self, operation: PolicyOperation) -> String {
        match self {
            Self::Api {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            Self::MissingField(field) => format!("Please enter a policy {}", field),
            Self::Timeout => format!("{} (request timed out)", operation.failure_message()),
            _ => operation.failure_message().to_string(),
        }
    }

    /// 是否来自策略服务 (网络或非 2xx)
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Self::Api { .. } | Self::Timeout | Self::Transport(_) | Self::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<ConsoleError> for AppError {
    fn from(error: ConsoleError) -> Self {
        match error {
            ConsoleError::Validation => AppError::validation("Policy content failed local validation"),
            ConsoleError::MissingField(field) => {
                AppError::validation(format!("Missing required field: {}", field))
            }
            ConsoleError::Busy(op) => {
                AppError::failed_precondition(format!("A {} request is already in progress", op))
            }
            ConsoleError::NotAddressable => AppError::failed_precondition("Policy has not been saved yet"),
            ConsoleError::NoOpenEditor => AppError::failed_precondition("No policy editor is open"),
            ConsoleError::Api { status, detail } => AppError::from_status(
                status,
                detail.unwrap_or_else(|| format!("Policy API returned {}", status)),
            ),
            ConsoleError::Timeout => AppError::timeout("Policy API request timed out"),
            ConsoleError::Transport(msg) => AppError::external_service(msg),
            ConsoleError::Decode(msg) => AppError::external_service(msg),
            ConsoleError::Io(e) => AppError::internal(e.to_string()),
            ConsoleError::Config(msg) => AppError::internal(msg),
        }
    }
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
