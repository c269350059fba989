//! 会话令牌存储 trait 定义

use async_trait::async_trait;
use cuba_errors::AppResult;
use secrecy::Secret;

/// 会话令牌持久化存储
///
/// 登录时写入，登出时清除，启动时读取一次注入到 API 客户端。
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// 读取已保存的令牌
    async fn load(&self) -> AppResult<Option<Secret<String>>>;

    /// 保存令牌
    async fn save(&self, token: &Secret<String>) -> AppResult<()>;

    /// 清除令牌
    async fn clear(&self) -> AppResult<()>;
}
