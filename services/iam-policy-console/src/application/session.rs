//! 会话令牌的登录、登出与启动注入

use cuba_config::SessionConfig;
use cuba_errors::{AppError, AppResult};
use cuba_ports::SessionStore;
use secrecy::{ExposeSecret, Secret};
use tracing::debug;

fn is_blank(token: &Secret<String>) -> bool {
    token.expose_secret().trim().is_empty()
}

/// 启动时确定 API 客户端使用的令牌
///
/// 配置中的令牌优先，否则读取持久化的令牌。
pub async fn session_token(
    config: &SessionConfig,
    store: &dyn SessionStore,
) -> AppResult<Option<Secret<String>>> {
    if let Some(token) = config.token.as_ref().filter(|t| !is_blank(t)) {
        debug!("Using session token from configuration");
        return Ok(Some(token.clone()));
    }

    store.load().await
}

/// 保存令牌
pub async fn login(store: &dyn SessionStore, token: Secret<String>) -> AppResult<()> {
    if is_blank(&token) {
        return Err(AppError::validation("Token must not be empty"));
    }
    store.save(&token).await
}

pub async fn logout(store: &dyn SessionStore) -> AppResult<()> {
    store.clear().await
}
