//! 客户端会话
//!
//! 令牌只属于持有它的 API 客户端，不存在进程级全局状态。

use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Default)]
pub struct Session {
    token: Option<Secret<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: Secret<String>) -> Self {
        let mut session = Self::new();
        session.set_token(token);
        session
    }

    /// 设置令牌，空白令牌等同于登出
    pub fn set_token(&mut self, token: Secret<String>) {
        if token.expose_secret().trim().is_empty() {
            self.token = None;
        } else {
            self.token = Some(token);
        }
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn token(&self) -> Option<&Secret<String>> {
        self.token.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// `Authorization` 头的值
    pub fn bearer(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|t| format!("Bearer {}", t.expose_secret().trim()))
    }
}
