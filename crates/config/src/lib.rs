//! cuba-config - 配置加载库
//!
//! 加载顺序：`{dir}/default.toml` → `{dir}/{APP_ENV}.toml` → 带前缀的环境变量。
//! 文件缺失时跳过，所有字段都带默认值。

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::Secret;
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Load(Box::new(err))
    }
}

/// 下游 HTTP 服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl Default for HttpServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 持久化令牌文件
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    /// 直接注入的令牌 (优先于文件)
    #[serde(default)]
    pub token: Option<Secret<String>>,
}

fn default_token_file() -> PathBuf {
    PathBuf::from(".policy-console/token")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            token: None,
        }
    }
}

/// 遥测配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// 是否输出 JSON 格式日志
    #[serde(default)]
    pub json: bool,
    /// 命令结束时把请求指标快照输出到 stderr
    #[serde(default)]
    pub metrics: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
            metrics: false,
        }
    }
}

/// 当前运行环境
pub fn app_env() -> String {
    std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string())
}

/// 从配置目录和环境变量加载任意配置结构
///
/// 环境变量以 `env_prefix` 开头，嵌套字段使用 `__` 分隔，
/// 例如 `POLICY_CONSOLE_POLICY_API__BASE_URL`。
pub fn load<T>(config_dir: &str, env_prefix: &str) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let env = app_env();

    let config: T = Figment::new()
        .merge(Toml::file(format!("{}/default.toml", config_dir)))
        .merge(Toml::file(format!("{}/{}.toml", config_dir, env)))
        .merge(Env::prefixed(env_prefix).split("__"))
        .extract()?;

    Ok(config)
}

#[cfg(test)]
mod tests;
