//! 控制台配置

use std::path::PathBuf;

use cuba_config::{HttpServiceConfig, SessionConfig, TelemetryConfig};
use serde::Deserialize;

use crate::domain::validation::ValidationMode;
use crate::error::{ConsoleError, ConsoleResult};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "POLICY_CONSOLE_";

/// 策略控制台配置
#[derive(Debug, Clone, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default = "cuba_config::app_env")]
    pub app_env: String,
    #[serde(default)]
    pub policy_api: HttpServiceConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// 编辑器配置
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub validation_mode: ValidationMode,
    /// 导出目录
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            export_dir: default_export_dir(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            app_env: cuba_config::app_env(),
            policy_api: HttpServiceConfig::default(),
            session: SessionConfig::default(),
            editor: EditorConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// 从配置目录加载，缺失的文件跳过
    pub fn load(config_dir: &str) -> ConsoleResult<Self> {
        cuba_config::load(config_dir, ENV_PREFIX).map_err(|e| ConsoleError::Config(e.to_string()))
    }
}
