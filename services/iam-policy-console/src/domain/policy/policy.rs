//! 策略实体

use chrono::{DateTime, NaiveDateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Deserializer, Serialize};

/// 未提供版本号时的展示值
pub const DEFAULT_VERSION: &str = "1.0.0";

/// 策略 ID
///
/// 由后端分配，对客户端不透明；后端可能以数字或字符串形式返回。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display, From)]
#[display("{_0}")]
pub struct PolicyId(String);

impl PolicyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PolicyId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl<'de> Deserialize<'de> for PolicyId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// 策略状态，仅作展示用的元数据，不影响本地校验
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyStatus {
    Active,
    Inactive,
    #[default]
    Draft,
    /// 后端枚举中存在，编辑器不主动选择
    Archived,
}

impl std::fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyStatus::Active => write!(f, "active"),
            PolicyStatus::Inactive => write!(f, "inactive"),
            PolicyStatus::Draft => write!(f, "draft"),
            PolicyStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for PolicyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(PolicyStatus::Active),
            "inactive" => Ok(PolicyStatus::Inactive),
            "draft" => Ok(PolicyStatus::Draft),
            "archived" => Ok(PolicyStatus::Archived),
            _ => Err(format!("Unknown policy status: {}", s)),
        }
    }
}

/// 策略实体 (后端返回的完整形态)
///
/// 除 `name` 外的字段都可能缺省，逐个按可选值处理。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PolicyId>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub status: PolicyStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Policy {
    /// 只有拥有后端 ID 的策略才能更新、删除或发布
    pub fn is_addressable(&self) -> bool {
        self.id.is_some()
    }

    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// 保存请求体：策略去掉后端管理的字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyPayload {
    pub name: String,
    pub description: String,
    pub content: String,
    pub status: PolicyStatus,
}

/// 编辑器内存中的草稿
///
/// 没有 `id` 时是纯客户端对象，首次保存成功后获得后端 ID。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyDraft {
    pub id: Option<PolicyId>,
    pub name: String,
    pub description: String,
    pub content: String,
    pub status: PolicyStatus,
    pub version: Option<String>,
}

impl PolicyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_addressable(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// 构造保存请求体，名称、描述和内容去掉首尾空白
    pub fn to_payload(&self) -> PolicyPayload {
        PolicyPayload {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content.trim().to_string(),
            status: self.status,
        }
    }

    /// 导出文件名 `{name}.cedar`，名称为空时使用 `policy`
    pub fn export_file_name(&self) -> String {
        let name = self.name.trim();
        let stem = if name.is_empty() {
            "policy".to_string()
        } else {
            name.replace(['/', '\\'], "_")
        };
        format!("{}.cedar", stem)
    }

    pub fn display_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }
}

impl From<&Policy> for PolicyDraft {
    fn from(policy: &Policy) -> Self {
        Self {
            id: policy.id.clone(),
            name: policy.name.clone(),
            description: policy.description_or_empty().to_string(),
            content: policy.content.clone(),
            status: policy.status,
            version: policy.version.clone(),
        }
    }
}

/// 接受 RFC 3339 或不带时区的 ISO-8601 (按 UTC 处理)
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
