//! 策略服务网关接口

use async_trait::async_trait;

use super::evaluation::{ServiceHealth, TestResult, ValidationReport};
use super::policy::{Policy, PolicyId, PolicyPayload};
use crate::error::ConsoleResult;

/// 策略服务网关
///
/// 每个方法都是一次独立的请求-响应往返，不做自动重试。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PolicyGateway: Send + Sync {
    /// 列出所有策略
    async fn list(&self) -> ConsoleResult<Vec<Policy>>;

    /// 根据 ID 获取策略
    async fn get(&self, id: &PolicyId) -> ConsoleResult<Policy>;

    /// 创建策略
    async fn create(&self, payload: &PolicyPayload) -> ConsoleResult<Policy>;

    /// 整体替换已有策略
    async fn update(&self, id: &PolicyId, payload: &PolicyPayload) -> ConsoleResult<Policy>;

    /// 删除策略，返回后端给出的提示 (204 时为空)
    async fn delete(&self, id: &PolicyId) -> ConsoleResult<Option<String>>;

    /// 发布策略 (状态置为 active)
    async fn publish(&self, id: &PolicyId) -> ConsoleResult<Policy>;

    /// 试运行策略内容，不修改任何已保存的策略
    async fn test_policy(&self, content: &str) -> ConsoleResult<TestResult>;

    /// 后端权威校验
    async fn validate(&self, content: &str) -> ConsoleResult<ValidationReport>;

    /// 健康检查
    async fn health(&self) -> ConsoleResult<ServiceHealth>;
}
