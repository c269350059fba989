//! 策略列表视图

use crate::domain::policy::{Policy, PolicyId};

/// 列表页内存中的策略集合
///
/// 刷新失败时保留上一次成功加载的数据。
#[derive(Debug, Clone, Default)]
pub struct PolicyListView {
    policies: Vec<Policy>,
    loaded: bool,
}

impl PolicyListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    /// 是否至少成功加载过一次
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn replace(&mut self, policies: Vec<Policy>) {
        self.policies = policies;
        self.loaded = true;
    }

    pub fn find(&self, id: &PolicyId) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id.as_ref() == Some(id))
    }

    /// 插入或按 ID 替换
    pub fn upsert(&mut self, policy: Policy) {
        let existing = policy
            .id
            .as_ref()
            .and_then(|id| self.policies.iter().position(|p| p.id.as_ref() == Some(id)));

        match existing {
            Some(idx) => self.policies[idx] = policy,
            None => self.policies.push(policy),
        }
    }

    /// 移除指定 ID 的策略，返回是否存在
    pub fn remove(&mut self, id: &PolicyId) -> bool {
        let before = self.policies.len();
        self.policies.retain(|p| p.id.as_ref() != Some(id));
        self.policies.len() != before
    }
}
