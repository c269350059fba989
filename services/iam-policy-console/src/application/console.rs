//! 策略控制台编排
//!
//! 串联列表视图、编辑器和策略服务：每个后端操作在这里结束，失败时记录日志并转成
//! 一条错误通知，不向上冒泡到全局处理。

use std::sync::Arc;

use cuba_ports::{ConfirmationPrompt, Confirmer, Notification, Notifier};
use tracing::{debug, error, info};

use super::editor::{ConsoleView, EditorSession, send_save};
use super::list::PolicyListView;
use crate::domain::policy::{
    Policy, PolicyDraft, PolicyGateway, PolicyId, ServiceHealth, TestResult, ValidationReport,
};
use crate::domain::validation::ValidationMode;
use crate::error::{ConsoleError, ConsoleResult, PolicyOperation};

/// 策略控制台
pub struct PolicyConsole {
    gateway: Arc<dyn PolicyGateway>,
    notifier: Arc<dyn Notifier>,
    confirmer: Arc<dyn Confirmer>,
    mode: ValidationMode,
    list: PolicyListView,
    editor: Option<EditorSession>,
    view: ConsoleView,
}

impl PolicyConsole {
    pub fn new(
        gateway: Arc<dyn PolicyGateway>,
        notifier: Arc<dyn Notifier>,
        confirmer: Arc<dyn Confirmer>,
        mode: ValidationMode,
    ) -> Self {
        Self {
            gateway,
            notifier,
            confirmer,
            mode,
            list: PolicyListView::new(),
            editor: None,
            view: ConsoleView::ViewingList,
        }
    }

    pub fn view(&self) -> &ConsoleView {
        &self.view
    }

    pub fn list(&self) -> &PolicyListView {
        &self.list
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorSession> {
        self.editor.as_mut()
    }

    /// 记录失败并发出错误通知，原样返回错误
    fn report(&self, operation: PolicyOperation, err: ConsoleError) -> ConsoleError {
        error!(operation = %operation, error = %err, "Policy operation failed");
        self.notifier
            .notify(Notification::error(err.user_message(operation)));
        err
    }

    /// 重新加载列表；失败时保留原有数据
    pub async fn refresh(&mut self) -> ConsoleResult<usize> {
        match self.gateway.list().await {
            Ok(policies) => {
                let count = policies.len();
                debug!(count, "Policies loaded");
                self.list.replace(policies);
                Ok(count)
            }
            Err(e) => Err(self.report(PolicyOperation::List, e)),
        }
    }

    /// 打开空草稿
    pub fn new_policy(&mut self) -> &mut EditorSession {
        self.view = ConsoleView::Creating;
        self.editor.insert(EditorSession::new(self.mode))
    }

    /// 打开已有策略；列表中没有时向后端查询
    pub async fn open(&mut self, id: &PolicyId) -> ConsoleResult<&mut EditorSession> {
        let policy = match self.list.find(id) {
            Some(policy) => policy.clone(),
            None => self
                .gateway
                .get(id)
                .await
                .map_err(|e| self.report(PolicyOperation::Get, e))?,
        };

        self.view = ConsoleView::Editing(id.clone());
        Ok(self
            .editor
            .insert(EditorSession::open(PolicyDraft::from(&policy), self.mode)))
    }

    /// 关闭编辑器，丢弃未保存的草稿
    pub fn close_editor(&mut self) {
        self.editor = None;
        self.view = ConsoleView::ViewingList;
    }

    /// 保存当前草稿
    ///
    /// 名称为空时只发出提示，不发请求；本地校验未通过时静默拒绝。
    /// 成功后关闭编辑器并刷新列表，失败时编辑器保持打开、输入不丢失。
    pub async fn save(&mut self) -> ConsoleResult<Policy> {
        let gateway = Arc::clone(&self.gateway);
        let editor = self.editor.as_mut().ok_or(ConsoleError::NoOpenEditor)?;

        let request = match editor.begin_save() {
            Ok(request) => request,
            Err(e @ ConsoleError::MissingField(_)) => {
                self.notifier
                    .notify(Notification::error(e.user_message(PolicyOperation::Save)));
                return Err(e);
            }
            Err(e) => return Err(e),
        };

        let result = send_save(gateway.as_ref(), &request).await;
        match editor.complete_save(result) {
            Ok(policy) => {
                info!(
                    policy_id = ?policy.id,
                    update = request.is_update(),
                    "Policy saved"
                );
                let message = if request.is_update() {
                    "Policy updated successfully"
                } else {
                    "Policy created successfully"
                };
                self.notifier.notify(Notification::success(message));
                self.close_editor();
                // 刷新失败已单独通知
                let _ = self.refresh().await;
                Ok(policy)
            }
            Err(e) => Err(self.report(PolicyOperation::Save, e)),
        }
    }

    /// 试运行当前草稿内容
    pub async fn test(&mut self) -> ConsoleResult<TestResult> {
        let gateway = Arc::clone(&self.gateway);
        let editor = self.editor.as_mut().ok_or(ConsoleError::NoOpenEditor)?;

        let request = editor.begin_test()?;
        let result = gateway.test_policy(&request.content).await;

        match editor.complete_test(request, result) {
            Ok(result) => {
                let summary = result.effective_summary();
                info!(
                    total = summary.total,
                    allowed = summary.allowed,
                    denied = summary.denied,
                    "Policy test completed"
                );
                self.notifier.notify(Notification::success(format!(
                    "Policy test completed: {} allowed, {} denied",
                    summary.allowed, summary.denied
                )));
                Ok(result)
            }
            Err(e) => Err(self.report(PolicyOperation::Test, e)),
        }
    }

    /// 删除策略，需先经用户确认
    ///
    /// 返回 false 表示用户取消；只有后端确认成功后才从列表移除。
    pub async fn delete(&mut self, id: &PolicyId) -> ConsoleResult<bool> {
        let name = self
            .list
            .find(id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| id.to_string());

        let prompt = ConfirmationPrompt::danger(
            "Delete Policy",
            format!(
                "Are you sure you want to delete policy \"{}\"? This action cannot be undone.",
                name
            ),
        );
        if !self.confirmer.confirm(&prompt) {
            debug!(policy_id = %id, "Delete cancelled");
            return Ok(false);
        }

        match self.gateway.delete(id).await {
            Ok(message) => {
                info!(policy_id = %id, "Policy deleted");
                self.list.remove(id);
                if self.view == ConsoleView::Editing(id.clone()) {
                    self.close_editor();
                }
                self.notifier.notify(Notification::success(
                    message.unwrap_or_else(|| "Policy deleted successfully".to_string()),
                ));
                Ok(true)
            }
            Err(e) => Err(self.report(PolicyOperation::Delete, e)),
        }
    }

    /// 发布策略并更新列表中的对应行
    pub async fn publish(&mut self, id: &PolicyId) -> ConsoleResult<Policy> {
        match self.gateway.publish(id).await {
            Ok(policy) => {
                info!(policy_id = %id, status = %policy.status, "Policy published");
                self.list.upsert(policy.clone());
                self.notifier
                    .notify(Notification::success("Policy published successfully"));
                Ok(policy)
            }
            Err(e) => Err(self.report(PolicyOperation::Publish, e)),
        }
    }

    /// 发布编辑器中的策略，草稿必须已保存过
    pub async fn publish_current(&mut self) -> ConsoleResult<Policy> {
        let id = self
            .editor
            .as_ref()
            .ok_or(ConsoleError::NoOpenEditor)?
            .draft()
            .id
            .clone()
            .ok_or(ConsoleError::NotAddressable)?;
        self.publish(&id).await
    }

    /// 后端权威校验，结果仅作提示
    pub async fn validate_remote(&self, content: &str) -> ConsoleResult<ValidationReport> {
        let report = self
            .gateway
            .validate(content)
            .await
            .map_err(|e| self.report(PolicyOperation::Validate, e))?;

        if report.valid {
            self.notifier.notify(Notification::success("Policy is valid"));
        } else {
            self.notifier
                .notify(Notification::error(report.errors.join("; ")));
        }
        for warning in &report.warnings {
            self.notifier.notify(Notification::warning(warning.clone()));
        }
        Ok(report)
    }

    /// 查询策略服务健康状态
    pub async fn health(&self) -> ConsoleResult<ServiceHealth> {
        let health = self
            .gateway
            .health()
            .await
            .map_err(|e| self.report(PolicyOperation::Health, e))?;

        let message = format!("Policy service is {}", health.status);
        if health.is_healthy() {
            self.notifier.notify(Notification::info(message));
        } else {
            self.notifier.notify(Notification::warning(message));
        }
        Ok(health)
    }
}
