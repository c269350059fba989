//! 编辑器会话
//!
//! 保存和测试各自拆成 begin/complete 两半：begin 检查前置条件并置忙碌标志，
//! complete 清除标志并写回结果。两种操作互不阻塞，但各自不能重复提交。

use tracing::debug;

use crate::domain::policy::{
    DEFAULT_POLICY_TEMPLATE, Policy, PolicyDraft, PolicyGateway, PolicyId, PolicyPayload,
    PolicyStatus, TestResult,
};
use crate::domain::validation::ValidationMode;
use crate::error::{ConsoleError, ConsoleResult, PolicyOperation};

/// 一次保存请求
#[derive(Debug, Clone, PartialEq)]
pub struct SaveRequest {
    /// 有 ID 走更新，没有走创建
    pub id: Option<PolicyId>,
    pub payload: PolicyPayload,
}

impl SaveRequest {
    pub fn is_update(&self) -> bool {
        self.id.is_some()
    }
}

/// 一次测试请求，记录发起时的内容版本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRequest {
    pub content: String,
    revision: u64,
}

/// 单个编辑器实例的全部状态
#[derive(Debug, Clone)]
pub struct EditorSession {
    draft: PolicyDraft,
    mode: ValidationMode,
    valid: bool,
    saving: bool,
    testing: bool,
    revision: u64,
    test_result: Option<TestResult>,
}

impl EditorSession {
    /// 空草稿
    pub fn new(mode: ValidationMode) -> Self {
        Self::open(PolicyDraft::new(), mode)
    }

    /// 载入已有草稿
    pub fn open(draft: PolicyDraft, mode: ValidationMode) -> Self {
        let valid = mode.validate(&draft.content);
        Self {
            draft,
            mode,
            valid,
            saving: false,
            testing: false,
            revision: 0,
            test_result: None,
        }
    }

    pub fn draft(&self) -> &PolicyDraft {
        &self.draft
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_testing(&self) -> bool {
        self.testing
    }

    pub fn test_result(&self) -> Option<&TestResult> {
        self.test_result.as_ref()
    }

    /// 按 `\n` 切分的行数，末尾换行算作新的一行
    pub fn line_count(&self) -> usize {
        self.draft.content.split('\n').count()
    }

    pub fn can_save(&self) -> bool {
        self.valid && self.draft.has_name() && !self.saving
    }

    pub fn can_test(&self) -> bool {
        self.valid && !self.testing
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.draft.content = content.into();
        self.valid = self.mode.validate(&self.draft.content);
        self.touch();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.touch();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
        self.touch();
    }

    pub fn set_status(&mut self, status: PolicyStatus) {
        self.draft.status = status;
        self.touch();
    }

    /// 用默认模板替换内容
    pub fn load_template(&mut self) {
        self.set_content(DEFAULT_POLICY_TEMPLATE);
    }

    // 任何修改都使上一次测试结果失效
    fn touch(&mut self) {
        self.revision += 1;
        self.test_result = None;
    }

    pub fn begin_save(&mut self) -> ConsoleResult<SaveRequest> {
        if self.saving {
            return Err(ConsoleError::Busy(PolicyOperation::Save));
        }
        if !self.draft.has_name() {
            return Err(ConsoleError::MissingField("name"));
        }
        if !self.valid {
            return Err(ConsoleError::Validation);
        }

        self.saving = true;
        Ok(SaveRequest {
            id: self.draft.id.clone(),
            payload: self.draft.to_payload(),
        })
    }

    /// 结束保存；成功时草稿获得后端分配的 ID 和版本
    pub fn complete_save(&mut self, result: ConsoleResult<Policy>) -> ConsoleResult<Policy> {
        self.saving = false;

        if let Ok(policy) = &result {
            if policy.id.is_some() {
                self.draft.id = policy.id.clone();
            }
            if policy.version.is_some() {
                self.draft.version = policy.version.clone();
            }
        }
        result
    }

    pub fn begin_test(&mut self) -> ConsoleResult<TestRequest> {
        if self.testing {
            return Err(ConsoleError::Busy(PolicyOperation::Test));
        }
        if !self.valid {
            return Err(ConsoleError::Validation);
        }

        self.testing = true;
        self.test_result = None;
        Ok(TestRequest {
            content: self.draft.content.clone(),
            revision: self.revision,
        })
    }

    /// 结束测试
    ///
    /// 测试期间内容被修改过时结果已过期，不写回但仍返回给调用方；失败时清空结果。
    pub fn complete_test(
        &mut self,
        request: TestRequest,
        result: ConsoleResult<TestResult>,
    ) -> ConsoleResult<TestResult> {
        self.testing = false;

        match &result {
            Ok(outcome) if request.revision == self.revision => {
                self.test_result = Some(outcome.clone());
            }
            Ok(_) => {
                debug!(
                    started_at = request.revision,
                    current = self.revision,
                    "Discarding stale test result"
                );
            }
            Err(_) => self.test_result = None,
        }
        result
    }

    /// 保存：有 ID 时 PUT 更新，否则 POST 创建
    pub async fn save(&mut self, gateway: &dyn PolicyGateway) -> ConsoleResult<Policy> {
        let request = self.begin_save()?;
        let result = send_save(gateway, &request).await;
        self.complete_save(result)
    }

    /// 试运行当前内容
    pub async fn test(&mut self, gateway: &dyn PolicyGateway) -> ConsoleResult<TestResult> {
        let request = self.begin_test()?;
        let result = gateway.test_policy(&request.content).await;
        self.complete_test(request, result)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

/// 按请求路由到创建或更新
pub async fn send_save(gateway: &dyn PolicyGateway, request: &SaveRequest) -> ConsoleResult<Policy> {
    match &request.id {
        Some(id) => gateway.update(id, &request.payload).await,
        None => gateway.create(&request.payload).await,
    }
}
