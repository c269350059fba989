//! 集成测试公共工具

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cuba_config::HttpServiceConfig;
use cuba_ports::{ConfirmationPrompt, Confirmer, Notification, NotificationLevel, Notifier};
use iam_policy_console::application::PolicyConsole;
use iam_policy_console::domain::validation::ValidationMode;
use iam_policy_console::infrastructure::PolicyApiClient;
use wiremock::MockServer;

pub const VALID_POLICY: &str =
    "entity User {}\n\npolicy \"p\" { permit(principal, action, resource); }";

/// 记录所有通知
#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn messages(&self, level: NotificationLevel) -> Vec<String> {
        self.all()
            .into_iter()
            .filter(|n| n.level == level)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// 固定回答并记录提示次数
pub struct ScriptedConfirmer {
    answer: bool,
    prompts: Mutex<Vec<ConfirmationPrompt>>,
}

impl ScriptedConfirmer {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Confirmer for ScriptedConfirmer {
    fn confirm(&self, prompt: &ConfirmationPrompt) -> bool {
        self.prompts.lock().unwrap().push(prompt.clone());
        self.answer
    }
}

pub fn client_for(server: &MockServer) -> PolicyApiClient {
    let config = HttpServiceConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        connect_timeout_secs: 1,
    };
    PolicyApiClient::new(&config).expect("valid mock server url")
}

pub struct Harness {
    pub console: PolicyConsole,
    pub notifier: Arc<RecordingNotifier>,
    pub confirmer: Arc<ScriptedConfirmer>,
}

pub fn console_for(server: &MockServer, confirm: bool) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let confirmer = Arc::new(ScriptedConfirmer::new(confirm));
    let console = PolicyConsole::new(
        Arc::new(client_for(server)),
        notifier.clone(),
        confirmer.clone(),
        ValidationMode::LineBrace,
    );
    Harness {
        console,
        notifier,
        confirmer,
    }
}

pub fn policy_json(id: serde_json::Value, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "description": null,
        "content": VALID_POLICY,
        "status": "draft",
        "created_at": "2024-05-01T10:20:30.123456",
        "updated_at": null,
        "version": "1.0.0"
    })
}

/// 服务端收到的 (方法, 路径) 列表
pub async fn received(server: &MockServer) -> Vec<(String, String)> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| (r.method.to_string(), r.url.path().to_string()))
        .collect()
}
