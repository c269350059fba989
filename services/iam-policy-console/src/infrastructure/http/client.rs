//! 策略服务 HTTP 客户端

use std::time::Duration;

use async_trait::async_trait;
use cuba_config::HttpServiceConfig;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, Response};
use secrecy::Secret;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::api_metrics::RequestTimer;
use super::session::Session;
use crate::domain::policy::{
    Policy, PolicyGateway, PolicyId, PolicyPayload, ServiceHealth, TestResult, ValidationReport,
};
use crate::error::{ConsoleError, ConsoleResult, PolicyOperation};

/// 策略服务客户端
///
/// 独占一个 [`Session`]，每个请求都从中读取令牌。
pub struct PolicyApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl PolicyApiClient {
    pub fn new(config: &HttpServiceConfig) -> ConsoleResult<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| {
            ConsoleError::Config(format!("Invalid policy API URL {}: {}", config.base_url, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConsoleError::Config(format!(
                "Unsupported policy API scheme: {}",
                base_url.scheme()
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ConsoleError::Config(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session: Session::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_token(&mut self, token: Secret<String>) {
        self.session.set_token(token);
    }

    pub fn clear_token(&mut self) {
        self.session.clear_token();
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// 在基础地址后追加路径段，段内特殊字符会被转义
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) 地址总能作为 base
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!(method = %method, url = %url, "Policy API request");

        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        match self.session.bearer() {
            Some(bearer) => builder.header(AUTHORIZATION, bearer),
            None => builder,
        }
    }

    /// 发送请求，非 2xx 统一转成 [`ConsoleError::Api`]
    async fn send(
        &self,
        operation: PolicyOperation,
        builder: RequestBuilder,
    ) -> ConsoleResult<Response> {
        let timer = RequestTimer::new(operation);

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ConsoleError::from(e);
                warn!(operation = %operation, error = %err, "Policy API unreachable");
                timer.finish_with_error(&err);
                return Err(err);
            }
        };

        let status = response.status();
        if status.is_success() {
            timer.finish(status.as_u16());
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ConsoleError::Api {
            status: status.as_u16(),
            detail: extract_detail(&body),
        };
        warn!(operation = %operation, status = status.as_u16(), "Policy API returned error");
        timer.finish_with_error(&err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: PolicyOperation,
        builder: RequestBuilder,
    ) -> ConsoleResult<T> {
        let response = self.send(operation, builder).await?;
        Ok(response.json::<T>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

/// 从错误响应体中取出 `detail`
///
/// 支持字符串和 FastAPI 校验错误数组 (`[{"msg": ...}]`)，其他形式返回 None。
pub fn extract_detail(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;

    match body.detail? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}

#[async_trait]
impl PolicyGateway for PolicyApiClient {
    async fn list(&self) -> ConsoleResult<Vec<Policy>> {
        let request = self.request(Method::GET, &["policies", ""]);
        self.send_json(PolicyOperation::List, request).await
    }

    async fn get(&self, id: &PolicyId) -> ConsoleResult<Policy> {
        let request = self.request(Method::GET, &["policies", id.as_str()]);
        self.send_json(PolicyOperation::Get, request).await
    }

    async fn create(&self, payload: &PolicyPayload) -> ConsoleResult<Policy> {
        let request = self.request(Method::POST, &["policies", ""]).json(payload);
        self.send_json(PolicyOperation::Save, request).await
    }

    async fn update(&self, id: &PolicyId, payload: &PolicyPayload) -> ConsoleResult<Policy> {
        let request = self
            .request(Method::PUT, &["policies", id.as_str()])
            .json(payload);
        self.send_json(PolicyOperation::Save, request).await
    }

    async fn delete(&self, id: &PolicyId) -> ConsoleResult<Option<String>> {
        let request = self.request(Method::DELETE, &["policies", id.as_str()]);
        let response = self.send(PolicyOperation::Delete, request).await?;

        // 204 没有响应体
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string));
        Ok(message)
    }

    async fn publish(&self, id: &PolicyId) -> ConsoleResult<Policy> {
        let request = self.request(Method::POST, &["policies", id.as_str(), "publish"]);
        self.send_json(PolicyOperation::Publish, request).await
    }

    async fn test_policy(&self, content: &str) -> ConsoleResult<TestResult> {
        let request = self
            .request(Method::POST, &["policies", "test"])
            .json(&serde_json::json!({ "content": content }));
        self.send_json(PolicyOperation::Test, request).await
    }

    async fn validate(&self, content: &str) -> ConsoleResult<ValidationReport> {
        let request = self
            .request(Method::POST, &["policies", "validate"])
            .json(&serde_json::json!({ "content": content }));
        self.send_json(PolicyOperation::Validate, request).await
    }

    async fn health(&self) -> ConsoleResult<ServiceHealth> {
        let request = self.request(Method::GET, &["health", ""]);
        self.send_json(PolicyOperation::Health, request).await
    }
}
