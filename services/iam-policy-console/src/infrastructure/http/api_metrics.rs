//! 策略服务请求监控

use std::time::Instant;

use metrics::{counter, histogram};

use crate::error::{ConsoleError, PolicyOperation};

/// 慢请求阈值 (毫秒)
const SLOW_REQUEST_MS: u128 = 1000;

/// 策略 API 监控工具
pub struct ApiMetrics;

impl ApiMetrics {
    /// 记录请求（计时）
    pub fn record_request(start: Instant, operation: PolicyOperation, status: u16) {
        histogram!(
            "policy_api_request_duration_ms",
            "operation" => operation.as_str()
        )
        .record(start.elapsed().as_millis() as f64);

        counter!(
            "policy_api_requests_total",
            "operation" => operation.as_str(),
            "status" => status.to_string()
        )
        .increment(1);
    }

    /// 记录请求错误
    pub fn record_error(operation: PolicyOperation, kind: &'static str) {
        counter!(
            "policy_api_errors_total",
            "operation" => operation.as_str(),
            "kind" => kind
        )
        .increment(1);
    }
}

/// 用于计时的守卫结构
pub struct RequestTimer {
    start: Instant,
    operation: PolicyOperation,
}

impl RequestTimer {
    pub fn new(operation: PolicyOperation) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn finish(self, status: u16) {
        ApiMetrics::record_request(self.start, self.operation, status);
        self.warn_if_slow();
    }

    pub fn finish_with_error(self, err: &ConsoleError) {
        let (status, kind) = match err {
            ConsoleError::Api { status, .. } => (*status, "status"),
            ConsoleError::Timeout => (0, "timeout"),
            ConsoleError::Decode(_) => (0, "decode"),
            _ => (0, "transport"),
        };
        ApiMetrics::record_request(self.start, self.operation, status);
        ApiMetrics::record_error(self.operation, kind);
        self.warn_if_slow();
    }

    fn warn_if_slow(&self) {
        let duration_ms = self.start.elapsed().as_millis();
        if duration_ms > SLOW_REQUEST_MS {
            tracing::warn!(
                operation = %self.operation,
                duration_ms = %duration_ms,
                "Slow policy API request"
            );
        }
    }
}
