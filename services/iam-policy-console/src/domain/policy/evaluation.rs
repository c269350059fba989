//! 策略试运行与远程校验结果
//!
//! 这些值只存在于编辑器内存中，不做持久化。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 单个测试用例的结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseOutcome {
    pub principal: String,
    pub action: String,
    pub resource: String,
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// 汇总统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestSummary {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub allowed: u32,
    #[serde(default)]
    pub denied: u32,
}

/// 策略测试结果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TestSummary>,
    #[serde(default)]
    pub results: Vec<TestCaseOutcome>,
}

impl TestResult {
    /// 后端给出的汇总；缺省时根据用例计算
    pub fn effective_summary(&self) -> TestSummary {
        if let Some(summary) = self.summary {
            return summary;
        }
        let allowed = self.results.iter().filter(|r| r.allowed).count() as u32;
        let total = self.results.len() as u32;
        TestSummary {
            total,
            allowed,
            denied: total - allowed,
        }
    }
}

/// 后端权威校验结果
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// 策略服务健康状态
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_without_summary() {
        let result: TestResult = serde_json::from_value(serde_json::json!({
            "results": [
                {"principal": "user:john", "action": "read", "resource": "document:123", "allowed": true},
                {"principal": "user:jane", "action": "write", "resource": "document:456", "allowed": false,
                 "reason": "no matching permit"}
            ]
        }))
        .unwrap();

        assert!(result.summary.is_none());
        assert_eq!(result.results[1].reason.as_deref(), Some("no matching permit"));
        assert_eq!(
            result.effective_summary(),
            TestSummary {
                total: 2,
                allowed: 1,
                denied: 1
            }
        );
    }

    #[test]
    fn test_result_prefers_backend_summary() {
        let result: TestResult = serde_json::from_value(serde_json::json!({
            "summary": {"total": 10, "allowed": 7, "denied": 3},
            "results": []
        }))
        .unwrap();

        assert_eq!(result.effective_summary().total, 10);
        assert_eq!(result.effective_summary().denied, 3);
    }

    #[test]
    fn test_empty_body_is_empty_result() {
        let result: TestResult = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(result.results.is_empty());
        assert_eq!(result.effective_summary(), TestSummary::default());
    }

    #[test]
    fn test_service_health() {
        let health: ServiceHealth = serde_json::from_value(serde_json::json!({
            "status": "healthy",
            "services": {"database": "healthy", "opal": "not_initialized"}
        }))
        .unwrap();
        assert!(health.is_healthy());
        assert_eq!(health.services.len(), 2);
    }
}
