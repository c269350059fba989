//! 策略服务 HTTP 客户端集成测试

mod common;

use std::time::Duration;

use common::{VALID_POLICY, client_for, policy_json};
use cuba_config::HttpServiceConfig;
use iam_policy_console::domain::policy::{PolicyGateway, PolicyId, PolicyPayload, PolicyStatus};
use iam_policy_console::error::ConsoleError;
use iam_policy_console::infrastructure::PolicyApiClient;
use secrecy::Secret;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn payload() -> PolicyPayload {
    PolicyPayload {
        name: "Test Policy".to_string(),
        description: String::new(),
        content: VALID_POLICY.to_string(),
        status: PolicyStatus::Draft,
    }
}

#[tokio::test]
async fn test_list_sends_json_content_type_and_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/policies/"))
        .and(header("authorization", "Bearer t0k3n"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            policy_json(json!(1), "Numeric"),
            policy_json(json!("abc"), "Text")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_token(Secret::new("t0k3n".to_string()));

    let policies = client.list().await.unwrap();
    assert_eq!(policies.len(), 2);
    assert_eq!(policies[0].id, Some(PolicyId::new("1")));
    assert_eq!(policies[1].id, Some(PolicyId::new("abc")));
    assert!(policies[0].created_at.is_some());
}

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/policies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let mut client = client_for(&server);
    client.set_token(Secret::new("t0k3n".to_string()));
    client.clear_token();
    client.list().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_update_uses_put_with_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/policies/42"))
        .and(body_json(json!({
            "name": "Test Policy",
            "description": "",
            "content": VALID_POLICY,
            "status": "draft"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_json(json!(42), "Test Policy")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = client.update(&PolicyId::new("42"), &payload()).await.unwrap();
    assert_eq!(policy.id, Some(PolicyId::new("42")));
}

#[tokio::test]
async fn test_create_uses_post_collection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/policies/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(policy_json(json!(7), "Test Policy")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = client.create(&payload()).await.unwrap();
    assert_eq!(policy.id, Some(PolicyId::new("7")));
}

#[tokio::test]
async fn test_error_detail_is_extracted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/policies/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Policy name already exists"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.create(&payload()).await.unwrap_err();
    match err {
        ConsoleError::Api { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Policy name already exists"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_validation_error_array_is_joined() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/policies/1"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "name"], "msg": "field required", "type": "value_error.missing"},
                {"loc": ["body", "content"], "msg": "field required", "type": "value_error.missing"}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.update(&PolicyId::new("1"), &payload()).await.unwrap_err();
    assert!(matches!(
        err,
        ConsoleError::Api { status: 422, detail: Some(ref d) } if d == "field required; field required"
    ));
}

#[tokio::test]
async fn test_server_error_without_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/policies/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.list().await.unwrap_err();
    assert!(matches!(err, ConsoleError::Api { status: 500, detail: None }));
}

#[tokio::test]
async fn test_delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/policies/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(client.delete(&PolicyId::new("5")).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/policies/5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Policy deleted"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.delete(&PolicyId::new("5")).await.unwrap().as_deref(),
        Some("Policy deleted")
    );
}

#[tokio::test]
async fn test_test_policy_sends_content_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/policies/test"))
        .and(body_json(json!({"content": VALID_POLICY})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "summary": {"total": 2, "allowed": 1, "denied": 1},
            "results": [
                {"principal": "user:john", "action": "read", "resource": "document:123", "allowed": true},
                {"principal": "user:jane", "action": "write", "resource": "document:456", "allowed": false,
                 "reason": "no matching permit"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client.test_policy(VALID_POLICY).await.unwrap();
    assert_eq!(result.effective_summary().denied, 1);
    assert_eq!(result.results[1].reason.as_deref(), Some("no matching permit"));
}

#[tokio::test]
async fn test_publish_validate_and_health_paths() {
    let server = MockServer::start().await;
    let mut published = policy_json(json!(3), "p");
    published["status"] = json!("active");

    Mock::given(method("POST"))
        .and(path("/policies/3/publish"))
        .respond_with(ResponseTemplate::new(200).set_body_json(published))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/policies/validate"))
        .and(body_json(json!({"content": "policy"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": false,
            "errors": ["unexpected end of input"],
            "warnings": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2024-05-01T10:20:30",
            "services": {"database": "healthy", "opal": "healthy"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let policy = client.publish(&PolicyId::new("3")).await.unwrap();
    assert_eq!(policy.status, PolicyStatus::Active);

    let report = client.validate("policy").await.unwrap();
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["unexpected end of input".to_string()]);

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.services.len(), 2);
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/policies/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = HttpServiceConfig {
        base_url: server.uri(),
        timeout_secs: 1,
        connect_timeout_secs: 1,
    };
    let client = PolicyApiClient::new(&config).unwrap();
    assert!(matches!(client.list().await, Err(ConsoleError::Timeout)));
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/policies/9"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(matches!(
        client.get(&PolicyId::new("9")).await,
        Err(ConsoleError::Decode(_))
    ));
}
