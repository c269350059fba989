use crate::{HttpServiceConfig, SessionConfig, TelemetryConfig, load};
use figment::Jail;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SampleConfig {
    #[serde(default)]
    api: HttpServiceConfig,
    #[serde(default)]
    session: SessionConfig,
    #[serde(default)]
    telemetry: TelemetryConfig,
}

#[test]
fn test_secret_redaction() {
    let secret = Secret::new("my_bearer_token".to_string());
    let debug_output = format!("{:?}", secret);
    assert!(debug_output.contains("Secret([REDACTED"));
    assert!(!debug_output.contains("my_bearer_token"));
}

#[test]
fn test_session_config_redaction() {
    let config = SessionConfig {
        token_file: "token".into(),
        token: Some(Secret::new("eyJhbGciOi.payload.sig".to_string())),
    };
    let debug_output = format!("{:?}", config);
    assert!(!debug_output.contains("payload"));
    assert!(debug_output.contains("Secret([REDACTED"));
}

#[test]
fn test_defaults_without_files() {
    Jail::expect_with(|_jail| {
        let config: SampleConfig = load(".", "CONSOLE_TEST_").expect("load defaults");
        assert_eq!(config.api.base_url, "http://localhost:8001");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.connect_timeout_secs, 5);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(!config.telemetry.json);
        assert!(!config.telemetry.metrics);
        assert!(config.session.token.is_none());
        Ok(())
    });
}

#[test]
fn test_file_and_env_layering() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "default.toml",
            r#"
            [api]
            base_url = "http://policy-api:8000"
            timeout_secs = 10

            [telemetry]
            log_level = "debug"
            "#,
        )?;
        jail.set_env("APP_ENV", "staging");
        jail.create_file(
            "staging.toml",
            r#"
            [api]
            timeout_secs = 15
            "#,
        )?;
        jail.set_env("CONSOLE_TEST_TELEMETRY__JSON", "true");
        jail.set_env("CONSOLE_TEST_SESSION__TOKEN", "abc");

        let config: SampleConfig = load(".", "CONSOLE_TEST_").expect("load layered");
        assert_eq!(config.api.base_url, "http://policy-api:8000");
        assert_eq!(config.api.timeout_secs, 15);
        assert_eq!(config.telemetry.log_level, "debug");
        assert!(config.telemetry.json);
        assert_eq!(
            config.session.token.as_ref().map(|t| t.expose_secret().as_str()),
            Some("abc")
        );
        Ok(())
    });
}
