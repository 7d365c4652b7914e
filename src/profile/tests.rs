use std::collections::BTreeMap;
use std::time::Duration;

use crate::{Result, UsageError};

use super::*;

#[tokio::test]
async fn resolves_admin_key_with_custom_default_keys() -> Result<()> {
    let env = Env::parse_dotenv("OPENAI_USAGE_TEST_KEY=' sk-admin '");
    let auth = AdminAuth::default();
    let keys = ["OPENAI_USAGE_TEST_KEY"];
    let token = resolve_admin_key_with_default_keys(&auth, &env, &keys).await?;
    assert_eq!(token, "sk-admin");
    Ok(())
}

#[tokio::test]
async fn explicit_keys_take_priority_over_defaults() -> Result<()> {
    let env = Env::parse_dotenv(
        "OPENAI_ADMIN_KEY=sk-default\nOPENAI_USAGE_TEST_CUSTOM=sk-custom\n",
    );
    let auth = AdminAuth::ApiKeyEnv {
        keys: vec!["OPENAI_USAGE_TEST_CUSTOM".to_string()],
    };
    let token = resolve_admin_key(&auth, &env).await?;
    assert_eq!(token, "sk-custom");
    Ok(())
}

#[tokio::test]
async fn blank_admin_key_falls_through_to_next_env_var() -> Result<()> {
    let env = Env::parse_dotenv(
        "OPENAI_USAGE_TEST_BLANK=\"   \"\nOPENAI_USAGE_TEST_SECOND=sk-second\n",
    );
    let auth = AdminAuth::ApiKeyEnv {
        keys: vec![
            "OPENAI_USAGE_TEST_BLANK".to_string(),
            "OPENAI_USAGE_TEST_SECOND".to_string(),
        ],
    };
    let token = resolve_admin_key(&auth, &env).await?;
    assert_eq!(token, "sk-second");
    Ok(())
}

#[tokio::test]
async fn missing_admin_key_lists_tried_env_vars() {
    let env = Env::default();
    let auth = AdminAuth::ApiKeyEnv {
        keys: vec!["OPENAI_USAGE_TEST_DEFINITELY_UNSET".to_string()],
    };
    let err = resolve_admin_key(&auth, &env)
        .await
        .expect_err("key is not set");
    let UsageError::AuthCommand(msg) = err else {
        panic!("expected AuthCommand error");
    };
    assert!(msg.contains("OPENAI_USAGE_TEST_DEFINITELY_UNSET"));
}

#[cfg(unix)]
#[tokio::test]
async fn resolves_admin_key_from_command_output() -> Result<()> {
    let auth = AdminAuth::Command {
        command: vec![
            "sh".to_string(),
            "-c".to_string(),
            r#"echo '{"api_key":"sk-from-command"}'"#.to_string(),
        ],
    };
    let token = resolve_admin_key(&auth, &Env::default()).await?;
    assert_eq!(token, "sk-from-command");
    Ok(())
}

#[tokio::test]
async fn empty_command_is_rejected() {
    let auth = AdminAuth::Command {
        command: Vec::new(),
    };
    let err = resolve_admin_key(&auth, &Env::default())
        .await
        .expect_err("empty command");
    assert!(matches!(err, UsageError::AuthCommand(ref msg) if msg == "command is empty"));
}

#[test]
fn parses_dotenv_basic() {
    let parsed = parse_dotenv(
        r#"
# comment
export OPENAI_ADMIN_KEY="sk-admin"
FOO='bar'
EMPTY=
not a pair
"#,
    );
    let expected = BTreeMap::from([
        ("EMPTY".to_string(), String::new()),
        ("FOO".to_string(), "bar".to_string()),
        ("OPENAI_ADMIN_KEY".to_string(), "sk-admin".to_string()),
    ]);
    assert_eq!(parsed, expected);
}

#[test]
fn env_get_trims_and_hides_blank_entries() {
    let env = Env::parse_dotenv("PADDED=\"  sk-padded  \"\nOPENAI_USAGE_TEST_EMPTY=\n");
    assert_eq!(env.get("PADDED").as_deref(), Some("sk-padded"));
    assert_eq!(env.get("OPENAI_USAGE_TEST_EMPTY"), None);
    assert_eq!(
        env.first_of(["OPENAI_USAGE_TEST_EMPTY", "PADDED"]).as_deref(),
        Some("sk-padded")
    );
}

#[test]
fn env_debug_hides_values() {
    let env = Env::parse_dotenv("OPENAI_ADMIN_KEY=sk-secret");
    let debug = format!("{env:?}");
    assert!(debug.contains("OPENAI_ADMIN_KEY"));
    assert!(!debug.contains("sk-secret"));
}

#[test]
fn bearer_auth_debug_is_redacted() -> Result<()> {
    let auth = HttpAuth::bearer("sk-secret")?;
    assert_eq!(auth.header.as_str(), "authorization");
    assert!(!format!("{auth:?}").contains("sk-secret"));
    Ok(())
}

#[test]
fn parses_usage_config_toml() -> Result<()> {
    let config = UsageConfig::from_toml_str(
        r#"
base_url = "https://proxy.internal"
api_version = "v2"
http_timeout_secs = 30

[auth]
type = "env"
keys = ["ORG_ADMIN_KEY"]

[http_headers]
OpenAI-Organization = "org-123"

[http_query_params]
tenant = "acme"
"#,
    )?;
    assert_eq!(config.base_url.as_deref(), Some("https://proxy.internal"));
    assert_eq!(config.api_version.as_deref(), Some("v2"));
    assert_eq!(config.http_timeout(), Duration::from_secs(30));
    assert_eq!(
        config.auth,
        Some(AdminAuth::ApiKeyEnv {
            keys: vec!["ORG_ADMIN_KEY".to_string()],
        })
    );
    assert_eq!(
        config.http_headers.get("OpenAI-Organization").map(String::as_str),
        Some("org-123")
    );
    assert_eq!(
        config.http_query_params.get("tenant").map(String::as_str),
        Some("acme")
    );
    Ok(())
}

#[test]
fn empty_config_uses_defaults() -> Result<()> {
    let config = UsageConfig::from_toml_str("")?;
    assert_eq!(config, UsageConfig::default());
    assert_eq!(config.http_timeout(), Duration::from_secs(300));
    Ok(())
}

#[test]
fn malformed_config_is_a_config_error() {
    let err = UsageConfig::from_toml_str("base_url = [").expect_err("invalid toml");
    assert!(matches!(err, UsageError::Config(_)));
}

#[tokio::test]
async fn loads_config_and_dotenv_from_disk() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("usage.toml");
    let dotenv_path = dir.path().join(".env");
    tokio::fs::write(&config_path, "api_version = \"v1\"\n").await?;
    tokio::fs::write(&dotenv_path, "OPENAI_ADMIN_KEY=sk-disk\n").await?;

    let config = UsageConfig::load(&config_path).await?;
    let env = Env::load_dotenv(&dotenv_path).await?;
    assert_eq!(config.api_version.as_deref(), Some("v1"));
    assert_eq!(env.get("OPENAI_ADMIN_KEY").as_deref(), Some("sk-disk"));
    Ok(())
}
