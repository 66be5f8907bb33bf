use servicetitan_auth::config::{AUTH_VARIABLES, API_ROOT, AUTH_ROOT};
use servicetitan_auth::{load_env_vars, AuthError, ConnectOptions, EnvVars};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn full_env() -> EnvVars {
    AUTH_VARIABLES
        .iter()
        .map(|name| (name.to_string(), format!("env-{name}")))
        .collect()
}

#[test]
fn test_config_file_overrides_explicit_args() {
    let file = config_file(r#"{"SERVICETITAN_APP_KEY": "X"}"#);

    let conn = ConnectOptions::new("production")
        .app_key("arg-app-key")
        .tenant_id("arg-tenant")
        .client_id("arg-client")
        .client_secret("arg-secret")
        .app_id("arg-app")
        .timezone("America/Denver")
        .config_file(file.path())
        .resolve(&full_env())
        .unwrap();

    assert_eq!(conn.app_key(), "X");
    for key in AUTH_VARIABLES.iter().skip(1) {
        assert_eq!(conn.get(key), Some(""), "key {key}");
    }
    // URLs still follow the selector passed alongside the file
    assert_eq!(conn.get(AUTH_ROOT), Some("https://auth.servicetitan.io"));
    assert_eq!(conn.get(API_ROOT), Some("https://api.servicetitan.io"));
}

#[test]
fn test_config_file_full() {
    let file = config_file(
        r#"{
            "SERVICETITAN_APP_KEY": "ak",
            "SERVICETITAN_TENANT_ID": "1001",
            "SERVICETITAN_CLIENT_ID": "cid",
            "SERVICETITAN_CLIENT_SECRET": "cs",
            "SERVICETITAN_APP_ID": "app",
            "SERVICETITAN_TIMEZONE": "America/New_York",
            "SERVICETITAN_API_ENVIRONMENT": "production",
            "unrelated": 7
        }"#,
    );

    let conn = ConnectOptions::default()
        .config_file(file.path())
        .resolve(&EnvVars::new())
        .unwrap();

    assert_eq!(conn.tenant_id(), "1001");
    assert_eq!(conn.client_secret(), "cs");
    assert_eq!(conn.credentials.timezone, "America/New_York");
    assert_eq!(conn.credentials.api_environment, "production");
    assert_eq!(conn.auth_root(), "https://auth-integration.servicetitan.io");
}

#[test]
fn test_config_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = ConnectOptions::new("integration")
        .config_file(dir.path().join("missing.json"))
        .resolve(&EnvVars::new());

    assert!(matches!(result, Err(AuthError::Io(_))));
}

#[test]
fn test_config_file_invalid_json() {
    let file = config_file("SERVICETITAN_APP_KEY=X");
    let result = ConnectOptions::new("integration")
        .config_file(file.path())
        .resolve(&EnvVars::new());

    assert!(matches!(result, Err(AuthError::Json(_))));
}

#[test]
fn test_config_file_numeric_value_passed_through() {
    let file = config_file(r#"{"SERVICETITAN_APP_KEY": "X", "SERVICETITAN_TENANT_ID": 12345}"#);
    let conn = ConnectOptions::default()
        .config_file(file.path())
        .resolve(&EnvVars::new())
        .unwrap();

    assert_eq!(conn.app_key(), "X");
    assert_eq!(conn.tenant_id(), "12345");
}

#[test]
fn test_environment_branch_from_env_vars() {
    let env: EnvVars = [
        ("SERVICETITAN_APP_KEY", "ak"),
        ("SERVICETITAN_CLIENT_ID", "cid"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let conn = ConnectOptions::new("production")
        .app_key("arg-app-key")
        .resolve(&env)
        .unwrap();

    assert_eq!(conn.app_key(), "ak");
    assert_eq!(conn.client_id(), "cid");
    assert_eq!(conn.tenant_id(), "");
    assert_eq!(conn.credentials.timezone, "");
    assert_eq!(conn.to_map().len(), 9);
}

#[test]
fn test_load_env_vars_reads_env_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "ST_AUTH_TEST_ONLY_APP_KEY=from-dotenv").unwrap();
    writeln!(file, "ST_AUTH_TEST_ONLY_TENANT=\"quoted value\"").unwrap();

    let vars = load_env_vars(Some(file.path())).unwrap();

    assert_eq!(vars["ST_AUTH_TEST_ONLY_APP_KEY"], "from-dotenv");
    assert_eq!(vars["ST_AUTH_TEST_ONLY_TENANT"], "quoted value");
}

#[test]
fn test_load_env_vars_includes_process_env() {
    let file = NamedTempFile::new().unwrap();
    let vars = load_env_vars(Some(file.path())).unwrap();

    if let Ok(path) = std::env::var("PATH") {
        assert_eq!(vars["PATH"], path);
    }
}

#[test]
fn test_load_env_vars_missing_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_env_vars(Some(&dir.path().join(".env.missing")));

    assert!(matches!(result, Err(AuthError::EnvFile(_))));
}
