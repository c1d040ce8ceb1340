//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

// ===== Paths =====

#[test]
fn default_config_path_contains_honkview_config_toml() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("honkview") && path_str.ends_with("config.toml"),
        "Path should contain 'honkview' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_honkview_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("honkview.log"),
        "Default log path should end with 'honkview.log', got: {:?}",
        path
    );
}

// ===== File loading =====

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("honkview_test_config.toml");
    let toml_content = r#"
server = "https://honk.test"
csrf = "tok"
cookie = "wcookie=abc"
start_page = "convoy"
start_arg = "data:cv/1"
refresh_interval_secs = 60
read_timeout_secs = 5
write_timeout_secs = 9
"#;
    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let config = load_config_file(&config_path)
        .expect("Should parse valid TOML")
        .expect("Should return Some for existing file");

    assert_eq!(config.server.as_deref(), Some("https://honk.test"));
    assert_eq!(config.csrf.as_deref(), Some("tok"));
    assert_eq!(config.cookie.as_deref(), Some("wcookie=abc"));
    assert_eq!(config.start_page.as_deref(), Some("convoy"));
    assert_eq!(config.start_arg.as_deref(), Some("data:cv/1"));
    assert_eq!(config.refresh_interval_secs, Some(60));
    assert_eq!(config.read_timeout_secs, Some(5));
    assert_eq!(config.write_timeout_secs, Some(9));

    fs::remove_file(config_path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("honkview_test_invalid.toml");
    fs::write(&config_path, "server = [unclosed").expect("Failed to write test config");

    let result = load_config_file(&config_path);

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Invalid TOML should return ParseError, got: {:?}",
        result
    );
    fs::remove_file(config_path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"");
    assert!(result.is_err(), "Unknown fields should be rejected");
}

// ===== Merge =====

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn resolved_config_default_has_expected_values() {
    let config = ResolvedConfig::default();
    assert_eq!(config.server, None);
    assert_eq!(config.start_page, "home");
    assert_eq!(config.refresh_interval, None);
    assert_eq!(config.read_timeout, Duration::from_secs(15));
    assert_eq!(config.write_timeout, Duration::from_secs(30));
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let file = ConfigFile {
        server: Some("https://honk.test".to_string()),
        refresh_interval_secs: Some(30),
        read_timeout_secs: Some(3),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(file));

    assert_eq!(resolved.server.as_deref(), Some("https://honk.test"));
    assert_eq!(resolved.refresh_interval, Some(Duration::from_secs(30)));
    assert_eq!(resolved.read_timeout, Duration::from_secs(3));
    assert_eq!(resolved.write_timeout, Duration::from_secs(30));
}

#[test]
fn zero_refresh_interval_disables_timer() {
    let file = ConfigFile {
        refresh_interval_secs: Some(0),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(file)).refresh_interval, None);
}

// ===== Env overrides =====

/// RAII guard to ensure environment variable cleanup even under test parallelism.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

#[test]
#[serial(honkview_env)]
fn apply_env_overrides_respects_honkview_vars() {
    let _server = EnvGuard::new("HONKVIEW_SERVER");
    let _csrf = EnvGuard::new("HONKVIEW_CSRF");
    let _cookie = EnvGuard::new("HONKVIEW_COOKIE");
    env::set_var("HONKVIEW_SERVER", "https://env.test");
    env::set_var("HONKVIEW_CSRF", "env-tok");
    env::set_var("HONKVIEW_COOKIE", "c=1");

    let result = apply_env_overrides(ResolvedConfig::default());

    assert_eq!(result.server.as_deref(), Some("https://env.test"));
    assert_eq!(result.csrf, "env-tok");
    assert_eq!(result.cookie.as_deref(), Some("c=1"));
}

#[test]
#[serial(honkview_env)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _server = EnvGuard::new("HONKVIEW_SERVER");
    let _csrf = EnvGuard::new("HONKVIEW_CSRF");
    let _cookie = EnvGuard::new("HONKVIEW_COOKIE");

    let base = ResolvedConfig::default();
    let result = apply_env_overrides(base.clone());

    assert_eq!(result, base, "Config should be unchanged when env not set");
}

#[test]
#[serial(honkview_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new("HONKVIEW_CONFIG");
    let explicit = env::temp_dir().join("honkview_test_explicit.toml");
    let from_env = env::temp_dir().join("honkview_test_env.toml");
    fs::write(&explicit, "csrf = \"explicit\"").expect("write");
    fs::write(&from_env, "csrf = \"env\"").expect("write");
    env::set_var("HONKVIEW_CONFIG", from_env.to_str().unwrap());

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();

    assert_eq!(config.csrf.as_deref(), Some("explicit"));
    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(honkview_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new("HONKVIEW_CONFIG");
    let from_env = env::temp_dir().join("honkview_test_env_only.toml");
    fs::write(&from_env, "csrf = \"env\"").expect("write");
    env::set_var("HONKVIEW_CONFIG", from_env.to_str().unwrap());

    let config = load_config_with_precedence(None).unwrap().unwrap();

    assert_eq!(config.csrf.as_deref(), Some("env"));
    fs::remove_file(from_env).ok();
}

// ===== CLI overrides =====

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), CliOverrides::default()), base);
}

#[test]
fn cli_page_change_drops_configured_argument() {
    let base = ResolvedConfig {
        start_page: "convoy".to_string(),
        start_arg: "cv".to_string(),
        ..ResolvedConfig::default()
    };

    let result = apply_cli_overrides(
        base,
        CliOverrides {
            page: Some("first".to_string()),
            ..CliOverrides::default()
        },
    );

    assert_eq!(result.start_page, "first");
    assert_eq!(result.start_arg, "");
}

#[test]
#[serial(honkview_env)]
fn precedence_chain_full_defaults_to_cli() {
    let _server = EnvGuard::new("HONKVIEW_SERVER");
    env::set_var("HONKVIEW_SERVER", "https://env.test");
    let file = ConfigFile {
        server: Some("https://file.test".to_string()),
        csrf: Some("file-tok".to_string()),
        ..ConfigFile::default()
    };

    let from_env = apply_env_overrides(merge_config(Some(file)));
    assert_eq!(from_env.server.as_deref(), Some("https://env.test"));

    let resolved = apply_cli_overrides(
        from_env,
        CliOverrides {
            server: Some("https://cli.test".to_string()),
            refresh_interval_secs: Some(10),
            ..CliOverrides::default()
        },
    );
    assert_eq!(resolved.server.as_deref(), Some("https://cli.test"));
    assert_eq!(resolved.csrf, "file-tok");
    assert_eq!(resolved.refresh_interval, Some(Duration::from_secs(10)));
}

// ===== Seed =====

#[test]
fn seed_uses_start_view_and_csrf() {
    let config = ResolvedConfig {
        start_page: "combo".to_string(),
        start_arg: "pets".to_string(),
        csrf: "tok".to_string(),
        ..ResolvedConfig::default()
    };

    let seed = config.seed().unwrap();

    assert_eq!(seed.key, ViewKey::new(ViewKind::Combo, "pets"));
    assert_eq!(seed.csrf, "tok");
    assert!(seed.items.is_none(), "startup view is fetched on boot");
}

#[test]
fn unknown_start_page_is_rejected() {
    let config = ResolvedConfig {
        start_page: "nowhere".to_string(),
        ..ResolvedConfig::default()
    };
    assert_eq!(
        config.seed(),
        Err(ConfigError::UnknownStartPage("nowhere".to_string()))
    );
}

#[test]
fn missing_server_is_an_error() {
    let config = ResolvedConfig::default();
    assert_eq!(config.server(), Err(ConfigError::MissingServer));
}
