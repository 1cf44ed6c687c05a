//! Integration tests for configuration loading and validation
//!
//! Note: Tests that modify environment variables should be run with --test-threads=1
//! to avoid interference between tests.

use portico::config::load_config;
use portico::core::mapping::MappingDirective;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("PORTICO_APPLICATION_LOG_LEVEL");
    std::env::remove_var("PORTICO_EXPORT_PATH");
    std::env::remove_var("PORTICO_EXPORT_SOURCE_LABEL");
    std::env::remove_var("PORTICO_EXPORT_COMPRESS");
    std::env::remove_var("PORTICO_EXPORT_STREAMING");
    std::env::remove_var("PORTICO_SOURCE_ROOT");
    std::env::remove_var("PORTICO_SOURCE_PREFIX");
    std::env::remove_var("TEST_PORTICO_DUMP_ROOT");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "debug"

[export]
path = "forum.txt.gz"
source_label = "WBB 3.x"
compress = true
streaming = false

[source]
root = "./dump"
prefix = "wbb1_1_"

[[source.required_tables]]
name = "user"
columns = ["userID", "username", "email"]

[[source.required_tables]]
name = "user_group"
columns = ["groupID", "groupName"]

[[tables]]
name = "User"
file = "wcf1_user.jsonl"

[tables.mapping]
userID = "UserID"
username = "Name"
registrationDate = "int"
ip = { column = "LastIPAddress", type = "varchar(40)" }

[[tables]]
name = "Role"

[logging]
local_enabled = true
local_path = "/tmp/portico-logs"
local_rotation = "hourly"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify application config
    assert_eq!(config.application.log_level, "debug");

    // Verify export config
    assert_eq!(config.export.path.as_deref(), Some("forum.txt.gz"));
    assert_eq!(config.export.source_label.as_deref(), Some("WBB 3.x"));
    assert!(config.export.compress);
    assert!(!config.export.streaming);

    // Verify source config
    assert_eq!(config.source.root, "./dump");
    assert_eq!(config.source.prefix, "wbb1_1_");
    assert_eq!(config.source.required_tables.len(), 2);
    assert_eq!(config.source.required_tables[0].name, "user");
    assert_eq!(
        config.source.required_tables[1].columns,
        vec!["groupID", "groupName"]
    );

    // Verify table configs and mapping directive forms
    assert_eq!(config.tables.len(), 2);
    assert_eq!(config.tables[0].name, "User");
    assert_eq!(config.tables[0].file.as_deref(), Some("wcf1_user.jsonl"));
    assert_eq!(
        config.tables[0].mapping.get("userID"),
        Some(&MappingDirective::Target("UserID".to_string()))
    );
    assert_eq!(
        config.tables[0].mapping.get("ip"),
        Some(&MappingDirective::Fresh {
            column: "LastIPAddress".to_string(),
            type_label: "varchar(40)".to_string(),
        })
    );
    assert!(config.tables[1].mapping.is_empty());

    // Verify logging config
    assert!(config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "/tmp/portico-logs");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[source]
root = "./data"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    // Verify defaults are applied
    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.export.path, None);
    assert!(config.export.compress);
    assert!(!config.export.streaming);
    assert_eq!(config.source.prefix, "");
    assert!(config.source.required_tables.is_empty());
    assert!(config.tables.is_empty());
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_path, "logs");
    assert_eq!(config.logging.local_rotation, "daily");
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_PORTICO_DUMP_ROOT", "/var/dumps/forum");

    let toml_content = r#"
# ${TEST_PORTICO_DUMP_ROOT} in a comment stays untouched
[source]
root = "${TEST_PORTICO_DUMP_ROOT}"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");
    assert_eq!(config.source.root, "/var/dumps/forum");

    cleanup_env_vars();
}

#[test]
fn test_missing_env_var_fails_with_name() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[source]
root = "${PORTICO_TEST_UNSET_VARIABLE_99}"
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("PORTICO_TEST_UNSET_VARIABLE_99"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("PORTICO_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("PORTICO_EXPORT_PATH", "/tmp/override.txt");
    std::env::set_var("PORTICO_EXPORT_COMPRESS", "false");
    std::env::set_var("PORTICO_SOURCE_ROOT", "/data/other");
    std::env::set_var("PORTICO_SOURCE_PREFIX", "phpbb_");

    let toml_content = r#"
[application]
log_level = "info"

[export]
compress = true

[source]
root = "./dump"
prefix = "wbb_"
"#;

    let temp_file = write_config(toml_content);
    let config = load_config(temp_file.path()).expect("Failed to load config");

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.export.path.as_deref(), Some("/tmp/override.txt"));
    assert!(!config.export.compress);
    assert_eq!(config.source.root, "/data/other");
    assert_eq!(config.source.prefix, "phpbb_");

    cleanup_env_vars();
}

#[test]
fn test_invalid_log_level_fails_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let toml_content = r#"
[application]
log_level = "shouting"

[source]
root = "./data"
"#;

    let temp_file = write_config(toml_content);
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Invalid log_level"));
}

#[test]
fn test_missing_source_section_fails() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let temp_file = write_config("[application]\nlog_level = \"info\"\n");
    let err = load_config(temp_file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse TOML"));
}

#[test]
fn test_nonexistent_file_fails() {
    let result = load_config("/nonexistent/portico.toml");
    assert!(result.is_err());
}
