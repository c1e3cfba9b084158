//! Tests for configuration validation

use std::collections::HashMap;
use std::path::PathBuf;

use parking_lot::Mutex;
use pool_gate::config::{
    load_from_env, load_from_env_file, PoolConfig, SchedulerConfig, CONFIG_PATH_ENV,
};
use pool_gate::core::{DEFAULT_POOL_NAME, DEFAULT_POOL_SLOTS, MAX_POOL_NAME_LEN};

fn pool_config(slots: u32, include_deferred: bool) -> PoolConfig {
    PoolConfig {
        slots,
        include_deferred,
        description: None,
    }
}

#[test]
fn test_pool_config_validation() {
    assert!(pool_config(100, false).validate().is_ok());
    assert!(pool_config(0, true).validate().is_ok());
}

#[test]
fn test_pool_config_long_description() {
    let invalid = PoolConfig {
        description: Some("x".repeat(5000)),
        ..pool_config(1, false)
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_scheduler_config_validation() {
    let mut pools = HashMap::new();
    pools.insert("pool1".to_string(), pool_config(100, false));

    let config = SchedulerConfig { pools };
    assert!(config.validate().is_ok());
}

#[test]
fn test_scheduler_config_empty_name() {
    let mut pools = HashMap::new();
    pools.insert(" ".to_string(), pool_config(1, false));
    assert!(SchedulerConfig { pools }.validate().is_err());
}

#[test]
fn test_scheduler_config_from_json() {
    let json = r#"{
        "pools": {
            "test_pool": { "slots": 4 },
            "test_includes_deferred_pool": { "slots": 2, "include_deferred": true, "description": "triggers" }
        }
    }"#;

    let config = SchedulerConfig::from_json_str(json).unwrap();
    assert_eq!(config.pools.len(), 2);
    assert!(!config.pools["test_pool"].include_deferred);
    assert!(config.pools["test_includes_deferred_pool"].include_deferred);
    assert_eq!(
        config.pools["test_includes_deferred_pool"].description.as_deref(),
        Some("triggers")
    );
}

#[test]
fn test_scheduler_config_rejects_negative_slots() {
    let json = r#"{ "pools": { "p": { "slots": -1 } } }"#;
    let err = SchedulerConfig::from_json_str(json).unwrap_err();
    assert!(err.starts_with("parse error"));
}

#[test]
fn test_default_pool_added_once() {
    let config = SchedulerConfig::default().with_default_pool();
    assert_eq!(config.pools[DEFAULT_POOL_NAME].slots, DEFAULT_POOL_SLOTS);

    let mut pools = HashMap::new();
    pools.insert(DEFAULT_POOL_NAME.to_string(), pool_config(8, true));
    let config = SchedulerConfig { pools }.with_default_pool();
    assert_eq!(config.pools.len(), 1);
    assert_eq!(config.pools[DEFAULT_POOL_NAME].slots, 8);
}

#[test]
fn test_from_file_missing() {
    let err = SchedulerConfig::from_file("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("reading pool config"));
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join(format!("pool_gate_cfg_{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "pools": { "etl": { "slots": 3 } } }"#).unwrap();
    let config = SchedulerConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.pools["etl"].slots, 3);
}

#[test]
fn test_scheduler_config_name_limit_counts_characters() {
    let mut pools = HashMap::new();
    pools.insert("é".repeat(MAX_POOL_NAME_LEN), pool_config(1, false));
    assert!(SchedulerConfig { pools }.validate().is_ok());

    let mut pools = HashMap::new();
    pools.insert("é".repeat(MAX_POOL_NAME_LEN + 1), pool_config(1, false));
    assert!(SchedulerConfig { pools }.validate().is_err());
}

/// Serializes tests that touch process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pool_gate_{}_{name}", std::process::id()))
}

#[test]
fn test_load_from_env_without_config_var() {
    let _guard = ENV_LOCK.lock();
    std::env::remove_var(CONFIG_PATH_ENV);

    let config = load_from_env_file(temp_path("absent.env")).unwrap();
    assert_eq!(config.pools.len(), 1);
    assert_eq!(config.pools[DEFAULT_POOL_NAME].slots, DEFAULT_POOL_SLOTS);

    let config = load_from_env().unwrap();
    assert!(config.pools.contains_key(DEFAULT_POOL_NAME));
}

#[test]
fn test_load_from_env_reads_named_file() {
    let _guard = ENV_LOCK.lock();
    let cfg_path = temp_path("pools.json");
    std::fs::write(&cfg_path, r#"{ "pools": { "etl": { "slots": 3, "include_deferred": true } } }"#)
        .unwrap();
    std::env::set_var(CONFIG_PATH_ENV, &cfg_path);

    let result = load_from_env_file(temp_path("absent.env"));
    std::env::remove_var(CONFIG_PATH_ENV);
    std::fs::remove_file(&cfg_path).unwrap();

    let config = result.unwrap();
    assert_eq!(config.pools.len(), 2);
    assert_eq!(config.pools["etl"].slots, 3);
    assert!(config.pools["etl"].include_deferred);
    assert_eq!(config.pools[DEFAULT_POOL_NAME].slots, DEFAULT_POOL_SLOTS);
}

#[test]
fn test_load_from_env_invalid_named_file() {
    let _guard = ENV_LOCK.lock();
    let cfg_path = temp_path("bad_pools.json");
    std::fs::write(&cfg_path, r#"{ "pools": { "": { "slots": 3 } } }"#).unwrap();
    std::env::set_var(CONFIG_PATH_ENV, &cfg_path);

    let result = load_from_env_file(temp_path("absent.env"));
    std::env::remove_var(CONFIG_PATH_ENV);
    std::fs::remove_file(&cfg_path).unwrap();

    assert!(result.is_err());
}

#[test]
fn test_load_from_env_malformed_dotenv() {
    let _guard = ENV_LOCK.lock();
    std::env::remove_var(CONFIG_PATH_ENV);
    let dotenv_path = temp_path("malformed.env");
    std::fs::write(&dotenv_path, "POOL_GATE_CONFIG='unterminated\n").unwrap();

    let result = load_from_env_file(&dotenv_path);
    std::fs::remove_file(&dotenv_path).unwrap();
    std::env::remove_var(CONFIG_PATH_ENV);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("loading .env"));
}
