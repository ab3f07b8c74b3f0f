use std::io::Write;

use log::LevelFilter;

use crate::config::{ConfigCell, LockConfig, DEFAULT_LOCK_TAG};
use crate::error::Error;

#[test]
fn test_default_config() {
    let config = LockConfig::default();
    assert_eq!(config.tag, DEFAULT_LOCK_TAG);
    assert_eq!(config.log_tag, DEFAULT_LOCK_TAG);
    assert!(config.reference_counted);
    assert_eq!(config.level_filter().unwrap(), LevelFilter::Debug);
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: LockConfig = "tag = \"ssdp-discovery\"\nlog_level = \"warn\"\n"
        .parse()
        .unwrap();
    assert_eq!(config.tag, "ssdp-discovery");
    assert!(config.reference_counted);
    assert_eq!(config.log_tag, DEFAULT_LOCK_TAG);
    assert_eq!(config.level_filter().unwrap(), LevelFilter::Warn);
}

#[test]
fn test_unknown_field_is_rejected() {
    let result = "tag = \"x\"\ntimeout = 5\n".parse::<LockConfig>();
    assert!(result.is_err());
}

#[test]
fn test_display_parses_back() {
    let config = LockConfig {
        tag: "mdns".to_owned(),
        reference_counted: false,
        log_tag: "player".to_owned(),
        log_level: "info".to_owned(),
    };
    let printed = config.to_string();
    assert!(printed.contains("reference_counted = false"), "{}", printed);
    assert_eq!(printed.parse::<LockConfig>().unwrap(), config);
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tag = \"lan-scan\"").unwrap();
    writeln!(file, "reference_counted = true").unwrap();

    let config = LockConfig::load(file.path()).unwrap();
    assert_eq!(config.tag, "lan-scan");
}

#[test]
fn test_load_rejects_invalid_values() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "tag = \"\"").unwrap();
    assert!(matches!(LockConfig::load(file.path()), Err(Error::Config(_))));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "log_level = \"loud\"").unwrap();
    assert!(matches!(LockConfig::load(file.path()), Err(Error::Config(_))));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = LockConfig::load(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_config_cell_reading_defaults_does_not_freeze() {
    let cell = ConfigCell::new();
    // Logging setup reads the cell this way.
    assert_eq!(cell.current(), LockConfig::default());
    assert!(cell.get().is_none());

    let config = LockConfig {
        tag: "retry".to_owned(),
        ..LockConfig::default()
    };
    cell.set(config.clone()).unwrap();
    assert_eq!(cell.get_or_default(), &config);
    assert_eq!(cell.current(), config);
}

#[test]
fn test_config_cell_set_once() {
    let cell = ConfigCell::new();
    assert_eq!(cell.get_or_default().tag, DEFAULT_LOCK_TAG);

    let result = cell.set(LockConfig {
        tag: "late".to_owned(),
        ..LockConfig::default()
    });
    assert!(matches!(result, Err(Error::Config(_))));
    assert_eq!(cell.get_or_default().tag, DEFAULT_LOCK_TAG);
}
