//! Tests for configuration layering.

use std::io::Write;
use std::time::Duration;
use storyboard_rate_limit::{RetryPolicy, StoryboardConfig};
use tempfile::NamedTempFile;

#[test]
fn test_bundled_defaults_match_policy_defaults() {
    let config = StoryboardConfig::from_file(write_config("")).expect("defaults should load");

    assert_eq!(config.retry, RetryPolicy::default());
    assert_eq!(config.gemini.script_model, "gemini-2.5-flash");
    assert_eq!(config.gemini.image_model, "gemini-2.5-flash-image");
    assert_eq!(config.gemini.tier.rpm, Some(15));
    assert!(config.storage.history_dir.is_none());
}

#[test]
fn test_file_overrides_single_value() {
    let file = write_config(
        r#"
[retry]
max_retries = 5
"#,
    );
    let config = StoryboardConfig::from_file(file).expect("override should load");

    assert_eq!(*config.retry.max_retries(), 5);
    assert_eq!(config.retry.cooldown(), Duration::from_millis(15_000));
    assert_eq!(config.retry.inter_scene_delay(), Duration::from_millis(4_000));
}

#[test]
fn test_history_dir_override() {
    let file = write_config(
        r#"
[storage]
history_dir = "/tmp/storyboard-history"
"#,
    );
    let config = StoryboardConfig::from_file(file).expect("override should load");

    assert_eq!(
        config.storage.history_dir(),
        std::path::PathBuf::from("/tmp/storyboard-history")
    );
}

#[test]
fn test_invalid_value_is_config_error() {
    let file = write_config(
        r#"
[retry]
max_retries = "many"
"#,
    );
    let err = StoryboardConfig::from_file(file).unwrap_err();
    assert!(format!("{}", err).contains("Configuration Error"));
}

fn write_config(contents: &str) -> tempfile::TempPath {
    let mut file = NamedTempFile::with_suffix(".toml").expect("temp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file.into_temp_path()
}
