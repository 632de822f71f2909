//! Installs the global subscriber, so it lives in its own test binary.

use ledgerboard_common::{init_logging, LogFormat, LoggingConfig};

#[test]
fn test_init_logging_writes_to_configured_file() {
    std::env::remove_var("RUST_LOG");
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = LoggingConfig {
        level: "info".to_string(),
        format: LogFormat::Compact,
        file_path: Some(file.path().display().to_string()),
        include_spans: false,
        include_targets: true,
    };

    init_logging(&config).unwrap();
    tracing::warn!("after init");

    let contents = std::fs::read_to_string(file.path()).unwrap();
    assert!(contents.contains("Logging initialised"));
    assert!(contents.contains("after init"));

    assert!(init_logging(&config).unwrap_err().is_config());
}
