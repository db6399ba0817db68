//! Installs the global subscriber, so it lives in its own test binary.

use assistant_task::api::{init_tracing, LoggingConfig, TaskDefaultsConfig, TaskState};
use serde_json::json;
use tracing::level_filters::LevelFilter;

#[test]
fn debug_mode_raises_installed_subscriber_level() {
    std::env::remove_var("RUST_LOG");
    let cfg = LoggingConfig {
        level: "info".into(),
        ..LoggingConfig::default()
    };
    let log = init_tracing(&cfg).unwrap();
    assert_eq!(log.level(), LevelFilter::INFO);
    assert!(!tracing::enabled!(tracing::Level::DEBUG));

    let quiet =
        TaskState::from_value(json!({}), &TaskDefaultsConfig::default(), &log).unwrap();
    assert!(!quiet.debug_mode());
    assert_eq!(log.level(), LevelFilter::INFO);

    let loud = TaskState::from_value(
        json!({"debug_mode": true}),
        &TaskDefaultsConfig::default(),
        &log,
    )
    .unwrap();
    assert!(loud.debug_mode());
    assert_eq!(log.level(), LevelFilter::DEBUG);
    assert!(tracing::enabled!(tracing::Level::DEBUG));
}
