//! Installs the global subscriber, so it lives in its own test binary.

use assistant_task::api::{init_tracing, LoggingConfig, TaskDefaultsConfig, TaskState};
use serde_json::json;
use tracing::level_filters::LevelFilter;
use tracing::Level;

#[test]
fn debug_mode_raises_default_despite_trace_target() {
    std::env::remove_var("RUST_LOG");
    let cfg = LoggingConfig {
        level: "info,some_dep=trace".into(),
        ..LoggingConfig::default()
    };
    let log = init_tracing(&cfg).unwrap();
    assert_eq!(log.level(), LevelFilter::INFO);
    assert!(!tracing::enabled!(target: "assistant_task", Level::DEBUG));
    assert!(tracing::enabled!(target: "some_dep", Level::TRACE));

    let task = TaskState::from_value(
        json!({"debug_mode": true}),
        &TaskDefaultsConfig::default(),
        &log,
    )
    .unwrap();
    assert!(task.debug_mode());
    assert!(log.is_debug_enabled());
    assert_eq!(log.directives(), "debug,some_dep=trace");
    assert!(tracing::enabled!(target: "assistant_task", Level::DEBUG));
    assert!(tracing::enabled!(target: "some_dep", Level::TRACE));
}
