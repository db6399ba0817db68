//! Subscriber installation and the runtime verbosity handle.
//!
//! Tasks never touch the global subscriber directly. They receive a
//! [`LogControl`] at construction and call [`LogControl::enable_debug`] when
//! `debug_mode` is set.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

use crate::config::LoggingConfig;

/// Shared handle over the process log filter.
///
/// Clones share the same state. When built by [`init_tracing`] the handle also
/// drives the installed subscriber's filter; a detached handle only tracks the
/// level.
#[derive(Clone)]
pub struct LogControl {
    filter: Arc<Mutex<FilterState>>,
    reload: Option<reload::Handle<EnvFilter, Registry>>,
}

#[derive(Debug)]
struct FilterState {
    /// Directive string the active filter was built from.
    directives: String,
    /// Level applied to targets without their own directive.
    level: LevelFilter,
}

impl LogControl {
    pub fn detached(level: LevelFilter) -> Self {
        Self {
            filter: Arc::new(Mutex::new(FilterState {
                directives: level.to_string(),
                level,
            })),
            reload: None,
        }
    }

    fn attached(directives: String, handle: reload::Handle<EnvFilter, Registry>) -> Self {
        let level = default_level(&directives);
        Self {
            filter: Arc::new(Mutex::new(FilterState { directives, level })),
            reload: Some(handle),
        }
    }

    /// Level for targets without their own directive.
    pub fn level(&self) -> LevelFilter {
        self.lock().level
    }

    pub fn directives(&self) -> String {
        self.lock().directives.clone()
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.level() >= LevelFilter::DEBUG
    }

    /// Raise verbosity to DEBUG. Directives that are already DEBUG or TRACE
    /// are kept. State only changes once the installed filter has been
    /// replaced.
    pub fn enable_debug(&self) {
        let mut state = self.lock();
        let directives = raise_to_debug(&state.directives);
        if directives == state.directives && state.level >= LevelFilter::DEBUG {
            return;
        }

        if let Some(handle) = self.reload.as_ref() {
            let filter = match EnvFilter::try_new(&directives) {
                Ok(f) => f,
                Err(e) => {
                    tracing::warn!("invalid debug filter {:?}: {}", directives, e);
                    return;
                }
            };
            if let Err(e) = handle.modify(|current| *current = filter) {
                tracing::warn!("failed to raise log level: {}", e);
                return;
            }
        }

        state.level = state.level.max(LevelFilter::DEBUG);
        state.directives = directives;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FilterState> {
        self.filter.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl Default for LogControl {
    fn default() -> Self {
        Self::detached(LevelFilter::INFO)
    }
}

impl fmt::Debug for LogControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogControl")
            .field("filter", &*self.lock())
            .field("attached", &self.reload.is_some())
            .finish()
    }
}

/// Default level of an EnvFilter directive string. EnvFilter falls back to
/// ERROR when no bare level is given.
fn default_level(directives: &str) -> LevelFilter {
    directives
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .rev()
        .find_map(|d| d.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::ERROR)
}

/// Rewrite directives so nothing is quieter than DEBUG.
fn raise_to_debug(directives: &str) -> String {
    let mut has_default = false;
    let mut out: Vec<String> = Vec::new();

    for d in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        if let Ok(level) = d.parse::<LevelFilter>() {
            has_default = true;
            out.push(level.max(LevelFilter::DEBUG).to_string());
            continue;
        }
        match d.rsplit_once('=') {
            Some((target, level)) => match level.trim().parse::<LevelFilter>() {
                Ok(l) if l < LevelFilter::DEBUG => out.push(format!("{target}=debug")),
                _ => out.push(d.to_string()),
            },
            None => out.push(d.to_string()),
        }
    }

    if !has_default {
        out.insert(0, LevelFilter::DEBUG.to_string());
    }
    out.join(",")
}

/// Install the global stderr subscriber described by `logging`.
///
/// `RUST_LOG` takes precedence over `logging.level`. The returned handle is
/// the one tasks should be constructed with.
pub fn init_tracing(logging: &LoggingConfig) -> Result<LogControl, String> {
    if !logging.enabled {
        return Ok(LogControl::detached(LevelFilter::OFF));
    }

    let directives = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => v,
        _ => logging.level.clone(),
    };
    let filter = EnvFilter::try_new(&directives).map_err(|e| e.to_string())?;
    let (filter_layer, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(atty::is(atty::Stream::Stderr)),
        )
        .try_init()
        .map_err(|e| format!("install subscriber failed: {e}"))?;

    Ok(LogControl::attached(directives, handle))
}
