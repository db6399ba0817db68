use std::path::{Path, PathBuf};

use super::types::AppConfig;

const LOCAL_CONFIG_FILE: &str = "assistant-task.toml";

/// Get the default data directory: ~/.assistant-task
pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".assistant-task"))
}

/// `~/.assistant-task/config.toml`, else `./assistant-task.toml`, else
/// defaults; then `ASSISTANT_TASK_*` environment overrides.
pub fn load_default() -> anyhow::Result<AppConfig> {
    let user_config = get_data_dir()?.join("config.toml");
    let local_config = Path::new(LOCAL_CONFIG_FILE);
    let mut cfg = load_first_existing(&[user_config.as_path(), local_config])?;
    apply_env_overrides_from(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("read {} failed: {e}", path.display()))?;
    let cfg = toml::from_str::<AppConfig>(&s)?;
    Ok(cfg)
}

/// Load the first candidate that exists, in priority order.
fn load_first_existing<P: AsRef<Path>>(candidates: &[P]) -> anyhow::Result<AppConfig> {
    match candidates.iter().find(|p| p.as_ref().exists()) {
        Some(path) => load_from_path(path.as_ref()),
        None => Ok(AppConfig::default()),
    }
}

fn apply_env_overrides_from(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("ASSISTANT_TASK_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.logging.level = v.trim().to_string();
        }
    }
    if let Some(on) = lookup("ASSISTANT_TASK_DEBUG").as_deref().and_then(parse_bool_flag) {
        cfg.task.debug_mode = on;
    }
}

fn parse_bool_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
