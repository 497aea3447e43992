pub mod types;

use std::path::{Path, PathBuf};

use crate::error::{AuthdevError, Result};
use types::AuthdevConfig;

pub const ENV_URL: &str = "AUTHDEV_URL";
pub const ENV_SESSION: &str = "AUTHDEV_SESSION";

/// Load config from the XDG path, then apply env overrides.
pub fn load_config() -> Result<AuthdevConfig> {
    load_config_from(&config_path())
}

/// Load config from `path`. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AuthdevConfig> {
    let mut cfg = read_file(path)?;
    apply_env(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<AuthdevConfig> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AuthdevConfig::default());
        }
        Err(e) => {
            return Err(AuthdevError::Config(format!(
                "failed to read {}: {}",
                path.display(),
                e
            )));
        }
    };
    toml::from_str(&text)
        .map_err(|e| AuthdevError::Config(format!("invalid {}: {}", path.display(), e)))
}

/// Overlay `AUTHDEV_URL` / `AUTHDEV_SESSION`. Empty values are ignored.
pub fn apply_env(cfg: &mut AuthdevConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_URL).filter(|v| !v.is_empty()) {
        cfg.server.url = Some(url);
    }
    if let Some(cookie) = lookup(ENV_SESSION).filter(|v| !v.is_empty()) {
        cfg.session.cookie = Some(cookie);
    }
}

/// Return XDG config dir (~/.config/authdev/)
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("authdev")
}

/// Return the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
