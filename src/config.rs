use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// App configuration, usually from `gh-market.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Pointer file url; its text body names the payload url.
    pub pointer_url: Option<String>,
    /// Local JSON payload path. Takes precedence over `pointer_url`.
    pub data_file: Option<PathBuf>,
    /// Site title shown in the listing header.
    pub title: String,
    /// Output directory for `build`.
    pub out_dir: PathBuf,
    /// Bind address for `serve`.
    pub bind: SocketAddr,
    /// Feed fetch timeout, in seconds.
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pointer_url: None,
            data_file: None,
            title: "Actions catalog".to_owned(),
            out_dir: PathBuf::from("site"),
            bind: SocketAddr::from(([127, 0, 0, 1], 8321)),
            timeout_secs: 30,
        }
    }
}

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `gh-market.toml` in the current directory
/// 3. `$GH_MARKET_CONFIG` environment variable
/// 4. `$XDG_CONFIG_HOME/gh-market/config.toml`
/// 5. `~/.config/gh-market/config.toml`
///
/// With no config anywhere, defaults apply (and a data source must then come
/// from the command line).
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    if let Some(path) = explicit_path {
        return read_config(path);
    }

    let local = PathBuf::from("gh-market.toml");
    if local.is_file() {
        return read_config(&local);
    }

    if let Some(path) = find_global_config() {
        return read_config(&path);
    }

    Ok(AppConfig::default())
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

fn find_global_config() -> Option<PathBuf> {
    // $GH_MARKET_CONFIG
    if let Ok(path) = std::env::var("GH_MARKET_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    // $XDG_CONFIG_HOME/gh-market/config.toml
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("gh-market/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    // ~/.config/gh-market/config.toml
    if let Ok(home) = std::env::var("HOME") {
        let p = PathBuf::from(home).join(".config/gh-market/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}
