use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{cli::Cli, data::client::IPMA_API_URL};

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_ICONS_URL: &str = "/static/icons";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub listen: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub icons_url: String,
    pub static_dir: PathBuf,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            api_url: IPMA_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            icons_url: DEFAULT_ICONS_URL.to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl RuntimeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Flags given on the command line win over whatever was loaded.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(listen) = &cli.listen {
            self.listen.clone_from(listen);
        }
        if let Some(api_url) = &cli.api_url {
            self.api_url.clone_from(api_url);
        }
        if let Some(timeout) = cli.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(icons_url) = &cli.icons_url {
            self.icons_url.clone_from(icons_url);
        }
        if let Some(static_dir) = &cli.static_dir {
            self.static_dir.clone_from(static_dir);
        }
    }
}

pub fn load_runtime_settings(cli: &Cli) -> (RuntimeSettings, Option<PathBuf>) {
    let path = settings_path();
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let mut settings = path.and_then(read_settings_file).unwrap_or_default();
    settings.apply_cli(cli);
    settings
}

fn read_settings_file(path: &Path) -> Option<RuntimeSettings> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str::<RuntimeSettings>(&content) {
        Ok(saved) => Some(saved),
        Err(err) => {
            warn!("ignoring unreadable settings file {}: {err}", path.display());
            None
        }
    }
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

fn settings_path() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("IPMA_FORECAST_CONFIG_DIR") {
        return Some(PathBuf::from(base).join("settings.json"));
    }

    let home = std::env::var_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("ipma-forecast")
            .join("settings.json"),
    )
}

#[cfg(test)]
mod tests;
