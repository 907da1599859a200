use crate::languages::Language;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: String,
    pub health_endpoint: String,
    pub request_timeout_secs: u64,
    pub default_source: Language,
    pub default_target: Language,
    pub copy_confirm_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5000/api/translate".to_string(),
            health_endpoint: "http://localhost:5000/api/health".to_string(),
            request_timeout_secs: 30,
            default_source: Language::DEFAULT_SOURCE,
            default_target: Language::DEFAULT_TARGET,
            copy_confirm_ms: 2000,
        }
    }
}

impl Config {
    pub fn path() -> PathBuf {
        let exe = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
        let dir = exe.parent().unwrap_or(Path::new("."));
        dir.join("config.json")
    }

    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str::<Config>(&s).unwrap_or_else(|e| {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }

    /// Env vars win over config.json when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(v) = get("TRANSLINGUA_ENDPOINT") {
            self.endpoint = v;
        }
        if let Some(v) = get("TRANSLINGUA_HEALTH_ENDPOINT") {
            self.health_endpoint = v;
        }
        if let Some(v) = get("TRANSLINGUA_TIMEOUT_SECS") {
            match v.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => log::warn!("TRANSLINGUA_TIMEOUT_SECS is not a number: {}", v),
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn copy_confirm_window(&self) -> Duration {
        Duration::from_millis(self.copy_confirm_ms)
    }
}
