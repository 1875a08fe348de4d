use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, time::Duration};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";
pub const BIND_ENV: &str = "WEATHER_BIND";

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
/// bind = "0.0.0.0:3000"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenWeather 2.5 API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a single upstream call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Address the web server listens on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = Self::load_file()?;
        cfg.apply_env(|name| env::var(name).ok());
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Override fields from the environment. `lookup` is `std::env::var` outside of tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let key = lookup(API_KEY_ENV).or_else(|| lookup(LEGACY_API_KEY_ENV));
        if let Some(key) = key.filter(|k| !k.is_empty()) {
            self.api_key = Some(key);
        }

        if let Some(bind) = lookup(BIND_ENV).filter(|b| !b.is_empty()) {
            self.bind = bind;
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-view", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the API key, failing with a hint if none is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().filter(|k| !k.is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: set {API_KEY_ENV} or run `weather configure`."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn defaults_point_at_openweather() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.bind, "127.0.0.1:3000");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn require_api_key_errors_when_missing() {
        let err = Config::default().require_api_key().unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg = Config::from_toml("api_key = \"KEY\"\ntimeout_secs = 3\n").unwrap();
        assert_eq!(cfg.require_api_key().unwrap(), "KEY");
        assert_eq!(cfg.timeout_secs, 3);
        assert_eq!(cfg.base_url, default_base_url());
    }

    #[test]
    fn env_overrides_file_key() {
        let mut cfg = Config::from_toml("api_key = \"FILE\"").unwrap();
        cfg.apply_env(env_of(&[(API_KEY_ENV, "ENV"), (BIND_ENV, "0.0.0.0:8080")]));
        assert_eq!(cfg.api_key.as_deref(), Some("ENV"));
        assert_eq!(cfg.bind, "0.0.0.0:8080");
    }

    #[test]
    fn legacy_env_name_is_a_fallback() {
        let mut cfg = Config::default();
        cfg.apply_env(env_of(&[(LEGACY_API_KEY_ENV, "OLD")]));
        assert_eq!(cfg.api_key.as_deref(), Some("OLD"));

        let mut cfg = Config::default();
        cfg.apply_env(env_of(&[(LEGACY_API_KEY_ENV, "OLD"), (API_KEY_ENV, "NEW")]));
        assert_eq!(cfg.api_key.as_deref(), Some("NEW"));
    }

    #[test]
    fn empty_env_value_is_ignored() {
        let mut cfg = Config::from_toml("api_key = \"FILE\"").unwrap();
        cfg.apply_env(env_of(&[(API_KEY_ENV, "")]));
        assert_eq!(cfg.api_key.as_deref(), Some("FILE"));
    }

    #[test]
    fn toml_roundtrip_keeps_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), cfg);
    }
}
