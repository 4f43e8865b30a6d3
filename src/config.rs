//! Configuration file (`~/.userdesk/config.toml`) and its defaults.

use crate::service::DEFAULT_BASE_URL;
use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Remote user service root (or env var reference like ${USERS_API})
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Answer delete confirmations with yes
    #[serde(default)]
    pub auto_confirm: bool,

    /// Clear the busy indicator when a delete confirmation is declined
    #[serde(default)]
    pub release_busy_on_cancel: bool,

    /// Session transcripts directory (supports ~ expansion)
    #[serde(default = "default_transcripts_dir")]
    pub transcripts_dir: String,

    /// REPL history file (supports ~ expansion)
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_transcripts_dir() -> String {
    "~/.userdesk/sessions".to_string()
}

fn default_history_file() -> String {
    "~/.userdesk/history".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auto_confirm: false,
            release_busy_on_cancel: false,
            transcripts_dir: default_transcripts_dir(),
            history_file: default_history_file(),
        }
    }
}

/// Default config location
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".userdesk")
        .join("config.toml")
}

impl Config {
    /// Load from the default location; a missing file means defaults.
    pub fn load() -> Result<Self> {
        let path = default_config_path();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let cfg: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Resolve base_url from environment if needed
    pub fn resolve_base_url(&self) -> Option<String> {
        let url = self.base_url.trim();
        if url.starts_with("${") && url.ends_with('}') {
            let env_var = &url[2..url.len() - 1];
            std::env::var(env_var).ok()
        } else {
            Some(url.to_string())
        }
    }

    pub fn transcripts_path(&self) -> PathBuf {
        expand_home(&self.transcripts_dir)
    }

    pub fn history_path(&self) -> PathBuf {
        expand_home(&self.history_file)
    }

    /// Collect every problem instead of stopping at the first.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match self.resolve_base_url() {
            None => errors.push(format!(
                "base_url: environment variable in {} is not set",
                self.base_url
            )),
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                errors.push(format!("base_url: expected http(s) URL, got {:?}", url))
            }
            Some(_) => {}
        }

        if self.transcripts_dir.trim().is_empty() {
            errors.push("transcripts_dir: must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Expand a leading ~ to the home directory
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(!cfg.auto_confirm);
        assert!(!cfg.release_busy_on_cancel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:3000\"\nrelease_busy_on_cancel = true\n",
        )
        .unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:3000");
        assert!(cfg.release_busy_on_cancel);
        assert!(!cfg.auto_confirm);
        assert_eq!(cfg.history_file, default_history_file());
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    #[serial]
    fn test_env_reference_resolution() {
        let original = env::var("USERDESK_TEST_API").ok();
        env::set_var("USERDESK_TEST_API", "http://api.internal");

        let cfg = Config {
            base_url: "${USERDESK_TEST_API}".to_string(),
            ..Config::default()
        };
        let resolved = cfg.resolve_base_url();

        if let Some(v) = original {
            env::set_var("USERDESK_TEST_API", v);
        } else {
            env::remove_var("USERDESK_TEST_API");
        }

        assert_eq!(resolved, Some("http://api.internal".to_string()));
    }

    #[test]
    #[serial]
    fn test_unset_env_reference_fails_validation() {
        env::remove_var("USERDESK_TEST_MISSING");
        let cfg = Config {
            base_url: "${USERDESK_TEST_MISSING}".to_string(),
            ..Config::default()
        };
        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("base_url"));
    }

    #[test]
    fn test_validate_rejects_non_http() {
        let cfg = Config {
            base_url: "ftp://example.test".to_string(),
            transcripts_dir: String::new(),
            ..Config::default()
        };
        let errors = cfg.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_home_expansion() {
        let cfg = Config::default();
        assert!(cfg.history_path().ends_with(".userdesk/history"));
        assert_eq!(expand_home("/tmp/x"), PathBuf::from("/tmp/x"));
    }
}
