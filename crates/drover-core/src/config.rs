//! Configuration types for drover.
//!
//! [`Config::load`] reads `~/.drover/config.toml`, creating it with hardcoded
//! defaults if it does not yet exist. [`Config::defaults`] returns the same
//! defaults without touching the filesystem (useful in tests).

use serde::Deserialize;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[run]
# soft_deadline_secs =
retries = 2

[env]
name = "local"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.drover/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub env: EnvConfig,
}

/// `[run]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Seconds a client may keep issuing commands before the backend starts
    /// refusing them. Unset means no deadline.
    #[serde(default)]
    pub soft_deadline_secs: Option<u64>,
    #[serde(default = "default_retries")]
    pub retries: u32,
}

fn default_retries() -> u32 { 2 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            soft_deadline_secs: None,
            retries: default_retries(),
        }
    }
}

/// `[env]` section of `config.toml`: the target environment description.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvConfig {
    #[serde(default = "default_env_name")]
    pub name: String,
}

fn default_env_name() -> String { "local".to_string() }

impl Default for EnvConfig {
    fn default() -> Self {
        Self { name: default_env_name() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.drover/config.toml`, layered on top of the built-in
    /// defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self, crate::error::Error> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        let cfg = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(false))
            .build()?
            .try_deserialize()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// `$HOME/.drover/config.toml`. Resolved at call time so tests that repoint
/// `HOME` at a fake home dir are honoured.
pub fn config_dir() -> PathBuf {
    PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string())).join(".drover")
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
