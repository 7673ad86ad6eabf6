//! TOML-based configuration for the monitor binary.
//!
//! Reads settings from the platform-appropriate config file — on the
//! appliance that is `~/.config/camgrid/config.toml` (or
//! `$XDG_CONFIG_HOME/camgrid/config.toml`).  A missing file means
//! defaults; a malformed file is an error surfaced at startup rather than
//! silently ignored.
//!
//! Example:
//!
//! ```toml
//! [monitor]
//! categories = ["release", "press", "hold"]
//! scan_interval_ms = 2500
//! log_level = "info"
//! ```
//!
//! Categories are parsed into the typed [`Category`] enum, so a typo like
//! `"pres"` fails at load time instead of quietly disabling passthrough.

use std::path::PathBuf;
use std::time::Duration;

use camgrid_core::{Category, CategoryMask};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::monitor::MonitorConfig;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub monitor: MonitorSection,
}

/// Settings for the input monitor worker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonitorSection {
    /// Which passthrough key transitions are forwarded to the host.
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
    /// Interval between input device rescans, in milliseconds.
    #[serde(default = "default_scan_interval_ms")]
    pub scan_interval_ms: u64,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`,
    /// `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl MonitorSection {
    /// Translates the on-disk settings into monitor construction
    /// parameters.
    pub fn to_monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            categories: CategoryMask::from_categories(&self.categories),
            scan_interval: Duration::from_millis(self.scan_interval_ms),
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_categories() -> Vec<Category> {
    vec![Category::Release, Category::Press, Category::Hold]
}
fn default_scan_interval_ms() -> u64 {
    2500
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            monitor: MonitorSection::default(),
        }
    }
}

impl Default for MonitorSection {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            scan_interval_ms: default_scan_interval_ms(),
            log_level: default_log_level(),
        }
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory
/// cannot be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`AppConfig`] from disk, returning `AppConfig::default()` if the
/// file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than
/// "not found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = config_file_path()?;

    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

/// Resolves the base config directory for this platform.
///
/// The monitor itself is Linux-only (evdev); other platforms get `None`
/// and fall back to defaults.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("camgrid"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_enables_all_categories() {
        // Arrange / Act
        let cfg = AppConfig::default();

        // Assert
        assert_eq!(
            cfg.monitor.categories,
            vec![Category::Release, Category::Press, Category::Hold]
        );
    }

    #[test]
    fn test_default_scan_interval_is_2500ms() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.monitor.scan_interval_ms, 2500);
    }

    #[test]
    fn test_default_log_level_is_info() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.monitor.log_level, "info");
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        // Arrange / Act
        let cfg: AppConfig = toml::from_str("").expect("empty config must parse");

        // Assert
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_monitor_section_keeps_other_defaults() {
        // Arrange
        let toml_str = r#"
[monitor]
scan_interval_ms = 1000
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("partial config must parse");

        // Assert
        assert_eq!(cfg.monitor.scan_interval_ms, 1000);
        assert_eq!(cfg.monitor.log_level, "info");
        assert_eq!(cfg.monitor.categories.len(), 3);
    }

    #[test]
    fn test_deserialize_category_subset() {
        // Arrange – passthrough limited to presses
        let toml_str = r#"
[monitor]
categories = ["press"]
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("category subset must parse");

        // Assert
        assert_eq!(cfg.monitor.categories, vec![Category::Press]);
        let mask = cfg.monitor.to_monitor_config().categories;
        assert!(mask.matches_value(1));
        assert!(!mask.matches_value(0));
    }

    #[test]
    fn test_deserialize_unknown_category_is_rejected() {
        // Arrange – a typo that the old string-list filter would have
        // silently ignored
        let toml_str = r#"
[monitor]
categories = ["pres"]
"#;

        // Act
        let result: Result<AppConfig, toml::de::Error> = toml::from_str(toml_str);

        // Assert
        assert!(result.is_err(), "unknown category names must fail to parse");
    }

    #[test]
    fn test_deserialize_invalid_toml_returns_parse_error() {
        let bad_toml = "[[[ not valid toml";
        let result: Result<AppConfig, toml::de::Error> = toml::from_str(bad_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.monitor.scan_interval_ms = 5000;
        cfg.monitor.categories = vec![Category::Press, Category::Hold];

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    // ── Monitor config translation ────────────────────────────────────────────

    #[test]
    fn test_to_monitor_config_converts_interval_to_duration() {
        let mut section = MonitorSection::default();
        section.scan_interval_ms = 750;

        let config = section.to_monitor_config();
        assert_eq!(config.scan_interval, Duration::from_millis(750));
    }

    // ── Path resolution ───────────────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. in a stripped CI env) is also acceptable.
    }
}
