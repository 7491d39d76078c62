//! Configuration management for the XWayland bridge
//!
//! This module handles loading, parsing, and validating configuration
//! from TOML files. Every section is optional and falls back to defaults.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Main configuration struct containing all bridge settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BridgeConfig {
    /// XWayland window management
    #[serde(default)]
    pub xwayland: XWaylandConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,

    /// In-memory scene graph used by the standalone binary
    #[serde(default)]
    pub headless: HeadlessConfig,
}

/// XWayland configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct XWaylandConfig {
    /// Enable XWayland window management
    pub enabled: bool,

    /// X11 display number to connect to (defaults to $DISPLAY)
    pub display: Option<u32>,

    /// _NET_WM_DESKTOP value written when a window is mapped
    #[serde(default = "XWaylandConfig::default_desktop")]
    pub desktop: u32,

    /// Per-window diagnostics (state pushes, transient resolution, pairing)
    #[serde(default)]
    pub verbose_logging: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set ("error" .. "trace", or "off")
    pub level: String,
}

/// Headless scene graph configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeadlessConfig {
    /// Height of server-side decorations (pixels)
    pub titlebar_height: i32,

    /// Attach a buffer surface to every window as soon as it is mapped
    pub auto_attach: bool,
}

impl Default for XWaylandConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            display: None,
            desktop: Self::default_desktop(),
            verbose_logging: false,
        }
    }
}

impl XWaylandConfig {
    fn default_desktop() -> u32 {
        1
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            titlebar_height: 0,
            auto_attach: true,
        }
    }
}

impl LoggingConfig {
    /// The configured level as a filter
    pub fn level_filter(&self) -> Result<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .with_context(|| format!("Invalid log level: {}", self.level))
    }
}

impl BridgeConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Expand ~ to home directory
        let expanded_path = if path.to_string_lossy().starts_with('~') {
            let home = std::env::var("HOME").context("Failed to get HOME environment variable")?;
            let relative = path.strip_prefix("~").unwrap_or(path);
            Path::new(&home).join(relative)
        } else {
            path.to_path_buf()
        };

        let contents = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read config file: {}", expanded_path.display()))?;

        let config: BridgeConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", expanded_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.logging.level_filter()?;

        if self.headless.titlebar_height < 0 {
            anyhow::bail!(
                "Invalid titlebar_height {}: must not be negative",
                self.headless.titlebar_height
            );
        }

        Ok(())
    }

    /// Save configuration to a TOML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, contents).context("Failed to write configuration file")?;

        Ok(())
    }
}
