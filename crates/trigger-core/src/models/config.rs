//! Application configuration

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub command_mode: CommandMode,
    pub tick_interval_ms: u64,
    pub prompt_width: usize,
    pub log_level: String,
    pub layout: LayoutConfig,
    pub colors: ColorConfig,
}

/// How commands pick the timer they act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandMode {
    /// `:` opens a command line such as `e2Lunch break`.
    #[default]
    Explicit,
    /// Single keys act on the highlighted timer.
    Implicit,
}

/// Geometry of one timer box, in terminal cells.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    pub height: u16,
    pub width: u16,
    pub x: u16,
    pub y: u16,
}

/// Color names understood by the terminal renderer (`green`, `lightblue`, `#ff8800`...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorConfig {
    pub running: String,
    pub paused: String,
    pub highlight: String,
    pub border: String,
}

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Validation(
                "Tick interval must be greater than 0".to_string(),
            ));
        }

        if self.prompt_width == 0 {
            return Err(Error::Validation(
                "Prompt width must be greater than 0".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::Validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        self.layout.validate()?;
        self.colors.validate()?;
        Ok(())
    }

    pub fn tick_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_mode: CommandMode::default(),
            tick_interval_ms: 1000,
            prompt_width: 28,
            log_level: "info".to_string(),
            layout: LayoutConfig::default(),
            colors: ColorConfig::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        // border, heading, underline and the time line need room
        if self.height < 3 {
            return Err(Error::Validation(format!(
                "Timer height must be at least 3 (got {})",
                self.height
            )));
        }

        if self.width < 12 {
            return Err(Error::Validation(format!(
                "Timer width must be at least 12 (got {})",
                self.width
            )));
        }

        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            height: 6,
            width: 35,
            x: 1,
            y: 1,
        }
    }
}

impl ColorConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("running", &self.running),
            ("paused", &self.paused),
            ("highlight", &self.highlight),
            ("border", &self.border),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("Color '{}' cannot be empty", name)));
            }
        }
        Ok(())
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            running: "green".to_string(),
            paused: "yellow".to_string(),
            highlight: "cyan".to_string(),
            border: "gray".to_string(),
        }
    }
}

impl CommandMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandMode::Explicit => "explicit",
            CommandMode::Implicit => "implicit",
        }
    }
}

impl fmt::Display for CommandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "explicit" => Ok(CommandMode::Explicit),
            "implicit" => Ok(CommandMode::Implicit),
            other => Err(Error::Validation(format!(
                "Unknown command mode '{}'. Must be 'explicit' or 'implicit'",
                other
            ))),
        }
    }
}
