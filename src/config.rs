//! Scene settings loaded from TOML
//!
//! Every field has a default, so an empty file (or no file at all) yields
//! the stock animation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading a scene config
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// GIF stores canvas dimensions as 16-bit values
const MAX_WIDTH: u32 = u16::MAX as u32;

/// Complete scene configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub script: ScriptConfig,
    pub timing: TimingConfig,
    pub font: FontConfig,
    pub svg: SvgTarget,
    pub gif: GifTarget,
}

/// What gets typed and shown
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptConfig {
    /// Command typed at the first prompt; `cat <profile>` when unset
    pub command: Option<String>,
    pub clear_command: String,
    pub title: String,
    pub prompt: String,
    /// Type the clear command and wipe the terminal before looping (SVG)
    pub clear_on_loop: bool,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            command: None,
            clear_command: "clear".to_string(),
            title: "~ % bash".to_string(),
            prompt: "➜ ".to_string(),
            clear_on_loop: false,
        }
    }
}

impl ScriptConfig {
    /// The command to type for a given profile file name
    pub fn command_for(&self, profile_name: &str) -> String {
        self.command
            .clone()
            .unwrap_or_else(|| format!("cat {}", profile_name))
    }
}

/// Animation timing, all values in seconds
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Per character while typing the command
    pub char_speed: f64,
    /// Per profile line while revealing
    pub line_speed: f64,
    /// How long the final cursor blinks before the loop restarts
    pub blink_time: f64,
    /// Per character while typing the clear command
    pub clear_speed: f64,
    pub command_pause: f64,
    pub clear_pause: f64,
    pub clear_execute_delay: f64,
    pub loop_pause: f64,
    /// Extra still time at the end of the GIF
    pub gif_tail: f64,
    pub cursor_period: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            char_speed: 0.1,
            line_speed: 0.3,
            blink_time: 20.0,
            clear_speed: 0.1,
            command_pause: 0.5,
            clear_pause: 0.5,
            clear_execute_delay: 0.3,
            loop_pause: 0.5,
            gif_tail: 3.0,
            cursor_period: 0.8,
        }
    }
}

/// Font settings shared by both outputs
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// CSS family used by the SVG
    pub family: String,
    /// SVG font size in pixels
    pub size: f64,
    pub title_size: f64,
    /// Rasterized font size for the GIF
    pub gif_size: f32,
    /// Extra font files tried before the platform defaults
    pub paths: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "JetBrains Mono".to_string(),
            size: 14.0,
            title_size: 13.0,
            gif_size: 18.0,
            paths: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SvgTarget {
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GifTarget {
    pub width: Option<u32>,
    pub fps: u32,
    /// NeuQuant speed, 1 (best) to 30 (fastest)
    pub speed: i32,
}

impl Default for GifTarget {
    fn default() -> Self {
        Self {
            width: None,
            fps: 60,
            speed: 10,
        }
    }
}

impl SceneConfig {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load config from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would produce a degenerate timeline
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.timing;
        let speeds = [
            ("char_speed", t.char_speed),
            ("line_speed", t.line_speed),
            ("clear_speed", t.clear_speed),
            ("cursor_period", t.cursor_period),
        ];
        for (name, value) in speeds {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "timing.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let pauses = [
            ("blink_time", t.blink_time),
            ("command_pause", t.command_pause),
            ("clear_pause", t.clear_pause),
            ("clear_execute_delay", t.clear_execute_delay),
            ("loop_pause", t.loop_pause),
            ("gif_tail", t.gif_tail),
        ];
        for (name, value) in pauses {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "timing.{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if self.gif.fps == 0 {
            return Err(ConfigError::Invalid("gif.fps must be positive".to_string()));
        }
        if !(1..=30).contains(&self.gif.speed) {
            return Err(ConfigError::Invalid(format!(
                "gif.speed must be between 1 and 30, got {}",
                self.gif.speed
            )));
        }
        let sizes = [
            ("size", self.font.size),
            ("title_size", self.font.title_size),
            ("gif_size", self.font.gif_size as f64),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "font.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let widths = [("svg.width", self.svg.width), ("gif.width", self.gif.width)];
        for (name, width) in widths {
            if let Some(width) = width {
                if width == 0 || width > MAX_WIDTH {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be between 1 and {}, got {}",
                        name, MAX_WIDTH, width
                    )));
                }
            }
        }
        Ok(())
    }
}
