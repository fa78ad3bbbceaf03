//! Colour themes for the terminal window
//!
//! A theme maps colour tokens (`background`, `prompt`, `key`, ...) to hex
//! values. Themes are plain TOML so they can be swapped without touching the
//! scene config. Tokens a theme leaves out fall back to the built-in palette.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing themes
#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Failed to read theme file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse theme TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid colour '{value}' for token '{token}'")]
    InvalidColor { token: String, value: String },
}

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#rgb` or `#rrggbb`
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |h: &str| u8::from_str_radix(h, 16).ok();
        match hex.len() {
            3 => {
                let mut c = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Rgb(c.next()??, c.next()??, c.next()??))
            }
            6 => Some(Rgb(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.0, self.1, self.2, 255]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Colour tokens every theme resolves
pub const TOKENS: [&str; 9] = [
    "background",
    "header",
    "prompt",
    "text",
    "key",
    "value",
    "dot-red",
    "dot-yellow",
    "dot-green",
];

/// A theme mapping colour tokens to concrete values
#[derive(Debug, Clone)]
pub struct Theme {
    /// Optional name for the theme
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    /// Colour mappings: token name -> colour
    pub colors: HashMap<String, Rgb>,
}

/// TOML structure for deserializing themes
#[derive(Deserialize)]
struct TomlTheme {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: HashMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

/// Pink-on-charcoal palette used for the SVG
const DEFAULT_THEME: &str = r##"
[metadata]
name = "default"

[colors]
background = "#1E1E1E"
header = "#2D2D2D"
prompt = "#D9BED1"
text = "#E6E6E6"
key = "#D9BED1"
value = "#B8C5D6"
dot-red = "#FF5F57"
dot-yellow = "#FEBC2E"
dot-green = "#28C840"
"##;

/// Brighter variant that survives GIF quantization
const HIGH_CONTRAST_THEME: &str = r##"
[metadata]
name = "high-contrast"

[colors]
background = "#191919"
header = "#2D2D2D"
prompt = "#E6C8DC"
text = "#F0F0F0"
key = "#E6C8DC"
value = "#C8D2E6"
dot-red = "#FF5F57"
dot-yellow = "#FEBC2E"
dot-green = "#28C840"
"##;

impl Theme {
    /// Load theme from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ThemeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load theme from TOML string
    pub fn from_str(content: &str) -> Result<Self, ThemeError> {
        let parsed: TomlTheme = toml::from_str(content)?;

        let mut colors = HashMap::with_capacity(parsed.colors.len());
        for (token, value) in parsed.colors {
            let rgb = Rgb::parse(&value).ok_or_else(|| ThemeError::InvalidColor {
                token: token.clone(),
                value: value.clone(),
            })?;
            colors.insert(token, rgb);
        }

        Ok(Theme {
            name: parsed.metadata.as_ref().and_then(|m| m.name.clone()),
            description: parsed.metadata.as_ref().and_then(|m| m.description.clone()),
            colors,
        })
    }

    /// The palette tuned for rasterized output
    pub fn high_contrast() -> Self {
        Self::from_str(HIGH_CONTRAST_THEME).expect("High-contrast theme should be valid TOML")
    }

    /// Resolve a colour token
    ///
    /// Returns None if the token is not defined in this theme.
    pub fn resolve(&self, token: &str) -> Option<Rgb> {
        self.colors.get(token).copied()
    }

    /// Fill tokens this theme leaves out from `base`
    pub fn with_fallback(mut self, base: &Theme) -> Self {
        for (token, color) in &base.colors {
            self.colors.entry(token.clone()).or_insert(*color);
        }
        self
    }

    /// Resolve a colour token with fallback to the default palette
    pub fn color(&self, token: &str) -> Rgb {
        self.resolve(token)
            .or_else(|| default_palette().resolve(token))
            .unwrap_or(Rgb(0xE6, 0xE6, 0xE6))
    }
}

/// The default palette, parsed once
fn default_palette() -> &'static Theme {
    static PALETTE: OnceLock<Theme> = OnceLock::new();
    PALETTE.get_or_init(Theme::default)
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_str(DEFAULT_THEME).expect("Default theme should be valid TOML")
    }
}
