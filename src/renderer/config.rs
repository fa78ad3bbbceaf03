//! Configuration for SVG rendering

use std::path::Path;

use base64::Engine;

use super::font::FontError;

/// A font file inlined into the SVG as a data URL
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedFont {
    pub data: Vec<u8>,
    /// MIME type for the data URL
    pub mime: &'static str,
    /// CSS `format()` hint
    pub format: &'static str,
}

impl EmbeddedFont {
    /// Read a font file, inferring its format from the extension
    pub fn from_file(path: &Path) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        let (mime, format) = match ext.as_deref() {
            Some("ttf") => ("font/ttf", "truetype"),
            Some("otf") => ("font/otf", "opentype"),
            Some("woff") => ("font/woff", "woff"),
            Some("woff2") => ("font/woff2", "woff2"),
            _ => {
                return Err(FontError::Invalid {
                    path: path.to_path_buf(),
                })
            }
        };
        Ok(Self { data, mime, format })
    }

    /// `url(data:...)` source for an `@font-face` rule
    pub fn data_url(&self) -> String {
        format!(
            "url(data:{};base64,{}) format('{}')",
            self.mime,
            base64::engine::general_purpose::STANDARD.encode(&self.data),
            self.format
        )
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include the XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Whether to append the script that restarts the animation
    pub loop_script: bool,

    /// Inline font; otherwise the family is imported from Google Fonts
    pub embedded_font: Option<EmbeddedFont>,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            loop_script: true,
            embedded_font: None,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set whether to emit the loop script
    pub fn with_loop_script(mut self, enabled: bool) -> Self {
        self.loop_script = enabled;
        self
    }

    /// Inline a font instead of importing it
    pub fn with_embedded_font(mut self, font: EmbeddedFont) -> Self {
        self.embedded_font = Some(font);
        self
    }
}
