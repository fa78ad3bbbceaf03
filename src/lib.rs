//! Terminal Animator - render a profile file as an animated terminal session
//!
//! The animation types a command, reveals the profile line by line and ends
//! on a blinking cursor. It is emitted as a declarative SVG or as a
//! rasterized GIF.
//!
//! # Example
//!
//! ```rust
//! use terminal_animator::{render_svg, Profile, RenderConfig};
//!
//! let profile = Profile::from_str("name: Vishal\nrole: DevOps");
//! let svg = render_svg(&profile, &RenderConfig::default());
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("Vishal"));
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod lint;
pub mod profile;
pub mod renderer;
pub mod theme;
pub mod timeline;

use std::io::Write;

use tracing::info;

pub use config::{ConfigError, SceneConfig};
pub use error::RenderError;
pub use layout::LayoutConfig;
pub use lint::{LintCategory, LintWarning};
pub use profile::{Profile, ProfileError};
pub use renderer::{GifSummary, SvgConfig, TerminalFont};
pub use theme::{Rgb, Theme};
pub use timeline::Timeline;

use lint::LintTarget;
use renderer::{RasterScene, SvgScene};

/// Typical monospace advance as a fraction of the font size
const MONOSPACE_ADVANCE: f64 = 0.6;

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Script, timing and font settings
    pub scene: SceneConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    pub svg_layout: LayoutConfig,
    pub gif_layout: LayoutConfig,
    pub svg_theme: Theme,
    pub gif_theme: Theme,
    /// Raster font; discovered from the system when unset
    pub font: Option<TerminalFont>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            svg: SvgConfig::default(),
            svg_layout: LayoutConfig::svg(),
            gif_layout: LayoutConfig::gif(),
            svg_theme: Theme::default(),
            gif_theme: Theme::high_contrast(),
            font: None,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scene settings
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Use one theme for both outputs
    ///
    /// Tokens the theme leaves out keep each output's built-in palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.gif_theme = theme.clone().with_fallback(&Theme::high_contrast());
        self.svg_theme = theme.with_fallback(&Theme::default());
        self
    }

    /// Set the SVG layout preset
    pub fn with_svg_layout(mut self, layout: LayoutConfig) -> Self {
        self.svg_layout = layout;
        self
    }

    /// Set the GIF layout preset
    pub fn with_gif_layout(mut self, layout: LayoutConfig) -> Self {
        self.gif_layout = layout;
        self
    }

    /// Set the raster font
    pub fn with_font(mut self, font: TerminalFont) -> Self {
        self.font = Some(font);
        self
    }

    /// SVG layout with the scene's width override applied
    pub fn resolved_svg_layout(&self) -> LayoutConfig {
        match self.scene.svg.width {
            Some(width) => self.svg_layout.clone().with_width(width),
            None => self.svg_layout.clone(),
        }
    }

    /// GIF layout with the scene's width override applied
    pub fn resolved_gif_layout(&self) -> LayoutConfig {
        match self.scene.gif.width {
            Some(width) => self.gif_layout.clone().with_width(width),
            None => self.gif_layout.clone(),
        }
    }

    fn resolved_font(&self) -> TerminalFont {
        match &self.font {
            Some(font) => font.clone(),
            None => TerminalFont::discover(&self.scene.font.paths, self.scene.font.gif_size),
        }
    }
}

/// Render the profile as an animated SVG document
///
/// # Example
///
/// ```rust
/// use terminal_animator::{render_svg, Profile, RenderConfig, SceneConfig};
///
/// let scene = SceneConfig::from_str("[script]\ncommand = \"kubectl get me -o yaml\"").unwrap();
/// let config = RenderConfig::new().with_scene(scene);
///
/// let svg = render_svg(&Profile::from_str("kind: Engineer"), &config);
/// assert!(svg.contains("kubectl get me -o yaml"));
/// ```
pub fn render_svg(profile: &Profile, config: &RenderConfig) -> String {
    let timeline = Timeline::for_scene(profile, &config.scene);
    info!("Timeline: {}", timeline);

    let scene = SvgScene {
        profile,
        layout: config.resolved_svg_layout(),
        theme: config.svg_theme.clone(),
        timeline,
        script: config.scene.script.clone(),
        font: config.scene.font.clone(),
        command: config.scene.script.command_for(&profile.name),
    };
    renderer::svg::render_svg(&scene, &config.svg)
}

/// Render the profile as an animated GIF into `writer`
pub fn render_gif<W: Write>(
    profile: &Profile,
    config: &RenderConfig,
    writer: W,
) -> Result<GifSummary, RenderError> {
    let timeline = Timeline::for_scene(profile, &config.scene);
    info!("Timeline: {}", timeline);

    let font = config.resolved_font();
    let title_size = font.size() * (config.scene.font.title_size / config.scene.font.size) as f32;
    let scene = RasterScene {
        profile,
        layout: config.resolved_gif_layout(),
        theme: config.gif_theme.clone(),
        title_font: font.at_size(title_size),
        font,
        prompt: config.scene.script.prompt.clone(),
        command: config.scene.script.command_for(&profile.name),
        title: config.scene.script.title.clone(),
    };

    let gif = &config.scene.gif;
    let summary = renderer::gif::render_gif(&scene, &timeline, gif.fps, gif.speed, writer)?;
    Ok(summary)
}

/// Run every lint check against both output canvases
pub fn lint(profile: &Profile, config: &RenderConfig) -> Vec<LintWarning> {
    let command = config.scene.script.command_for(&profile.name);
    let svg_layout = config.resolved_svg_layout();
    let gif_layout = config.resolved_gif_layout();

    let mut warnings = lint::check_profile(profile);
    for target in [
        LintTarget {
            name: "SVG",
            layout: &svg_layout,
            char_width: config.scene.font.size * MONOSPACE_ADVANCE,
        },
        LintTarget {
            name: "GIF",
            layout: &gif_layout,
            char_width: config.scene.font.gif_size as f64 * MONOSPACE_ADVANCE,
        },
    ] {
        warnings.extend(lint::check_overflow(profile, &command, &target));
    }
    warnings
}
