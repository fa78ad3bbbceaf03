//! Error types for the render pipeline

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::profile::ProfileError;
use crate::renderer::FontError;
use crate::theme::ThemeError;

/// Errors that can occur anywhere between reading inputs and writing output
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("theme error: {0}")]
    Theme(#[from] ThemeError),

    #[error("font error: {0}")]
    Font(#[from] FontError),

    #[error("GIF encoding failed: {0}")]
    Gif(#[from] image::ImageError),

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Wrap an I/O error raised while writing `path`
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
