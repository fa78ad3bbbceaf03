//! Glyph sources for the raster renderer
//!
//! Outline fonts are loaded from disk with `ab_glyph`. When no usable font
//! file exists the renderer falls back to the built-in 8x8 bitmap font, so
//! rendering never depends on what happens to be installed.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use font8x8::{UnicodeFonts, BASIC_FONTS, BLOCK_FONTS};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::raster::Canvas;
use crate::theme::Rgb;

/// Errors that can occur when loading a font file
#[derive(Error, Debug)]
pub enum FontError {
    #[error("failed to read font '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("'{}' is not a usable TrueType/OpenType font", path.display())]
    Invalid { path: PathBuf },
}

/// Platform fonts tried in order when none is configured
const CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Courier New Bold.ttf",
    "/Library/Fonts/Courier New.ttf",
    "/System/Library/Fonts/Monaco.dfont",
    "/System/Library/Fonts/Menlo.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// Bitmap glyph edge length in font units
const BITMAP_CELL: u32 = 8;

#[derive(Clone)]
enum Face {
    Outline(Arc<FontVec>),
    Bitmap,
}

/// A font at a fixed pixel size
#[derive(Clone)]
pub struct TerminalFont {
    face: Face,
    size: f32,
    source: Option<PathBuf>,
}

impl fmt::Debug for TerminalFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalFont")
            .field("bitmap", &self.is_bitmap())
            .field("size", &self.size)
            .field("source", &self.source)
            .finish()
    }
}

impl TerminalFont {
    /// Load an outline font from a TTF/OTF (or the first face of a TTC)
    pub fn from_file(path: &Path, size: f32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let font = FontVec::try_from_vec(data).map_err(|_| FontError::Invalid {
            path: path.to_path_buf(),
        })?;
        Ok(Self {
            face: Face::Outline(Arc::new(font)),
            size,
            source: Some(path.to_path_buf()),
        })
    }

    /// The built-in bitmap font
    pub fn bitmap(size: f32) -> Self {
        Self {
            face: Face::Bitmap,
            size,
            source: None,
        }
    }

    /// Use the first loadable font from `extra`, then the platform list
    pub fn discover(extra: &[PathBuf], size: f32) -> Self {
        let candidates = extra
            .iter()
            .cloned()
            .chain(CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path, size) {
                Ok(font) => {
                    info!("Using font {}", path.display());
                    return font;
                }
                Err(e) => debug!("Skipping font: {}", e),
            }
        }

        warn!("No outline font found, falling back to the built-in bitmap font");
        Self::bitmap(size)
    }

    /// Same face at another pixel size
    pub fn at_size(&self, size: f32) -> Self {
        Self {
            face: self.face.clone(),
            size,
            source: self.source.clone(),
        }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.face, Face::Bitmap)
    }

    /// File the font was loaded from
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn bitmap_scale(&self) -> u32 {
        ((self.size / BITMAP_CELL as f32).round() as u32).max(1)
    }

    /// Height of one line of text in pixels
    pub fn line_height(&self) -> f32 {
        match &self.face {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(self.size));
                scaled.ascent() - scaled.descent()
            }
            Face::Bitmap => (BITMAP_CELL * self.bitmap_scale()) as f32,
        }
    }

    /// Advance width of `text` in pixels
    pub fn text_width(&self, text: &str) -> f32 {
        match &self.face {
            Face::Outline(font) => {
                let scaled = font.as_scaled(PxScale::from(self.size));
                let mut width = 0.0;
                let mut prev = None;
                for c in text.chars() {
                    let id = scaled.glyph_id(c);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            Face::Bitmap => (text.chars().count() as u32 * BITMAP_CELL * self.bitmap_scale()) as f32,
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`; returns the advance
    pub fn draw(&self, canvas: &mut Canvas, x: f32, y: f32, text: &str, color: Rgb) -> f32 {
        match &self.face {
            Face::Outline(font) => draw_outline(font, self.size, canvas, x, y, text, color),
            Face::Bitmap => draw_bitmap(self.bitmap_scale(), canvas, x, y, text, color),
        }
    }
}

fn draw_outline(
    font: &FontVec,
    size: f32,
    canvas: &mut Canvas,
    x: f32,
    y: f32,
    text: &str,
    color: Rgb,
) -> f32 {
    let scaled = font.as_scaled(PxScale::from(size));
    let baseline = y + scaled.ascent();
    let mut caret = x;
    let mut prev = None;

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(size, point(caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|gx, gy, coverage| {
                canvas.blend(left + gx as i32, top + gy as i32, color, coverage);
            });
        }
    }

    caret - x
}

/// Bitmap rows for `c`, substituting glyphs the 8x8 sets lack
fn bitmap_glyph(c: char) -> [u8; 8] {
    let c = match c {
        '➜' | '→' | '❯' => '>',
        other => other,
    };
    BASIC_FONTS
        .get(c)
        .or_else(|| BLOCK_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

fn draw_bitmap(scale: u32, canvas: &mut Canvas, x: f32, y: f32, text: &str, color: Rgb) -> f32 {
    let cell = (BITMAP_CELL * scale) as i32;
    let (x0, y0) = (x.round() as i32, y.round() as i32);

    for (i, c) in text.chars().enumerate() {
        let left = x0 + i as i32 * cell;
        for (row, bits) in bitmap_glyph(c).iter().enumerate() {
            for col in 0..BITMAP_CELL {
                // Least significant bit is the leftmost pixel
                if bits & (1 << col) == 0 {
                    continue;
                }
                let px = left + (col * scale) as i32;
                let py = y0 + (row as u32 * scale) as i32;
                canvas.fill_block(px, py, scale, color);
            }
        }
    }

    (text.chars().count() as i32 * cell) as f32
}
