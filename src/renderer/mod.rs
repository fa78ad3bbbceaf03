//! Renderers for the terminal animation
//!
//! `svg` emits declarative markup; `raster`, `font` and `gif` paint and
//! encode still frames.

pub mod config;
pub mod font;
pub mod gif;
pub mod raster;
pub mod svg;

pub use config::{EmbeddedFont, SvgConfig};
pub use font::{FontError, TerminalFont};
pub use gif::{frame_delays, frame_runs, FrameRun, GifSummary};
pub use raster::{Canvas, FrameState, RasterScene};
pub use svg::{SvgBuilder, SvgScene};
