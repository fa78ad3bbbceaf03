//! Animated GIF encoding
//!
//! The timeline is sampled once per tick, but a tick only becomes a new GIF
//! frame when something visible changed. Runs of identical ticks are merged
//! into one frame with a longer delay.

use std::io::Write;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, ImageError};
use tracing::{debug, info};

use super::raster::{FrameState, RasterScene};
use crate::timeline::Timeline;

/// Result of a GIF render
#[derive(Debug, Clone, PartialEq)]
pub struct GifSummary {
    pub width: u32,
    pub height: u32,
    /// Encoded GIF frames after merging
    pub frames: usize,
    /// Timeline samples before merging
    pub ticks: usize,
    /// Seconds
    pub duration: f64,
}

/// A frame state held for `ticks` consecutive ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRun {
    pub state: FrameState,
    pub ticks: u32,
}

/// Sample the timeline at `fps` and merge consecutive equal states
pub fn frame_runs(timeline: &Timeline, fps: u32) -> Vec<FrameRun> {
    let ticks = timeline.total_frames(fps).max(1);
    let mut runs: Vec<FrameRun> = Vec::new();

    for tick in 0..ticks {
        let t = tick as f64 / fps as f64;
        let state = FrameState::at(timeline, t);
        match runs.last_mut() {
            Some(run) if run.state == state => run.ticks += 1,
            _ => runs.push(FrameRun { state, ticks: 1 }),
        }
    }

    runs
}

/// Per-run delays in centiseconds, the unit GIF stores
///
/// Each run ends at its cumulative tick time rounded to the nearest
/// centisecond, so rounding never accumulates and the delays sum to
/// `ticks / fps`.
pub fn frame_delays(runs: &[FrameRun], fps: u32) -> Vec<u32> {
    let fps = u64::from(fps);
    let mut elapsed_ticks = 0u64;
    let mut elapsed_cs = 0u64;

    runs.iter()
        .map(|run| {
            elapsed_ticks += u64::from(run.ticks);
            let end_cs = (elapsed_ticks * 100 + fps / 2) / fps;
            let delay = end_cs - elapsed_cs;
            elapsed_cs = end_cs;
            delay as u32
        })
        .collect()
}

/// Encode the animation into `writer`
pub fn render_gif<W: Write>(
    scene: &RasterScene<'_>,
    timeline: &Timeline,
    fps: u32,
    speed: i32,
    writer: W,
) -> Result<GifSummary, ImageError> {
    let runs = frame_runs(timeline, fps);
    let ticks: usize = runs.iter().map(|r| r.ticks as usize).sum();
    info!(
        "Rendering GIF {}x{}: {} ticks at {} fps -> {} frames",
        scene.width(),
        scene.height(),
        ticks,
        fps,
        runs.len()
    );

    let mut encoder = GifEncoder::new_with_speed(writer, speed);
    encoder.set_repeat(Repeat::Infinite)?;

    for (i, (run, cs)) in runs.iter().zip(frame_delays(&runs, fps)).enumerate() {
        let canvas = scene.paint(&run.state);
        let delay = Delay::from_numer_denom_ms(cs * 10, 1);
        encoder.encode_frame(Frame::from_parts(canvas.into_image(), 0, 0, delay))?;
        debug!("frame {}/{}: {:?} x{}", i + 1, runs.len(), run.state, run.ticks);
    }
    drop(encoder);

    Ok(GifSummary {
        width: scene.width(),
        height: scene.height(),
        frames: runs.len(),
        ticks,
        duration: ticks as f64 / fps as f64,
    })
}
