//! Reveal timeline
//!
//! Every timestamp in the animation is derived here from the command length,
//! the number of profile lines and the timing settings. The SVG renderer
//! turns these into `<set>` begin times; the GIF renderer samples them.

use std::fmt;
use std::ops::Range;

use crate::config::{SceneConfig, TimingConfig};
use crate::profile::Profile;

/// Absorbs float error so that `t = k * speed` falls into bucket `k`
const EPSILON: f64 = 1e-9;

/// Timestamps (seconds) for one animation cycle
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    timing: TimingConfig,
    command_chars: usize,
    clear_chars: usize,
    lines: usize,
    /// The command is fully typed
    pub command_end: f64,
    /// First profile line appears
    pub reveal_start: f64,
    /// Last profile line has appeared; final prompt shows
    pub reveal_end: f64,
    pub blink_end: f64,
    pub clear_start: f64,
    pub clear_typed: f64,
    pub clear_execute: f64,
    /// Length of one SVG loop
    pub loop_time: f64,
    /// Length of the GIF
    pub gif_duration: f64,
}

impl Timeline {
    pub fn new(
        timing: &TimingConfig,
        command_chars: usize,
        lines: usize,
        clear_chars: usize,
    ) -> Self {
        let command_end = command_chars as f64 * timing.char_speed;
        let reveal_start = command_end + timing.command_pause;
        let reveal_end = reveal_start + lines as f64 * timing.line_speed;
        let blink_end = reveal_end + timing.blink_time;
        let clear_start = blink_end + timing.clear_pause;
        let clear_typed = clear_start + clear_chars as f64 * timing.clear_speed;
        let clear_execute = clear_typed + timing.clear_execute_delay;
        let loop_time = clear_execute + timing.loop_pause;
        let gif_duration = reveal_end + timing.blink_time + timing.gif_tail;

        Self {
            timing: timing.clone(),
            command_chars,
            clear_chars,
            lines,
            command_end,
            reveal_start,
            reveal_end,
            blink_end,
            clear_start,
            clear_typed,
            clear_execute,
            loop_time,
            gif_duration,
        }
    }

    /// Timeline for rendering `profile` with `scene`
    pub fn for_scene(profile: &Profile, scene: &SceneConfig) -> Self {
        let command = scene.script.command_for(&profile.name);
        Self::new(
            &scene.timing,
            command.chars().count(),
            profile.len(),
            scene.script.clear_command.chars().count(),
        )
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Window during which the first `i + 1` command characters are shown
    pub fn keystroke(&self, i: usize) -> Range<f64> {
        let speed = self.timing.char_speed;
        i as f64 * speed..(i + 1) as f64 * speed
    }

    /// Same as [`Timeline::keystroke`] for the clear command
    pub fn clear_keystroke(&self, i: usize) -> Range<f64> {
        let speed = self.timing.clear_speed;
        self.clear_start + i as f64 * speed..self.clear_start + (i + 1) as f64 * speed
    }

    /// When profile line `i` becomes visible
    pub fn line_reveal(&self, i: usize) -> f64 {
        self.reveal_start + i as f64 * self.timing.line_speed
    }

    /// Number of command characters visible at time `t`
    pub fn typed_chars_at(&self, t: f64) -> usize {
        if t + EPSILON >= self.command_end {
            return self.command_chars;
        }
        buckets(t, self.timing.char_speed).min(self.command_chars)
    }

    /// Number of profile lines visible at time `t`
    pub fn visible_lines_at(&self, t: f64) -> usize {
        if t + EPSILON < self.reveal_start || self.lines == 0 {
            return 0;
        }
        (buckets(t - self.reveal_start, self.timing.line_speed) + 1).min(self.lines)
    }

    /// Whether the final prompt is on screen at time `t`
    pub fn prompt_visible_at(&self, t: f64) -> bool {
        t + EPSILON >= self.reveal_end
    }

    /// Whether the cursor glyph is lit at time `t`
    ///
    /// Mirrors the CSS `blink` keyframes: lit for the first half of every
    /// period, phase measured from document time zero.
    pub fn cursor_visible_at(&self, t: f64) -> bool {
        if !self.prompt_visible_at(t) {
            return false;
        }
        let period = self.timing.cursor_period;
        let phase = (t + EPSILON).rem_euclid(period);
        phase < period / 2.0
    }

    /// Number of GIF ticks at `fps`
    pub fn total_frames(&self, fps: u32) -> usize {
        (self.gif_duration * fps as f64 + EPSILON).floor() as usize
    }

    pub fn cursor_period(&self) -> f64 {
        self.timing.cursor_period
    }

    pub fn clear_chars(&self) -> usize {
        self.clear_chars
    }
}

fn buckets(t: f64, width: f64) -> usize {
    ((t / width) + EPSILON).floor().max(0.0) as usize
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cmd={:.1}s, reveal={:.1}s ({} lines), loop={:.1}s, gif={:.1}s",
            self.command_end,
            self.reveal_end - self.reveal_start,
            self.lines,
            self.loop_time,
            self.gif_duration
        )
    }
}
