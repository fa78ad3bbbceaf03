//! Frame painting for the raster (GIF) path

use image::{Rgba, RgbaImage};

use super::font::TerminalFont;
use crate::layout::LayoutConfig;
use crate::profile::{LineKind, Profile};
use crate::theme::{Rgb, Theme};
use crate::timeline::Timeline;

/// RGBA drawing surface with coverage blending
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.to_rgba())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Blend `color` over the pixel at `(x, y)`; out-of-bounds is ignored
    pub fn blend(&mut self, x: i32, y: i32, color: Rgb, coverage: f32) {
        if x < 0 || y < 0 || x >= self.width() as i32 || y >= self.height() as i32 {
            return;
        }
        let a = coverage.clamp(0.0, 1.0);
        if a <= 0.0 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        let mix = |under: u8, over: u8| (under as f32 * (1.0 - a) + over as f32 * a).round() as u8;
        px.0 = [mix(px.0[0], color.0), mix(px.0[1], color.1), mix(px.0[2], color.2), 255];
    }

    /// Fill a `size` x `size` square at `(x, y)`
    pub fn fill_block(&mut self, x: i32, y: i32, size: u32, color: Rgb) {
        for dy in 0..size as i32 {
            for dx in 0..size as i32 {
                self.blend(x + dx, y + dy, color, 1.0);
            }
        }
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, color: Rgb) {
        let (x0, y0) = (x0.max(0.0).round() as u32, y0.max(0.0).round() as u32);
        let x1 = (x1.round().max(0.0) as u32).min(self.width());
        let y1 = (y1.round().max(0.0) as u32).min(self.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.image.put_pixel(x, y, Rgba(color.to_rgba()));
            }
        }
    }

    /// Fill a circle with a one pixel anti-aliased rim
    pub fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        let x_range = (cx - r - 1.0).floor() as i32..=(cx + r + 1.0).ceil() as i32;
        for y in (cy - r - 1.0).floor() as i32..=(cy + r + 1.0).ceil() as i32 {
            for x in x_range.clone() {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d = (dx * dx + dy * dy).sqrt();
                let coverage = (r + 0.5 - d).clamp(0.0, 1.0);
                self.blend(x, y, color, coverage as f32);
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let p = self.image.get_pixel(x, y).0;
        Rgb(p[0], p[1], p[2])
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Everything visible in a frame
///
/// Two ticks with equal states produce identical images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameState {
    pub typed_chars: usize,
    pub visible_lines: usize,
    /// Final prompt row shown
    pub prompt: bool,
    /// Cursor glyph lit
    pub cursor: bool,
}

impl FrameState {
    /// Sample the timeline at `t` seconds
    pub fn at(timeline: &Timeline, t: f64) -> Self {
        Self {
            typed_chars: timeline.typed_chars_at(t),
            visible_lines: timeline.visible_lines_at(t),
            prompt: timeline.prompt_visible_at(t),
            cursor: timeline.cursor_visible_at(t),
        }
    }
}

/// Static inputs shared by every frame
pub struct RasterScene<'a> {
    pub profile: &'a Profile,
    pub layout: LayoutConfig,
    pub theme: Theme,
    pub font: TerminalFont,
    pub title_font: TerminalFont,
    pub prompt: String,
    pub command: String,
    pub title: String,
}

impl RasterScene<'_> {
    pub fn width(&self) -> u32 {
        self.layout.width
    }

    pub fn height(&self) -> u32 {
        self.layout.height(self.profile.len())
    }

    /// Paint one frame
    pub fn paint(&self, state: &FrameState) -> Canvas {
        let layout = &self.layout;
        let theme = &self.theme;
        let mut canvas = Canvas::new(self.width(), self.height(), theme.color("background"));

        // Window chrome
        canvas.fill_rect(0.0, 0.0, layout.width as f64, layout.header_height, theme.color("header"));
        for (i, token) in ["dot-red", "dot-yellow", "dot-green"].iter().enumerate() {
            canvas.fill_circle(layout.dots.cx(i), layout.dots.cy, layout.dots.radius, theme.color(token));
        }
        if !self.title.is_empty() {
            let w = self.title_font.text_width(&self.title);
            let x = (layout.width as f32 - w) / 2.0;
            let y = (layout.header_height as f32 - self.title_font.line_height()) / 2.0;
            self.title_font
                .draw(&mut canvas, x, y, &self.title, theme.color("prompt"));
        }

        // Command line
        let prompt_color = theme.color("prompt");
        let prompt_y = layout.prompt_y as f32;
        self.font
            .draw(&mut canvas, layout.left_margin as f32, prompt_y, &self.prompt, prompt_color);
        let typed: String = self.command.chars().take(state.typed_chars).collect();
        self.font
            .draw(&mut canvas, layout.command_x as f32, prompt_y, &typed, prompt_color);

        // Profile
        for (i, line) in self.profile.lines.iter().take(state.visible_lines).enumerate() {
            let x = layout.line_x(line.indent) as f32;
            let y = layout.line_y(i) as f32;
            match &line.kind {
                LineKind::Entry { key, value } => {
                    let key = format!("{}:", key);
                    let advance = self.font.draw(&mut canvas, x, y, &key, theme.color("key"));
                    self.font
                        .draw(&mut canvas, x + advance, y, value, theme.color("value"));
                }
                LineKind::Plain => {
                    self.font
                        .draw(&mut canvas, x, y, &line.content, theme.color("value"));
                }
            }
        }

        // Final prompt and cursor
        if state.prompt {
            let y = layout.cursor_y(self.profile.len()) as f32;
            let advance = self
                .font
                .draw(&mut canvas, layout.left_margin as f32, y, &self.prompt, prompt_color);
            if state.cursor {
                self.font.draw(
                    &mut canvas,
                    layout.left_margin as f32 + advance,
                    y,
                    "█",
                    prompt_color,
                );
            }
        }

        canvas
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimingConfig;

    fn scene(profile: &Profile) -> RasterScene<'_> {
        let font = TerminalFont::bitmap(16.0);
        RasterScene {
            profile,
            layout: LayoutConfig::gif().with_width(400),
            theme: Theme::high_contrast(),
            title_font: font.at_size(8.0),
            font,
            prompt: "➜ ".to_string(),
            command: "cat profile.yaml".to_string(),
            title: "bash".to_string(),
        }
    }

    #[test]
    fn test_canvas_fill_rect_clips() {
        let mut canvas = Canvas::new(10, 10, Rgb(0, 0, 0));
        canvas.fill_rect(-5.0, -5.0, 3.0, 20.0, Rgb(255, 0, 0));
        assert_eq!(canvas.pixel(2, 9), Rgb(255, 0, 0));
        assert_eq!(canvas.pixel(3, 0), Rgb(0, 0, 0));
    }

    #[test]
    fn test_blend_half_coverage() {
        let mut canvas = Canvas::new(1, 1, Rgb(0, 0, 0));
        canvas.blend(0, 0, Rgb(200, 100, 50), 0.5);
        assert_eq!(canvas.pixel(0, 0), Rgb(100, 50, 25));
        canvas.blend(5, 5, Rgb(255, 255, 255), 1.0);
    }

    #[test]
    fn test_circle_center_and_outside() {
        let mut canvas = Canvas::new(30, 30, Rgb(0, 0, 0));
        canvas.fill_circle(15.0, 15.0, 7.0, Rgb(255, 95, 87));
        assert_eq!(canvas.pixel(15, 15), Rgb(255, 95, 87));
        assert_eq!(canvas.pixel(0, 0), Rgb(0, 0, 0));
        assert_eq!(canvas.pixel(15, 25), Rgb(0, 0, 0));
    }

    #[test]
    fn test_frame_state_sampling() {
        let tl = Timeline::new(&TimingConfig::default(), 16, 2, 5);
        assert_eq!(
            FrameState::at(&tl, 0.0),
            FrameState {
                typed_chars: 0,
                visible_lines: 0,
                prompt: false,
                cursor: false
            }
        );
        let done = FrameState::at(&tl, 3.2);
        assert_eq!(done.typed_chars, 16);
        assert_eq!(done.visible_lines, 2);
        assert!(done.prompt);
    }

    #[test]
    fn test_paint_dimensions_match_layout() {
        let profile = Profile::from_str("a: 1\nb: 2\nc: 3");
        let scene = scene(&profile);
        let canvas = scene.paint(&FrameState {
            typed_chars: 0,
            visible_lines: 0,
            prompt: false,
            cursor: false,
        });
        assert_eq!(canvas.width(), 400);
        assert_eq!(canvas.height(), 45 + 80 + 6 * 24 + 50);
        assert_eq!(canvas.pixel(300, 10), Rgb(45, 45, 45));
        assert_eq!(canvas.pixel(300, 100), Rgb(25, 25, 25));
        assert_eq!(canvas.pixel(21, 21), Rgb(255, 95, 87));
    }

    #[test]
    fn test_cursor_is_painted() {
        let profile = Profile::from_str("a: 1");
        let scene = scene(&profile);
        let mut state = FrameState {
            typed_chars: 16,
            visible_lines: 1,
            prompt: true,
            cursor: true,
        };
        // Bitmap cell is 16px; "➜ " spans two cells from the margin
        let cx = 25 + 32 + 4;
        let cy = scene.layout.cursor_y(1) as u32 + 4;
        assert_eq!(scene.paint(&state).pixel(cx, cy), Rgb(230, 200, 220));
        state.cursor = false;
        assert_eq!(scene.paint(&state).pixel(cx, cy), Rgb(25, 25, 25));
    }
}
