//! Pixel geometry of the terminal window
//!
//! The SVG and the GIF use different presets: the GIF is wider and uses a
//! larger font so it stays legible after quantization. Y coordinates are
//! text baselines for SVG and the top of the text box for the raster path.

/// The three window buttons in the header
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DotLayout {
    /// Center x of the first (red) dot
    pub first_cx: f64,
    /// Distance between dot centers
    pub spacing: f64,
    pub cy: f64,
    pub radius: f64,
}

impl DotLayout {
    /// Center x of dot `i` (0 = red, 1 = yellow, 2 = green)
    pub fn cx(&self, i: usize) -> f64 {
        self.first_cx + i as f64 * self.spacing
    }
}

/// Layout options for one output target
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub width: u32,
    pub header_height: f64,
    pub dots: DotLayout,
    /// Y of the command prompt
    pub prompt_y: f64,
    /// Y of the first profile line
    pub first_line_y: f64,
    pub line_height: f64,
    pub left_margin: f64,
    /// X where the typed command starts (after the prompt symbol)
    pub command_x: f64,
    /// Horizontal pixels per indentation character
    pub indent_px: f64,
    /// Height outside the profile rows, header excluded
    pub content_padding: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::svg()
    }
}

impl LayoutConfig {
    /// Preset for SVG output
    pub fn svg() -> Self {
        Self {
            width: 900,
            header_height: 40.0,
            dots: DotLayout {
                first_cx: 20.0,
                spacing: 20.0,
                cy: 20.0,
                radius: 6.0,
            },
            prompt_y: 70.0,
            first_line_y: 100.0,
            line_height: 20.0,
            left_margin: 20.0,
            command_x: 50.0,
            indent_px: 7.0,
            // prompt block (70) + bottom prompt (40) + padding (30)
            content_padding: 140.0,
        }
    }

    /// Preset for GIF output
    pub fn gif() -> Self {
        Self {
            width: 1000,
            header_height: 45.0,
            dots: DotLayout {
                first_cx: 21.0,
                spacing: 22.0,
                cy: 21.0,
                radius: 7.0,
            },
            prompt_y: 125.0,
            first_line_y: 173.0,
            line_height: 24.0,
            left_margin: 25.0,
            command_x: 55.0,
            indent_px: 10.0,
            // prompt offset (80) + three spare rows (72) + padding (50)
            content_padding: 202.0,
        }
    }

    /// Set the canvas width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    /// Set the pixels per indentation character
    pub fn with_indent_px(mut self, px: f64) -> Self {
        self.indent_px = px;
        self
    }

    /// Canvas height that exactly fits `lines` profile rows
    pub fn height(&self, lines: usize) -> u32 {
        (self.header_height + self.content_padding + lines as f64 * self.line_height).ceil() as u32
    }

    /// X of a profile line with the given indentation
    pub fn line_x(&self, indent: usize) -> f64 {
        self.left_margin + indent as f64 * self.indent_px
    }

    /// Y of profile line `index`
    pub fn line_y(&self, index: usize) -> f64 {
        self.first_line_y + index as f64 * self.line_height
    }

    /// Y of the final prompt, one blank row below the profile
    pub fn cursor_y(&self, lines: usize) -> f64 {
        self.line_y(lines) + self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_height_formula() {
        let layout = LayoutConfig::svg();
        // 40 + 70 + n*20 + 40 + 30
        assert_eq!(layout.height(0), 180);
        assert_eq!(layout.height(25), 40 + 70 + 25 * 20 + 40 + 30);
    }

    #[test]
    fn test_gif_height_formula() {
        let layout = LayoutConfig::gif();
        // 45 + 80 + (n + 3) * 24 + 50
        for n in [0, 1, 30] {
            assert_eq!(layout.height(n), 45 + 80 + (n as u32 + 3) * 24 + 50);
        }
    }

    #[test]
    fn test_indentation_offsets() {
        let svg = LayoutConfig::svg();
        assert_eq!(svg.line_x(0), 20.0);
        assert_eq!(svg.line_x(4), 48.0);
        let gif = LayoutConfig::gif();
        assert_eq!(gif.line_x(2), 45.0);
    }

    #[test]
    fn test_rows() {
        let svg = LayoutConfig::svg();
        assert_eq!(svg.line_y(0), 100.0);
        assert_eq!(svg.line_y(3), 160.0);
        assert_eq!(svg.cursor_y(3), 180.0);
        let gif = LayoutConfig::gif();
        assert_eq!(gif.line_y(0), gif.prompt_y + 2.0 * gif.line_height);
    }

    #[test]
    fn test_dots() {
        let svg = LayoutConfig::svg();
        assert_eq!(
            [svg.dots.cx(0), svg.dots.cx(1), svg.dots.cx(2)],
            [20.0, 40.0, 60.0]
        );
        let gif = LayoutConfig::gif();
        // PIL boxes [14,28], [36,50], [58,72]
        assert_eq!(
            [gif.dots.cx(0), gif.dots.cx(1), gif.dots.cx(2)],
            [21.0, 43.0, 65.0]
        );
    }

    #[test]
    fn test_builder() {
        let layout = LayoutConfig::gif().with_width(800).with_indent_px(8.0);
        assert_eq!(layout.width, 800);
        assert_eq!(layout.line_x(1), 33.0);
    }
}
