//! SVG generation
//!
//! Visibility is driven by SMIL `<set>` elements keyed to the reveal
//! timeline; the cursor blinks through a CSS keyframe. Nothing here needs a
//! font at render time, so output is fully deterministic.

use crate::config::{FontConfig, ScriptConfig};
use crate::layout::LayoutConfig;
use crate::profile::{LineKind, Profile};
use crate::theme::{Rgb, Theme};
use crate::timeline::Timeline;

use super::SvgConfig;

/// Static inputs for one SVG document
pub struct SvgScene<'a> {
    pub profile: &'a Profile,
    pub layout: LayoutConfig,
    pub theme: Theme,
    pub timeline: Timeline,
    pub script: ScriptConfig,
    pub font: FontConfig,
    /// Resolved command text
    pub command: String,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Append a CSS rule to the style block
    pub fn add_style(&mut self, rule: impl Into<String>) {
        self.styles.push(rule.into());
    }

    /// Append a raw element at the current depth
    pub fn add_element(&mut self, element: impl AsRef<str>) {
        self.elements
            .push(format!("{}{}", self.indent_str(), element.as_ref()));
    }

    /// Add a rectangle anchored at the origin
    pub fn add_rect(&mut self, width: f64, height: f64, fill: Rgb, rx: Option<f64>) {
        let rx_attr = rx.map(|r| format!(r#" rx="{}""#, r)).unwrap_or_default();
        self.add_element(format!(
            r#"<rect width="{}" height="{}" fill="{}"{}/>"#,
            width, height, fill, rx_attr
        ));
    }

    /// Add a filled circle
    pub fn add_circle(&mut self, cx: f64, cy: f64, r: f64, fill: Rgb) {
        self.add_element(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            cx, cy, r, fill
        ));
    }

    /// Add a group element
    pub fn start_group(&mut self, id: &str) {
        self.add_element(format!(r#"<g id="{}">"#, escape_xml(id)));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.add_element("</g>");
    }

    /// Build the final SVG string
    pub fn build(self, width: u32, height: u32) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            let pad = if self.config.pretty_print { "    " } else { "" };
            svg.push_str(&self.indent_str_at(1));
            svg.push_str("<style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str(pad);
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str(&self.indent_str_at(1));
            svg.push_str("</style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }

    fn indent_str_at(&self, depth: usize) -> String {
        if self.config.pretty_print {
            "  ".repeat(depth)
        } else {
            String::new()
        }
    }
}

/// Render the terminal animation as an SVG document
pub fn render_svg(scene: &SvgScene<'_>, config: &SvgConfig) -> String {
    let layout = &scene.layout;
    let theme = &scene.theme;
    let tl = &scene.timeline;
    let lines = scene.profile.len();
    let width = layout.width;
    let height = layout.height(lines);

    let mut builder = SvgBuilder::new(config.clone());
    add_styles(&mut builder, scene, config);

    // Window chrome
    builder.add_rect(width as f64, height as f64, theme.color("background"), Some(8.0));
    builder.add_rect(width as f64, layout.header_height, theme.color("header"), Some(8.0));
    for (i, token) in ["dot-red", "dot-yellow", "dot-green"].iter().enumerate() {
        builder.add_circle(
            layout.dots.cx(i),
            layout.dots.cy,
            layout.dots.radius,
            theme.color(token),
        );
    }
    builder.add_element(format!(
        r#"<text x="{}" y="{}" fill="{}" font-size="{}" text-anchor="middle" font-weight="600">{}</text>"#,
        width / 2,
        layout.header_height / 2.0 + 5.0,
        theme.color("prompt"),
        scene.font.title_size,
        escape_xml(&scene.script.title)
    ));

    builder.start_group("terminal");

    // Prompt and typed command
    let prompt = escape_xml(&scene.script.prompt);
    let mut command_line = format!(
        r#"<text x="{}" y="{}" class="text"><tspan class="prompt">{}</tspan>"#,
        layout.left_margin, layout.prompt_y, prompt
    );
    command_line.push_str(&typed_tspans(
        &scene.command,
        layout.command_x,
        |i| tl.keystroke(i),
        tl.command_end,
    ));
    command_line.push_str("</text>");
    builder.add_element(command_line);

    // Profile lines
    for (i, line) in scene.profile.lines.iter().enumerate() {
        let mut text = format!(
            r#"<text x="{}" y="{}" class="text" opacity="0" xml:space="preserve">{}"#,
            layout.line_x(line.indent),
            layout.line_y(i),
            set_opacity(1, tl.line_reveal(i))
        );
        match &line.kind {
            LineKind::Entry { key, value } => {
                text.push_str(&format!(r#"<tspan class="key">{}:</tspan>"#, escape_xml(key)));
                if !value.is_empty() {
                    text.push_str(&format!(r#"<tspan class="val">{}</tspan>"#, escape_xml(value)));
                }
            }
            LineKind::Plain => {
                text.push_str(&format!(
                    r#"<tspan class="val">{}</tspan>"#,
                    escape_xml(&line.content)
                ));
            }
        }
        text.push_str("</text>");
        builder.add_element(text);
    }

    // Final prompt with blinking cursor
    let cursor_y = layout.cursor_y(lines);
    let mut cursor = format!(
        r#"<text x="{}" y="{}" class="text" opacity="0">{}"#,
        layout.left_margin,
        cursor_y,
        set_opacity(1, tl.reveal_end)
    );
    if scene.script.clear_on_loop {
        cursor.push_str(&set_opacity(0, tl.blink_end));
    }
    cursor.push_str(&format!(
        r#"<tspan class="prompt">{}</tspan><tspan class="prompt cursor">█</tspan></text>"#,
        prompt
    ));
    builder.add_element(cursor);

    // Optional clear before the loop restarts
    if scene.script.clear_on_loop {
        let mut clear = format!(
            r#"<text x="{}" y="{}" class="text"><tspan class="prompt" opacity="0">{}{}</tspan>"#,
            layout.left_margin,
            cursor_y,
            set_opacity(1, tl.clear_start),
            prompt
        );
        clear.push_str(&typed_tspans(
            &scene.script.clear_command,
            layout.command_x,
            |i| tl.clear_keystroke(i),
            tl.clear_typed,
        ));
        clear.push_str("</text>");
        builder.add_element(clear);
    }

    builder.end_group();

    if scene.script.clear_on_loop {
        builder.add_element(format!(
            r##"<set href="#terminal" attributeName="opacity" to="0" begin="{}s"/>"##,
            format_seconds(tl.clear_execute)
        ));
    }

    if config.loop_script {
        builder.add_element(loop_script(tl.loop_time));
    }

    builder.build(width, height)
}

fn add_styles(builder: &mut SvgBuilder, scene: &SvgScene<'_>, config: &SvgConfig) {
    let theme = &scene.theme;
    let family = escape_xml(&scene.font.family);

    match &config.embedded_font {
        Some(font) => builder.add_style(format!(
            "@font-face {{ font-family: '{}'; src: {}; }}",
            family,
            font.data_url()
        )),
        None => builder.add_style(format!(
            "@import url('https://fonts.googleapis.com/css2?family={}:wght@400;600&amp;display=swap');",
            family.replace(' ', "+")
        )),
    }
    builder.add_style(format!(
        "* {{ font-family: '{}', monospace; font-size: {}px; }}",
        family, scene.font.size
    ));
    builder.add_style(format!(".prompt {{ fill: {}; }}", theme.color("prompt")));
    builder.add_style(format!(".text {{ fill: {}; }}", theme.color("text")));
    builder.add_style(format!(".key {{ fill: {}; }}", theme.color("key")));
    builder.add_style(format!(".val {{ fill: {}; }}", theme.color("value")));
    builder.add_style("@keyframes blink { 0%,49% {opacity:1;} 50%,100% {opacity:0;} }");
    builder.add_style(format!(
        ".cursor {{ animation: blink {}s infinite; }}",
        format_seconds(scene.timeline.cursor_period())
    ));
}

/// One tspan per keystroke prefix, then the full text from `done` on
fn typed_tspans(
    text: &str,
    x: f64,
    window: impl Fn(usize) -> std::ops::Range<f64>,
    done: f64,
) -> String {
    let mut out = String::new();
    let mut prefix = String::new();

    for (i, c) in text.chars().enumerate() {
        prefix.push(c);
        let w = window(i);
        out.push_str(&format!(
            r#"<tspan x="{}" opacity="0">{}{}{}</tspan>"#,
            x,
            set_opacity(1, w.start),
            set_opacity(0, w.end),
            escape_xml(&prefix)
        ));
    }

    out.push_str(&format!(
        r#"<tspan x="{}" opacity="0">{}{}</tspan>"#,
        x,
        set_opacity(1, done),
        escape_xml(text)
    ));
    out
}

fn set_opacity(to: u8, begin: f64) -> String {
    format!(
        r#"<set attributeName="opacity" to="{}" begin="{}s"/>"#,
        to,
        format_seconds(begin)
    )
}

/// Restart the SMIL timeline every `loop_time` seconds
fn loop_script(loop_time: f64) -> String {
    let ms = (loop_time * 1000.0).round() as u64;
    format!(
        r#"<script type="text/javascript"><![CDATA[
  (function() {{
    var svg = document.querySelector('svg');
    setTimeout(function() {{
      svg.setCurrentTime(0);
      setInterval(function() {{ svg.setCurrentTime(0); }}, {ms});
    }}, {ms});
  }})();
]]></script>"#,
        ms = ms
    )
}

/// Seconds with at most three decimals and no trailing zeros
fn format_seconds(t: f64) -> String {
    let s = format!("{:.3}", t);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
