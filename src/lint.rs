//! Lint checks for profiles that will not render cleanly.
//!
//! The renderers accept any text, so these are warnings only: an empty
//! profile, tab indentation (a tab counts as a single indent step), and
//! lines that run past the right edge of the canvas.

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::layout::LayoutConfig;
use crate::profile::{Profile, Span};

/// A lint warning about the profile
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    /// Offending source range, when the warning is tied to a line
    pub span: Option<Span>,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Empty,
    Tabs,
    Overflow,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Empty => write!(f, "empty"),
            LintCategory::Tabs => write!(f, "tabs"),
            LintCategory::Overflow => write!(f, "overflow"),
        }
    }
}

/// A canvas to check line widths against
pub struct LintTarget<'a> {
    /// Shown in messages, e.g. "SVG"
    pub name: &'a str,
    pub layout: &'a LayoutConfig,
    /// Advance of one monospace character in pixels
    pub char_width: f64,
}

/// Check text-only properties of the profile
pub fn check_profile(profile: &Profile) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if profile.is_empty() {
        warnings.push(LintWarning {
            category: LintCategory::Empty,
            message: "profile has no lines; only the command will be shown".to_string(),
            span: None,
        });
    }

    for (i, line) in profile.lines.iter().enumerate() {
        if line.has_tab_indent(&profile.source) {
            warnings.push(LintWarning {
                category: LintCategory::Tabs,
                message: format!(
                    "line {} is indented with tabs; each tab counts as one space",
                    i + 1
                ),
                span: Some(line.span.clone()),
            });
        }
    }

    warnings
}

/// Check that the command and every profile line fit on the canvas
pub fn check_overflow(profile: &Profile, command: &str, target: &LintTarget<'_>) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let layout = target.layout;
    let limit = layout.width as f64;

    let command_right = layout.command_x + command.chars().count() as f64 * target.char_width;
    if command_right > limit {
        warnings.push(LintWarning {
            category: LintCategory::Overflow,
            message: format!(
                "command runs to x={:.0}, past the {}px {} canvas",
                command_right, layout.width, target.name
            ),
            span: None,
        });
    }

    for (i, line) in profile.lines.iter().enumerate() {
        let right = layout.line_x(line.indent) + line.content.chars().count() as f64 * target.char_width;
        if right > limit {
            warnings.push(LintWarning {
                category: LintCategory::Overflow,
                message: format!(
                    "line {} runs to x={:.0}, past the {}px {} canvas",
                    i + 1,
                    right,
                    layout.width,
                    target.name
                ),
                span: Some(line.span.clone()),
            });
        }
    }

    warnings
}

impl LintWarning {
    /// Format the warning with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        // ariadne counts offsets in chars, spans are bytes
        let span = self
            .span
            .as_ref()
            .map(|s| char_offset(source, s.start)..char_offset(source, s.end));
        let offset = span.as_ref().map(|s| s.start).unwrap_or(0);
        let mut report = Report::build(ReportKind::Warning, filename, offset)
            .with_message(format!("[{}] {}", self.category, self.message));
        if let Some(span) = span {
            report = report.with_label(
                Label::new((filename, span))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            );
        }
        // Writing into a Vec cannot fail
        let _ = report
            .finish()
            .write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    source.get(..byte).map_or_else(|| source.chars().count(), |s| s.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg_target(layout: &LayoutConfig) -> LintTarget<'_> {
        LintTarget {
            name: "SVG",
            layout,
            char_width: 8.4,
        }
    }

    #[test]
    fn test_clean_profile() {
        let profile = Profile::from_str("name: me\nrole: engineer");
        let layout = LayoutConfig::svg();
        assert!(check_profile(&profile).is_empty());
        assert!(check_overflow(&profile, "cat profile.yaml", &svg_target(&layout)).is_empty());
    }

    #[test]
    fn test_empty_profile() {
        let warnings = check_profile(&Profile::from_str("  \n"));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Empty);
    }

    #[test]
    fn test_tab_indentation() {
        let profile = Profile::from_str("spec:\n\tname: me\n  ok: yes");
        let warnings = check_profile(&profile);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Tabs);
        assert!(warnings[0].message.contains("line 2"));
    }

    #[test]
    fn test_overflowing_line() {
        let long = format!("summary: {}", "x".repeat(120));
        let profile = Profile::from_str(&format!("a: 1\n{}", long));
        let layout = LayoutConfig::svg();
        let warnings = check_overflow(&profile, "ls", &svg_target(&layout));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].category, LintCategory::Overflow);
        assert!(warnings[0].message.contains("line 2"));
        assert!(warnings[0].message.contains("900px SVG"));
    }

    #[test]
    fn test_overflowing_command() {
        let profile = Profile::from_str("a: 1");
        let layout = LayoutConfig::svg();
        let warnings = check_overflow(&profile, &"x".repeat(200), &svg_target(&layout));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].span.is_none());
    }

    #[test]
    fn test_format_includes_context() {
        let source = "spec:\n\tname: me\n";
        let profile = Profile::from_str(source);
        let warnings = check_profile(&profile);
        let report = warnings[0].format(source, "profile.yaml");
        assert!(report.contains("tabs"));
        assert!(report.contains("profile.yaml"));
    }

    #[test]
    fn test_format_without_span() {
        let warnings = check_profile(&Profile::from_str(""));
        let report = warnings[0].format("", "profile.yaml");
        assert!(report.contains("profile has no lines"));
    }

    #[test]
    fn test_category_display() {
        assert_eq!(LintCategory::Overflow.to_string(), "overflow");
    }

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_format_after_multibyte_line() {
        let source = format!("title: {}\nok: 1\n\tname: me\n", "é".repeat(25));
        let profile = Profile::from_str(&source);
        let warnings = check_profile(&profile);
        assert_eq!(warnings.len(), 1);
        let report = strip_ansi(&warnings[0].format(&source, "profile.yaml"));
        assert!(report.contains("profile.yaml:3"), "{}", report);
        assert!(report.contains("name: me"), "{}", report);
    }

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("éa\nb", 0), 0);
        assert_eq!(char_offset("éa\nb", 2), 1);
        assert_eq!(char_offset("éa\nb", 4), 3);
        assert_eq!(char_offset("éa\nb", 99), 4);
    }
}
