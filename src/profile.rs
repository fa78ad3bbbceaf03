//! Profile file loading
//!
//! The profile is displayed literally, so this module only splits it into
//! lines and classifies each line for colouring. It never interprets YAML.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Byte range in the profile source
pub type Span = std::ops::Range<usize>;

/// Errors that can occur while reading a profile
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("failed to read profile '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How a profile line is coloured
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// `key: value` pair; `value` keeps everything after the first colon
    Entry { key: String, value: String },
    /// List items and anything without a colon
    Plain,
}

/// A single display line of the profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLine {
    /// Leading whitespace characters (a tab counts as one)
    pub indent: usize,
    /// Line text without the leading whitespace
    pub content: String,
    pub kind: LineKind,
    /// Location of the full line in the source
    pub span: Span,
}

impl ProfileLine {
    fn parse(line: &str, offset: usize) -> Self {
        let content = line.trim_start();
        let indent = line.chars().count() - content.chars().count();

        let kind = match content.split_once(':') {
            Some((key, value)) if !content.starts_with('-') => LineKind::Entry {
                key: key.to_string(),
                value: value.to_string(),
            },
            _ => LineKind::Plain,
        };

        Self {
            indent,
            content: content.to_string(),
            kind,
            span: offset..offset + line.len(),
        }
    }

    /// Whether the indentation contains a tab character
    pub fn has_tab_indent(&self, source: &str) -> bool {
        let line = &source[self.span.clone()];
        line[..line.len() - self.content.len()].contains('\t')
    }
}

/// The profile as a sequence of display lines
#[derive(Debug, Clone, Default)]
pub struct Profile {
    /// Display name, usually the file name
    pub name: String,
    pub source: String,
    pub lines: Vec<ProfileLine>,
}

impl Profile {
    /// Load a profile from disk
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let source = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_source(name, source))
    }

    /// Build a profile from in-memory text
    pub fn from_str(source: &str) -> Self {
        Self::from_source("profile.yaml".to_string(), source.to_string())
    }

    fn from_source(name: String, source: String) -> Self {
        let trimmed = source.trim();
        let mut lines = Vec::new();

        if !trimmed.is_empty() {
            // Spans index into the untrimmed source
            let mut offset = source.len() - source.trim_start().len();
            for raw in trimmed.split('\n') {
                lines.push(ProfileLine::parse(raw.trim_end(), offset));
                offset += raw.len() + 1;
            }
        }

        Self {
            name,
            source,
            lines,
        }
    }

    /// Number of display lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_entry_line() {
        let profile = Profile::from_str("name: Vishal");
        assert_eq!(
            profile.lines[0].kind,
            LineKind::Entry {
                key: "name".to_string(),
                value: " Vishal".to_string()
            }
        );
        assert_eq!(profile.lines[0].indent, 0);
    }

    #[test]
    fn test_list_item_is_plain() {
        let profile = Profile::from_str("skills:\n  - kubernetes: 5y");
        assert_eq!(profile.lines[1].kind, LineKind::Plain);
        assert_eq!(profile.lines[1].indent, 2);
        assert_eq!(profile.lines[1].content, "- kubernetes: 5y");
    }

    #[test]
    fn test_value_split_at_first_colon() {
        let profile = Profile::from_str("url: https://example.com");
        assert_eq!(
            profile.lines[0].kind,
            LineKind::Entry {
                key: "url".to_string(),
                value: " https://example.com".to_string()
            }
        );
    }

    #[test]
    fn test_key_without_value() {
        let profile = Profile::from_str("spec:");
        assert_eq!(
            profile.lines[0].kind,
            LineKind::Entry {
                key: "spec".to_string(),
                value: String::new()
            }
        );
    }

    #[test]
    fn test_outer_whitespace_trimmed() {
        let profile = Profile::from_str("\n\n  a: 1\n  b: 2\n\n");
        assert_eq!(profile.len(), 2);
        // The first line loses its indentation with the surrounding whitespace
        assert_eq!(profile.lines[0].indent, 0);
        assert_eq!(profile.lines[1].indent, 2);
    }

    #[test]
    fn test_crlf_and_trailing_spaces() {
        let profile = Profile::from_str("a: 1  \r\nb: 2\r\n");
        assert_eq!(profile.lines[0].content, "a: 1");
        assert_eq!(profile.lines[1].content, "b: 2");
    }

    #[test]
    fn test_empty_profile_has_no_lines() {
        assert!(Profile::from_str("").is_empty());
        assert!(Profile::from_str(" \n\t\n").is_empty());
    }

    #[test]
    fn test_blank_lines_inside_are_kept() {
        let profile = Profile::from_str("a: 1\n\nb: 2");
        assert_eq!(profile.len(), 3);
        assert_eq!(profile.lines[1].content, "");
        assert_eq!(profile.lines[1].kind, LineKind::Plain);
    }

    #[test]
    fn test_spans_point_into_source() {
        let source = "\nkind: Engineer\n\tname: x\n";
        let profile = Profile::from_str(source);
        assert_eq!(&source[profile.lines[0].span.clone()], "kind: Engineer");
        assert_eq!(&source[profile.lines[1].span.clone()], "\tname: x");
        assert!(profile.lines[1].has_tab_indent(source));
        assert!(!profile.lines[0].has_tab_indent(source));
    }

    #[test]
    fn test_missing_file_error() {
        let err = Profile::from_file(Path::new("/nonexistent/profile.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/profile.yaml"));
    }
}
