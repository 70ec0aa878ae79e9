//! Error types with rich diagnostics using miette
//!
//! File-level failures surface as [`IngestError`]. Line-level failures never
//! abort a parse: adapters collect them as [`MalformedRecord`] values that
//! point at the offending line in the original text.

use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::formats::Format;

/// Source context for error reporting
#[derive(Debug, Clone, Copy)]
pub struct SourceContext<'a> {
    /// Name of the source (filename or "<input>")
    pub name: &'a str,
    /// The full source text
    pub text: &'a str,
}

impl<'a> SourceContext<'a> {
    pub fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.text.to_string())
    }

    /// Iterate the text line by line, keeping byte offsets for spans.
    pub(crate) fn lines(&self) -> impl Iterator<Item = SourceLine<'a>> + use<'a> {
        let mut offset = 0;
        self.text
            .split_inclusive('\n')
            .enumerate()
            .map(move |(index, chunk)| {
                let start = offset;
                offset += chunk.len();
                SourceLine {
                    number: index + 1,
                    offset: start,
                    text: chunk.trim_end_matches(|c: char| c == '\r' || c == '\n'),
                }
            })
    }
}

/// One physical line of an input source, without its line terminator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SourceLine<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character in the source
    pub offset: usize,
    pub text: &'a str,
}

impl SourceLine<'_> {
    pub fn span(&self) -> SourceSpan {
        (self.offset, self.text.len()).into()
    }
}

// ============================================================================
// File-level errors
// ============================================================================

/// Errors that stop ingestion of one source. Other sources are unaffected.
#[derive(Error, Diagnostic, Debug)]
pub enum IngestError {
    #[error("input file not found: {}", .path.display())]
    #[diagnostic(
        code(stormtrack::ingest::missing_file),
        help("check the path given for this source")
    )]
    MissingFile { path: PathBuf },

    #[error("cannot read {}", .path.display())]
    #[diagnostic(code(stormtrack::ingest::unreadable))]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no storms found in {source_name}")]
    #[diagnostic(
        code(stormtrack::ingest::empty_result),
        help("check that the declared format matches the file")
    )]
    EmptyResult { source_name: String },
}

// ============================================================================
// Line-level errors
// ============================================================================

/// A line that failed field parsing and was skipped.
#[derive(Error, Diagnostic, Debug)]
#[error("malformed {format} record on line {line}: {reason}")]
#[diagnostic(code(stormtrack::ingest::malformed_record))]
pub struct MalformedRecord {
    pub format: Format,
    pub line: usize,
    pub reason: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("skipped")]
    pub span: SourceSpan,
}

// ============================================================================
// Configuration errors
// ============================================================================

/// Rejected map configuration values
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a finite number, got {value}")]
    #[diagnostic(code(stormtrack::config::not_finite))]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive, got {value}")]
    #[diagnostic(code(stormtrack::config::not_positive))]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative, got {value}")]
    #[diagnostic(code(stormtrack::config::negative))]
    Negative { field: &'static str, value: f64 },

    #[error("alpha must be within 0.0..=1.0, got {value}")]
    #[diagnostic(code(stormtrack::config::alpha_out_of_range))]
    AlphaOutOfRange { value: f64 },

    #[error("resolution must be at least one pixel")]
    #[diagnostic(code(stormtrack::config::zero_resolution))]
    ZeroResolution,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_track_offsets_across_crlf() {
        let ctx = SourceContext::new("<input>", "ab\r\ncd\n\nef");
        let lines: Vec<_> = ctx.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].text, "ab");
        assert_eq!(lines[1].text, "cd");
        assert_eq!(lines[1].offset, 4);
        assert_eq!(lines[2].text, "");
        assert_eq!(lines[3].text, "ef");
        assert_eq!(lines[3].number, 4);
        assert_eq!(lines[3].offset, 8);
    }

    #[test]
    fn line_span_covers_text_only() {
        let ctx = SourceContext::new("<input>", "first\nsecond\n");
        let second = ctx.lines().nth(1).unwrap();
        let span = second.span();
        assert_eq!(span.offset(), 6);
        assert_eq!(span.len(), 6);
    }
}
