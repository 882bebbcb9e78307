//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;
use std::path::Path;

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use super::Diagnostics;
use crate::{Error, MetadataCause};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d> {
    diagnostics: &'d Diagnostics,
    artifact: Option<&'d str>,
}

impl<'d> DiagnosticsPrinter<'d> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            artifact: None,
        }
    }

    /// Prefix every line with the artifact it came from.
    pub fn artifact(mut self, name: &'d str) -> Self {
        self.artifact = Some(name);
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        for diag in self.diagnostics {
            match self.artifact {
                Some(name) => writeln!(w, "[{name}] {diag}")?,
                None => writeln!(w, "{diag}")?,
            }
        }
        Ok(())
    }
}

/// Render a fatal error for the terminal.
///
/// Malformed descriptor sets get an annotated snippet pointing at the
/// offending position; everything else is a single line.
pub fn render_error(error: &Error, colored: bool) -> String {
    let Error::MetadataUnavailable {
        path,
        cause: MetadataCause::Malformed { error: parse, source_text },
    } = error
    else {
        return format!("error: {error}");
    };

    let renderer = if colored {
        Renderer::styled()
    } else {
        Renderer::plain()
    };

    let path = path_label(path);
    let offset = byte_offset(source_text, parse.line(), parse.column());
    let range = char_span(source_text, offset);
    let label = parse.to_string();

    let snippet = Snippet::source(source_text.as_str())
        .line_start(1)
        .path(path.as_str())
        .annotation(AnnotationKind::Primary.span(range).label(&label));

    let title = format!("malformed descriptor set `{path}`");
    let report = vec![Level::ERROR.primary_title(&title).element(snippet)];
    renderer.render(&report).to_string()
}

fn path_label(path: &Path) -> String {
    path.display().to_string()
}

/// Convert a 1-based line/column pair to a byte offset, clamped to the source.
pub(super) fn byte_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (i, text) in source.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(source.len());
        }
        offset += text.len();
    }
    source.len()
}

/// The whole character at `offset`, snapped back to a char boundary.
///
/// annotate-snippets slices the source with the span, so both ends must
/// sit on boundaries even when the offset lands inside a multi-byte char.
pub(super) fn char_span(source: &str, offset: usize) -> std::ops::Range<usize> {
    let mut start = offset.min(source.len());
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    start..end
}
