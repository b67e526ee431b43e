//! Output backends for formatted diagnostics.

use std::io::{self, Write};

use crate::format::FormattedDiagnostic;

/// Trait for writing a batch of formatted diagnostics to an output stream.
///
/// Implementations format diagnostics for different targets: compiler-style
/// text lines that editors can jump through, or a JSON array. Write and
/// serialization failures are returned to the caller.
pub trait OutputRenderer {
    /// Writes all diagnostics to `out`.
    fn render_all(
        &self,
        out: &mut dyn Write,
        diagnostics: &[FormattedDiagnostic],
    ) -> io::Result<()>;
}

/// Renders one line per diagnostic in `file:line: severity: message` form.
///
/// Multi-line messages have their continuation lines indented by four
/// spaces so that every diagnostic starts at column zero.
pub struct TextRenderer;

impl OutputRenderer for TextRenderer {
    fn render_all(
        &self,
        out: &mut dyn Write,
        diagnostics: &[FormattedDiagnostic],
    ) -> io::Result<()> {
        for diag in diagnostics {
            let mut lines = diag.message.lines();
            let first = lines.next().unwrap_or_default();
            writeln!(out, "{}:{}: {}: {}", diag.file, diag.line, diag.severity, first)?;
            for rest in lines {
                writeln!(out, "    {rest}")?;
            }
        }
        Ok(())
    }
}

/// Renders diagnostics as a pretty-printed JSON array followed by a newline.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render_all(
        &self,
        out: &mut dyn Write,
        diagnostics: &[FormattedDiagnostic],
    ) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, diagnostics).map_err(io::Error::from)?;
        writeln!(out)
    }
}
