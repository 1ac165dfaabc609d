//! Error presentation: source-context snippets and JSON rendering.
//!
//! Errors themselves stay plain data ([`crate::lex_error`]); everything
//! here derives a view from an error plus the source text, so presentation
//! choices never leak into error identity.

use serde_json::{json, Value as Json};

use crate::lex_error::LexError;

/// Default number of context lines above and below the error line.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Render a source-context block for an error.
///
/// Shows up to `context_lines` lines on either side of the error line,
/// each prefixed with a right-aligned line number. The error line is
/// marked with `> ` and followed by a caret under the error column (for
/// columns past the first, matching the historical renderer).
///
/// Returns `None` when the error carries no line (file-level failures) or
/// the source is empty.
pub fn render_snippet(
    error: &LexError,
    source_lines: &[&str],
    context_lines: usize,
) -> Option<String> {
    if error.line == 0 || source_lines.is_empty() {
        return None;
    }
    let line = error.line as usize;
    let start = line.saturating_sub(context_lines + 1);
    let end = source_lines.len().min(line + context_lines);

    let mut out = Vec::new();
    for (i, text) in source_lines.iter().enumerate().take(end).skip(start) {
        let number = i + 1;
        let prefix = if number == line { "> " } else { "  " };
        out.push(format!("{prefix}{number:4}: {text}"));
        if number == line && error.column > 0 {
            let pad = prefix.len() + 6 + error.column as usize - 1;
            out.push(format!("{}^", " ".repeat(pad)));
        }
    }
    Some(out.join("\n"))
}

/// Full report: the error's display line plus its source context, if any.
pub fn formatted_message(error: &LexError, source_lines: &[&str]) -> String {
    match render_snippet(error, source_lines, DEFAULT_CONTEXT_LINES) {
        Some(snippet) => format!("{error}\n\nSource context:\n{snippet}"),
        None => error.to_string(),
    }
}

/// JSON rendering of an error, with an optional pre-rendered snippet.
pub fn to_json(error: &LexError, source_context: Option<&str>) -> Json {
    let mut value = json!({
        "type": format!("{:?}", error.kind),
        "code": error.code(),
        "message": error.message,
        "line": error.line,
        "column": error.column,
    });
    if let Some(snippet) = source_context {
        value["source_context"] = Json::String(snippet.to_owned());
    }
    value
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
