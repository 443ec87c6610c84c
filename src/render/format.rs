//! Inline text formatting for groff output.
//!
//! Backslash is the only character roff treats specially in running text
//! here, so escaping doubles it and leaves everything else alone. Callers
//! escape each logical segment exactly once.

use std::io::{self, Write};

/// Escape backslashes so text can be embedded in roff source.
pub(super) fn man_quote(text: &str) -> String {
    text.replace('\\', "\\\\")
}

/// Translate `` `...' `` spans into bold runs, escaping each segment.
///
/// An opening backtick with no closing apostrophe is not an error: the
/// remainder is emitted literally, backtick included.
pub(super) fn format_for_man(w: &mut dyn Write, text: &str) -> io::Result<()> {
    let mut rest = text;
    loop {
        let Some(open) = rest.find('`') else {
            return write!(w, "{}", man_quote(rest));
        };
        write!(w, "{}", man_quote(&rest[..open]))?;

        let tail = &rest[open + 1..];
        let Some(close) = tail.find('\'') else {
            return write!(w, "{}", man_quote(&rest[open..]));
        };
        write!(w, "\\fB{}\\fP", man_quote(&tail[..close]))?;
        rest = &tail[close + 1..];
    }
}

/// Quote each value that would be ambiguous once joined into a list.
pub(super) fn quote_values(values: &[String]) -> Vec<String> {
    values.iter().map(|v| quote_if_needed(v)).collect()
}

fn quote_if_needed(value: &str) -> String {
    if !value.contains('"') && !value.contains(' ') {
        return value.to_string();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}
