//! Positional argument substitution for bound message text.
//!
//! Bundle texts use `{0}`, `{1}`, ... placeholders, e.g.
//! `GuiBuilder_MISSING_TEXTURE=Texture '{0}' is not declared`. Single quotes
//! escape: `''` is a literal quote and a quoted span is copied verbatim.

use std::fmt::{self, Write};

/// Rendered in place of `{N}` when fewer than `N + 1` arguments are given.
pub const MISSING_ARGUMENT: &str = "<missing argument>";

/// Substitutes positional arguments into `template`.
///
/// Malformed placeholders (`{`, `{x}`) are copied as-is rather than
/// rejected; a message that fails to format must not hide the diagnostic it
/// was meant to carry.
///
/// ```
/// use msgbind::core::format_message;
///
/// assert_eq!(
///     format_message("Texture {0} missing in {1}", &["atlas", "main.gui"]),
///     "Texture atlas missing in main.gui"
/// );
/// assert_eq!(format_message("it''s '{0}'", &["x"]), "it's {0}");
/// ```
pub fn format_message<S: fmt::Display>(template: &str, args: &[S]) -> String {
    let mut out = String::with_capacity(template.len() + args.len() * 8);
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '\'']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after_quote) = tail.strip_prefix('\'') {
            if let Some(after) = after_quote.strip_prefix('\'') {
                out.push('\'');
                rest = after;
            } else if let Some(end) = after_quote.find('\'') {
                out.push_str(&after_quote[..end]);
                rest = &after_quote[end + 1..];
            } else {
                // Unterminated quote: the remainder is literal.
                out.push_str(after_quote);
                rest = "";
            }
            continue;
        }

        // tail starts with '{'
        match tail[1..].find('}') {
            Some(end) => {
                let inner = &tail[1..1 + end];
                match inner.trim().parse::<usize>() {
                    Ok(index) => match args.get(index) {
                        Some(arg) => {
                            let _ = write!(out, "{}", arg);
                        }
                        None => out.push_str(MISSING_ARGUMENT),
                    },
                    Err(_) => out.push_str(&tail[..end + 2]),
                }
                rest = &tail[end + 2..];
            }
            None => {
                out.push_str(tail);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}
