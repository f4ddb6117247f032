//! Reader for properties-style resource bundles.
//!
//! One `key=value` entry per logical line. Supports `#`/`!` comments,
//! `=`, `:` or whitespace separators, backslash line continuation and the
//! usual escapes including `\uXXXX` (with surrogate pairs).

use std::{fs, path::Path, str::Chars};

use crate::error::{Error, Result};

/// A single `key=value` entry with the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    /// Line number (1-indexed) of the first physical line of the entry.
    pub line: usize,
}

impl PropertyEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            line,
        }
    }
}

/// Read and parse a properties file. The file must be UTF-8.
pub fn parse_properties_file(path: &Path) -> Result<Vec<PropertyEntry>> {
    let bytes = fs::read(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.to_string_lossy();
    let content = String::from_utf8(bytes).map_err(|e| Error::Parse {
        origin: origin.to_string(),
        line: line_of_offset(e.as_bytes(), e.utf8_error().valid_up_to()),
        message: "file is not valid UTF-8".to_string(),
    })?;
    parse_properties(&content, &origin)
}

/// Parse properties text. `origin` only labels errors.
///
/// Entries are returned in file order; repeated keys are kept so callers can
/// decide how to treat them.
pub fn parse_properties(content: &str, origin: &str) -> Result<Vec<PropertyEntry>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut entries = Vec::new();

    let mut logical = String::new();
    let mut start_line = 0;
    let mut continuing = false;

    for (index, raw) in content.split('\n').enumerate() {
        let line_no = index + 1;
        let raw = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = raw.trim_start_matches(is_blank);

        if !continuing {
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            start_line = line_no;
        }

        if ends_with_continuation(trimmed) {
            logical.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
            continue;
        }

        logical.push_str(trimmed);
        continuing = false;
        entries.push(parse_logical_line(&logical, origin, start_line)?);
        logical.clear();
    }

    // A trailing continuation at end of file still yields its entry.
    if continuing {
        entries.push(parse_logical_line(&logical, origin, start_line)?);
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn is_separator(c: char) -> bool {
    matches!(c, '=' | ':')
}

/// True when the line ends in an odd number of backslashes.
fn ends_with_continuation(line: &str) -> bool {
    let count = line.bytes().rev().take_while(|b| *b == b'\\').count();
    count % 2 == 1
}

fn parse_logical_line(line: &str, origin: &str, line_no: usize) -> Result<PropertyEntry> {
    let mut key_end = line.len();
    let mut value_start = line.len();

    let mut chars = line.char_indices();
    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
            continue;
        }
        if is_separator(c) {
            key_end = i;
            value_start = i + c.len_utf8();
            break;
        }
        if is_blank(c) {
            key_end = i;
            // Whitespace may be followed by a single `=` or `:`.
            let rest = line[i..].trim_start_matches(is_blank);
            let offset = line.len() - rest.len();
            value_start = match rest.chars().next() {
                Some(sep) if is_separator(sep) => offset + sep.len_utf8(),
                _ => offset,
            };
            break;
        }
    }

    let raw_key = &line[..key_end];
    let raw_value = line[value_start..].trim_start_matches(is_blank);

    Ok(PropertyEntry {
        key: unescape(raw_key, origin, line_no)?,
        value: unescape(raw_value, origin, line_no)?,
        line: line_no,
    })
}

fn unescape(raw: &str, origin: &str, line_no: usize) -> Result<String> {
    if !raw.contains('\\') {
        return Ok(raw.to_string());
    }

    let parse_error = |message: String| Error::Parse {
        origin: origin.to_string(),
        line: line_no,
        message,
    };

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let unit = read_hex4(&mut chars).map_err(&parse_error)?;
                if (0xD800..0xDC00).contains(&unit) {
                    // High surrogate: must be followed by `\u` + low surrogate.
                    let low = match (chars.next(), chars.next()) {
                        (Some('\\'), Some('u')) => read_hex4(&mut chars).map_err(&parse_error)?,
                        _ => return Err(parse_error(format!("unpaired surrogate \\u{unit:04X}"))),
                    };
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(parse_error(format!("unpaired surrogate \\u{unit:04X}")));
                    }
                    let code = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
                    out.push(char::from_u32(code).ok_or_else(|| {
                        parse_error(format!("invalid code point U+{code:X}"))
                    })?);
                } else {
                    out.push(char::from_u32(unit).ok_or_else(|| {
                        parse_error(format!("unpaired surrogate \\u{unit:04X}"))
                    })?);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn read_hex4(chars: &mut Chars<'_>) -> std::result::Result<u32, String> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("malformed \\u escape: \\u{}", digits));
    }
    u32::from_str_radix(&digits, 16).map_err(|e| e.to_string())
}

fn line_of_offset(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset].iter().filter(|b| **b == b'\n').count() + 1
}
