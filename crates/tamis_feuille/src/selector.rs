//! Class selector extraction.

use std::borrow::Cow;

/// Class names referenced by a selector, in order of appearance.
///
/// Pseudo-class and pseudo-element suffixes are stripped (`.p-4:hover` gives
/// `p-4`), CSS escapes are decoded (`.md\:flex` gives `md:flex`), and dots
/// inside attribute selectors, strings or comments are ignored.
pub fn class_names(selector: &str) -> Vec<Cow<'_, str>> {
    let bytes = selector.as_bytes();
    let mut out = Vec::new();
    let mut bracket_depth = 0u32;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i = decode_escape(selector, i).1,
            b'"' | b'\'' => i = skip_string(bytes, i),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_comment(bytes, i),
            b'[' => {
                bracket_depth += 1;
                i += 1;
            }
            b']' => {
                bracket_depth = bracket_depth.saturating_sub(1);
                i += 1;
            }
            b'.' if bracket_depth == 0 => {
                let (name, next) = read_ident(selector, i + 1);
                if !name.is_empty() {
                    out.push(name);
                }
                i = next;
            }
            _ => i += 1,
        }
    }

    out
}

/// Whether a class-free selector is base styling kept in critical CSS.
pub fn has_base_marker(selector: &str) -> bool {
    selector.contains(":root")
        || selector.contains('*')
        || selector.contains("html")
        || selector.contains("body")
}

#[inline]
fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b >= 0x80
}

/// Read an identifier starting at `start`; returns it and the offset after it.
fn read_ident(s: &str, start: usize) -> (Cow<'_, str>, usize) {
    let bytes = s.as_bytes();
    let mut owned: Option<String> = None;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\\' {
            let (ch, next) = decode_escape(s, i);
            owned
                .get_or_insert_with(|| s[start..i].to_string())
                .push(ch);
            i = next;
        } else if is_ident_byte(b) {
            let ch = s[i..].chars().next().unwrap_or_default();
            if let Some(buf) = owned.as_mut() {
                buf.push(ch);
            }
            i += ch.len_utf8();
        } else {
            break;
        }
    }

    let name = match owned {
        Some(buf) => Cow::Owned(buf),
        None => Cow::Borrowed(&s[start..i]),
    };
    (name, i)
}

/// Decode the escape at `pos` (a backslash); returns the char and the offset after it.
fn decode_escape(s: &str, pos: usize) -> (char, usize) {
    let bytes = s.as_bytes();
    let mut i = pos + 1;
    if i >= bytes.len() {
        return (char::REPLACEMENT_CHARACTER, bytes.len());
    }

    if bytes[i].is_ascii_hexdigit() {
        let hex_start = i;
        while i < bytes.len() && i - hex_start < 6 && bytes[i].is_ascii_hexdigit() {
            i += 1;
        }
        let value = u32::from_str_radix(&s[hex_start..i], 16).unwrap_or(0);
        // A single whitespace terminates a hex escape
        if i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let ch = match char::from_u32(value) {
            Some(c) if value != 0 => c,
            _ => char::REPLACEMENT_CHARACTER,
        };
        return (ch, i);
    }

    let ch = s[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
    (ch, i + ch.len_utf8())
}

fn skip_string(bytes: &[u8], pos: usize) -> usize {
    let quote = bytes[pos];
    let mut i = pos + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_comment(bytes: &[u8], pos: usize) -> usize {
    match memchr::memmem::find(&bytes[pos + 2..], b"*/") {
        Some(rel) => pos + 2 + rel + 2,
        None => bytes.len(),
    }
}
