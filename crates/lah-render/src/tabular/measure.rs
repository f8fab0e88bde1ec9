//! Escape-aware text measurement, truncation, and padding.
//!
//! Every function here uses the same notion of width: the number of Unicode
//! scalar values left after styling escape sequences are removed. Layout and
//! painting both go through this module so a cell measured at `n` is painted
//! in exactly `n` columns.
//!
//! A recognized sequence is `ESC [ <non-alphabetic>* <alphabetic>`. An `ESC`
//! that does not start a complete sequence is kept and counted as an ordinary
//! character, so malformed input never swallows real content.

use std::borrow::Cow;

const ESC: char = '\x1b';

/// Returns the display width of a string, ignoring escape sequences.
///
/// # Example
///
/// ```rust
/// use lah_render::tabular::measure;
///
/// assert_eq!(measure("hello"), 5);
/// assert_eq!(measure("\x1b[31mRed Text\x1b[0m"), 8);
/// assert_eq!(measure("café"), 4);
/// ```
pub fn measure(s: &str) -> usize {
    let mut width = 0;
    let mut i = 0;
    while i < s.len() {
        if let Some(len) = escape_len(&s[i..]) {
            i += len;
            continue;
        }
        // i always sits on a char boundary here.
        let c = s[i..].chars().next().map_or(1, char::len_utf8);
        i += c;
        width += 1;
    }
    width
}

/// Removes every recognized escape sequence, leaving the visible text.
///
/// Borrows the input when there is nothing to strip.
pub fn strip_escapes(s: &str) -> Cow<'_, str> {
    if !s.contains(ESC) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < s.len() {
        if let Some(len) = escape_len(&s[i..]) {
            i += len;
            continue;
        }
        let c = s[i..].chars().next().unwrap_or(ESC);
        out.push(c);
        i += c.len_utf8();
    }
    Cow::Owned(out)
}

/// Byte length of the escape sequence at the start of `s`, if one is there.
fn escape_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix(ESC)?.strip_prefix('[')?;
    for (offset, c) in rest.char_indices() {
        if c.is_ascii_alphabetic() {
            // ESC and '[' are one byte each.
            return Some(2 + offset + 1);
        }
    }
    None
}

/// Truncates a string from the end so it fits within `max_width`.
///
/// When truncation happens the last visible column holds `ellipsis`. Escape
/// sequences are preserved everywhere, including those after the cut, so a
/// trailing reset still closes any style opened before it.
///
/// # Example
///
/// ```rust
/// use lah_render::tabular::truncate_end;
///
/// assert_eq!(truncate_end("Hello World", 8, "…"), "Hello W…");
/// assert_eq!(truncate_end("Short", 10, "…"), "Short");
/// ```
pub fn truncate_end(s: &str, max_width: usize, ellipsis: &str) -> String {
    if measure(s) <= max_width {
        return s.to_string();
    }

    let ellipsis_width = measure(ellipsis);
    if max_width <= ellipsis_width {
        return take_visible(ellipsis, max_width);
    }

    let keep = max_width - ellipsis_width;
    let mut out = String::with_capacity(s.len() + ellipsis.len());
    let mut visible = 0;
    let mut placed_ellipsis = false;
    let mut i = 0;
    while i < s.len() {
        if let Some(len) = escape_len(&s[i..]) {
            out.push_str(&s[i..i + len]);
            i += len;
            continue;
        }
        let c = s[i..].chars().next().unwrap_or(ESC);
        if visible < keep {
            out.push(c);
            visible += 1;
        } else if !placed_ellipsis {
            out.push_str(ellipsis);
            placed_ellipsis = true;
        }
        i += c.len_utf8();
    }
    if !placed_ellipsis {
        out.push_str(ellipsis);
    }
    out
}

/// Pads a string on the right (left-aligns) to reach `width`.
///
/// Content wider than `width` is returned unchanged.
///
/// ```rust
/// use lah_render::tabular::pad_right;
///
/// assert_eq!(pad_right("42", 5), "42   ");
/// ```
pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(measure(s));
    format!("{}{}", s, " ".repeat(pad))
}

/// Pads a string on the left (right-aligns) to reach `width`.
///
/// ```rust
/// use lah_render::tabular::pad_left;
///
/// assert_eq!(pad_left("42", 5), "   42");
/// ```
pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(measure(s));
    format!("{}{}", " ".repeat(pad), s)
}

/// Pads a string on both sides. An odd leftover space goes on the right.
pub fn pad_center(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(measure(s));
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}

/// First `n` visible characters of `s`, dropping escapes.
fn take_visible(s: &str, n: usize) -> String {
    strip_escapes(s).chars().take(n).collect()
}
