//! Byte classes shared by the parser and the emitters.

#[inline]
pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Printable ASCII without `"`: may appear verbatim inside an ABNF char-val.
#[inline]
pub fn is_token_char(b: u8) -> bool {
    matches!(b, 0x20..=0x21 | 0x23..=0x7e)
}

/// Printable ASCII or a control byte with a standard backslash escape.
#[inline]
pub fn is_escapable(b: u8) -> bool {
    matches!(b, 0x20..=0x7e | 0x00 | 0x07 | 0x08 | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Printable ASCII, space included.
#[inline]
pub fn is_print(b: u8) -> bool {
    matches!(b, 0x20..=0x7e)
}

/// `[A-Za-z][A-Za-z0-9-]*`
pub fn is_rule_name(name: &[u8]) -> bool {
    match name.split_first() {
        Some((first, rest)) => {
            is_alpha(*first) && rest.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'-')
        }
        None => false,
    }
}

/// Split `bytes` into maximal runs of bytes that agree on `class`.
///
/// Yields `(in_class, run)` pairs in order; an empty input yields nothing.
pub fn runs(bytes: &[u8], class: impl Fn(u8) -> bool) -> Vec<(bool, &[u8])> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let kind = class(bytes[start]);
        let len = bytes[start..]
            .iter()
            .position(|&b| class(b) != kind)
            .unwrap_or(bytes.len() - start);
        out.push((kind, &bytes[start..start + len]));
        start += len;
    }
    out
}
