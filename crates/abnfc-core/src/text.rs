//! Byte spans for rule names, literals and provenance labels.
//!
//! A span either borrows from storage the caller keeps alive (usually the
//! grammar source) or owns a private copy that is released with the span.
//! Zero-length spans never own storage: every constructor maps them to
//! [`Text::NULL`].

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

#[derive(Clone)]
pub enum Text<'a> {
    /// View into caller-owned bytes.
    Borrowed(&'a [u8]),
    /// Independently allocated bytes.
    Owned(Box<[u8]>),
}

impl Text<'static> {
    /// The empty span.
    pub const NULL: Self = Text::Borrowed(&[]);
}

impl<'a> Text<'a> {
    pub fn borrowed(bytes: &'a [u8]) -> Self {
        Text::Borrowed(bytes)
    }

    /// Copy `bytes` into a private buffer.
    pub fn owned(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Text::Borrowed(&[]);
        }
        Text::Owned(bytes.into_boxed_slice())
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Text::Borrowed(bytes) => bytes,
            Text::Owned(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Text::Owned(_))
    }

    /// Detach from the borrowed buffer.
    pub fn into_owned(self) -> Text<'static> {
        match self {
            Text::Borrowed(bytes) => Text::owned(bytes),
            Text::Owned(bytes) => Text::Owned(bytes),
        }
    }

    /// ABNF rule names compare case-insensitively.
    pub fn eq_ignore_ascii_case(&self, other: &[u8]) -> bool {
        self.as_bytes().eq_ignore_ascii_case(other)
    }

    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }
}

impl Default for Text<'_> {
    fn default() -> Self {
        Text::Borrowed(&[])
    }
}

impl PartialEq<Text<'_>> for Text<'_> {
    fn eq(&self, other: &Text<'_>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Text<'_> {}

impl PartialEq<str> for Text<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Text<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Hash for Text<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.as_bytes().escape_ascii())
    }
}

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl<'a> From<&'a str> for Text<'a> {
    fn from(s: &'a str) -> Self {
        Text::Borrowed(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Text<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Text::Borrowed(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Text<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Text::Borrowed(bytes)
    }
}

impl From<Vec<u8>> for Text<'_> {
    fn from(bytes: Vec<u8>) -> Self {
        Text::owned(bytes)
    }
}

impl From<String> for Text<'_> {
    fn from(s: String) -> Self {
        Text::owned(s.into_bytes())
    }
}
