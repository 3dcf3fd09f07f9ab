//! One-call conversions between Unicode text and ISO-8859-1.
//!
//! Each `encode_*` function returns the string ISO-8859-1 retains under one
//! [`Fallback`](crate::Fallback): characters in the repertoire come back unchanged and the
//! rest are replaced, dropped or escaped.
//!
//! # Example
//!
//! ```
//! use latin1_fallback::convert;
//!
//! assert_eq!(convert::encode_with_replacement("x ≠ y", '!'), "x ! y");
//! assert_eq!(convert::encode_with_replacement("x ≠ y", '≈'), "x ≈ y");
//! assert_eq!(convert::encode_ignore("x ≠ y"), "x  y");
//! assert_eq!(convert::encode_with_default_replacement("x ≠ y"), "x ? y");
//! assert_eq!(convert::encode_with_unicode_escape("x ≠ y"), "x U+2260 y");
//! ```

use tracing::debug;

use crate::encoder::Encoder;
use crate::encoding::Encoding;
use crate::iso8859_1::Iso8859_1;

/// Replaces every character outside ISO-8859-1 with `replacement`.
///
/// The output has exactly as many chars as the input. `replacement` may be
/// any character, including one ISO-8859-1 cannot hold; for byte output use
/// an [`Encoder`] with [`Fallback::Replace`](crate::Fallback::Replace), which
/// requires it to be encodable.
pub fn encode_with_replacement(text: &str, replacement: char) -> String {
    let mut substituted = 0usize;
    let out: String = text
        .chars()
        .map(|c| {
            if Iso8859_1::can_encode(c) {
                c
            } else {
                substituted += 1;
                replacement
            }
        })
        .collect();
    if substituted > 0 {
        debug!(substituted, ?replacement, "replaced unencodable characters");
    }
    out
}

/// Drops every character outside ISO-8859-1.
pub fn encode_ignore(text: &str) -> String {
    decode_latin1(&encode_ignore_bytes(text))
}

/// Drops every character outside ISO-8859-1, returning the encoded bytes.
pub fn encode_ignore_bytes(text: &str) -> Vec<u8> {
    Encoder::IGNORE.encode(text)
}

/// Replaces every character outside ISO-8859-1 with `?`.
pub fn encode_with_default_replacement(text: &str) -> String {
    decode_latin1(&Encoder::DEFAULT.encode(text))
}

/// Writes every character outside ISO-8859-1 as `U+` and its lowercase hex
/// code point, e.g. `U+2260`.
///
/// A literal `?` in the input is kept as is.
pub fn encode_with_unicode_escape(text: &str) -> String {
    decode_latin1(&Encoder::ESCAPE.encode(text))
}

/// Decodes ISO-8859-1 bytes. Every byte is a character, so this cannot fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    Encoder::DEFAULT.decode(bytes)
}

/// Returns `true` if `text` survives an ISO-8859-1 round trip unchanged.
pub fn is_lossless(text: &str) -> bool {
    text.chars().all(Iso8859_1::can_encode)
}
