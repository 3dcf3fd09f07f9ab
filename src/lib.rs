//! Encode Unicode text into ISO-8859-1 (Latin-1).
//!
//! ISO-8859-1 holds only code points U+0000 through U+00FF. Everything else
//! goes through a [`Fallback`]: substitute a fixed character, substitute the
//! default `?`, drop it, or write it out as `U+<hex>`.
//!
//! # Example
//!
//! ```
//! use latin1_fallback::{convert, Encoder, Fallback};
//!
//! assert_eq!(convert::encode_with_unicode_escape("? ≠ y"), "? U+2260 y");
//!
//! let encoder = Encoder::latin1(Fallback::Replace('!')).unwrap();
//! assert_eq!(encoder.encode("x ≠ y"), b"x ! y");
//!
//! // Unpaired surrogates are malformed and take the same fallback.
//! assert_eq!(encoder.encode_utf16(&[0x78, 0xD800]), b"x!");
//! ```

#![deny(missing_docs)]

/// Single-call conversions for each fallback.
pub mod convert;
/// The [`Encoder`] type.
pub mod encoder;
/// Encoding trait and related types.
pub mod encoding;
/// Error types for encoding operations.
pub mod error;
/// The [`Fallback`] configuration value.
pub mod fallback;
/// ISO-8859-1 encoding implementation.
pub mod iso8859_1;

pub use convert::{
    decode_latin1, encode_ignore, encode_ignore_bytes, encode_with_default_replacement,
    encode_with_replacement, encode_with_unicode_escape, is_lossless,
};
pub use encoder::Encoder;
pub use encoding::Encoding;
pub use error::{EncodingError, Error};
pub use fallback::Fallback;
pub use iso8859_1::Iso8859_1;

/// Result type for fallible encoding operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
