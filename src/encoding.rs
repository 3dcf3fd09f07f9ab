//! The [`Encoding`] trait implemented by target encodings.
//!
//! # Example
//!
//! ```
//! use latin1_fallback::{Encoding, Iso8859_1};
//!
//! assert_eq!(Iso8859_1::NAME, "ISO-8859-1");
//! assert!(Iso8859_1::can_encode('é'));
//! assert!(!Iso8859_1::can_encode('≠'));
//!
//! let mut buf = [0u8; 4];
//! assert_eq!(Iso8859_1::try_encode_char('é', &mut buf), Some(1));
//! assert_eq!(buf[0], 0xE9);
//! assert_eq!(Iso8859_1::try_encode_char('≠', &mut buf), None);
//! ```

/// A trait defining a character encoding.
///
/// Implementors are zero-sized types (ZSTs) that serve as type-level markers
/// for an encoding. All encoding operations are static methods.
pub trait Encoding: Sized + 'static {
    /// The human-readable name of this encoding (e.g., "ISO-8859-1").
    const NAME: &'static str;

    /// The character substituted for unmappable input when no replacement is configured.
    const DEFAULT_REPLACEMENT: char = '?';

    /// Decodes a character starting at the given byte offset.
    ///
    /// Returns `Some((char, next_offset))`, or `None` if no valid character
    /// starts at `offset`.
    fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)>;

    /// Attempts to encode a character into the given buffer.
    ///
    /// Returns `Some(bytes_written)` if the character can be represented in this
    /// encoding, or `None` if it is outside the encoding's repertoire.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is too small to hold the encoded character. Four
    /// bytes always suffice.
    fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize>;

    /// Returns `true` if this encoding can represent the given character.
    fn can_encode(c: char) -> bool {
        let mut buf = [0u8; 4];
        Self::try_encode_char(c, &mut buf).is_some()
    }
}
