//! Encoding text into a limited encoding with a fallback action.
//!
//! An [`Encoder`] is a small immutable value: the target encoding is a type
//! parameter and the [`Fallback`] is validated once, at construction.
//!
//! # Example
//!
//! ```
//! use latin1_fallback::{Encoder, Fallback};
//!
//! let encoder = Encoder::latin1(Fallback::Escape).unwrap();
//! assert_eq!(encoder.encode("x ≠ y"), b"x U+2260 y");
//!
//! let strict = Encoder::latin1(Fallback::Default).unwrap();
//! assert!(strict.try_encode("x ≠ y").is_err());
//! assert_eq!(strict.try_encode("café").unwrap(), b"caf\xE9");
//! ```

use core::fmt;
use core::marker::PhantomData;

use tracing::{debug, trace};

use crate::encoding::Encoding;
use crate::error::Error;
use crate::fallback::Fallback;
use crate::iso8859_1::Iso8859_1;

/// Stands in for an invalid UTF-8 sequence.
const MALFORMED_UTF8: u32 = char::REPLACEMENT_CHARACTER as u32;

/// One logical input unit: a scalar value, or a malformed sequence carrying
/// the value used when it is escaped.
#[derive(Debug, Clone, Copy)]
enum Unit {
    Char(char),
    Malformed(u32),
}

/// Encodes text into `E`, applying a [`Fallback`] to anything `E` cannot hold.
pub struct Encoder<E: Encoding = Iso8859_1> {
    fallback: Fallback,
    _marker: PhantomData<E>,
}

impl Encoder<Iso8859_1> {
    /// Substitutes `?`.
    pub const DEFAULT: Self = Self::unchecked(Fallback::Default);
    /// Drops unencodable characters.
    pub const IGNORE: Self = Self::unchecked(Fallback::Ignore);
    /// Writes `U+<hex>` for unencodable characters.
    pub const ESCAPE: Self = Self::unchecked(Fallback::Escape);

    const fn unchecked(fallback: Fallback) -> Self {
        Self {
            fallback,
            _marker: PhantomData,
        }
    }

    /// Creates an ISO-8859-1 encoder.
    pub fn latin1(fallback: Fallback) -> Result<Self, Error> {
        Self::new(fallback)
    }
}

impl<E: Encoding> Encoder<E> {
    /// Creates an encoder with the given fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnencodableReplacement`] if the fallback substitutes a
    /// character that `E` cannot itself represent.
    pub fn new(fallback: Fallback) -> Result<Self, Error> {
        if let Some(replacement) = fallback.replacement(E::DEFAULT_REPLACEMENT) {
            if !E::can_encode(replacement) {
                return Err(Error::UnencodableReplacement {
                    replacement,
                    encoding: E::NAME,
                });
            }
        }
        Ok(Self {
            fallback,
            _marker: PhantomData,
        })
    }

    /// Returns the configured fallback.
    #[inline]
    pub fn fallback(&self) -> Fallback {
        self.fallback
    }

    /// Encodes a string, applying the fallback to unrepresentable characters.
    pub fn encode(&self, s: &str) -> Vec<u8> {
        self.encode_units(s.len(), s.chars().map(Unit::Char))
    }

    /// Encodes UTF-16 code units.
    ///
    /// Surrogate pairs are combined into one code point. An unpaired
    /// surrogate is malformed input and goes through the fallback like an
    /// unrepresentable character; [`Fallback::Escape`] renders its own value.
    pub fn encode_utf16(&self, units: &[u16]) -> Vec<u8> {
        let decoded = char::decode_utf16(units.iter().copied()).map(|r| match r {
            Ok(c) => Unit::Char(c),
            Err(e) => Unit::Malformed(u32::from(e.unpaired_surrogate())),
        });
        self.encode_units(units.len(), decoded)
    }

    /// Encodes bytes that should be UTF-8.
    ///
    /// Each maximal invalid sequence counts as one malformed character and is
    /// handled as U+FFFD would be.
    pub fn encode_utf8(&self, bytes: &[u8]) -> Vec<u8> {
        let units = bytes.utf8_chunks().flat_map(|chunk| {
            let malformed = (!chunk.invalid().is_empty()).then_some(Unit::Malformed(MALFORMED_UTF8));
            chunk.valid().chars().map(Unit::Char).chain(malformed)
        });
        self.encode_units(bytes.len(), units)
    }

    /// Encodes a string, failing on the first unrepresentable character.
    ///
    /// The fallback is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unmappable`] with the character and its index in chars.
    pub fn try_encode(&self, s: &str) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(s.len());
        let mut buf = [0u8; 4];
        for (index, c) in s.chars().enumerate() {
            let len = E::try_encode_char(c, &mut buf).ok_or(Error::Unmappable {
                character: c,
                index,
                encoding: E::NAME,
            })?;
            out.extend_from_slice(&buf[..len]);
        }
        Ok(out)
    }

    /// Strict counterpart of [`Encoder::encode_utf16`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnpairedSurrogate`] for malformed input and
    /// [`Error::Unmappable`] for characters outside the repertoire.
    pub fn try_encode_utf16(&self, units: &[u16]) -> Result<Vec<u8>, Error> {
        let mut out = Vec::with_capacity(units.len());
        let mut buf = [0u8; 4];
        let mut unit_index = 0;
        for (index, r) in char::decode_utf16(units.iter().copied()).enumerate() {
            let c = r.map_err(|e| Error::UnpairedSurrogate {
                unit: e.unpaired_surrogate(),
                index: unit_index,
            })?;
            let len = E::try_encode_char(c, &mut buf).ok_or(Error::Unmappable {
                character: c,
                index,
                encoding: E::NAME,
            })?;
            out.extend_from_slice(&buf[..len]);
            unit_index += c.len_utf16();
        }
        Ok(out)
    }

    /// Strict counterpart of [`Encoder::encode_utf8`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Malformed`] if `bytes` is not UTF-8, otherwise as
    /// [`Encoder::try_encode`].
    pub fn try_encode_utf8(&self, bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let s = core::str::from_utf8(bytes).map_err(crate::error::EncodingError::from)?;
        self.try_encode(s)
    }

    /// Decodes bytes in `E` into a string.
    ///
    /// Bytes that do not decode are skipped.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        let mut offset = 0;
        while offset < bytes.len() {
            match E::decode_char_at(bytes, offset) {
                Some((c, next)) => {
                    out.push(c);
                    offset = next;
                }
                None => offset += 1,
            }
        }
        out
    }

    fn encode_units(&self, size_hint: usize, units: impl Iterator<Item = Unit>) -> Vec<u8> {
        let mut out = Vec::with_capacity(size_hint);
        let mut buf = [0u8; 4];
        let mut substituted = 0usize;

        for unit in units {
            if let Unit::Char(c) = unit {
                if let Some(len) = E::try_encode_char(c, &mut buf) {
                    out.extend_from_slice(&buf[..len]);
                    continue;
                }
            }
            substituted += 1;
            self.apply_fallback(unit, &mut out);
        }

        if substituted > 0 {
            debug!(
                encoding = E::NAME,
                fallback = %self.fallback,
                substituted,
                "applied fallback to unencodable input"
            );
        }
        out
    }

    fn apply_fallback(&self, unit: Unit, out: &mut Vec<u8>) {
        let code_point = match unit {
            Unit::Char(c) => c as u32,
            Unit::Malformed(value) => value,
        };
        trace!(code_point, fallback = %self.fallback, "unencodable");

        match self.fallback {
            Fallback::Ignore => {}
            Fallback::Escape => push_str::<E>(&format!("U+{:x}", code_point), out),
            Fallback::Default => push_char::<E>(E::DEFAULT_REPLACEMENT, out),
            Fallback::Replace(c) => push_char::<E>(c, out),
        }
    }
}

/// Pushes a character already known to be representable in `E`.
fn push_char<E: Encoding>(c: char, out: &mut Vec<u8>) {
    let mut buf = [0u8; 4];
    if let Some(len) = E::try_encode_char(c, &mut buf) {
        out.extend_from_slice(&buf[..len]);
    }
}

fn push_str<E: Encoding>(s: &str, out: &mut Vec<u8>) {
    for c in s.chars() {
        push_char::<E>(c, out);
    }
}

impl<E: Encoding> Clone for Encoder<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: Encoding> Copy for Encoder<E> {}

impl<E: Encoding> fmt::Debug for Encoder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder")
            .field("encoding", &E::NAME)
            .field("fallback", &self.fallback)
            .finish()
    }
}

impl<E: Encoding> PartialEq for Encoder<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fallback == other.fallback
    }
}

impl<E: Encoding> Eq for Encoder<E> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn latin1(fallback: Fallback) -> Encoder {
        Encoder::latin1(fallback).unwrap()
    }

    #[test]
    fn test_new_rejects_unencodable_replacement() {
        let err = Encoder::latin1(Fallback::Replace('€')).unwrap_err();
        assert_eq!(
            err,
            Error::UnencodableReplacement {
                replacement: '€',
                encoding: "ISO-8859-1",
            }
        );
        assert!(Encoder::latin1(Fallback::Replace('¤')).is_ok());
    }

    #[test]
    fn test_encode_each_fallback() {
        let input = "x ≠ y";
        assert_eq!(latin1(Fallback::Default).encode(input), b"x ? y");
        assert_eq!(latin1(Fallback::Replace('!')).encode(input), b"x ! y");
        assert_eq!(latin1(Fallback::Ignore).encode(input), b"x  y");
        assert_eq!(latin1(Fallback::Escape).encode(input), b"x U+2260 y");
    }

    #[test]
    fn test_encode_default_bytes() {
        assert_eq!(
            latin1(Fallback::Default).encode("x ≠ y"),
            [120, 32, 63, 32, 121]
        );
    }

    #[test]
    fn test_escape_supplementary_plane() {
        assert_eq!(latin1(Fallback::Escape).encode("a😀b"), b"aU+1f600b");
    }

    #[test]
    fn test_encode_utf16_pairs_and_lone_surrogates() {
        let units: Vec<u16> = "a😀b".encode_utf16().collect();
        assert_eq!(latin1(Fallback::Replace('#')).encode_utf16(&units), b"a#b");

        let lone = [u16::from(b'a'), 0xD800, u16::from(b'b')];
        assert_eq!(latin1(Fallback::Replace('#')).encode_utf16(&lone), b"a#b");
        assert_eq!(latin1(Fallback::Ignore).encode_utf16(&lone), b"ab");
        assert_eq!(latin1(Fallback::Default).encode_utf16(&lone), b"a?b");
        assert_eq!(latin1(Fallback::Escape).encode_utf16(&lone), b"aU+d800b");
    }

    #[test]
    fn test_encode_utf8_malformed() {
        let bytes = b"a\xFF\xFEb\xC3";
        assert_eq!(latin1(Fallback::Default).encode_utf8(bytes), b"a??b?");
        assert_eq!(latin1(Fallback::Ignore).encode_utf8(bytes), b"ab");
        assert_eq!(latin1(Fallback::Escape).encode_utf8(b"a\xFFb"), b"aU+fffdb");
        assert_eq!(latin1(Fallback::Default).encode_utf8("é≠".as_bytes()), b"\xE9?");
    }

    #[test]
    fn test_try_encode() {
        let encoder = latin1(Fallback::Ignore);
        assert_eq!(encoder.try_encode("ÿes").unwrap(), b"\xFFes");
        assert_eq!(
            encoder.try_encode("ab≠").unwrap_err(),
            Error::Unmappable {
                character: '≠',
                index: 2,
                encoding: "ISO-8859-1",
            }
        );
    }

    #[test]
    fn test_try_encode_utf16() {
        let encoder = latin1(Fallback::Default);
        assert_eq!(encoder.try_encode_utf16(&[0x68, 0xE9]).unwrap(), b"h\xE9");

        let err = encoder.try_encode_utf16(&[0x61, 0xDC00]).unwrap_err();
        assert_eq!(err, Error::UnpairedSurrogate { unit: 0xDC00, index: 1 });

        let units: Vec<u16> = "😀x≠".encode_utf16().collect();
        let err = latin1(Fallback::Default).try_encode_utf16(&units).unwrap_err();
        assert!(matches!(err, Error::Unmappable { character: '😀', index: 0, .. }));

        let units: Vec<u16> = "é\u{D7FF}".encode_utf16().collect();
        let err = encoder.try_encode_utf16(&units).unwrap_err();
        assert!(matches!(err, Error::Unmappable { index: 1, .. }));
    }

    #[test]
    fn test_try_encode_utf16_index_after_pair() {
        // Index counts code units, not chars.
        let units = [0xE9, 0x41, 0x42, 0xDBFF];
        assert_eq!(
            latin1(Fallback::Default).try_encode_utf16(&units).unwrap_err(),
            Error::UnpairedSurrogate { unit: 0xDBFF, index: 3 }
        );
    }

    #[test]
    fn test_try_encode_utf8() {
        let encoder = latin1(Fallback::Default);
        assert_eq!(encoder.try_encode_utf8("café".as_bytes()).unwrap(), b"caf\xE9");

        let err = encoder.try_encode_utf8(b"ab\xFF").unwrap_err();
        assert_eq!(err, Error::Malformed(crate::EncodingError::new(2, Some(1))));
    }

    #[test]
    fn test_decode() {
        let encoder = latin1(Fallback::Default);
        assert_eq!(encoder.decode(b"caf\xE9 \xFF"), "café ÿ");
        assert_eq!(encoder.decode(&[]), "");
    }

    #[test]
    fn test_debug_and_copy() {
        let encoder = latin1(Fallback::Escape);
        let copy = encoder;
        assert_eq!(encoder, copy);
        assert_eq!(copy.fallback(), Fallback::Escape);
        assert_eq!(
            format!("{:?}", encoder),
            "Encoder { encoding: \"ISO-8859-1\", fallback: Escape }"
        );
    }
}
