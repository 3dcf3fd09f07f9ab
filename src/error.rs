use core::fmt;

/// Where [`Encoder::try_encode_utf8`](crate::Encoder::try_encode_utf8) found
/// input that is not UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError {
    valid_up_to: usize,
    error_len: Option<usize>,
}

impl EncodingError {
    /// Creates a new encoding error.
    #[inline]
    pub const fn new(valid_up_to: usize, error_len: Option<usize>) -> Self {
        Self {
            valid_up_to,
            error_len,
        }
    }

    /// Length of the valid UTF-8 prefix.
    #[inline]
    pub const fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Length of the invalid sequence, or `None` if the input ends mid-sequence.
    #[inline]
    pub const fn error_len(&self) -> Option<usize> {
        self.error_len
    }
}

impl From<core::str::Utf8Error> for EncodingError {
    fn from(e: core::str::Utf8Error) -> Self {
        Self::new(e.valid_up_to(), e.error_len())
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_len {
            Some(len) => write!(f, "{} invalid UTF-8 byte(s) at {}", len, self.valid_up_to),
            None => write!(f, "truncated UTF-8 sequence at {}", self.valid_up_to),
        }
    }
}

impl std::error::Error for EncodingError {}

fn code_point(c: &char) -> u32 {
    *c as u32
}

/// Errors raised while configuring an encoder or encoding strictly.
///
/// Encoding with a [`Fallback`](crate::Fallback) never produces an error;
/// only the `try_*` operations and configuration do.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The configured replacement character is itself outside the target repertoire.
    #[error("replacement character {replacement:?} (U+{:04X}) cannot be encoded in {encoding}", code_point(.replacement))]
    UnencodableReplacement {
        /// The rejected replacement.
        replacement: char,
        /// Name of the target encoding.
        encoding: &'static str,
    },

    /// A fallback name could not be parsed.
    #[error("unknown fallback {name:?} (expected default, ignore, escape or replace=<char>)")]
    UnknownFallback {
        /// The unparsed input.
        name: String,
    },

    /// A character cannot be represented in the target encoding.
    #[error("character {character:?} (U+{:04X}) at index {index} cannot be encoded in {encoding}", code_point(.character))]
    Unmappable {
        /// The character that couldn't be encoded.
        character: char,
        /// The index (in characters) where the error occurred.
        index: usize,
        /// Name of the target encoding.
        encoding: &'static str,
    },

    /// A UTF-16 surrogate without its partner.
    #[error("unpaired surrogate 0x{unit:04X} at code unit {index}")]
    UnpairedSurrogate {
        /// The lone surrogate code unit.
        unit: u16,
        /// Index of the code unit in the input.
        index: usize,
    },

    /// The input bytes are not valid UTF-8.
    #[error("malformed input: {0}")]
    Malformed(#[from] EncodingError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_error_display() {
        let err = EncodingError::new(3, Some(1));
        assert_eq!(err.to_string(), "1 invalid UTF-8 byte(s) at 3");

        let err = EncodingError::new(2, None);
        assert_eq!(err.to_string(), "truncated UTF-8 sequence at 2");
    }

    #[test]
    fn test_encoding_error_from_utf8_error() {
        let bytes = [b'a', 0xFF, b'b'];
        let utf8 = core::str::from_utf8(&bytes).unwrap_err();
        let err = EncodingError::from(utf8);
        assert_eq!(err.valid_up_to(), 1);
        assert_eq!(err.error_len(), Some(1));
    }

    #[test]
    fn test_unmappable_display() {
        let err = Error::Unmappable {
            character: '≠',
            index: 2,
            encoding: "ISO-8859-1",
        };
        assert_eq!(
            err.to_string(),
            "character '≠' (U+2260) at index 2 cannot be encoded in ISO-8859-1"
        );
    }

    #[test]
    fn test_malformed_from_encoding_error() {
        let err: Error = EncodingError::new(0, Some(1)).into();
        assert!(matches!(err, Error::Malformed(_)));
        assert_eq!(
            err.to_string(),
            "malformed input: 1 invalid UTF-8 byte(s) at 0"
        );
    }
}
