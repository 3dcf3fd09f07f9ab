use crate::encoding::Encoding;

/// ISO-8859-1 (Latin-1) encoding marker.
///
/// Every byte decodes to the code point of the same value, and only code
/// points U+0000 through U+00FF can be encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Iso8859_1;

const MAX_CODE_POINT: u32 = 0xFF;

impl Encoding for Iso8859_1 {
    const NAME: &'static str = "ISO-8859-1";

    #[inline]
    fn decode_char_at(bytes: &[u8], offset: usize) -> Option<(char, usize)> {
        let byte = *bytes.get(offset)?;
        Some((char::from(byte), offset + 1))
    }

    #[inline]
    fn try_encode_char(c: char, buf: &mut [u8]) -> Option<usize> {
        let byte = u8::try_from(c).ok()?;
        buf[0] = byte;
        Some(1)
    }

    #[inline]
    fn can_encode(c: char) -> bool {
        (c as u32) <= MAX_CODE_POINT
    }
}
