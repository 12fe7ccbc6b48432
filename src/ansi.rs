//! Windows-1252 decoding for DFM files that are not UTF-8.
//!
//! Older Delphi versions save forms in the system code page. Bytes
//! 0x00-0x7F and 0xA0-0xFF map to the code point of the same value; the
//! 0x80-0x9F block holds typographic characters. The five unassigned bytes
//! in that block map to the C1 control of the same value.

/// Code points for bytes 0x80 to 0x9F.
const HIGH_CONTROL_BLOCK: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

#[inline]
fn decode_byte(b: u8) -> char {
    match b {
        0x80..=0x9F => HIGH_CONTROL_BLOCK[usize::from(b - 0x80)],
        _ => char::from(b),
    }
}

/// Decodes Windows-1252 bytes. Every byte sequence is valid.
#[must_use]
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes.iter().copied().map(decode_byte).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_unchanged() {
        assert_eq!(decode_windows_1252(b"object A: T\r\nend"), "object A: T\r\nend");
    }

    #[test]
    fn test_latin1_range() {
        assert_eq!(decode_windows_1252(&[0xA9]), "\u{a9}");
        assert_eq!(decode_windows_1252(&[0xE4, 0xFC, 0xFF]), "\u{e4}\u{fc}\u{ff}");
    }

    #[test]
    fn test_high_control_block() {
        assert_eq!(decode_windows_1252(&[0x80]), "\u{20ac}");
        assert_eq!(decode_windows_1252(&[0x96, 0x97]), "\u{2013}\u{2014}");
        assert_eq!(decode_windows_1252(&[0x81]), "\u{81}");
    }
}
