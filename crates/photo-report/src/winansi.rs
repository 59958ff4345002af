//! WinAnsiEncoding (Windows-1252) for the built-in PDF fonts
//!
//! The standard Type1 fonts are declared with `/WinAnsiEncoding`, so every
//! string shown with them must be one byte per glyph in that code page.
//! Characters outside it become `?`.

/// Byte shown in place of characters WinAnsi cannot represent
pub const REPLACEMENT: u8 = b'?';

/// Text converted to WinAnsi bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinAnsiText {
    pub bytes: Vec<u8>,
    /// Characters that had no WinAnsi code and were replaced
    pub replaced: usize,
}

/// WinAnsi code of `ch`, if it has one
pub fn encode_char(ch: char) -> Option<u8> {
    let byte = match ch {
        '\u{0020}'..='\u{007E}' => ch as u8,
        '\u{00A0}'..='\u{00FF}' => ch as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Byte drawn for `ch`, substituting [`REPLACEMENT`]
pub fn encode_char_lossy(ch: char) -> u8 {
    encode_char(ch).unwrap_or(REPLACEMENT)
}

/// Convert `text` to WinAnsi, one byte per character
pub fn encode(text: &str) -> WinAnsiText {
    let mut replaced = 0;
    let bytes = text
        .chars()
        .map(|ch| {
            encode_char(ch).unwrap_or_else(|| {
                replaced += 1;
                REPLACEMENT
            })
        })
        .collect();
    WinAnsiText { bytes, replaced }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin1_letters_are_single_bytes() {
        let encoded = encode("São João");
        assert_eq!(encoded.bytes, b"S\xE3o Jo\xE3o");
        assert_eq!(encoded.replaced, 0);

        assert_eq!(encode("ÁREA").bytes, b"\xC1REA");
        assert_eq!(encode_char('ç'), Some(0xE7));
    }

    #[test]
    fn test_cp1252_punctuation() {
        assert_eq!(encode_char('€'), Some(0x80));
        assert_eq!(encode_char('–'), Some(0x96));
        assert_eq!(encode_char('“'), Some(0x93));
    }

    #[test]
    fn test_unmappable_characters_are_replaced() {
        let encoded = encode("Łódź 東京");
        // Ł, ź and both kanji have no WinAnsi code; ó does
        assert_eq!(encoded.bytes, b"?\xF3d? ??");
        assert_eq!(encoded.replaced, 4);
        assert_eq!(encode_char('\n'), None);
    }
}
