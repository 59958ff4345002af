//! Glyph widths of the built-in Helvetica faces
//!
//! Widths come from the standard Adobe font metrics, in thousandths of an
//! em. Text is measured as it will be drawn: one WinAnsi byte per character,
//! with unmappable characters measured as `?`.

use crate::winansi::encode_char_lossy;

use super::{FontStyle, TextLine};

/// Helvetica, codes 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0x30
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 0x50
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 0x60
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 0x70
];

/// Helvetica-Bold, codes 0x20..=0x7E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 0x20
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0x30
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 0x40
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 0x50
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 0x60
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 0x70
];

/// Width used for upper-half codes without a closer match
const FALLBACK_WIDTH: u16 = 556;
const FALLBACK_BOLD_WIDTH: u16 = 611;

/// Width of one WinAnsi code in thousandths of an em
fn code_width(code: u8, style: FontStyle) -> u16 {
    let bold = style == FontStyle::Bold;
    let table = if bold {
        &HELVETICA_BOLD_WIDTHS
    } else {
        &HELVETICA_WIDTHS
    };

    match code {
        0x20..=0x7E => table[usize::from(code - 0x20)],
        // Ellipsis, em dash, AE
        0x85 | 0x97 | 0xC6 => 1000,
        // Non-breaking space
        0xA0 => table[0],
        0xD7 | 0xF7 => 584,
        0xE6 => 889,
        _ => match fold_accent(code) {
            Some(base) => table[usize::from(base - 0x20)],
            None if bold => FALLBACK_BOLD_WIDTH,
            None => FALLBACK_WIDTH,
        },
    }
}

/// Unaccented letter sharing the width of an accented Latin-1 letter
fn fold_accent(code: u8) -> Option<u8> {
    let base = match code {
        0xC0..=0xC5 => b'A',
        0xC7 => b'C',
        0xC8..=0xCB => b'E',
        0xCC..=0xCF => b'I',
        0xD0 => b'D',
        0xD1 => b'N',
        0xD2..=0xD6 | 0xD8 => b'O',
        0xD9..=0xDC => b'U',
        0xDD => b'Y',
        0xDE => b'P',
        0xDF => b'b',
        0xE0..=0xE5 => b'a',
        0xE7 => b'c',
        0xE8..=0xEB => b'e',
        0xEC..=0xEF => b'i',
        0xF0 | 0xF2..=0xF6 | 0xF8 => b'o',
        0xF1 => b'n',
        0xF9..=0xFC => b'u',
        0xFD | 0xFF => b'y',
        0xFE => b'p',
        0x8A => b'S',
        0x9A => b's',
        0x8C => b'W',
        0x9C => b'w',
        0x8E => b'Z',
        0x9E => b'z',
        0x9F => b'Y',
        _ => return None,
    };
    Some(base)
}

/// Width of one character at `size_pt`
pub fn char_width(ch: char, size_pt: f32, style: FontStyle) -> f32 {
    f32::from(code_width(encode_char_lossy(ch), style)) * size_pt / 1000.0
}

/// Rendered width of `text` in the built-in face for `style`
pub fn text_width(text: &str, size_pt: f32, style: FontStyle) -> f32 {
    text.chars().map(|ch| char_width(ch, size_pt, style)).sum()
}

impl TextLine {
    /// Rendered width of this line
    pub fn width(&self) -> f32 {
        text_width(&self.text, self.size_pt, self.style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_widths() {
        // 1000 units at 1pt is 1pt
        assert!((text_width("W", 1000.0, FontStyle::Regular) - 944.0).abs() < 0.01);
        assert!((text_width("i", 10.0, FontStyle::Regular) - 2.22).abs() < 0.001);
        assert!((text_width("i", 10.0, FontStyle::Bold) - 2.78).abs() < 0.001);
        // Oblique shares the upright widths
        assert_eq!(
            text_width("Page 1 of 2", 9.0, FontStyle::Oblique),
            text_width("Page 1 of 2", 9.0, FontStyle::Regular)
        );
    }

    #[test]
    fn test_wide_capitals_exceed_half_em() {
        let text = "WMWMWMWMWM";
        assert!(text_width(text, 10.0, FontStyle::Bold) > text.len() as f32 * 5.0 * 1.6);
    }

    #[test]
    fn test_accented_letters_match_their_base() {
        assert_eq!(
            text_width("SÃO JOÃO", 14.0, FontStyle::Bold),
            text_width("SAO JOAO", 14.0, FontStyle::Bold)
        );
        assert_eq!(
            text_width("Área", 12.0, FontStyle::Regular),
            text_width("Area", 12.0, FontStyle::Regular)
        );
    }

    #[test]
    fn test_unmappable_measured_as_replacement() {
        assert_eq!(
            text_width("東", 10.0, FontStyle::Regular),
            text_width("?", 10.0, FontStyle::Regular)
        );
    }
}
