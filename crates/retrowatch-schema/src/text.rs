//! Decoding of the game's proprietary character set.
//!
//! Strings are fixed-width buffers terminated by `0x50` (or padded with
//! `0x00`). Bytes without a mapping decode as `?` rather than failing.

/// String terminator byte.
pub const TERMINATOR: u8 = 0x50;

/// Replacement for bytes outside the character table.
pub const REPLACEMENT: char = '?';

/// Decode a fixed-width text buffer up to its terminator.
pub fn decode_text(raw: &[u8]) -> String {
    raw.iter()
        .take_while(|&&b| b != TERMINATOR && b != 0x00)
        .map(|&b| glyph(b).unwrap_or(REPLACEMENT))
        .collect()
}

/// Map one encoded byte to its character.
pub const fn glyph(byte: u8) -> Option<char> {
    let c = match byte {
        0x80..=0x99 => return ascii_offset(b'A', byte, 0x80),
        0xA0..=0xB9 => return ascii_offset(b'a', byte, 0xA0),
        0xF6..=0xFF => return ascii_offset(b'0', byte, 0xF6),
        0x9A => '(',
        0x9B => ')',
        0x9C => ':',
        0x9D => ';',
        0x9E => '[',
        0x9F => ']',
        0x7F => ' ',
        0xE3 => '-',
        0xE6 => '?',
        0xE7 => '!',
        0xE8 => '.',
        0xEF => '♂',
        0xF5 => '♀',
        _ => return None,
    };
    Some(c)
}

/// Translate a byte inside a contiguous glyph run to its ASCII character.
const fn ascii_offset(base: u8, byte: u8, run_start: u8) -> Option<char> {
    match byte.checked_sub(run_start) {
        Some(delta) => match base.checked_add(delta) {
            Some(ascii) => Some(ascii as char),
            None => None,
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_upper_and_lower_case() {
        // "RED" then terminator then garbage that must be ignored.
        let raw = [0x91, 0x84, 0x83, 0x50, 0x80, 0x80];
        assert_eq!(decode_text(&raw), "RED");

        let raw = [0x81, 0xAB, 0xB4, 0xA4, 0x50];
        assert_eq!(decode_text(&raw), "Blue");
    }

    #[test]
    fn digits_and_symbols() {
        let raw = [0xF7, 0xFF, 0xE7, 0x50];
        assert_eq!(decode_text(&raw), "19!");
        assert_eq!(glyph(0xEF), Some('♂'));
    }

    #[test]
    fn unknown_bytes_become_replacement() {
        let raw = [0x91, 0x01, 0x83, 0x50];
        assert_eq!(decode_text(&raw), "R?D");
    }

    #[test]
    fn zero_padding_terminates() {
        assert_eq!(decode_text(&[0x80, 0x00, 0x81]), "A");
        assert_eq!(decode_text(&[]), "");
    }
}
