// src/convert.rs
// Conversions between raw bytes, hex strings, decimal arrays and byte-per-char strings. Hex is
// lower-case and zero-padded; "strings" map each byte to the char with that code point (Latin-1).

use crate::error::HexDigitError;

/// Digit alphabet used by the lenient hex parser. `g` and `h` are accepted as 16 and 17; valid hex
/// never contains them, but existing consumers depend on the exact accumulation.
const LENIENT_DIGITS: &str = "0123456789abcdefgh";

/// Value a character outside [`LENIENT_DIGITS`] contributes in lenient parsing.
pub const MALFORMED_DIGIT_VALUE: u64 = 0;

pub fn bytes_to_hex_string(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn bytes_to_hex_array(bytes: &[u8]) -> Vec<String> {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Positional hex accumulation (`acc * 16 + digit`). Never fails: unknown characters count as
/// [`MALFORMED_DIGIT_VALUE`] and overflow wraps modulo 2^64.
pub fn hex_digits_to_decimal(hex: &str) -> u64 {
    hex.chars().fold(0u64, |acc, c| {
        let digit = LENIENT_DIGITS
            .find(c.to_ascii_lowercase())
            .map_or(MALFORMED_DIGIT_VALUE, |d| d as u64);
        acc.wrapping_mul(16).wrapping_add(digit)
    })
}

/// Strict counterpart of [`hex_digits_to_decimal`]: only `0-9a-fA-F` is accepted.
pub fn try_hex_digits_to_decimal(hex: &str) -> Result<u64, HexDigitError> {
    hex.chars().enumerate().try_fold(0u64, |acc, (position, c)| {
        let digit = c
            .to_digit(16)
            .ok_or(HexDigitError { digit: c, position })?;
        Ok(acc.wrapping_mul(16).wrapping_add(u64::from(digit)))
    })
}

pub fn hex_array_to_decimal_array<S: AsRef<str>>(hex_array: &[S]) -> Vec<u64> {
    hex_array
        .iter()
        .map(|h| hex_digits_to_decimal(h.as_ref()))
        .collect()
}

/// Render a decimal array the way older consumers received it: as a JSON array string, e.g. `[2,101]`.
pub fn decimal_array_to_json(values: &[u64]) -> String {
    // A slice of integers always serializes.
    serde_json::to_string(values).unwrap_or_else(|_| String::from("[]"))
}

/// Map every two hex characters to one char. A trailing odd digit is dropped.
pub fn hex_string_to_ascii_string(hex: &str) -> String {
    let chars: Vec<char> = hex.chars().collect();
    chars
        .chunks_exact(2)
        .map(|pair| {
            let pair: String = pair.iter().collect();
            let code = hex_digits_to_decimal(&pair);
            // Two lenient digits never exceed 0x121, always a valid scalar value.
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER)
        })
        .collect()
}

pub fn bytes_to_latin1_string(bytes: &[u8]) -> String {
    hex_string_to_ascii_string(&bytes_to_hex_string(bytes))
}

/// Hand-rolled UTF-8 encoding of UTF-16 code units, at most three bytes per unit.
///
/// Characters above U+FFFF are not combined into four-byte sequences: each surrogate half is
/// encoded on its own (CESU-8 style), matching tags written by existing host apps.
pub fn string_to_utf8_bytes(s: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(s.len());
    for unit in s.encode_utf16() {
        let c = u32::from(unit);
        if c < 0x80 {
            bytes.push(c as u8);
        } else if c < 0x800 {
            bytes.push(((c >> 6) | 0xC0) as u8);
            bytes.push(((c & 0x3F) | 0x80) as u8);
        } else {
            bytes.push(((c >> 12) | 0xE0) as u8);
            bytes.push((((c >> 6) & 0x3F) | 0x80) as u8);
            bytes.push(((c & 0x3F) | 0x80) as u8);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn hex_string_is_lower_case_and_padded() {
        assert_eq!(bytes_to_hex_string(&[0x00, 0x0a, 0xff, 0x5B]), "000aff5b");
        assert_eq!(bytes_to_hex_string(&[]), "");
    }

    #[test]
    fn hex_array_has_one_pair_per_byte() {
        assert_eq!(bytes_to_hex_array(&[0x02, 0xab]), vec!["02", "ab"]);
        assert!(bytes_to_hex_array(&[]).is_empty());
    }

    #[test]
    fn lenient_parse_treats_unknown_digits_as_zero() {
        assert_eq!(hex_digits_to_decimal("ff"), 255);
        assert_eq!(hex_digits_to_decimal("FF"), 255);
        assert_eq!(hex_digits_to_decimal("z1"), 1);
        assert_eq!(hex_digits_to_decimal("1z"), 16);
        assert_eq!(hex_digits_to_decimal(""), 0);
    }

    #[test]
    fn lenient_parse_keeps_g_and_h() {
        assert_eq!(hex_digits_to_decimal("g"), 16);
        assert_eq!(hex_digits_to_decimal("1h"), 33);
    }

    #[test]
    fn strict_parse_rejects_malformed_digits() {
        assert_eq!(try_hex_digits_to_decimal("0A"), Ok(10));
        assert_eq!(
            try_hex_digits_to_decimal("1g"),
            Err(HexDigitError {
                digit: 'g',
                position: 1
            })
        );
    }

    #[test]
    fn decimal_array_json_shape() {
        let values = hex_array_to_decimal_array(&["02", "65", "6e"]);
        assert_eq!(values, vec![2, 101, 110]);
        assert_eq!(decimal_array_to_json(&values), "[2,101,110]");
        assert_eq!(decimal_array_to_json(&[]), "[]");
    }

    #[test]
    fn ascii_string_drops_odd_trailing_digit() {
        assert_eq!(hex_string_to_ascii_string("4869"), "Hi");
        assert_eq!(hex_string_to_ascii_string("48695"), "Hi");
        assert_eq!(hex_string_to_ascii_string("e9"), "\u{e9}");
    }

    #[test]
    fn utf8_bytes_up_to_three_bytes() {
        assert_eq!(string_to_utf8_bytes("Hi"), b"Hi".to_vec());
        assert_eq!(string_to_utf8_bytes("é"), "é".as_bytes().to_vec());
        assert_eq!(string_to_utf8_bytes("€"), "€".as_bytes().to_vec());
    }

    #[test]
    fn utf8_bytes_split_supplementary_planes() {
        // U+1F600 = D83D DE00, each surrogate as its own three-byte sequence.
        assert_eq!(
            string_to_utf8_bytes("😀"),
            vec![0xED, 0xA0, 0xBD, 0xED, 0xB8, 0x80]
        );
        assert_eq!(string_to_utf8_bytes("a😀").len(), 7);
    }

    proptest! {
        #[test]
        fn hex_array_len_matches_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(bytes_to_hex_array(&bytes).len(), bytes.len());
        }

        #[test]
        fn hex_string_parses_back_big_endian(bytes in proptest::collection::vec(any::<u8>(), 0..=8)) {
            let expected = bytes.iter().fold(0u64, |acc, b| acc * 256 + u64::from(*b));
            prop_assert_eq!(hex_digits_to_decimal(&bytes_to_hex_string(&bytes)), expected);
        }

        #[test]
        fn hex_rendering_is_pure(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            prop_assert_eq!(bytes_to_hex_string(&bytes), bytes_to_hex_string(&bytes));
        }

        #[test]
        fn latin1_string_has_one_char_per_byte(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
            let s = bytes_to_latin1_string(&bytes);
            let codes: Vec<u32> = s.chars().map(|c| c as u32).collect();
            let expected: Vec<u32> = bytes.iter().map(|b| u32::from(*b)).collect();
            prop_assert_eq!(codes, expected);
        }
    }
}
