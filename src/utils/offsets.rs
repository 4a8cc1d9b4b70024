//! Text offset conversions
//!
//! Tree offsets count Unicode scalar values. Rust strings index by byte and
//! the browser reports UTF-16 code units, so every boundary crossing goes
//! through one of these helpers.

/// Number of chars in a string
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the char at `char_offset` (clamped to the end of the string)
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Substring between two char offsets
pub fn slice_chars(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Convert a UTF-16 code unit offset to a char offset
///
/// An offset that falls inside a surrogate pair rounds down to the char
/// that starts the pair.
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (index, ch) in text.chars().enumerate() {
        units += ch.len_utf16();
        if units > utf16_offset {
            return index;
        }
    }
    char_len(text)
}

/// Convert a char offset to a UTF-16 code unit offset
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_chars_multibyte() {
        let text = "héllo wörld";
        assert_eq!(slice_chars(text, 1, 5), "éllo");
        assert_eq!(slice_chars(text, 6, 100), "wörld");
        assert_eq!(slice_chars(text, 4, 2), "");
    }

    #[test]
    fn test_utf16_round_trip_with_surrogates() {
        let text = "a😀b";
        assert_eq!(char_to_utf16_offset(text, 2), 3);
        assert_eq!(utf16_to_char_offset(text, 3), 2);
        assert_eq!(utf16_to_char_offset(text, 2), 1);
        assert_eq!(utf16_to_char_offset(text, 99), 3);
    }
}
