//! Utility functions for text offsets
//!
//! Editor columns are character offsets, regex matches are byte offsets.
//! These helpers map character positions onto a single line of text.

/// Convert a character offset to a byte offset (clamped to the end of `text`)
pub fn char_to_byte(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

/// Slice `text` by character range, clamping both ends
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(text, start);
    let end_byte = char_to_byte(text, end.max(start));
    &text[start_byte..end_byte]
}

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
