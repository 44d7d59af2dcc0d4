//! `<mark>` scanning for markdown text
//!
//! Marks are found with a non-greedy, non-recursive pattern. Nested marks,
//! marks spanning several lines and attribute values containing `>` are
//! not understood: the first `</mark>` closes whatever `<mark ...>` came
//! before it.

use std::sync::OnceLock;

use regex::Regex;

use crate::util::text::char_len;

const MARK_PATTERN: &str = r"<mark[^>]*>(.*?)</mark>";
const OPEN_TAG_PATTERN: &str = r"<mark[^>]*>";
const CLOSE_TAG: &str = "</mark>";
const INDEX_ATTR_PATTERN: &str = r#"\bhighlightindex\s*=\s*["']?([^"'\s>]*)"#;

fn mark_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MARK_PATTERN).expect("mark pattern is valid"))
}

fn open_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(OPEN_TAG_PATTERN).expect("open tag pattern is valid"))
}

fn index_attr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(INDEX_ATTR_PATTERN).expect("index pattern is valid"))
}

/// A `<mark>` element located within a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkSpan {
    /// Character offset of `<` in the opening tag
    pub start: usize,
    /// Character offset one past `>` in the closing tag
    pub end: usize,
    /// Inner content, verbatim
    pub text: String,
    /// Value of a `highlightindex` attribute on the opening tag, if any
    pub highlight_index: Option<usize>,
}

impl MarkSpan {
    /// Half-open overlap test: touching ranges do not overlap
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        start < self.end && end > self.start
    }
}

/// Left-to-right iterator over the marks of one line
///
/// Clone before consuming (or call [`find_marks_in_line`] again) to scan
/// the same line a second time.
#[derive(Debug, Clone)]
pub struct MarkIter<'a> {
    line: &'a str,
    byte_pos: usize,
    char_pos: usize,
}

impl Iterator for MarkIter<'_> {
    type Item = MarkSpan;

    fn next(&mut self) -> Option<MarkSpan> {
        let caps = mark_regex().captures_at(self.line, self.byte_pos)?;
        let whole = caps.get(0)?;

        let skipped = &self.line[self.byte_pos..whole.start()];
        let start = self.char_pos + char_len(skipped);
        let end = start + char_len(whole.as_str());

        self.byte_pos = whole.end();
        self.char_pos = end;

        let text = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        Some(MarkSpan {
            start,
            end,
            text: text.to_string(),
            highlight_index: parse_index_attribute(whole.as_str()),
        })
    }
}

/// Scan one line for `<mark ...>...</mark>` occurrences
pub fn find_marks_in_line(line: &str) -> MarkIter<'_> {
    MarkIter {
        line,
        byte_pos: 0,
        char_pos: 0,
    }
}

/// Total number of marks in a document (single-line marks only)
pub fn count_marks_in_document(text: &str) -> usize {
    mark_regex().find_iter(text).count()
}

/// `highlightindex` of the first mark in the document that carries one
///
/// Only the first tagged mark is consulted. A value that is not a
/// non-negative integer counts as absent.
pub fn find_first_highlight_index_in_document(text: &str) -> Option<usize> {
    let raw = mark_regex()
        .find_iter(text)
        .filter_map(|m| raw_index_attribute(m.as_str()))
        .next()?;

    let index = parse_index_value(raw);
    if index.is_none() {
        tracing::warn!("Ignoring malformed highlightindex attribute: {:?}", raw);
    }
    index
}

/// Remove every opening and closing mark tag, keeping inner text
pub fn strip_mark_tags(text: &str) -> String {
    open_tag_regex().replace_all(text, "").replace(CLOSE_TAG, "")
}

/// Raw attribute value from the opening tag of a matched mark
fn raw_index_attribute(mark: &str) -> Option<&str> {
    let open_tag = open_tag_regex().find(mark)?;
    index_attr_regex()
        .captures(open_tag.as_str())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_index_attribute(mark: &str) -> Option<usize> {
    raw_index_attribute(mark).and_then(parse_index_value)
}

/// ASCII digits only; signs, empty values and overflow are rejected
fn parse_index_value(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}
