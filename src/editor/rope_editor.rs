//! Rope-backed editor for hosts without their own buffer (and for tests)

use ropey::Rope;

use super::{CursorVariant, Editor, Position, Selection};

/// Editor implementation wrapping `ropey::Rope` and a single selection
#[derive(Debug, Clone)]
pub struct RopeEditor {
    rope: Rope,
    selection: Selection,
}

impl RopeEditor {
    /// Create an editor with the cursor at the start of the document
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::default(),
        }
    }

    /// Builder-style selection setter
    pub fn with_selection(mut self, anchor: Position, head: Position) -> Self {
        self.set_selection(anchor, head);
        self
    }

    /// Select `start..end` on one line
    pub fn select_on_line(self, line: usize, start: usize, end: usize) -> Self {
        self.with_selection(Position::new(line, start), Position::new(line, end))
    }

    pub fn set_selection(&mut self, anchor: Position, head: Position) {
        self.selection = Selection::new(self.clamp(anchor), self.clamp(head));
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Length of a specific line in characters (excluding newline)
    pub fn line_length(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let len = line_slice.len_chars();
        let mut trimmed = len;
        while trimmed > 0 && matches!(line_slice.char(trimmed - 1), '\n' | '\r') {
            trimmed -= 1;
        }
        trimmed
    }

    fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        Position::new(line, pos.column.min(self.line_length(line)))
    }

    /// Convert (line, column) to char offset
    fn position_to_offset(&self, pos: Position) -> usize {
        if pos.line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(pos.line) + pos.column.min(self.line_length(pos.line))
    }

    /// Convert char offset to (line, column)
    fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(clamped);
        Position::new(line, clamped - self.rope.line_to_char(line))
    }

    /// Splice `text` over `start..end`, returning the char length inserted
    fn splice(&mut self, start: usize, end: usize, text: &str) -> usize {
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, text);
        text.chars().count()
    }
}

impl Editor for RopeEditor {
    fn selection_text(&self) -> String {
        let start = self.position_to_offset(self.selection.start());
        let end = self.position_to_offset(self.selection.end());
        self.rope.slice(start..end).to_string()
    }

    fn cursor(&self, variant: CursorVariant) -> Position {
        match variant {
            CursorVariant::From => self.selection.start(),
            CursorVariant::To => self.selection.end(),
            CursorVariant::Head => self.selection.head,
        }
    }

    fn line(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let s = self.rope.line(line).to_string();
        s.trim_end_matches(&['\n', '\r'][..]).to_string()
    }

    fn value(&self) -> String {
        self.rope.to_string()
    }

    fn replace_range(&mut self, text: &str, from: Position, to: Position) {
        let start = self.position_to_offset(from.min(to));
        let end = self.position_to_offset(from.max(to));

        let anchor = self.position_to_offset(self.selection.anchor);
        let head = self.position_to_offset(self.selection.head);

        let inserted = self.splice(start, end, text);

        // Positions after the edit shift, positions inside it land at its end
        let remap = |offset: usize| {
            if offset <= start {
                offset
            } else if offset >= end {
                offset - (end - start) + inserted
            } else {
                start + inserted
            }
        };
        self.selection = Selection::new(
            self.offset_to_position(remap(anchor)),
            self.offset_to_position(remap(head)),
        );
    }

    fn replace_selection(&mut self, text: &str) {
        let start = self.position_to_offset(self.selection.start());
        let end = self.position_to_offset(self.selection.end());
        let inserted = self.splice(start, end, text);
        self.selection = Selection::collapsed(self.offset_to_position(start + inserted));
    }
}
