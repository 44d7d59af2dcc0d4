//! Editor collaborator interface
//!
//! The host application owns the text buffer. The highlight engine only
//! needs the handful of operations below; columns are character offsets
//! within a line and lines are 0-indexed.

mod rope_editor;
mod selection;

pub use rope_editor::RopeEditor;
pub use selection::{Position, Selection};

/// Which end of the selection a cursor query refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorVariant {
    /// Start of the selection (the smaller position)
    From,
    /// End of the selection (the larger position)
    To,
    /// Where the cursor currently is (the moving end)
    Head,
}

/// Text buffer operations provided by the host editor
pub trait Editor {
    /// Currently selected text (empty if nothing is selected)
    fn selection_text(&self) -> String;

    /// Position of one end of the selection
    fn cursor(&self, variant: CursorVariant) -> Position;

    /// Content of a line without its trailing newline
    fn line(&self, line: usize) -> String;

    /// Full document text
    fn value(&self) -> String;

    /// Replace the text between two positions
    fn replace_range(&mut self, text: &str, from: Position, to: Position);

    /// Replace the current selection
    fn replace_selection(&mut self, text: &str);
}
