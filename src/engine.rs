//! Highlight toggle decision logic
//!
//! A toggle either unwraps every mark the selection overlaps on its line, or
//! wraps the selection in a new mark whose color rotates through the
//! palette. The rotation is anchored by a `highlightindex` attribute stored
//! on the first mark ever inserted into a document:
//!
//! ```text
//! color_index = (offset + marks_in_document) % palette_len
//! ```
//!
//! Mark overlap is only checked on the line where the selection starts.

use std::ops::Range;

use crate::editor::{CursorVariant, Editor, Position};
use crate::marks::{
    count_marks_in_document, find_first_highlight_index_in_document, find_marks_in_line,
    strip_mark_tags,
};
use crate::util::text::{char_len, char_slice};

/// Source of uniformly distributed indices
pub trait RandomSource {
    /// Uniform integer in `range` (half-open, never empty when called)
    fn gen_range(&mut self, range: Range<usize>) -> usize;
}

/// Thread-local RNG from the `rand` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn gen_range(&mut self, range: Range<usize>) -> usize {
        use rand::Rng;
        rand::thread_rng().gen_range(range)
    }
}

impl<F> RandomSource for F
where
    F: FnMut(Range<usize>) -> usize,
{
    fn gen_range(&mut self, range: Range<usize>) -> usize {
        self(range)
    }
}

/// Errors that abort a toggle without touching the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightError {
    /// Palette is empty at insertion time
    NoColorsConfigured,
    /// No document view is active
    NoActiveEditor,
}

impl HighlightError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::NoColorsConfigured => {
                "No highlight colors configured. Add a color in the settings first.".to_string()
            }
            Self::NoActiveEditor => "Open a markdown document to toggle highlights.".to_string(),
        }
    }
}

impl std::fmt::Display for HighlightError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoColorsConfigured => write!(f, "no colors configured"),
            Self::NoActiveEditor => write!(f, "no active editor"),
        }
    }
}

impl std::error::Error for HighlightError {}

/// Snapshot of the editor state a toggle decision depends on
#[derive(Debug, Clone, Copy)]
pub struct ToggleRequest<'a> {
    /// Line the selection starts on
    pub line: usize,
    /// Content of that line
    pub line_text: &'a str,
    /// Selection start column (chars)
    pub from: usize,
    /// Selection end column on the same line (chars)
    pub to: usize,
    /// Full selected text (may continue past the line)
    pub selected_text: &'a str,
    /// Full document text
    pub document: &'a str,
}

/// Replacement of `start..end` (chars) on one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub line: usize,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// A new mark about to replace the selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// Markup replacing the selection
    pub markup: String,
    /// Palette color applied
    pub color: String,
    /// Index of `color` in the palette
    pub color_index: usize,
    /// Rotation anchor for this document
    pub offset: usize,
    /// Whether `markup` carries the `highlightindex` attribute
    pub tagged: bool,
}

/// What a toggle does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TogglePlan {
    /// Empty selection
    Nothing,
    /// Unwrap overlapping marks; edits are ordered rightmost first so each
    /// one's offsets are still valid when it is applied
    Remove { edits: Vec<LineEdit> },
    /// Wrap the selection in a new mark
    Insert(Insertion),
}

/// Build the markup for a highlighted span
pub fn mark_markup(text: &str, color: &str, highlight_index: Option<usize>) -> String {
    match highlight_index {
        Some(index) => format!(
            "<mark highlightindex=\"{}\" style=\"background-color: {};\">{}</mark>",
            index, color, text
        ),
        None => format!("<mark style=\"background-color: {};\">{}</mark>", color, text),
    }
}

/// Decides and applies highlight toggles
#[derive(Debug, Clone, Default)]
pub struct HighlightEngine<R = ThreadRandom> {
    random: R,
}

impl HighlightEngine<ThreadRandom> {
    pub fn new() -> Self {
        Self {
            random: ThreadRandom,
        }
    }
}

impl<R: RandomSource> HighlightEngine<R> {
    /// Engine with an injected random source
    pub fn with_random(random: R) -> Self {
        Self { random }
    }

    /// Decide what a toggle would do, without side effects on the document
    pub fn plan(
        &mut self,
        request: &ToggleRequest<'_>,
        palette: &[String],
    ) -> Result<TogglePlan, HighlightError> {
        if request.selected_text.is_empty() {
            return Ok(TogglePlan::Nothing);
        }

        let mut overlapping: Vec<_> = find_marks_in_line(request.line_text)
            .filter(|mark| mark.overlaps(request.from, request.to))
            .collect();

        if !overlapping.is_empty() {
            overlapping.reverse();
            let edits = overlapping
                .into_iter()
                .map(|mark| LineEdit {
                    line: request.line,
                    start: mark.start,
                    end: mark.end,
                    text: strip_mark_tags(char_slice(request.line_text, mark.start, mark.end)),
                })
                .collect::<Vec<_>>();
            tracing::debug!(
                "Removing {} highlight(s) on line {}",
                edits.len(),
                request.line
            );
            return Ok(TogglePlan::Remove { edits });
        }

        if palette.is_empty() {
            tracing::warn!("Highlight insertion attempted with an empty palette");
            return Err(HighlightError::NoColorsConfigured);
        }

        let mark_count = count_marks_in_document(request.document);
        let (offset, tagged) = self.rotation_offset(request.document, mark_count, palette.len());
        let len = palette.len();
        // Stored offsets come from document text and may be arbitrarily large
        let color_index = (offset % len + mark_count % len) % len;
        let color = palette[color_index].clone();

        let markup = mark_markup(request.selected_text, &color, tagged.then_some(offset));
        tracing::debug!(
            "Inserting highlight (marks={}, offset={}, color_index={}, tagged={})",
            mark_count,
            offset,
            color_index,
            tagged
        );

        Ok(TogglePlan::Insert(Insertion {
            markup,
            color,
            color_index,
            offset,
            tagged,
        }))
    }

    /// Read the editor, decide, and apply the resulting edits
    pub fn toggle(
        &mut self,
        editor: &mut dyn Editor,
        palette: &[String],
    ) -> Result<TogglePlan, HighlightError> {
        let from = editor.cursor(CursorVariant::From);
        let to = editor.cursor(CursorVariant::To);
        let line_text = editor.line(from.line);
        let selected_text = editor.selection_text();
        let document = editor.value();

        // Selections continuing past the line are cut at its end
        let to_column = if to.line == from.line {
            to.column
        } else {
            char_len(&line_text)
        };

        let request = ToggleRequest {
            line: from.line,
            line_text: &line_text,
            from: from.column,
            to: to_column,
            selected_text: &selected_text,
            document: &document,
        };

        let plan = self.plan(&request, palette)?;
        match &plan {
            TogglePlan::Nothing => {}
            TogglePlan::Remove { edits } => {
                for edit in edits {
                    editor.replace_range(
                        &edit.text,
                        Position::new(edit.line, edit.start),
                        Position::new(edit.line, edit.end),
                    );
                }
            }
            TogglePlan::Insert(insertion) => editor.replace_selection(&insertion.markup),
        }
        Ok(plan)
    }

    /// Rotation anchor and whether it must be embedded in the new mark
    fn rotation_offset(&mut self, document: &str, mark_count: usize, len: usize) -> (usize, bool) {
        if mark_count == 0 {
            let offset = self.random.gen_range(0..len);
            tracing::debug!("First highlight in document, drew offset {}", offset);
            return (offset, true);
        }

        match find_first_highlight_index_in_document(document) {
            Some(offset) => (offset, false),
            None => {
                let offset = self.random.gen_range(0..len);
                tracing::debug!("No readable highlightindex, drew offset {}", offset);
                (offset, false)
            }
        }
    }
}
