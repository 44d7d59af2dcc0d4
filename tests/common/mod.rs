//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::ops::Range;

use hilite::commands::{CommandDef, CommandId, CommandRegistry, MenuItemDef};
use hilite::editor::Position;
use hilite::RopeEditor;

/// Blue, green, red: already in descending hue order
pub fn rgb_palette() -> Vec<String> {
    vec![
        "#0000ff".to_string(),
        "#00ff00".to_string(),
        "#ff0000".to_string(),
    ]
}

/// Random source that always returns `value`
pub fn fixed_random(value: usize) -> impl FnMut(Range<usize>) -> usize {
    move |range| {
        assert!(range.contains(&value), "{} not in {:?}", value, range);
        value
    }
}

/// Random source that must never be consulted
pub fn no_random() -> impl FnMut(Range<usize>) -> usize {
    |range| panic!("unexpected random draw in {:?}", range)
}

/// Editor with `text` and `needle` (first occurrence on `line`) selected
pub fn editor_selecting(text: &str, line: usize, needle: &str) -> RopeEditor {
    let mut editor = RopeEditor::from_text(text);
    select(&mut editor, line, needle);
    editor
}

/// Select the first occurrence of `needle` on `line`
pub fn select(editor: &mut RopeEditor, line: usize, needle: &str) {
    use hilite::Editor;

    let line_text = editor.line(line);
    let byte = line_text
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in {:?}", needle, line_text));
    let start = line_text[..byte].chars().count();
    let end = start + needle.chars().count();
    editor.set_selection(Position::new(line, start), Position::new(line, end));
}

/// Registry that records what the plugin registered
#[derive(Debug, Default)]
pub struct RecordingRegistry {
    pub commands: Vec<CommandId>,
    pub menu_items: Vec<(CommandId, String)>,
}

impl CommandRegistry for RecordingRegistry {
    fn add_command(&mut self, command: &CommandDef) {
        self.commands.push(command.id);
    }

    fn add_editor_menu_item(&mut self, item: &MenuItemDef) {
        self.menu_items.push((item.command, item.title.to_string()));
    }
}
