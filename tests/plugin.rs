//! Plugin lifecycle and command tests

mod common;

use common::{editor_selecting, fixed_random, rgb_palette, RecordingRegistry};
use hilite::commands::CommandId;
use hilite::engine::HighlightEngine;
use hilite::plugin::{Notice, NoticeLevel};
use hilite::{Editor, HighlightError, HighlightPlugin, MemorySettingsStore, PaletteMsg, Settings};

fn plugin_with(
    colors: Vec<String>,
) -> (
    HighlightPlugin<impl FnMut(std::ops::Range<usize>) -> usize>,
    MemorySettingsStore,
) {
    let backing = MemorySettingsStore::with_settings(Settings::with_colors(colors));
    let plugin = HighlightPlugin::with_engine(
        backing.clone(),
        HighlightEngine::with_random(fixed_random(0)),
    );
    (plugin, backing)
}

#[test]
fn test_on_load_registers_command_and_menu_item() {
    let (plugin, _) = plugin_with(rgb_palette());
    let mut registry = RecordingRegistry::default();

    plugin.on_load(&mut registry);

    assert_eq!(registry.commands, vec![CommandId::ToggleHighlight]);
    assert_eq!(
        registry.menu_items,
        vec![(CommandId::ToggleHighlight, "Toggle highlight".to_string())]
    );
}

#[test]
fn test_command_without_editor_warns() {
    let (mut plugin, _) = plugin_with(rgb_palette());

    let notices = plugin.run_command(CommandId::ToggleHighlight, None);

    assert_eq!(
        notices,
        vec![Notice::warning(HighlightError::NoActiveEditor.user_message())]
    );
}

#[test]
fn test_command_with_empty_palette_warns_and_leaves_text() {
    let (mut plugin, _) = plugin_with(Vec::new());
    let mut editor = editor_selecting("alpha beta", 0, "beta");

    let notices = plugin.run_command(
        CommandId::ToggleHighlight,
        Some(&mut editor as &mut dyn Editor),
    );

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert_eq!(
        notices[0].message,
        HighlightError::NoColorsConfigured.user_message()
    );
    assert_eq!(editor.text(), "alpha beta");
}

#[test]
fn test_command_toggles_with_stored_palette() {
    let (mut plugin, _) = plugin_with(rgb_palette());
    let mut editor = editor_selecting("alpha beta", 0, "beta");

    let notices = plugin.run_command(
        CommandId::ToggleHighlight,
        Some(&mut editor as &mut dyn Editor),
    );
    assert!(notices.is_empty());
    assert_eq!(
        editor.text(),
        "alpha <mark highlightindex=\"0\" style=\"background-color: #0000ff;\">beta</mark>"
    );

    let mut editor = editor_selecting(&editor.text(), 0, "beta");
    plugin
        .toggle_highlight(Some(&mut editor as &mut dyn Editor))
        .unwrap();
    assert_eq!(editor.text(), "alpha beta");
}

#[test]
fn test_palette_edits_flow_into_toggles() {
    let (mut plugin, backing) = plugin_with(Vec::new());

    assert!(plugin
        .update_palette(PaletteMsg::AddColor("#ff0000".to_string()))
        .is_empty());
    plugin.on_unload();
    assert_eq!(backing.current().colors, vec!["#ff0000".to_string()]);

    let mut editor = editor_selecting("word", 0, "word");
    plugin
        .toggle_highlight(Some(&mut editor as &mut dyn Editor))
        .unwrap();
    assert!(editor.text().contains("#ff0000"));
}

#[test]
fn test_rejected_palette_update_is_an_error_notice() {
    let (mut plugin, _) = plugin_with(rgb_palette());

    let notices = plugin.update_palette(PaletteMsg::AddColor("teal".to_string()));

    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(plugin.palette().len(), 3);
}

#[test]
fn test_failed_save_surfaces_once_and_keeps_palette() {
    let (mut plugin, backing) = plugin_with(rgb_palette());
    backing.set_fail_saves(true);

    plugin.update_palette(PaletteMsg::DeleteColor(0));
    plugin.palette().flush();

    let notices = plugin.poll_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Warning);
    assert!(plugin.poll_notices().is_empty());

    assert_eq!(plugin.palette().all(), ["#00ff00", "#ff0000"]);
    assert_eq!(backing.current().colors, rgb_palette());
}

#[test]
fn test_tracing_init_does_not_panic() {
    // A second install fails because the global subscriber is already set
    let _ = hilite::tracing::init();
    assert!(hilite::tracing::init().is_err());
}
