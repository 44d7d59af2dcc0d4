//! hilite - colored `<mark>` highlights for markdown editors
//!
//! This crate provides the core of an editor extension that toggles a
//! colored highlight around the selected text, rotating through a
//! user-configured palette. The host editor, settings storage and command
//! registration are collaborators passed in by the caller.

pub mod color;
pub mod commands;
pub mod config_paths;
pub mod editor;
pub mod engine;
pub mod marks;
pub mod palette;
pub mod plugin;
pub mod settings;
pub mod tracing;
pub mod util;

// Re-export commonly used types
pub use editor::{Editor, RopeEditor};
pub use engine::{HighlightEngine, HighlightError, TogglePlan};
pub use palette::{PaletteMsg, PaletteStore};
pub use plugin::HighlightPlugin;
pub use settings::{JsonFileSettingsStore, MemorySettingsStore, Settings};
