//! Plugin entry point
//!
//! Wires the highlight engine, the palette and the host's registries
//! together. Every host-facing call returns the notices the host should
//! show; nothing here is fatal to the host.

use crate::commands::{register_all, CommandId, CommandRegistry};
use crate::editor::Editor;
use crate::engine::{HighlightEngine, HighlightError, RandomSource, ThreadRandom, TogglePlan};
use crate::palette::{self, PaletteMsg, PaletteStore};
use crate::settings::SettingsStore;

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// A message for the host to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The highlight plugin as seen by the host
#[derive(Debug)]
pub struct HighlightPlugin<R = ThreadRandom> {
    engine: HighlightEngine<R>,
    palette: PaletteStore,
}

impl HighlightPlugin<ThreadRandom> {
    /// Load settings from `store` and use the thread RNG for rotation offsets
    pub fn load<S: SettingsStore + 'static>(store: S) -> Self {
        Self::with_engine(store, HighlightEngine::new())
    }
}

impl<R: RandomSource> HighlightPlugin<R> {
    pub fn with_engine<S: SettingsStore + 'static>(store: S, engine: HighlightEngine<R>) -> Self {
        Self {
            engine,
            palette: PaletteStore::load(store),
        }
    }

    /// Register the command and the context-menu entry
    pub fn on_load(&self, registry: &mut dyn CommandRegistry) {
        register_all(registry);
        tracing::info!("Highlight plugin loaded");
    }

    /// Wait for pending settings writes before the host tears down
    pub fn on_unload(&self) {
        self.palette.flush();
        tracing::info!("Highlight plugin unloaded");
    }

    pub fn palette(&self) -> &PaletteStore {
        &self.palette
    }

    /// Run a registered command against the active editor, if any
    pub fn run_command(&mut self, id: CommandId, editor: Option<&mut dyn Editor>) -> Vec<Notice> {
        match id {
            CommandId::ToggleHighlight => match self.toggle_highlight(editor) {
                Ok(_) => Vec::new(),
                Err(e) => vec![Notice::warning(e.user_message())],
            },
        }
    }

    /// Toggle a highlight around the active editor's selection
    pub fn toggle_highlight(
        &mut self,
        editor: Option<&mut dyn Editor>,
    ) -> Result<TogglePlan, HighlightError> {
        let editor = editor.ok_or(HighlightError::NoActiveEditor)?;
        self.engine.toggle(editor, self.palette.all())
    }

    /// Apply a settings-tab operation
    pub fn update_palette(&mut self, msg: PaletteMsg) -> Vec<Notice> {
        match palette::update(&mut self.palette, msg) {
            Ok(()) => Vec::new(),
            Err(e) => {
                tracing::warn!("Palette update rejected: {}", e);
                vec![Notice::error(e.user_message())]
            }
        }
    }

    /// Notices for settings saves that failed since the last poll
    ///
    /// In-memory state is kept; the failed write is not retried.
    pub fn poll_notices(&self) -> Vec<Notice> {
        self.palette
            .take_save_errors()
            .into_iter()
            .map(|e| Notice::warning(e.user_message()))
            .collect()
    }
}
