//! Settings persistence
//!
//! The settings blob is a flat list of palette colors. Stores are
//! collaborators: the host can plug in its own, a JSON file store and an
//! in-memory store are provided. Saves go through [`SettingsWriter`], which
//! applies them on a background thread strictly in the order issued.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};

use crate::color::normalize_hex;

/// Persisted plugin settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Palette colors in rotation order
    #[serde(default)]
    pub colors: Vec<String>,
}

impl Settings {
    pub fn with_colors(colors: Vec<String>) -> Self {
        Self { colors }
    }

    /// Normalize colors to `#rrggbb`, dropping entries that do not parse
    pub fn normalized(self) -> Self {
        let colors = self
            .colors
            .into_iter()
            .filter_map(|color| match normalize_hex(&color) {
                Ok(hex) => Some(hex),
                Err(e) => {
                    tracing::warn!("Dropping stored palette entry: {}", e);
                    None
                }
            })
            .collect();
        Self { colors }
    }
}

/// Errors that can occur when loading or saving settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// No config directory could be determined
    NoConfigDir,
    /// Reading or writing failed
    Io(String),
    /// Settings could not be (de)serialized
    Parse(String),
}

impl SettingsError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::NoConfigDir => {
                "Highlight settings could not be saved: no config directory".to_string()
            }
            Self::Io(msg) => format!("Highlight settings could not be saved: {}", msg),
            Self::Parse(msg) => format!("Highlight settings are invalid: {}", msg),
        }
    }
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoConfigDir => write!(f, "no config directory available"),
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Load/save collaborator for the settings blob
pub trait SettingsStore: Send {
    /// Load settings; a store with nothing saved yet returns defaults
    fn load(&self) -> Result<Settings, SettingsError>;

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError>;
}

// =============================================================================
// JsonFileSettingsStore
// =============================================================================

/// Settings stored as pretty JSON in a single file
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.config/hilite/settings.json`
    pub fn default_location() -> Result<Self, SettingsError> {
        crate::config_paths::settings_file()
            .map(Self::new)
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            tracing::debug!(
                "Settings file not found at {}, using defaults",
                self.path.display()
            );
            return Ok(Settings::default());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            SettingsError::Io(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        match serde_json::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", self.path.display());
                Ok(settings)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse settings at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(Settings::default())
            }
        }
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::Io(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::Parse(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&self.path, content).map_err(|e| {
            SettingsError::Io(format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

// =============================================================================
// MemorySettingsStore
// =============================================================================

/// In-memory store; clones share state so a caller can inspect what was saved
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    current: Settings,
    saves: Vec<Settings>,
    fail_saves: bool,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose `load` returns `settings`
    pub fn with_settings(settings: Settings) -> Self {
        let store = Self::default();
        store.lock().current = settings;
        store
    }

    /// Make subsequent saves fail with an IO error
    pub fn set_fail_saves(&self, fail: bool) {
        self.lock().fail_saves = fail;
    }

    /// Every successful save, oldest first
    pub fn saves(&self) -> Vec<Settings> {
        self.lock().saves.clone()
    }

    pub fn current(&self) -> Settings {
        self.lock().current.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(self.current())
    }

    fn save(&mut self, settings: &Settings) -> Result<(), SettingsError> {
        let mut state = self.lock();
        if state.fail_saves {
            return Err(SettingsError::Io("store rejected the write".to_string()));
        }
        state.current = settings.clone();
        state.saves.push(settings.clone());
        Ok(())
    }
}

// =============================================================================
// SettingsWriter
// =============================================================================

enum WriterMsg {
    Save(Settings),
    Flush(Sender<()>),
}

/// Applies saves on a background thread, in the order they were issued
///
/// `save` never blocks the caller. Failures are reported through
/// [`SettingsWriter::poll_errors`]; nothing is retried.
pub struct SettingsWriter {
    tx: Option<Sender<WriterMsg>>,
    errors: Receiver<SettingsError>,
    handle: Option<JoinHandle<()>>,
}

impl SettingsWriter {
    /// Start the writer thread, which takes ownership of `store`
    pub fn spawn<S: SettingsStore + 'static>(mut store: S) -> Self {
        let (tx, rx) = mpsc::channel::<WriterMsg>();
        let (error_tx, errors) = mpsc::channel();

        let handle = std::thread::spawn(move || {
            for msg in rx {
                match msg {
                    WriterMsg::Save(settings) => {
                        if let Err(e) = store.save(&settings) {
                            tracing::warn!("Failed to save settings: {}", e);
                            let _ = error_tx.send(e);
                        }
                    }
                    WriterMsg::Flush(ack) => {
                        let _ = ack.send(());
                    }
                }
            }
        });

        Self {
            tx: Some(tx),
            errors,
            handle: Some(handle),
        }
    }

    /// Queue a snapshot for saving
    pub fn save(&self, settings: Settings) {
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(WriterMsg::Save(settings)).is_err() {
            tracing::error!("Settings writer thread is gone, save dropped");
        }
    }

    /// Block until every save queued so far has been applied
    pub fn flush(&self) {
        let Some(tx) = &self.tx else {
            return;
        };
        let (ack_tx, ack_rx) = mpsc::channel();
        if tx.send(WriterMsg::Flush(ack_tx)).is_ok() {
            let _ = ack_rx.recv();
        }
    }

    /// Drain errors from failed saves (non-blocking)
    pub fn poll_errors(&self) -> Vec<SettingsError> {
        self.errors.try_iter().collect()
    }
}

impl Drop for SettingsWriter {
    fn drop(&mut self) {
        // Closing the channel ends the thread after queued saves are applied
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl std::fmt::Debug for SettingsWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsWriter")
            .field("running", &self.handle.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_colors_key_defaults_to_empty() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert!(settings.colors.is_empty());
    }

    #[test]
    fn test_normalized_drops_invalid_and_expands_shorthand() {
        let settings = Settings::with_colors(vec!["#F00".into(), "nope".into(), "00ff00".into()]);
        assert_eq!(
            settings.normalized().colors,
            vec!["#ff0000".to_string(), "#00ff00".to_string()]
        );
    }

    #[test]
    fn test_writer_applies_saves_in_order() {
        let store = MemorySettingsStore::new();
        let writer = SettingsWriter::spawn(store.clone());
        for n in 0..20 {
            writer.save(Settings::with_colors(vec![format!("#0000{:02x}", n)]));
        }
        writer.flush();

        let saves = store.saves();
        assert_eq!(saves.len(), 20);
        for (n, saved) in saves.iter().enumerate() {
            assert_eq!(saved.colors[0], format!("#0000{:02x}", n));
        }
        assert!(writer.poll_errors().is_empty());
    }

    #[test]
    fn test_writer_reports_failures() {
        let store = MemorySettingsStore::new();
        store.set_fail_saves(true);
        let writer = SettingsWriter::spawn(store.clone());
        writer.save(Settings::default());
        writer.flush();

        let errors = writer.poll_errors();
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], SettingsError::Io(_)));
        assert!(store.saves().is_empty());
    }

    #[test]
    fn test_writer_queues_only_failures() {
        let store = MemorySettingsStore::new();
        let writer = SettingsWriter::spawn(store.clone());
        for _ in 0..5 {
            writer.save(Settings::default());
        }
        writer.flush();
        store.set_fail_saves(true);
        writer.save(Settings::default());
        writer.flush();
        store.set_fail_saves(false);
        writer.save(Settings::default());
        writer.flush();

        assert_eq!(store.saves().len(), 6);
        assert_eq!(writer.poll_errors().len(), 1);
        assert!(writer.poll_errors().is_empty());
    }
}
