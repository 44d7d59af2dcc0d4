//! Palette of highlight colors
//!
//! The store keeps colors in rotation order and persists after every
//! change. It never sorts on its own; [`update`] applies the settings-tab
//! messages, which sort by hue after adding a color and after a manual
//! edit is committed, but not after a delete or a move.

use crate::color::{normalize_hex, sort_by_hue_descending, ColorError};
use crate::settings::{Settings, SettingsError, SettingsStore, SettingsWriter};

/// Errors from palette mutations; the palette is left unchanged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// The color string is not valid hex
    InvalidColor(ColorError),
    /// Index does not refer to a palette entry
    IndexOutOfRange { index: usize, len: usize },
}

impl PaletteError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidColor(e) => e.user_message(),
            Self::IndexOutOfRange { index, len } => {
                format!("Color #{} does not exist (palette has {})", index + 1, len)
            }
        }
    }
}

impl std::fmt::Display for PaletteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColor(e) => write!(f, "{}", e),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "palette index {} out of range (len {})", index, len)
            }
        }
    }
}

impl std::error::Error for PaletteError {}

impl From<ColorError> for PaletteError {
    fn from(e: ColorError) -> Self {
        Self::InvalidColor(e)
    }
}

/// Ordered, persisted list of `#rrggbb` colors
#[derive(Debug)]
pub struct PaletteStore {
    colors: Vec<String>,
    writer: SettingsWriter,
}

impl PaletteStore {
    /// Load the palette from `store` and hand the store to a background writer
    ///
    /// Load failures are logged and start from an empty palette.
    pub fn load<S: SettingsStore + 'static>(store: S) -> Self {
        let settings = store.load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        });
        let colors = settings.normalized().colors;
        tracing::info!("Loaded palette with {} color(s)", colors.len());

        Self {
            colors,
            writer: SettingsWriter::spawn(store),
        }
    }

    pub fn all(&self) -> &[String] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color_at(&self, index: usize) -> Option<&str> {
        self.colors.get(index).map(String::as_str)
    }

    /// Append a color
    pub fn add(&mut self, color: &str) -> Result<(), PaletteError> {
        self.push(color)?;
        self.persist();
        Ok(())
    }

    /// Replace the color at `index`
    pub fn update(&mut self, index: usize, color: &str) -> Result<(), PaletteError> {
        self.replace(index, color)?;
        self.persist();
        Ok(())
    }

    /// Remove and return the color at `index`
    pub fn delete(&mut self, index: usize) -> Result<String, PaletteError> {
        self.check_index(index)?;
        let removed = self.colors.remove(index);
        tracing::debug!("Deleted palette color {} at {}", removed, index);
        self.persist();
        Ok(removed)
    }

    /// Move the color at `from` so it ends up at `to`
    pub fn move_color(&mut self, from: usize, to: usize) -> Result<(), PaletteError> {
        self.check_index(from)?;
        self.check_index(to)?;
        if from != to {
            let color = self.colors.remove(from);
            self.colors.insert(to, color);
            self.persist();
        }
        Ok(())
    }

    /// Reorder by hue, highest first
    pub fn sort_by_hue(&mut self) {
        self.sort();
        self.persist();
    }

    /// Block until all queued saves are written
    pub fn flush(&self) {
        self.writer.flush();
    }

    /// Failed saves since the last call
    pub fn take_save_errors(&self) -> Vec<SettingsError> {
        self.writer.poll_errors()
    }

    fn push(&mut self, color: &str) -> Result<(), PaletteError> {
        let hex = normalize_hex(color)?;
        tracing::debug!("Added palette color {}", hex);
        self.colors.push(hex);
        Ok(())
    }

    fn replace(&mut self, index: usize, color: &str) -> Result<(), PaletteError> {
        self.check_index(index)?;
        let hex = normalize_hex(color)?;
        tracing::debug!("Palette color {} changed to {}", index, hex);
        self.colors[index] = hex;
        Ok(())
    }

    fn sort(&mut self) {
        self.colors = sort_by_hue_descending(&self.colors);
    }

    fn check_index(&self, index: usize) -> Result<(), PaletteError> {
        if index < self.colors.len() {
            Ok(())
        } else {
            Err(PaletteError::IndexOutOfRange {
                index,
                len: self.colors.len(),
            })
        }
    }

    fn persist(&self) {
        self.writer.save(Settings::with_colors(self.colors.clone()));
    }
}

/// Data operations triggered by the settings tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteMsg {
    /// "Add color" button: append, then sort by hue
    AddColor(String),
    /// Typing in a color field: replace in place, no sort
    EditColor { index: usize, color: String },
    /// Color field lost focus: sort by hue
    CommitEdit,
    /// Delete button: remove, no sort
    DeleteColor(usize),
    /// Swap with the previous entry
    MoveUp(usize),
    /// Swap with the next entry
    MoveDown(usize),
}

/// Apply a settings-tab message, persisting once if the palette changed
pub fn update(store: &mut PaletteStore, msg: PaletteMsg) -> Result<(), PaletteError> {
    match msg {
        PaletteMsg::AddColor(color) => {
            store.push(&color)?;
            store.sort_by_hue();
        }
        PaletteMsg::EditColor { index, color } => store.update(index, &color)?,
        PaletteMsg::CommitEdit => store.sort_by_hue(),
        PaletteMsg::DeleteColor(index) => {
            store.delete(index)?;
        }
        PaletteMsg::MoveUp(index) => {
            store.check_index(index)?;
            if index > 0 {
                store.move_color(index, index - 1)?;
            }
        }
        PaletteMsg::MoveDown(index) => {
            store.check_index(index)?;
            if index + 1 < store.len() {
                store.move_color(index, index + 1)?;
            }
        }
    }
    Ok(())
}
