//! Color model for highlight palettes
//!
//! Hex parsing/formatting, RGB to hue conversion, and the hue ordering
//! used to keep the palette visually grouped (blue-ish first, red-ish last).

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from "#RGB" or "#RRGGBB" (leading `#` optional)
    pub fn from_hex(s: &str) -> Result<Self, ColorError> {
        hex_to_rgb(s)
    }

    /// Format as lowercase "#rrggbb"
    pub fn to_hex(self) -> String {
        rgb_to_hex(self)
    }

    /// HSL hue in degrees, `[0, 360)`
    pub fn hue(self) -> f64 {
        rgb_to_hue(self)
    }
}

/// Errors produced by color parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not a 3- or 6-digit hex color
    InvalidColorFormat(String),
}

impl ColorError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidColorFormat(input) => {
                format!("\"{}\" is not a valid color (use #RGB or #RRGGBB)", input)
            }
        }
    }
}

impl std::fmt::Display for ColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidColorFormat(input) => write!(f, "Invalid color format: {}", input),
        }
    }
}

impl std::error::Error for ColorError {}

/// Parse a 3- or 6-digit hex color, `#` optional
///
/// Shorthand digits are doubled (`#f0a` → `#ff00aa`).
pub fn hex_to_rgb(input: &str) -> Result<Rgb, ColorError> {
    let invalid = || ColorError::InvalidColorFormat(input.to_string());
    let s = input.strip_prefix('#').unwrap_or(input);

    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match s.len() {
        3 => s.chars().flat_map(|c| [c, c]).collect(),
        6 => s.to_string(),
        _ => return Err(invalid()),
    };

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&expanded[range], 16).map_err(|_| invalid())
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Format as lowercase, zero-padded "#rrggbb"
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Normalize any accepted hex input to canonical "#rrggbb"
pub fn normalize_hex(input: &str) -> Result<String, ColorError> {
    hex_to_rgb(input.trim()).map(rgb_to_hex)
}

/// Standard HSL hue in degrees, `[0, 360)`
///
/// Achromatic colors (r == g == b) have hue 0. When two channels tie for
/// the maximum, the first of red, green, blue wins.
pub fn rgb_to_hue(rgb: Rgb) -> f64 {
    let r = rgb.r as f64 / 255.0;
    let g = rgb.g as f64 / 255.0;
    let b = rgb.b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }

    let d = max - min;
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    h * 60.0
}

/// Stable sort by hue, highest first
///
/// Entries that fail to parse sort as hue 0 and keep their relative order.
pub fn sort_by_hue_descending<S: AsRef<str> + Clone>(colors: &[S]) -> Vec<S> {
    let mut keyed: Vec<(f64, S)> = colors
        .iter()
        .map(|c| {
            let hue = hex_to_rgb(c.as_ref()).map(rgb_to_hue).unwrap_or(0.0);
            (hue, c.clone())
        })
        .collect();

    // Vec::sort_by is stable
    keyed.sort_by(|a, b| b.0.total_cmp(&a.0));
    keyed.into_iter().map(|(_, c)| c).collect()
}
