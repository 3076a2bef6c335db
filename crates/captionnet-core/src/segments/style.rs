//! Caption Styling
//!
//! Style data carried by each segment and applied to the video overlay.
//! The four presets match the editor's style panel: Default, Neon,
//! Highlight, Minimal.

use serde::{Deserialize, Serialize};

use crate::Language;

// =============================================================================
// Color
// =============================================================================

/// RGBA color value (0-255 for each component)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Creates a new color from RGBA components
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from RGB components
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    /// Neon cyan accent color
    pub fn neon_cyan() -> Self {
        Self::rgb(0, 255, 255)
    }

    /// Yellow highlight color
    pub fn yellow() -> Self {
        Self::rgb(255, 255, 0)
    }

    /// Converts to hex string (e.g., "FFFFFF" or "FFFFFFFF" with alpha)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::white()
    }
}

// =============================================================================
// Caption Style
// =============================================================================

/// Font weight
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Normal,
    #[default]
    Bold,
    Light,
}

/// Caption text style
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionStyle {
    /// Font family name
    pub font_family: String,
    /// Font size in pixels
    pub font_size: u32,
    /// Font weight
    pub font_weight: FontWeight,
    /// Text color
    pub color: Color,
    /// Background/box color (None = transparent)
    pub background_color: Option<Color>,
    /// Glow/text-shadow color (None = no glow)
    pub glow_color: Option<Color>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 24,
            font_weight: FontWeight::Bold,
            color: Color::white(),
            background_color: Some(Color::rgba(0, 0, 0, 128)),
            glow_color: None,
        }
    }
}

impl CaptionStyle {
    /// Creates the default style using the display font for the language.
    ///
    /// Sinhala captions need a script-capable family.
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::English => Self::default(),
            Language::Sinhala => Self {
                font_family: "Noto Sans Sinhala".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn with_font(mut self, font_family: &str) -> Self {
        self.font_family = font_family.to_string();
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

// =============================================================================
// Style Presets
// =============================================================================

/// Named style preset from the editor's style panel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum StylePreset {
    /// White text on a translucent box
    #[default]
    Default,
    /// Cyan text with a matching glow
    Neon,
    /// Dark text on a yellow highlight box
    Highlight,
    /// Bare white text, no box or glow
    Minimal,
}

impl StylePreset {
    /// Concrete style for the preset
    pub fn style(&self) -> CaptionStyle {
        match self {
            StylePreset::Default => CaptionStyle::default(),
            StylePreset::Neon => CaptionStyle {
                color: Color::neon_cyan(),
                background_color: None,
                glow_color: Some(Color::neon_cyan()),
                ..Default::default()
            },
            StylePreset::Highlight => CaptionStyle {
                color: Color::black(),
                background_color: Some(Color::yellow()),
                glow_color: None,
                ..Default::default()
            },
            StylePreset::Minimal => CaptionStyle {
                background_color: None,
                glow_color: None,
                ..Default::default()
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
