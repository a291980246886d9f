//! Overlay configuration.
//!
//! All settings have defaults matching the stock look of the rulers, so hosts usually only
//! override a handful of fields. Every struct is `#[serde(default)]`, which lets a partial JSON
//! document be loaded with [`OverlayConfig::from_json_str`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigError;

/// Default debounce window applied to search keystrokes.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;

/// An opaque sRGB colour, serialized as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

/// A colour string that is not of the form `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid colour '{0}', expected #rrggbb")]
pub struct ColorParseError(pub String);

impl Color {
    /// Build a colour from a `0xRRGGBB` literal.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0x00ff_ffff)
    }

    /// Parse a `#rrggbb` string.
    pub fn parse_hex(value: &str) -> Result<Self, ColorParseError> {
        let digits = value
            .strip_prefix('#')
            .filter(|d| d.len() == 6)
            .ok_or_else(|| ColorParseError(value.to_string()))?;
        u32::from_str_radix(digits, 16)
            .map(Self::from_rgb)
            .map_err(|_| ColorParseError(value.to_string()))
    }

    /// Red, green and blue channels.
    pub fn channels(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Visual parameters of a single ruler strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulerStyle {
    /// Cross-axis size of the strip in CSS pixels (height for the horizontal ruler, width for
    /// the vertical one).
    pub thickness: f64,
    /// Length of ticks on multiples of the major interval.
    pub major_tick_len: f64,
    /// Length of ticks on multiples of the labeled interval.
    pub labeled_tick_len: f64,
    /// Length of every other tick.
    pub minor_tick_len: f64,
    /// Strip background.
    pub background: Color,
    /// Border line separating the strip from the page.
    pub border: Color,
    /// Ticks that fall inside the page.
    pub tick_inside: Color,
    /// Ticks that fall outside the page.
    pub tick_outside: Color,
    /// Label text.
    pub label: Color,
    /// Caret guide line.
    pub caret: Color,
    /// CSS font shorthand used for labels.
    pub label_font: String,
    /// Y of horizontal-ruler labels, measured from the top of the strip.
    pub label_baseline: f64,
    /// Gap between a vertical-ruler tick and its right-aligned label.
    pub label_gap: f64,
}

impl Default for RulerStyle {
    fn default() -> Self {
        Self {
            thickness: 28.0,
            major_tick_len: 14.0,
            labeled_tick_len: 10.0,
            minor_tick_len: 6.0,
            background: Color::from_rgb(0xf5f5f5),
            border: Color::from_rgb(0xe5e7eb),
            tick_inside: Color::from_rgb(0x94a3b8),
            tick_outside: Color::from_rgb(0xe5e7eb),
            label: Color::from_rgb(0x475569),
            caret: Color::from_rgb(0x0ea5e9),
            label_font: "10px system-ui, -apple-system, Segoe UI, Roboto".to_string(),
            label_baseline: 10.0,
            label_gap: 2.0,
        }
    }
}

/// Tick intervals in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickSpacing {
    /// Distance between consecutive ticks. Also the unit of horizontal-ruler labels.
    pub minor: i64,
    /// Every tick on a multiple of this carries a label (when inside the page).
    pub labeled: i64,
    /// Every tick on a multiple of this is drawn longest.
    pub major: i64,
    /// How far past the page edges ticks keep being produced.
    pub margin: i64,
}

impl Default for TickSpacing {
    fn default() -> Self {
        Self {
            minor: 10,
            labeled: 50,
            major: 100,
            margin: 120,
        }
    }
}

impl TickSpacing {
    /// Check that intervals are positive and nest into each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minor <= 0 || self.labeled <= 0 || self.major <= 0 {
            return Err(ConfigError::InvalidTickSpacing("intervals must be positive"));
        }
        if self.margin < 0 {
            return Err(ConfigError::InvalidTickSpacing("margin must not be negative"));
        }
        if self.labeled % self.minor != 0 || self.major % self.labeled != 0 {
            return Err(ConfigError::InvalidTickSpacing(
                "major must be a multiple of labeled, labeled a multiple of minor",
            ));
        }
        Ok(())
    }
}

/// Fixed page metrics of the paginated surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Height of one page (A4 at 72dpi by default).
    pub page_height: f64,
    /// Vertical gap between pages.
    pub page_gap: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_height: 842.0,
            page_gap: 20.0,
        }
    }
}

impl PageLayout {
    /// Scroll offset of the top of page `index` (0-based).
    pub fn page_offset(&self, index: usize) -> f64 {
        index as f64 * (self.page_height + self.page_gap)
    }
}

/// Complete overlay configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Style of the horizontal ruler.
    pub horizontal: RulerStyle,
    /// Style of the vertical ruler.
    pub vertical: RulerStyle,
    /// Tick intervals shared by both rulers.
    pub ticks: TickSpacing,
    /// Page metrics used for page navigation.
    pub pages: PageLayout,
    /// Quiescence window for search input, in milliseconds.
    pub search_debounce_ms: u64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            horizontal: RulerStyle::default(),
            vertical: RulerStyle::default(),
            ticks: TickSpacing::default(),
            pages: PageLayout::default(),
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl OverlayConfig {
    /// Load a (possibly partial) configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.ticks.validate()?;
        Ok(config)
    }

    /// Search debounce window as a [`Duration`].
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_roundtrip() {
        let color = Color::parse_hex("#94a3b8").unwrap();
        assert_eq!(color, Color::from_rgb(0x94a3b8));
        assert_eq!(color.to_string(), "#94a3b8");
        assert_eq!(color.channels(), (0x94, 0xa3, 0xb8));
    }

    #[test]
    fn test_color_rejects_malformed() {
        assert!(Color::parse_hex("94a3b8").is_err());
        assert!(Color::parse_hex("#94a3b").is_err());
        assert!(Color::parse_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = OverlayConfig::from_json_str(
            r##"{ "search_debounce_ms": 50, "vertical": { "caret": "#ff0000" } }"##,
        )
        .unwrap();

        assert_eq!(config.search_debounce(), Duration::from_millis(50));
        assert_eq!(config.vertical.caret, Color::from_rgb(0xff0000));
        assert_eq!(config.vertical.thickness, 28.0);
        assert_eq!(config.horizontal, RulerStyle::default());
        assert_eq!(config.ticks, TickSpacing::default());
    }

    #[test]
    fn test_invalid_tick_spacing_is_rejected() {
        let err = OverlayConfig::from_json_str(r#"{ "ticks": { "minor": 7 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTickSpacing(_)));

        let err = OverlayConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_page_offset() {
        let pages = PageLayout::default();
        assert_eq!(pages.page_offset(0), 0.0);
        assert_eq!(pages.page_offset(3), 3.0 * 862.0);
    }
}
