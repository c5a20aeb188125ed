//! Color tokens and style helpers for the gallery.
//!
//! Every helper returns plain text when colors are off, so headless output
//! and snapshots stay free of escape sequences.

use crossterm::style::{Color, Stylize};
use gallery_core::heatmap::Intensity;

/// Semantic colors plus the on/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Whether escape sequences are emitted.
    pub color: bool,
    /// Brand color, selection.
    pub primary: Color,
    /// Headings.
    pub heading: Color,
    /// Hints, secondary text.
    pub muted: Color,
    /// Positive states.
    pub success: Color,
    /// Failures.
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    /// Creates the default palette.
    #[must_use]
    pub const fn new(color: bool) -> Self {
        Self {
            color,
            primary: Color::Rgb {
                r: 0x7d,
                g: 0x56,
                b: 0xf4,
            },
            heading: Color::Rgb {
                r: 0xf2,
                g: 0xf2,
                b: 0xf2,
            },
            muted: Color::DarkGrey,
            success: Color::Green,
            error: Color::Red,
        }
    }

    /// Theme that never emits escape sequences.
    #[must_use]
    pub const fn plain() -> Self {
        Self::new(false)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Bold heading text.
    #[must_use]
    pub fn title(&self, text: &str) -> String {
        if self.color {
            text.with(self.heading).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Highlighted text.
    #[must_use]
    pub fn accent(&self, text: &str) -> String {
        self.paint(text, self.primary)
    }

    /// De-emphasized text.
    #[must_use]
    pub fn muted(&self, text: &str) -> String {
        self.paint(text, self.muted)
    }

    /// Success text.
    #[must_use]
    pub fn success(&self, text: &str) -> String {
        self.paint(text, self.success)
    }

    /// Error text.
    #[must_use]
    pub fn error(&self, text: &str) -> String {
        self.paint(text, self.error)
    }

    /// Heat-map cell glyph in its intensity color.
    #[must_use]
    pub fn intensity(&self, intensity: Intensity, glyph: char) -> String {
        let color = match intensity {
            Intensity::Empty => self.muted,
            Intensity::Low => Color::Rgb {
                r: 0x9b,
                g: 0xe9,
                b: 0xa8,
            },
            Intensity::Medium => Color::Rgb {
                r: 0x40,
                g: 0xc4,
                b: 0x63,
            },
            Intensity::High => Color::Rgb {
                r: 0x30,
                g: 0xa1,
                b: 0x4e,
            },
            Intensity::Max => Color::Rgb {
                r: 0x21,
                g: 0x6e,
                b: 0x39,
            },
        };
        let mut buf = [0; 4];
        self.paint(glyph.encode_utf8(&mut buf), color)
    }
}
