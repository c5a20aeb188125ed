//! Text overlays on recognized images.
//!
//! Text recognizers report bounding boxes normalized to `[0, 1]` with the
//! origin in the bottom-left corner. Views draw from the top-left, so boxes
//! are flipped and scaled before the translated text is placed on top.

use serde::{Deserialize, Serialize};

/// A rectangle normalized to the image, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl NormalizedRect {
    /// Creates a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top edge in normalized space.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Converts to a top-left origin rectangle on a view of the given size.
    #[must_use]
    pub fn to_view(&self, view_width: f64, view_height: f64) -> ViewRect {
        ViewRect {
            x: self.x * view_width,
            y: (1.0 - self.max_y()) * view_height,
            width: self.width * view_width,
            height: self.height * view_height,
        }
    }
}

/// A rectangle in view coordinates, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl ViewRect {
    /// Horizontal center.
    #[must_use]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// A recognized line of text and its translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    /// Recognized text.
    pub original: String,
    /// Text drawn over the image.
    pub translated: String,
    /// Where the text was found.
    pub bounding_box: NormalizedRect,
}

/// Source of recognized text blocks.
pub trait TextRecognizer {
    /// Recognizes text in the named image.
    fn recognize(&self, image: &str) -> Vec<TextBlock>;
}

/// Recognizer returning a fixed set of blocks, whatever the image.
#[derive(Debug, Clone, Default)]
pub struct FixedRecognizer {
    blocks: Vec<TextBlock>,
}

impl FixedRecognizer {
    /// Creates a recognizer with the given blocks.
    #[must_use]
    pub const fn new(blocks: Vec<TextBlock>) -> Self {
        Self { blocks }
    }
}

impl TextRecognizer for FixedRecognizer {
    fn recognize(&self, _image: &str) -> Vec<TextBlock> {
        self.blocks.clone()
    }
}

/// Lays translated text over a `width x height` character canvas.
///
/// Each block is placed at the top-left of its converted rectangle and cut
/// at the canvas edge. The canvas is framed with a border.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_overlay(blocks: &[TextBlock], width: usize, height: usize) -> String {
    let mut canvas = vec![vec![' '; width]; height];
    for block in blocks {
        let rect = block.bounding_box.to_view(width as f64, height as f64);
        let row = rect.y.max(0.0).floor() as usize;
        let col = rect.x.max(0.0).floor() as usize;
        if row >= height {
            continue;
        }
        for (offset, ch) in block.translated.chars().enumerate() {
            let Some(cell) = canvas[row].get_mut(col + offset) else {
                break;
            };
            *cell = ch;
        }
    }

    let border = "─".repeat(width);
    let mut lines = Vec::with_capacity(height + 2);
    lines.push(format!("┌{border}┐"));
    for row in canvas {
        lines.push(format!("│{}│", row.into_iter().collect::<String>()));
    }
    lines.push(format!("└{border}┘"));
    lines.join("\n")
}
