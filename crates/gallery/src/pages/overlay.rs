//! Translated text laid over a recognized image.

use gallery_core::overlay::{FixedRecognizer, TextBlock, TextRecognizer, render_overlay};

use super::{PageModel, heading};
use crate::data;
use crate::messages::{Key, Page};
use crate::theme::Theme;

/// Name of the image the recognizer is asked about.
const SAMPLE_IMAGE: &str = "menu.jpg";

/// Shows recognized blocks placed where they were found.
pub struct OverlayPage {
    blocks: Vec<TextBlock>,
    show_original: bool,
}

impl Default for OverlayPage {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayPage {
    /// Creates the page with the bundled sample recognition result.
    #[must_use]
    pub fn new() -> Self {
        Self::with_recognizer(&FixedRecognizer::new(data::sample_text_blocks()))
    }

    /// Creates the page from any recognizer.
    pub fn with_recognizer<R: TextRecognizer + ?Sized>(recognizer: &R) -> Self {
        Self {
            blocks: recognizer.recognize(SAMPLE_IMAGE),
            show_original: false,
        }
    }

    /// Whether recognized text is shown instead of translations.
    #[must_use]
    pub const fn shows_original(&self) -> bool {
        self.show_original
    }
}

impl PageModel for OverlayPage {
    fn update(&mut self, key: Key) -> bool {
        if key == Key::Char('t') {
            self.show_original = !self.show_original;
            return true;
        }
        false
    }

    fn view(&self, width: usize, height: usize, theme: &Theme) -> String {
        let shown: Vec<TextBlock> = if self.show_original {
            self.blocks
                .iter()
                .map(|block| TextBlock {
                    translated: block.original.clone(),
                    ..block.clone()
                })
                .collect()
        } else {
            self.blocks.clone()
        };

        let mut out = heading(theme, Page::ImageOverlay.title());
        out.push('\n');
        out.push_str(&format!(
            "{} ({} blocks, {})\n",
            SAMPLE_IMAGE,
            self.blocks.len(),
            if self.show_original {
                "original"
            } else {
                "translated"
            }
        ));
        out.push_str(&render_overlay(
            &shown,
            width.saturating_sub(2).clamp(1, 40),
            height.saturating_sub(6).clamp(1, 10),
        ));
        out
    }

    fn page(&self) -> Page {
        Page::ImageOverlay
    }

    fn hints(&self) -> &'static str {
        "t toggle original  esc back"
    }
}
