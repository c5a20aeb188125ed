//! Input and routing types shared by the app and its pages.

use std::fmt;
use std::str::FromStr;

/// A key press, decoupled from the terminal backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character.
    Char(char),
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Enter.
    Enter,
    /// Escape.
    Esc,
    /// Backspace.
    Backspace,
    /// Tab.
    Tab,
    /// Shift+Tab.
    BackTab,
    /// Ctrl+C.
    Interrupt,
}

/// Gallery pages, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    /// Two-handle range slider.
    #[default]
    DualSlider,
    /// Headphone motion and activity sensors.
    HeadphoneManager,
    /// Activity heat map.
    HeatMap,
    /// Translated text over a recognized image.
    ImageOverlay,
    /// Timing-curve editor.
    UnitCurve,
}

impl Page {
    /// Every page, in navigation order.
    pub const ALL: [Self; 5] = [
        Self::DualSlider,
        Self::HeadphoneManager,
        Self::HeatMap,
        Self::ImageOverlay,
        Self::UnitCurve,
    ];

    /// Display title used in the navigation list.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::DualSlider => "DualSlider",
            Self::HeadphoneManager => "Headphone Manager",
            Self::HeatMap => "HeatMap",
            Self::ImageOverlay => "Image Translate",
            Self::UnitCurve => "Unit Curve",
        }
    }

    /// Name accepted on the command line.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::DualSlider => "dual-slider",
            Self::HeadphoneManager => "headphones",
            Self::HeatMap => "heatmap",
            Self::ImageOverlay => "overlay",
            Self::UnitCurve => "unit-curve",
        }
    }

    /// Position in [`Page::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::DualSlider => 0,
            Self::HeadphoneManager => 1,
            Self::HeatMap => 2,
            Self::ImageOverlay => 3,
            Self::UnitCurve => 4,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A page name that matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page '{0}' (try `gallery list`)")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|page| {
                page.slug() == wanted
                    || page.title().to_ascii_lowercase().replace(' ', "") == wanted.replace(['-', ' '], "")
            })
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_parse_by_slug_and_title() {
        assert_eq!("heatmap".parse::<Page>(), Ok(Page::HeatMap));
        assert_eq!("dual-slider".parse::<Page>(), Ok(Page::DualSlider));
        assert_eq!("DualSlider".parse::<Page>(), Ok(Page::DualSlider));
        assert_eq!("Unit Curve".parse::<Page>(), Ok(Page::UnitCurve));
        assert_eq!("image-translate".parse::<Page>(), Ok(Page::ImageOverlay));
        assert!("wifi".parse::<Page>().is_err());
    }

    #[test]
    fn index_matches_order() {
        for (i, page) in Page::ALL.into_iter().enumerate() {
            assert_eq!(page.index(), i);
        }
    }
}
