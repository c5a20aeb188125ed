//! Page models for `gallery`.
//!
//! Each page implements the `PageModel` trait, providing a consistent
//! interface for the app to delegate key, tick and view calls.

mod dual_slider;
mod headphones;
mod heatmap;
mod overlay;
mod unit_curve;

pub use dual_slider::DualSliderPage;
pub use headphones::HeadphonesPage;
pub use heatmap::HeatMapPage;
pub use overlay::OverlayPage;
pub use unit_curve::UnitCurvePage;

use std::time::Duration;

use crate::config::Config;
use crate::messages::{Key, Page};
use crate::theme::Theme;

/// Trait for page models that can be routed to.
pub trait PageModel {
    /// Handle a key press. Returns whether the key was consumed.
    fn update(&mut self, key: Key) -> bool;

    /// Advance time-driven state.
    fn tick(&mut self, _elapsed: Duration) {}

    /// Render the page content.
    ///
    /// The width and height are the available content area
    /// (excluding app chrome like header/sidebar/footer).
    fn view(&self, width: usize, height: usize, theme: &Theme) -> String;

    /// Get the page identifier.
    fn page(&self) -> Page;

    /// Get context-sensitive key hints for the footer.
    fn hints(&self) -> &'static str {
        "esc back  q quit"
    }

    /// Called when the page becomes active (navigated to).
    fn on_enter(&mut self) {}

    /// Called when leaving the page (navigating away).
    fn on_leave(&mut self) {}
}

/// Container for all page models.
pub struct Pages {
    pub dual_slider: DualSliderPage,
    pub headphones: HeadphonesPage,
    pub heatmap: HeatMapPage,
    pub overlay: OverlayPage,
    pub unit_curve: UnitCurvePage,
}

impl Pages {
    /// Builds every page from the configuration.
    ///
    /// # Errors
    ///
    /// Returns the slider or grid error when the configuration is unusable.
    pub fn new(config: &Config) -> gallery_core::Result<Self> {
        let seed = config.effective_seed();
        Ok(Self {
            dual_slider: DualSliderPage::new(&config.slider)?,
            headphones: HeadphonesPage::new(seed),
            heatmap: HeatMapPage::new(config, seed)?,
            overlay: OverlayPage::new(),
            unit_curve: UnitCurvePage::new(config.curve_duration),
        })
    }

    /// Get a reference to the given page model.
    pub fn get(&self, page: Page) -> &dyn PageModel {
        match page {
            Page::DualSlider => &self.dual_slider,
            Page::HeadphoneManager => &self.headphones,
            Page::HeatMap => &self.heatmap,
            Page::ImageOverlay => &self.overlay,
            Page::UnitCurve => &self.unit_curve,
        }
    }

    /// Get a mutable reference to the given page model.
    pub fn get_mut(&mut self, page: Page) -> &mut dyn PageModel {
        match page {
            Page::DualSlider => &mut self.dual_slider,
            Page::HeadphoneManager => &mut self.headphones,
            Page::HeatMap => &mut self.heatmap,
            Page::ImageOverlay => &mut self.overlay,
            Page::UnitCurve => &mut self.unit_curve,
        }
    }
}

/// Page heading followed by a blank line.
pub(crate) fn heading(theme: &Theme, title: &str) -> String {
    format!("{}\n", theme.title(title))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_config() -> Config {
        Config {
            seed: Some(7),
            today: chrono::NaiveDate::from_ymd_opt(2025, 8, 7),
            ..Config::default()
        }
    }

    #[test]
    fn every_page_reports_itself() {
        let pages = Pages::new(&fixed_config()).unwrap();
        for page in Page::ALL {
            assert_eq!(pages.get(page).page(), page);
        }
    }

    #[test]
    fn every_page_renders_its_title() {
        let pages = Pages::new(&fixed_config()).unwrap();
        let theme = Theme::plain();
        for page in Page::ALL {
            let view = pages.get(page).view(60, 20, &theme);
            assert!(view.starts_with(page.title()), "{page}: {view}");
        }
    }
}
