//! Two-handle range slider page.

use std::cell::Cell;
use std::rc::Rc;

use gallery_core::dual_slider::{DualSlider, Handle};
use tracing::warn;

use super::{PageModel, heading};
use crate::config::SliderConfig;
use crate::messages::{Key, Page};
use crate::theme::Theme;

/// Widest track drawn, in cells.
const MAX_TRACK: usize = 40;

/// Steps moved by the shifted keys.
const BIG_MOVE: f64 = 10.0;

/// Keyboard-driven [`DualSlider`].
///
/// Each key press is one drag event followed by the end of the drag, the
/// same sequence a short pointer gesture produces.
pub struct DualSliderPage {
    slider: DualSlider,
    active: Handle,
    editing: Rc<Cell<bool>>,
    notifications: Rc<Cell<u32>>,
}

impl DualSliderPage {
    /// Creates the page from the configured range.
    ///
    /// # Errors
    ///
    /// Returns the slider validation error.
    pub fn new(config: &SliderConfig) -> gallery_core::Result<Self> {
        let editing = Rc::new(Cell::new(false));
        let notifications = Rc::new(Cell::new(0));
        let slider = {
            let editing = Rc::clone(&editing);
            let notifications = Rc::clone(&notifications);
            config.build()?.on_editing_changed(move |now| {
                editing.set(now);
                notifications.set(notifications.get() + 1);
            })
        };
        Ok(Self {
            slider,
            active: Handle::Lower,
            editing,
            notifications,
        })
    }

    /// The slider model.
    #[must_use]
    pub const fn slider(&self) -> &DualSlider {
        &self.slider
    }

    /// Handle moved by the arrow keys.
    #[must_use]
    pub const fn active(&self) -> Handle {
        self.active
    }

    /// Editing notifications received so far.
    #[must_use]
    pub fn notifications(&self) -> u32 {
        self.notifications.get()
    }

    /// Moves the active handle by `steps` steps.
    fn nudge(&mut self, steps: f64) {
        let state = self.slider.state();
        let (min, _) = state.range();
        let target = steps.mul_add(state.step(), state.value(self.active));
        let fraction = (target - min) / state.span();
        if let Err(err) = self.slider.drag(self.active, fraction) {
            warn!(%err, "slider drag failed");
        }
        self.slider.end_drag();
    }
}

impl PageModel for DualSliderPage {
    fn update(&mut self, key: Key) -> bool {
        match key {
            Key::Tab | Key::BackTab => self.active = self.active.other(),
            Key::Left | Key::Char('h') => self.nudge(-1.0),
            Key::Right | Key::Char('l') => self.nudge(1.0),
            Key::Char('H') => self.nudge(-BIG_MOVE),
            Key::Char('L') => self.nudge(BIG_MOVE),
            _ => return false,
        }
        true
    }

    fn view(&self, width: usize, _height: usize, theme: &Theme) -> String {
        let state = self.slider.state();
        let track = self.slider.render(width.saturating_sub(4).clamp(2, MAX_TRACK));
        let active = match self.active {
            Handle::Lower => "Lower",
            Handle::Upper => "Upper",
        };

        let mut out = heading(theme, Page::DualSlider.title());
        out.push('\n');
        out.push_str(&format!(
            "Range  {} to {}\n",
            theme.accent(&format!("{:.2}", state.lower())),
            theme.accent(&format!("{:.2}", state.upper()))
        ));
        out.push_str(&track);
        out.push('\n');
        out.push_str(&format!("Active handle: {active}\n"));
        out.push_str(&format!(
            "Editing: {} ({} notifications)",
            if self.editing.get() { "yes" } else { "no" },
            self.notifications()
        ));
        out
    }

    fn page(&self) -> Page {
        Page::DualSlider
    }

    fn hints(&self) -> &'static str {
        "tab switch handle  h/l move  H/L move 10  esc back"
    }
}
