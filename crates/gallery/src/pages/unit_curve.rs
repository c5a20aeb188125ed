//! Timing-curve editor page.

use std::time::Duration;

use gallery_core::unit_curve::{ControlPoint, TimingCurveEditor};
use tracing::debug;

use super::{PageModel, heading};
use crate::messages::{Key, Page};
use crate::theme::Theme;

/// Unit-space distance moved per key press.
const NUDGE: f64 = 0.05;

/// Width of the progress bar, in cells.
const BAR_WIDTH: usize = 20;

/// Lets the user shape a timing curve and preview it.
pub struct UnitCurvePage {
    editor: TimingCurveEditor,
    selected: ControlPoint,
    elapsed: Option<f64>,
}

impl UnitCurvePage {
    /// Creates the editor with the default control points.
    #[must_use]
    pub fn new(duration: f64) -> Self {
        Self {
            editor: TimingCurveEditor {
                duration,
                ..TimingCurveEditor::default()
            },
            selected: ControlPoint::Start,
            elapsed: None,
        }
    }

    /// The editor model.
    #[must_use]
    pub const fn editor(&self) -> &TimingCurveEditor {
        &self.editor
    }

    /// Whether the preview animation is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.elapsed.is_some()
    }

    fn progress(&self) -> f64 {
        self.elapsed
            .map_or(0.0, |elapsed| self.editor.progress(elapsed))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn bar(&self) -> String {
        let filled = (self.progress().clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
        format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
    }
}

impl PageModel for UnitCurvePage {
    fn update(&mut self, key: Key) -> bool {
        let (dx, dy) = match key {
            Key::Tab | Key::BackTab => {
                self.selected = match self.selected {
                    ControlPoint::Start => ControlPoint::End,
                    ControlPoint::End => ControlPoint::Start,
                };
                return true;
            }
            Key::Char(' ') => {
                self.elapsed = Some(0.0);
                debug!(duration = self.editor.duration, "curve preview started");
                return true;
            }
            Key::Left | Key::Char('h') => (-NUDGE, 0.0),
            Key::Right | Key::Char('l') => (NUDGE, 0.0),
            Key::Up | Key::Char('k') => (0.0, NUDGE),
            Key::Down | Key::Char('j') => (0.0, -NUDGE),
            _ => return false,
        };
        self.editor.nudge(self.selected, dx, dy);
        true
    }

    fn tick(&mut self, elapsed: Duration) {
        if let Some(t) = self.elapsed.as_mut() {
            *t += elapsed.as_secs_f64();
            if *t >= self.editor.duration {
                self.elapsed = None;
            }
        }
    }

    fn view(&self, width: usize, height: usize, theme: &Theme) -> String {
        let mark = |which| if self.selected == which { ">" } else { " " };
        let mut out = heading(theme, Page::UnitCurve.title());
        out.push('\n');
        out.push_str(&format!(
            "{}1 {}   {}2 {}\n",
            mark(ControlPoint::Start),
            theme.accent(&self.editor.start.to_string()),
            mark(ControlPoint::End),
            theme.accent(&self.editor.end.to_string())
        ));
        out.push_str(&self.editor.plot(
            width.saturating_sub(2).clamp(2, 41),
            height.saturating_sub(6).clamp(2, 15),
        ));
        out.push('\n');
        out.push_str(&format!(
            "{} {:.2}  ({}s)",
            self.bar(),
            self.progress(),
            self.editor.duration
        ));
        out
    }

    fn page(&self) -> Page {
        Page::UnitCurve
    }

    fn hints(&self) -> &'static str {
        "tab switch point  arrows move  space preview  esc back"
    }

    fn on_leave(&mut self) {
        self.elapsed = None;
    }
}
