//! Headphone motion and activity page.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gallery_core::sensor::{
    DisplayMode, HeadphoneManager, HeadphoneStatus, MotionActivity, MotionSample,
    SimulatedSensor,
};
use tracing::trace;

use super::{PageModel, heading};
use crate::data;
use crate::messages::{Key, Page};
use crate::theme::Theme;

type Shared<T> = Rc<RefCell<SimulatedSensor<T>>>;

/// Drives a [`HeadphoneManager`] from simulated sensors.
///
/// The page keeps a handle on each sensor so it can tick them after the
/// manager has taken ownership of its clone.
pub struct HeadphonesPage {
    manager: HeadphoneManager,
    activity: Shared<MotionActivity>,
    status: Shared<HeadphoneStatus>,
    motion: Shared<MotionSample>,
}

impl HeadphonesPage {
    /// Creates the page with sensors seeded from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_sensors(
            data::activity_sensor(seed),
            data::status_sensor(seed),
            data::motion_sensor(seed),
        )
    }

    /// Creates the page over the given sensors.
    #[must_use]
    pub fn with_sensors(
        activity: SimulatedSensor<MotionActivity>,
        status: SimulatedSensor<HeadphoneStatus>,
        motion: SimulatedSensor<MotionSample>,
    ) -> Self {
        let activity = Rc::new(RefCell::new(activity));
        let status = Rc::new(RefCell::new(status));
        let motion = Rc::new(RefCell::new(motion));
        let manager = HeadphoneManager::new(
            Box::new(Rc::clone(&activity)),
            Box::new(Rc::clone(&status)),
            Box::new(Rc::clone(&motion)),
        );
        Self {
            manager,
            activity,
            status,
            motion,
        }
    }

    /// The view-model.
    #[must_use]
    pub const fn manager(&self) -> &HeadphoneManager {
        &self.manager
    }

    fn readout(&self, theme: &Theme) -> Vec<String> {
        let Some(sample) = self.manager.device_motion() else {
            return Vec::new();
        };
        match self.manager.display_mode() {
            DisplayMode::Demo => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let pad = ((sample.attitude.yaw.clamp(-1.0, 1.0) + 1.0) * 5.0).round() as usize;
                let face = if sample.attitude.roll > 0.15 {
                    "(o_o)/"
                } else if sample.attitude.roll < -0.15 {
                    "\\(o_o)"
                } else {
                    "(o_o)"
                };
                vec![format!("{}{}", " ".repeat(pad), theme.accent(face))]
            }
            DisplayMode::Data => {
                let v = |label: &str, x: f64, y: f64, z: f64| {
                    format!("{label:<12}x {x:>6.2}  y {y:>6.2}  z {z:>6.2}")
                };
                vec![
                    format!("{:<12}{}", "Attitude", self.manager.motion_data()),
                    v(
                        "Rotation",
                        sample.rotation_rate.x,
                        sample.rotation_rate.y,
                        sample.rotation_rate.z,
                    ),
                    v(
                        "Gravity",
                        sample.gravity.x,
                        sample.gravity.y,
                        sample.gravity.z,
                    ),
                ]
            }
        }
    }
}

impl PageModel for HeadphonesPage {
    fn update(&mut self, key: Key) -> bool {
        match key {
            Key::Char('a') => {
                let enabled = !self.manager.is_activity_enabled();
                self.manager.set_activity_enabled(enabled);
            }
            Key::Char('m') => {
                let enabled = !self.manager.is_motion_enabled();
                self.manager.set_motion_enabled(enabled);
            }
            Key::Tab | Key::BackTab => {
                let mode = self.manager.display_mode().toggled();
                self.manager.set_display_mode(mode);
            }
            _ => return false,
        }
        true
    }

    fn tick(&mut self, _elapsed: Duration) {
        self.status.borrow_mut().tick();
        self.activity.borrow_mut().tick();
        self.motion.borrow_mut().tick();
        let applied = self.manager.pump();
        trace!(applied, "sensor updates applied");
    }

    fn view(&self, _width: usize, _height: usize, theme: &Theme) -> String {
        let on_off = |on: bool| if on { theme.success("on ") } else { theme.muted("off") };
        let status = self.manager.device_status();

        let mut lines = vec![
            format!(
                "Headphones  {} ({})",
                status.label(),
                self.manager.status()
            ),
            format!(
                "Activity    {}  {}",
                on_off(self.manager.is_activity_enabled()),
                self.manager.activity()
            ),
            format!(
                "Motion      {}  {}",
                on_off(self.manager.is_motion_enabled()),
                self.manager.motion_data()
            ),
            format!("Mode        {}", self.manager.display_mode().display_name()),
        ];
        lines.extend(self.readout(theme));

        let mut out = heading(theme, Page::HeadphoneManager.title());
        out.push('\n');
        out.push_str(&lines.join("\n"));
        out
    }

    fn page(&self) -> Page {
        Page::HeadphoneManager
    }

    fn hints(&self) -> &'static str {
        "a activity  m motion  tab mode  esc back"
    }
}

#[cfg(test)]
mod tests {
    use gallery_core::sensor::{ACTIVITY_NOT_STARTED, Attitude, NO_MOTION_DATA};

    use super::*;

    fn fixed_page() -> HeadphonesPage {
        HeadphonesPage::with_sensors(
            SimulatedSensor::new(|_| {
                Ok(MotionActivity {
                    walking: true,
                    ..MotionActivity::default()
                })
            }),
            SimulatedSensor::new(|_| Ok(HeadphoneStatus::Connected)),
            SimulatedSensor::new(|_| {
                Ok(MotionSample {
                    attitude: Attitude {
                        roll: 0.5,
                        pitch: 0.0,
                        yaw: 0.0,
                    },
                    ..MotionSample::default()
                })
            }),
        )
    }

    #[test]
    fn ticks_do_nothing_until_enabled() {
        let mut page = fixed_page();
        page.tick(Duration::from_millis(100));
        assert_eq!(page.manager().activity(), ACTIVITY_NOT_STARTED);
        assert_eq!(page.manager().motion_data(), NO_MOTION_DATA);
    }

    #[test]
    fn enabling_activity_reports_walking_and_connection() {
        let mut page = fixed_page();
        assert!(page.update(Key::Char('a')));
        page.tick(Duration::from_millis(100));
        assert_eq!(page.manager().activity(), "Walking");
        assert_eq!(page.manager().status(), "Connected");

        page.update(Key::Char('a'));
        assert_eq!(page.manager().activity(), ACTIVITY_NOT_STARTED);
    }

    #[test]
    fn motion_modes_render() {
        let mut page = fixed_page();
        page.update(Key::Char('m'));
        page.tick(Duration::from_millis(100));
        let theme = Theme::plain();

        let demo = page.view(60, 20, &theme);
        assert!(demo.ends_with("     (o_o)/"));

        page.update(Key::Tab);
        let data = page.view(60, 20, &theme);
        assert!(data.contains("Attitude    Roll: 0.50, Pitch: 0.00, Yaw: 0.00"));
        assert!(data.contains("Gravity     x   0.00"));
    }

    #[test]
    fn unavailable_activity_sensor() {
        let mut page = HeadphonesPage::with_sensors(
            SimulatedSensor::unavailable(),
            SimulatedSensor::new(|_| Ok(HeadphoneStatus::Connected)),
            SimulatedSensor::unavailable(),
        );
        page.update(Key::Char('a'));
        assert_eq!(page.manager().activity(), "Activity not available!");
    }
}
