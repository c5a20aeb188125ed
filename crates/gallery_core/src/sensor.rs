//! Headphone sensor capabilities and the view-model built on them.
//!
//! Platform motion and activity services are modelled as injected
//! [`Sensor`] capabilities. Their update callbacks only forward readings into
//! a channel; [`HeadphoneManager::pump`] drains the channel and updates the
//! display fields, so all state changes happen on the caller's thread.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, trace};

/// Errors reported by sensors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SensorError {
    /// The sensor cannot be used on this device.
    #[error("{0} is not available")]
    Unavailable(&'static str),

    /// A single update failed.
    #[error("update failed: {0}")]
    Update(String),
}

/// Callback receiving sensor readings.
pub type UpdateHandler<T> = Box<dyn FnMut(Result<T, SensorError>) + Send>;

/// A platform sensor that pushes readings to a handler.
pub trait Sensor {
    /// Reading type delivered on each update.
    type Reading;

    /// Whether the sensor can be started.
    fn is_available(&self) -> bool;

    /// Starts delivering readings to `handler`, replacing any previous one.
    fn start(&mut self, handler: UpdateHandler<Self::Reading>);

    /// Stops delivering readings.
    fn stop(&mut self);
}

/// Source closure used by [`SimulatedSensor`].
pub type ReadingSource<T> = Box<dyn FnMut(u64) -> Result<T, SensorError> + Send>;

/// Sensor driven by explicit ticks instead of hardware.
pub struct SimulatedSensor<T> {
    available: bool,
    source: ReadingSource<T>,
    handler: Option<UpdateHandler<T>>,
    ticks: u64,
}

impl<T> fmt::Debug for SimulatedSensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedSensor")
            .field("available", &self.available)
            .field("running", &self.handler.is_some())
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl<T> SimulatedSensor<T> {
    /// Creates an available sensor producing readings from `source`.
    ///
    /// `source` receives the tick number, starting at zero.
    pub fn new<F>(source: F) -> Self
    where
        F: FnMut(u64) -> Result<T, SensorError> + Send + 'static,
    {
        Self {
            available: true,
            source: Box::new(source),
            handler: None,
            ticks: 0,
        }
    }

    /// Creates a sensor that reports itself unavailable.
    #[must_use]
    pub fn unavailable() -> Self
    where
        T: 'static,
    {
        Self {
            available: false,
            source: Box::new(|_| Err(SensorError::Unavailable("simulated sensor"))),
            handler: None,
            ticks: 0,
        }
    }

    /// Whether a handler is attached.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.handler.is_some()
    }

    /// Produces one reading if the sensor is running.
    ///
    /// Returns whether a reading was delivered.
    pub fn tick(&mut self) -> bool {
        let Some(handler) = self.handler.as_mut() else {
            return false;
        };
        let reading = (self.source)(self.ticks);
        self.ticks += 1;
        handler(reading);
        true
    }
}

impl<T> Sensor for SimulatedSensor<T> {
    type Reading = T;

    fn is_available(&self) -> bool {
        self.available
    }

    fn start(&mut self, handler: UpdateHandler<T>) {
        if self.available {
            self.handler = Some(handler);
        }
    }

    fn stop(&mut self) {
        self.handler = None;
    }
}

/// Lets the owner keep driving a sensor after handing a clone to a consumer.
impl<S: Sensor> Sensor for Rc<RefCell<S>> {
    type Reading = S::Reading;

    fn is_available(&self) -> bool {
        self.borrow().is_available()
    }

    fn start(&mut self, handler: UpdateHandler<Self::Reading>) {
        self.borrow_mut().start(handler);
    }

    fn stop(&mut self) {
        self.borrow_mut().stop();
    }
}

/// Motion activity classification flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct MotionActivity {
    /// Classifier could not decide.
    pub unknown: bool,
    /// Not moving.
    pub stationary: bool,
    /// Walking.
    pub walking: bool,
    /// Running.
    pub running: bool,
    /// In a vehicle.
    pub automotive: bool,
    /// Cycling.
    pub cycling: bool,
}

impl MotionActivity {
    /// Human readable label; the first set flag wins.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        if self.unknown {
            "Unknown"
        } else if self.stationary {
            "Stationary"
        } else if self.walking {
            "Walking"
        } else if self.running {
            "Running"
        } else if self.automotive {
            "Automotive"
        } else if self.cycling {
            "Cycling"
        } else {
            "Other Moving"
        }
    }
}

/// Headphone connection state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadphoneStatus {
    /// No headphones.
    #[default]
    Disconnected,
    /// Headphones connected.
    Connected,
}

impl HeadphoneStatus {
    /// Label for the status row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Disconnected => "Not connected",
            Self::Connected => "Connected",
        }
    }

    /// Value stored in the view-model's status string.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Connected => "Connected",
        }
    }
}

/// Three-axis vector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// X axis.
    pub x: f64,
    /// Y axis.
    pub y: f64,
    /// Z axis.
    pub z: f64,
}

/// Head orientation in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Attitude {
    /// Side-to-side head shake.
    pub roll: f64,
    /// Nod.
    pub pitch: f64,
    /// Head tilt.
    pub yaw: f64,
}

/// One device-motion reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionSample {
    /// Orientation.
    pub attitude: Attitude,
    /// Rotation rate in radians per second.
    pub rotation_rate: Vector3,
    /// Gravity in meters per second squared.
    pub gravity: Vector3,
}

impl MotionSample {
    /// One-line attitude summary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Roll: {:.2}, Pitch: {:.2}, Yaw: {:.2}",
            self.attitude.roll, self.attitude.pitch, self.attitude.yaw
        )
    }
}

/// How motion readings are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Rotating face preview.
    #[default]
    Demo,
    /// Raw values.
    Data,
}

impl DisplayMode {
    /// Picker label.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Demo => "Demo",
            Self::Data => "Data",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Demo => Self::Data,
            Self::Data => Self::Demo,
        }
    }
}

/// Activity label before updates start.
pub const ACTIVITY_NOT_STARTED: &str = "Not started";
/// Activity label when the activity sensor is missing.
pub const ACTIVITY_UNAVAILABLE: &str = "Activity not available!";
/// Status label before the first status update.
pub const STATUS_UNKNOWN: &str = "--";
/// Motion label when motion updates are off.
pub const NO_MOTION_DATA: &str = "No motion data";

#[derive(Debug)]
enum SensorUpdate {
    Activity(Result<MotionActivity, SensorError>),
    Status(Result<HeadphoneStatus, SensorError>),
    Motion(Result<MotionSample, SensorError>),
}

/// Boxed activity sensor.
pub type ActivitySensor = Box<dyn Sensor<Reading = MotionActivity>>;
/// Boxed connection-status sensor.
pub type StatusSensor = Box<dyn Sensor<Reading = HeadphoneStatus>>;
/// Boxed device-motion sensor.
pub type MotionSensor = Box<dyn Sensor<Reading = MotionSample>>;

/// View-model for the headphone screen.
pub struct HeadphoneManager {
    activity_sensor: ActivitySensor,
    status_sensor: StatusSensor,
    motion_sensor: MotionSensor,
    tx: Sender<SensorUpdate>,
    rx: Receiver<SensorUpdate>,
    activity: String,
    status: String,
    motion_data: String,
    device_motion: Option<MotionSample>,
    device_status: HeadphoneStatus,
    activity_enabled: bool,
    motion_enabled: bool,
    display_mode: DisplayMode,
}

impl fmt::Debug for HeadphoneManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadphoneManager")
            .field("activity", &self.activity)
            .field("status", &self.status)
            .field("motion_data", &self.motion_data)
            .field("activity_enabled", &self.activity_enabled)
            .field("motion_enabled", &self.motion_enabled)
            .field("display_mode", &self.display_mode)
            .finish_non_exhaustive()
    }
}

impl HeadphoneManager {
    /// Creates the view-model over injected sensors.
    #[must_use]
    pub fn new(activity: ActivitySensor, status: StatusSensor, motion: MotionSensor) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            activity_sensor: activity,
            status_sensor: status,
            motion_sensor: motion,
            tx,
            rx,
            activity: ACTIVITY_NOT_STARTED.to_string(),
            status: STATUS_UNKNOWN.to_string(),
            motion_data: NO_MOTION_DATA.to_string(),
            device_motion: None,
            device_status: HeadphoneStatus::Disconnected,
            activity_enabled: false,
            motion_enabled: false,
            display_mode: DisplayMode::Demo,
        }
    }

    /// Latest activity label.
    #[must_use]
    pub fn activity(&self) -> &str {
        &self.activity
    }

    /// Latest status label.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Latest motion summary.
    #[must_use]
    pub fn motion_data(&self) -> &str {
        &self.motion_data
    }

    /// Latest motion reading.
    #[must_use]
    pub const fn device_motion(&self) -> Option<&MotionSample> {
        self.device_motion.as_ref()
    }

    /// Latest connection state.
    #[must_use]
    pub const fn device_status(&self) -> HeadphoneStatus {
        self.device_status
    }

    /// Whether activity updates are on.
    #[must_use]
    pub const fn is_activity_enabled(&self) -> bool {
        self.activity_enabled
    }

    /// Whether motion updates are on.
    #[must_use]
    pub const fn is_motion_enabled(&self) -> bool {
        self.motion_enabled
    }

    /// Whether the activity sensor exists on this device.
    #[must_use]
    pub fn is_activity_available(&self) -> bool {
        self.activity_sensor.is_available()
    }

    /// Current presentation mode.
    #[must_use]
    pub const fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// Switches the presentation mode.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
    }

    /// Turns activity updates on or off.
    ///
    /// Turning them on also starts connection-status updates.
    pub fn set_activity_enabled(&mut self, enabled: bool) {
        self.activity_enabled = enabled;
        if enabled {
            self.start_status();
            self.start_activity();
        } else {
            self.stop_activity();
        }
    }

    /// Turns motion updates on or off.
    pub fn set_motion_enabled(&mut self, enabled: bool) {
        self.motion_enabled = enabled;
        if enabled {
            self.start_motion();
        } else {
            self.stop_motion();
        }
    }

    /// Applies every queued sensor update. Returns how many were applied.
    ///
    /// Activity and motion readings still queued after their updates were
    /// turned off are discarded.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.rx.try_recv() {
            match update {
                SensorUpdate::Activity(_) if !self.activity_enabled => {
                    trace!("dropping stale activity update");
                    continue;
                }
                SensorUpdate::Motion(_) if !self.motion_enabled => {
                    trace!("dropping stale motion update");
                    continue;
                }
                SensorUpdate::Activity(Ok(activity)) => {
                    self.activity = activity.description().to_string();
                }
                SensorUpdate::Status(Ok(status)) => {
                    self.status = status.description().to_string();
                    self.device_status = status;
                }
                SensorUpdate::Motion(Ok(sample)) => {
                    self.motion_data = sample.summary();
                    self.device_motion = Some(sample);
                }
                SensorUpdate::Activity(Err(err)) => {
                    error!(%err, "couldn't get activity update");
                    continue;
                }
                SensorUpdate::Status(Err(err)) => {
                    error!(%err, "couldn't get status update");
                    continue;
                }
                SensorUpdate::Motion(Err(err)) => {
                    error!(%err, "couldn't get motion update");
                    continue;
                }
            }
            applied += 1;
        }
        applied
    }

    fn start_activity(&mut self) {
        if !self.activity_sensor.is_available() {
            error!("headphone activity is not available");
            self.activity = ACTIVITY_UNAVAILABLE.to_string();
            return;
        }
        let tx = self.tx.clone();
        self.activity_sensor.start(Box::new(move |reading| {
            let _ = tx.send(SensorUpdate::Activity(reading));
        }));
        debug!("activity updates started");
    }

    fn stop_activity(&mut self) {
        self.activity_sensor.stop();
        self.activity = ACTIVITY_NOT_STARTED.to_string();
    }

    fn start_status(&mut self) {
        if !self.status_sensor.is_available() {
            error!("headphone status is not available");
            return;
        }
        let tx = self.tx.clone();
        self.status_sensor.start(Box::new(move |reading| {
            let _ = tx.send(SensorUpdate::Status(reading));
        }));
    }

    fn start_motion(&mut self) {
        if !self.motion_sensor.is_available() {
            error!("headphone motion is not available");
            return;
        }
        let tx = self.tx.clone();
        self.motion_sensor.start(Box::new(move |reading| {
            let _ = tx.send(SensorUpdate::Motion(reading));
        }));
        debug!("motion updates started");
    }

    fn stop_motion(&mut self) {
        self.motion_sensor.stop();
        self.motion_data = NO_MOTION_DATA.to_string();
    }
}

impl Drop for HeadphoneManager {
    fn drop(&mut self) {
        self.activity_sensor.stop();
        self.motion_sensor.stop();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Sensor whose handler is reachable from the test after being moved in.
    struct SharedSensor<T> {
        available: bool,
        handler: Arc<Mutex<Option<UpdateHandler<T>>>>,
    }

    impl<T> SharedSensor<T> {
        fn new(available: bool) -> (Self, Arc<Mutex<Option<UpdateHandler<T>>>>) {
            let handler = Arc::new(Mutex::new(None));
            (
                Self {
                    available,
                    handler: Arc::clone(&handler),
                },
                handler,
            )
        }
    }

    impl<T> Sensor for SharedSensor<T> {
        type Reading = T;

        fn is_available(&self) -> bool {
            self.available
        }

        fn start(&mut self, handler: UpdateHandler<T>) {
            *self.handler.lock().unwrap() = Some(handler);
        }

        fn stop(&mut self) {
            *self.handler.lock().unwrap() = None;
        }
    }

    fn emit<T>(slot: &Arc<Mutex<Option<UpdateHandler<T>>>>, reading: Result<T, SensorError>) {
        if let Some(handler) = slot.lock().unwrap().as_mut() {
            handler(reading);
        }
    }

    fn sample() -> MotionSample {
        MotionSample {
            attitude: Attitude {
                roll: 0.1234,
                pitch: -0.5,
                yaw: 1.0,
            },
            ..MotionSample::default()
        }
    }

    #[test]
    fn test_activity_descriptions() {
        let mut a = MotionActivity::default();
        assert_eq!(a.description(), "Other Moving");
        a.cycling = true;
        assert_eq!(a.description(), "Cycling");
        a.walking = true;
        assert_eq!(a.description(), "Walking");
        a.unknown = true;
        assert_eq!(a.description(), "Unknown");
    }

    #[test]
    fn test_motion_summary_format() {
        assert_eq!(sample().summary(), "Roll: 0.12, Pitch: -0.50, Yaw: 1.00");
    }

    #[test]
    fn test_simulated_sensor_ticks_only_when_started() {
        let mut sensor = SimulatedSensor::new(|tick| Ok(tick * 2));
        assert!(!sensor.tick());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        sensor.start(Box::new(move |r| sink.lock().unwrap().push(r.unwrap())));
        assert!(sensor.tick());
        assert!(sensor.tick());
        sensor.stop();
        assert!(!sensor.tick());

        assert_eq!(*seen.lock().unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_unavailable_simulated_sensor_never_runs() {
        let mut sensor = SimulatedSensor::<u8>::unavailable();
        sensor.start(Box::new(|_| {}));
        assert!(!sensor.is_running());
    }

    #[test]
    fn test_shared_simulated_sensor_drives_manager() {
        let motion = Rc::new(RefCell::new(SimulatedSensor::new(|_| Ok(sample()))));
        let (a, _) = SharedSensor::<MotionActivity>::new(true);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let mut manager =
            HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(Rc::clone(&motion)));

        manager.set_motion_enabled(true);
        assert!(motion.borrow_mut().tick());
        assert_eq!(manager.pump(), 1);
        assert_eq!(manager.device_motion(), Some(&sample()));
    }

    #[test]
    fn test_manager_initial_labels() {
        let (a, _) = SharedSensor::<MotionActivity>::new(true);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, _) = SharedSensor::<MotionSample>::new(true);
        let manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));
        assert_eq!(manager.activity(), ACTIVITY_NOT_STARTED);
        assert_eq!(manager.status(), STATUS_UNKNOWN);
        assert_eq!(manager.motion_data(), NO_MOTION_DATA);
        assert_eq!(manager.device_status().label(), "Not connected");
    }

    #[test]
    fn test_manager_activity_flow() {
        let (a, a_slot) = SharedSensor::<MotionActivity>::new(true);
        let (s, s_slot) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, _) = SharedSensor::<MotionSample>::new(true);
        let mut manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));

        manager.set_activity_enabled(true);
        emit(
            &a_slot,
            Ok(MotionActivity {
                running: true,
                ..MotionActivity::default()
            }),
        );
        emit(&s_slot, Ok(HeadphoneStatus::Connected));
        emit(&a_slot, Err(SensorError::Update("glitch".into())));
        assert_eq!(manager.pump(), 2);
        assert_eq!(manager.activity(), "Running");
        assert_eq!(manager.status(), "Connected");
        assert_eq!(manager.device_status(), HeadphoneStatus::Connected);

        manager.set_activity_enabled(false);
        assert_eq!(manager.activity(), ACTIVITY_NOT_STARTED);
        assert!(a_slot.lock().unwrap().is_none());
        // Status updates keep running.
        assert!(s_slot.lock().unwrap().is_some());
    }

    #[test]
    fn test_manager_activity_unavailable() {
        let (a, _) = SharedSensor::<MotionActivity>::new(false);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, _) = SharedSensor::<MotionSample>::new(true);
        let mut manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));
        assert!(!manager.is_activity_available());
        manager.set_activity_enabled(true);
        assert_eq!(manager.activity(), ACTIVITY_UNAVAILABLE);
    }

    #[test]
    fn test_manager_motion_flow() {
        let (a, _) = SharedSensor::<MotionActivity>::new(true);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, m_slot) = SharedSensor::<MotionSample>::new(true);
        let mut manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));

        manager.set_motion_enabled(true);
        emit(&m_slot, Ok(sample()));
        manager.pump();
        assert_eq!(manager.motion_data(), "Roll: 0.12, Pitch: -0.50, Yaw: 1.00");
        assert_eq!(manager.device_motion(), Some(&sample()));

        manager.set_motion_enabled(false);
        assert_eq!(manager.motion_data(), NO_MOTION_DATA);
        assert!(m_slot.lock().unwrap().is_none());
    }

    #[test]
    fn test_pump_after_stop_discards_queued_readings() {
        let (a, a_slot) = SharedSensor::<MotionActivity>::new(true);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, m_slot) = SharedSensor::<MotionSample>::new(true);
        let mut manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));

        manager.set_activity_enabled(true);
        manager.set_motion_enabled(true);
        emit(
            &a_slot,
            Ok(MotionActivity {
                running: true,
                ..MotionActivity::default()
            }),
        );
        emit(&m_slot, Ok(sample()));

        manager.set_activity_enabled(false);
        manager.set_motion_enabled(false);
        assert_eq!(manager.pump(), 0);
        assert_eq!(manager.activity(), ACTIVITY_NOT_STARTED);
        assert_eq!(manager.motion_data(), NO_MOTION_DATA);
    }

    #[test]
    fn test_drop_stops_sensors() {
        let (a, a_slot) = SharedSensor::<MotionActivity>::new(true);
        let (s, _) = SharedSensor::<HeadphoneStatus>::new(true);
        let (m, m_slot) = SharedSensor::<MotionSample>::new(true);
        let mut manager = HeadphoneManager::new(Box::new(a), Box::new(s), Box::new(m));
        manager.set_activity_enabled(true);
        manager.set_motion_enabled(true);
        drop(manager);
        assert!(a_slot.lock().unwrap().is_none());
        assert!(m_slot.lock().unwrap().is_none());
    }

    #[test]
    fn test_display_mode_toggle() {
        assert_eq!(DisplayMode::Demo.toggled(), DisplayMode::Data);
        assert_eq!(DisplayMode::Data.toggled().display_name(), "Demo");
    }
}
