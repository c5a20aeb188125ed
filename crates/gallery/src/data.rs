//! Seeded demo data for the gallery pages.
//!
//! Everything here is reproducible: two runs with the same seed produce the
//! same activity history and the same simulated sensor readings.

use chrono::{Days, NaiveDate};
use gallery_core::heatmap::DayActivity;
use gallery_core::overlay::{NormalizedRect, TextBlock};
use gallery_core::sensor::{
    Attitude, HeadphoneStatus, MotionActivity, MotionSample, SensorError, SimulatedSensor,
    Vector3,
};
use rand::Rng;
use rand_pcg::Pcg64;

/// Stream selector shared by every generator.
const STREAM: u128 = 0x0a02_bdbf_7bb3_c0a7;

/// Number of days of activity history.
pub const HISTORY_DAYS: u64 = 7;

fn rng(seed: u64, salt: u64) -> Pcg64 {
    Pcg64::new(u128::from(seed ^ salt), STREAM)
}

/// Seven days of activity ending at `today`, oldest first.
#[must_use]
pub fn demo_activity(today: NaiveDate, seed: u64) -> Vec<DayActivity> {
    let mut rng = rng(seed, 0);
    (0..HISTORY_DAYS)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| DayActivity::new(date, rng.random_range(5..=20)))
        .collect()
}

/// Activity sensor cycling through plausible classifications.
#[must_use]
pub fn activity_sensor(seed: u64) -> SimulatedSensor<MotionActivity> {
    let mut rng = rng(seed, 0x0acc);
    SimulatedSensor::new(move |_| {
        let mut activity = MotionActivity::default();
        match rng.random_range(0..10) {
            0 => activity.unknown = true,
            1..=4 => activity.stationary = true,
            5..=7 => activity.walking = true,
            8 => activity.running = true,
            _ => {}
        }
        Ok(activity)
    })
}

/// Connection-status sensor that connects on the first reading and
/// occasionally drops out.
#[must_use]
pub fn status_sensor(seed: u64) -> SimulatedSensor<HeadphoneStatus> {
    let mut rng = rng(seed, 0x57a7);
    SimulatedSensor::new(move |tick| {
        if tick > 0 && rng.random_bool(0.05) {
            Ok(HeadphoneStatus::Disconnected)
        } else {
            Ok(HeadphoneStatus::Connected)
        }
    })
}

/// Motion sensor producing a slow head sway with a little noise.
///
/// Roughly one reading in fifty fails, the way real updates sometimes do.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn motion_sensor(seed: u64) -> SimulatedSensor<MotionSample> {
    let mut rng = rng(seed, 0x0d0e);
    SimulatedSensor::new(move |tick| {
        if rng.random_bool(0.02) {
            return Err(SensorError::Update("motion sample dropped".to_string()));
        }
        let phase = tick as f64 * 0.1;
        let mut noise = || rng.random_range(-0.02..0.02);
        Ok(MotionSample {
            attitude: Attitude {
                roll: 0.4 * phase.sin() + noise(),
                pitch: 0.25 * (phase * 0.7).cos() + noise(),
                yaw: 0.6 * (phase * 0.3).sin() + noise(),
            },
            rotation_rate: Vector3 {
                x: 0.04 * phase.cos(),
                y: -0.0175 * (phase * 0.7).sin(),
                z: 0.018 * (phase * 0.3).cos(),
            },
            gravity: Vector3 {
                x: 0.0,
                y: -9.81 * phase.cos().abs().max(0.9),
                z: 0.0,
            },
        })
    })
}

/// Text blocks found on the sample menu image.
#[must_use]
pub fn sample_text_blocks() -> Vec<TextBlock> {
    let block = |original: &str, translated: &str, rect| TextBlock {
        original: original.to_string(),
        translated: translated.to_string(),
        bounding_box: rect,
    };
    vec![
        block(
            "Menu del dia",
            "Menu of the day",
            NormalizedRect::new(0.125, 0.75, 0.625, 0.125),
        ),
        block(
            "Sopa de tomate",
            "Tomato soup",
            NormalizedRect::new(0.125, 0.5, 0.5, 0.125),
        ),
        block(
            "Pollo asado",
            "Roast chicken",
            NormalizedRect::new(0.125, 0.375, 0.5, 0.125),
        ),
        block(
            "Postre: flan",
            "Dessert: flan",
            NormalizedRect::new(0.125, 0.125, 0.5, 0.125),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use gallery_core::sensor::Sensor;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn demo_activity_is_a_week_ending_today() {
        let today = date(2025, 8, 7);
        let days = demo_activity(today, 7);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date, date(2025, 8, 1));
        assert_eq!(days[6].date, today);
        assert!(days.iter().all(|d| (5..=20).contains(&d.count)));
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn demo_activity_is_seeded() {
        let today = date(2025, 8, 7);
        assert_eq!(demo_activity(today, 3), demo_activity(today, 3));
    }

    #[test]
    fn status_sensor_connects_first() {
        let mut sensor = status_sensor(1);
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        sensor.start(Box::new(move |r| sink.lock().unwrap().push(r)));
        sensor.tick();
        assert_eq!(seen.lock().unwrap()[0], Ok(HeadphoneStatus::Connected));
    }

    #[test]
    fn sample_blocks_fit_the_unit_square() {
        for block in sample_text_blocks() {
            let r = block.bounding_box;
            assert!(r.x >= 0.0 && r.x + r.width <= 1.0);
            assert!(r.y >= 0.0 && r.max_y() <= 1.0);
        }
    }
}
