//! Tilt and keyboard input mapping
//!
//! Orientation samples arrive asynchronously from a sensor callback outside
//! the frame loop's cadence. [`InputSlot`] is the single-slot, last-write-wins
//! exchange between that writer and the tick: the sensor side overwrites the
//! latest sample, the tick reads it once at the top of each frame. Staleness
//! is bounded by one publish interval and nothing ever blocks.
//!
//! A missing or denied sensor is not an error; the mapper degrades to "no
//! lateral input" unless a key event supplies one.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// One device-orientation reading (degrees); either angle may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TiltSample {
    /// Lateral tilt, negative left / positive right
    pub gamma: Option<f32>,
    /// Compass heading (0-360), used as a fallback on devices without gamma
    pub alpha: Option<f32>,
}

/// Discrete lateral key state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAxis {
    #[default]
    Neutral,
    Left,
    Right,
}

/// Latest input from either channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputSample {
    Tilt(TiltSample),
    Key(KeyAxis),
}

/// Single-slot snapshot channel, overwrite on write, read latest
#[derive(Debug, Clone, Default)]
pub struct InputSlot {
    latest: Option<InputSample>,
}

impl InputSlot {
    /// Publish a sample; any unread previous sample is discarded
    pub fn publish(&mut self, sample: InputSample) {
        self.latest = Some(sample);
    }

    /// Latest published sample, if any
    pub fn latest(&self) -> Option<InputSample> {
        self.latest
    }

    /// Drop any pending sample (on session restart)
    pub fn clear(&mut self) {
        self.latest = None;
    }
}

/// Map the latest sample to a signed per-tick lateral displacement
///
/// Tilt beyond the threshold yields a constant-magnitude step; inside the
/// neutral band, or with no usable sample at all, the step is zero.
pub fn lateral_step(sample: Option<InputSample>, tuning: &Tuning) -> f32 {
    match sample {
        Some(InputSample::Tilt(tilt)) => tilt_step(tilt, tuning),
        Some(InputSample::Key(KeyAxis::Left)) => -tuning.move_speed,
        Some(InputSample::Key(KeyAxis::Right)) => tuning.move_speed,
        Some(InputSample::Key(KeyAxis::Neutral)) | None => 0.0,
    }
}

fn tilt_step(tilt: TiltSample, tuning: &Tuning) -> f32 {
    // Gamma is the primary axis; some devices only report alpha
    if let Some(gamma) = tilt.gamma.filter(|g| !g.is_nan()) {
        if gamma <= -tuning.tilt_threshold {
            return -tuning.move_speed;
        }
        if gamma >= tuning.tilt_threshold {
            return tuning.move_speed;
        }
        return 0.0;
    }

    if let Some(alpha) = tilt.alpha.filter(|a| !a.is_nan()) {
        let (left_min, left_max) = tuning.heading_left_band;
        let (right_min, right_max) = tuning.heading_right_band;
        if alpha > left_min && alpha < left_max {
            return -tuning.move_speed;
        }
        if alpha > right_min && alpha < right_max {
            return tuning.move_speed;
        }
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tilt(gamma: Option<f32>, alpha: Option<f32>) -> Option<InputSample> {
        Some(InputSample::Tilt(TiltSample { gamma, alpha }))
    }

    #[test]
    fn test_gamma_threshold_bands() {
        let t = Tuning::default();
        assert_eq!(lateral_step(tilt(Some(-45.0), None), &t), -t.move_speed);
        assert_eq!(lateral_step(tilt(Some(-10.0), None), &t), -t.move_speed);
        assert_eq!(lateral_step(tilt(Some(-9.9), None), &t), 0.0);
        assert_eq!(lateral_step(tilt(Some(0.0), None), &t), 0.0);
        assert_eq!(lateral_step(tilt(Some(10.0), None), &t), t.move_speed);
    }

    #[test]
    fn test_alpha_fallback_bands() {
        let t = Tuning::default();
        // Gamma absent: heading bands take over
        assert_eq!(lateral_step(tilt(None, Some(50.0)), &t), -t.move_speed);
        assert_eq!(lateral_step(tilt(None, Some(310.0)), &t), t.move_speed);
        assert_eq!(lateral_step(tilt(None, Some(180.0)), &t), 0.0);
        // Band edges are exclusive
        assert_eq!(lateral_step(tilt(None, Some(40.0)), &t), 0.0);
    }

    #[test]
    fn test_gamma_nan_falls_back_to_alpha() {
        let t = Tuning::default();
        assert_eq!(
            lateral_step(tilt(Some(f32::NAN), Some(50.0)), &t),
            -t.move_speed
        );
    }

    #[test]
    fn test_no_sensor_is_neutral() {
        let t = Tuning::default();
        assert_eq!(lateral_step(tilt(None, None), &t), 0.0);
        assert_eq!(lateral_step(None, &t), 0.0);
    }

    #[test]
    fn test_key_axis_mapping() {
        let t = Tuning::default();
        assert_eq!(
            lateral_step(Some(InputSample::Key(KeyAxis::Left)), &t),
            -t.move_speed
        );
        assert_eq!(
            lateral_step(Some(InputSample::Key(KeyAxis::Right)), &t),
            t.move_speed
        );
        assert_eq!(
            lateral_step(Some(InputSample::Key(KeyAxis::Neutral)), &t),
            0.0
        );
    }

    #[test]
    fn test_slot_is_last_write_wins() {
        let mut slot = InputSlot::default();
        assert_eq!(slot.latest(), None);
        slot.publish(InputSample::Key(KeyAxis::Left));
        slot.publish(InputSample::Key(KeyAxis::Right));
        assert_eq!(slot.latest(), Some(InputSample::Key(KeyAxis::Right)));
        slot.clear();
        assert_eq!(slot.latest(), None);
    }

    proptest! {
        #[test]
        fn prop_step_is_bounded_and_signed(gamma in -180.0f32..180.0) {
            let t = Tuning::default();
            let step = lateral_step(tilt(Some(gamma), None), &t);
            prop_assert!(step.abs() <= t.move_speed);
            if gamma <= -t.tilt_threshold {
                prop_assert_eq!(step, -t.move_speed);
            } else if gamma >= t.tilt_threshold {
                prop_assert_eq!(step, t.move_speed);
            } else {
                prop_assert_eq!(step, 0.0);
            }
        }
    }
}
