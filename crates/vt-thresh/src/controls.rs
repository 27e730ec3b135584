//! Interactive parameter ranges.
//!
//! Front ends build their sliders from these so that every value they emit
//! passes config validation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamRange<T> {
    pub min: T,
    pub max: T,
    pub step: T,
    pub default: T,
}

impl<T: PartialOrd + Copy> ParamRange<T> {
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: T) -> T {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

pub const THRESHOLD: ParamRange<u8> = ParamRange {
    min: 0,
    max: 255,
    step: 1,
    default: 128,
};

pub const BLUR_SIGMA: ParamRange<f32> = ParamRange {
    min: 0.0,
    max: 5.0,
    step: 0.1,
    default: 0.0,
};

/// Odd sizes only, hence the step of 2 starting from 3.
pub const WINDOW_SIZE: ParamRange<usize> = ParamRange {
    min: 3,
    max: 255,
    step: 2,
    default: 51,
};

pub const OFFSET: ParamRange<i32> = ParamRange {
    min: -50,
    max: 50,
    step: 1,
    default: 2,
};

#[cfg(test)]
mod tests {
    use super::{BLUR_SIGMA, OFFSET, THRESHOLD, WINDOW_SIZE};

    #[test]
    fn defaults_lie_inside_their_ranges() {
        assert!(THRESHOLD.contains(THRESHOLD.default));
        assert!(BLUR_SIGMA.contains(BLUR_SIGMA.default));
        assert!(WINDOW_SIZE.contains(WINDOW_SIZE.default));
        assert!(OFFSET.contains(OFFSET.default));
    }

    #[test]
    fn window_steps_stay_odd() {
        let mut w = WINDOW_SIZE.min;
        while w <= WINDOW_SIZE.max {
            assert_eq!(w % 2, 1);
            w += WINDOW_SIZE.step;
        }
    }

    #[test]
    fn clamp_limits_values() {
        assert_eq!(OFFSET.clamp(-80), -50);
        assert_eq!(OFFSET.clamp(7), 7);
        assert_eq!(BLUR_SIGMA.clamp(9.5), 5.0);
        assert!(!WINDOW_SIZE.contains(1));
    }

    #[test]
    fn ranges_serialize_as_plain_records() {
        let json = serde_json::to_value(WINDOW_SIZE).expect("serialize range");
        assert_eq!(
            json,
            serde_json::json!({"min": 3, "max": 255, "step": 2, "default": 51})
        );
    }
}
