//! Steering angle processing and its wire encoding.
//!
//! The central expects the angle in degrees as a little-endian IEEE-754 `f32`.
//! Before sending, the raw angle is clamped to the steering range and small
//! values around zero are snapped to exactly zero to hide sensor jitter.

use serde::{Deserialize, Serialize};

use crate::error::SteeringError;

pub const MAX_STEER_ANGLE: f32 = 35.0;
pub const STEER_ANGLE_DEADBAND: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleLimits {
    /// Largest absolute angle that is ever transmitted.
    pub max_angle: f32,
    /// Absolute angles below this are sent as 0.0.
    pub deadband: f32,
}

impl Default for AngleLimits {
    fn default() -> Self {
        Self {
            max_angle: MAX_STEER_ANGLE,
            deadband: STEER_ANGLE_DEADBAND,
        }
    }
}

impl AngleLimits {
    /// Clamp `angle` to `±max_angle` and apply the deadband.
    ///
    /// NaN is sent as 0.0, infinities clamp like any other out of range value.
    pub fn constrain(&self, angle: f32) -> f32 {
        if angle.is_nan() {
            return 0.0;
        }

        if angle.abs() > self.max_angle {
            return self.max_angle.copysign(angle);
        }

        if angle.abs() < self.deadband {
            return 0.0;
        }

        angle
    }

    pub fn validate(&self) -> Result<(), SteeringError> {
        if !self.max_angle.is_finite() || self.max_angle <= 0.0 {
            return Err(SteeringError::InvalidConfig(format!(
                "max_angle must be a positive number, got {}",
                self.max_angle
            )));
        }

        if !(0.0..self.max_angle).contains(&self.deadband) {
            return Err(SteeringError::InvalidConfig(format!(
                "deadband must be within 0..{}, got {}",
                self.max_angle, self.deadband
            )));
        }

        Ok(())
    }
}

/// [`AngleLimits::constrain`] with the default ±35° range and 1.5° deadband.
pub fn constrain(angle: f32) -> f32 {
    AngleLimits::default().constrain(angle)
}

pub fn encode_angle(angle: f32) -> [u8; 4] {
    angle.to_le_bytes()
}

/// Decode a steering notification payload. Returns `None` unless it is exactly 4 bytes.
pub fn decode_angle(payload: &[u8]) -> Option<f32> {
    let bytes: [u8; 4] = payload.try_into().ok()?;
    Some(f32::from_le_bytes(bytes))
}
