//! GATT layout of the steering peripheral.
//!
//! The custom steering service carries the angle, the raw command channel and
//! the response channel. Battery level lives in the standard battery service.

use core::fmt;

pub const STEERING_SERVICE_UUID: &str = "347b0001-7635-408b-8918-8ff3949ce592";
pub const STEERING_ANGLE_CHAR_UUID: &str = "347b0030-7635-408b-8918-8ff3949ce592";
pub const STEERING_RX_CHAR_UUID: &str = "347b0031-7635-408b-8918-8ff3949ce592";
pub const STEERING_TX_CHAR_UUID: &str = "347b0032-7635-408b-8918-8ff3949ce592";

pub const BATTERY_SERVICE_UUID16: u16 = 0x180F;
pub const BATTERY_LEVEL_CHAR_UUID16: u16 = 0x2A19;

/// Short advertised name. Some simulator hosts only recognize the device by it.
pub const SHORT_DEVICE_NAME: &str = "STERZOPN";
pub const MAX_DEVICE_NAME_LEN: usize = 8;

pub const DEFAULT_STEERING_VALUE: [u8; 4] = [0x00, 0x00, 0x00, 0x00];
pub const DEFAULT_RX_VALUE: [u8; 4] = [0x00, 0x00, 0x00, 0x00];
pub const DEFAULT_RESPONSE_VALUE: [u8; 4] = [0x03, 0x10, 0x12, 0x34];
pub const DEFAULT_BATTERY_LEVEL: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Steering angle, notify only.
    SteeringAngle,
    /// Raw commands written by the central.
    RawCommand,
    /// Responses to the central, indicate only.
    Response,
    /// Standard battery level, read and notify.
    BatteryLevel,
}

impl Characteristic {
    /// Value the characteristic holds before anything was sent.
    pub fn initial_value(&self) -> &'static [u8] {
        match self {
            Characteristic::SteeringAngle => &DEFAULT_STEERING_VALUE,
            Characteristic::RawCommand => &DEFAULT_RX_VALUE,
            Characteristic::Response => &DEFAULT_RESPONSE_VALUE,
            Characteristic::BatteryLevel => &[DEFAULT_BATTERY_LEVEL],
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Characteristic::SteeringAngle => write!(f, "SteeringChar (30)"),
            Characteristic::RawCommand => write!(f, "pRxChar (31)"),
            Characteristic::Response => write!(f, "TxChar (32)"),
            Characteristic::BatteryLevel => write!(f, "BatteryChar (0x2A19)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_values() {
        assert_eq!(Characteristic::SteeringAngle.initial_value(), &[0, 0, 0, 0]);
        assert_eq!(
            Characteristic::Response.initial_value(),
            &[0x03, 0x10, 0x12, 0x34]
        );
        assert_eq!(Characteristic::BatteryLevel.initial_value(), &[100]);
    }

    #[test]
    fn test_device_name_fits_advertising() {
        assert!(SHORT_DEVICE_NAME.len() <= MAX_DEVICE_NAME_LEN);
    }
}
