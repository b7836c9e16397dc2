//! BLE Handler modules

pub mod battery;
pub mod steering;

pub use battery::BatteryHandler;
pub use steering::{SteeringCharacteristics, SteeringHandler};
