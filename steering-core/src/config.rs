use serde::{Deserialize, Serialize};

use crate::{
    angle::AngleLimits,
    error::SteeringError,
    gatt::{DEFAULT_BATTERY_LEVEL, MAX_DEVICE_NAME_LEN, SHORT_DEVICE_NAME},
};

/// Settings of a steering server. Missing fields fall back to their defaults,
/// so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Advertised short name, at most 8 ASCII characters.
    pub device_name: String,
    pub angle_limits: AngleLimits,
    /// Battery value before the application reports one. Also sent when a
    /// central subscribes to the battery level.
    pub initial_battery_level: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            device_name: SHORT_DEVICE_NAME.to_string(),
            angle_limits: AngleLimits::default(),
            initial_battery_level: DEFAULT_BATTERY_LEVEL,
        }
    }
}

impl ServerConfig {
    pub fn from_json(json: &str) -> Result<Self, SteeringError> {
        let config: ServerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SteeringError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), SteeringError> {
        if self.device_name.is_empty()
            || self.device_name.len() > MAX_DEVICE_NAME_LEN
            || !self.device_name.is_ascii()
        {
            return Err(SteeringError::InvalidConfig(format!(
                "device_name must be 1 to {} ASCII characters, got {:?}",
                MAX_DEVICE_NAME_LEN, self.device_name
            )));
        }

        if self.initial_battery_level > 100 {
            return Err(SteeringError::BatteryOutOfRange(self.initial_battery_level));
        }

        self.angle_limits.validate()
    }
}
