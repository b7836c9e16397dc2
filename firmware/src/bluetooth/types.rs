//! Shared types for the NimBLE backend

use steering_core::SteeringError;

/// Common error type for bluetooth operations
#[derive(Debug)]
pub enum BluetoothError {
    Transport(String),
    Steering(SteeringError),
}

impl std::fmt::Display for BluetoothError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BluetoothError::Transport(msg) => write!(f, "transport error: {}", msg),
            BluetoothError::Steering(e) => write!(f, "steering error: {}", e),
        }
    }
}

impl std::error::Error for BluetoothError {}

impl From<SteeringError> for BluetoothError {
    fn from(e: SteeringError) -> Self {
        BluetoothError::Steering(e)
    }
}

pub type Result<T> = core::result::Result<T, BluetoothError>;
