use thiserror::Error;

use crate::{connection::PeerAddress, gatt::Characteristic};

#[derive(Debug, Error)]
pub enum SteeringError {
    #[error("central [{rejected}] tried to connect while [{current}] is still connected")]
    AlreadyConnected {
        current: PeerAddress,
        rejected: PeerAddress,
    },

    #[error("{0} subscription changed while no central is connected")]
    NotConnected(Characteristic),

    #[error("battery percentage {0} is outside of 0..=100")]
    BatteryOutOfRange(u8),

    #[error("{0} does not support notifications or indications")]
    NotSubscribable(Characteristic),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not parse configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}
