use crate::{
    command::RawCommand, connection::PeerAddress, error::SteeringError, gatt::Characteristic,
};

/// Something the BLE stack reported about the central.
#[derive(Debug, Clone, PartialEq)]
pub enum PeripheralEvent {
    Connect(PeerAddress),
    Disconnect(PeerAddress),
    /// CCCD write: `enabled` is false when the central unsubscribed.
    Subscribe {
        characteristic: Characteristic,
        enabled: bool,
    },
    /// Write to the raw command characteristic.
    Write(Vec<u8>),
}

/// Inbound half of the BLE peripheral stack. Every backend delivers its
/// callbacks through this trait, one at a time.
pub trait PeripheralCallbacks {
    fn on_connect(&mut self, peer: PeerAddress) -> Result<(), SteeringError>;
    fn on_disconnect(&mut self, peer: PeerAddress);
    fn on_subscribe(
        &mut self,
        characteristic: Characteristic,
        enabled: bool,
    ) -> Result<(), SteeringError>;
    fn on_write(&mut self, data: &[u8]) -> RawCommand;

    /// Route a queued event to the matching callback.
    fn dispatch(&mut self, event: PeripheralEvent) -> Result<(), SteeringError> {
        match event {
            PeripheralEvent::Connect(peer) => self.on_connect(peer),
            PeripheralEvent::Disconnect(peer) => {
                self.on_disconnect(peer);
                Ok(())
            }
            PeripheralEvent::Subscribe {
                characteristic,
                enabled,
            } => self.on_subscribe(characteristic, enabled),
            PeripheralEvent::Write(data) => {
                self.on_write(&data);
                Ok(())
            }
        }
    }
}
