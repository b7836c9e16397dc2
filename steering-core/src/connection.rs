use core::fmt;

use log::*;

use crate::{error::SteeringError, stack::PeripheralStack, subscription::SubscriptionRegistry};

/// Bluetooth device address of a central, as delivered by the stack
/// (least significant byte first). Only used for logging.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PeerAddress([u8; 6]);

impl PeerAddress {
    pub const fn from_le_bytes(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    pub const fn as_le_bytes(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for PeerAddress {
    fn from(bytes: [u8; 6]) -> Self {
        Self::from_le_bytes(bytes)
    }
}

/// Conventional MAC notation: most significant byte first, uppercase hex.
impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            g, e, d, c, b, a
        )
    }
}

impl fmt::Debug for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PeerAddress({})", self)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected {
        peer: PeerAddress,
    },
}

/// Single central design: advertising stops while a central is connected and
/// resumes once it is gone.
#[derive(Debug, Default)]
pub struct ConnectionLifecycle {
    state: ConnectionState,
}

impl ConnectionLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, ConnectionState::Connected { .. })
    }

    /// A second connect without a disconnect in between is rejected and
    /// leaves the state untouched.
    pub fn on_connect<S: PeripheralStack + ?Sized>(
        &mut self,
        peer: PeerAddress,
        stack: &S,
    ) -> Result<(), SteeringError> {
        if let ConnectionState::Connected { peer: current } = self.state {
            warn!(
                "Ignoring connect from [{}], already connected to [{}]",
                peer, current
            );
            return Err(SteeringError::AlreadyConnected {
                current,
                rejected: peer,
            });
        }

        info!("Server connected to Client with MAC Address: [{}]", peer);
        stack.stop_advertising();
        self.state = ConnectionState::Connected { peer };
        Ok(())
    }

    /// Subscriptions never outlive a connection: they are cleared before
    /// advertising resumes, so a returning central has to subscribe again.
    pub fn on_disconnect<S: PeripheralStack + ?Sized>(
        &mut self,
        peer: PeerAddress,
        subscriptions: &mut SubscriptionRegistry,
        stack: &S,
    ) {
        subscriptions.reset_all();
        info!("Server disconnected from Client with MAC Address: [{}]", peer);
        self.state = ConnectionState::Disconnected;
        stack.start_advertising();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{RecordingStack, StackCall};

    const PEER: PeerAddress = PeerAddress::from_le_bytes([0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);

    #[test]
    fn test_address_is_printed_most_significant_first() {
        assert_eq!(PEER.to_string(), "11:22:33:44:55:66");
        assert_eq!(
            PeerAddress::from([0x0a, 0xb0, 0, 0, 0, 0xff]).to_string(),
            "FF:00:00:00:B0:0A"
        );
    }

    #[test]
    fn test_connect_stops_advertising() {
        let stack = RecordingStack::new();
        let mut lifecycle = ConnectionLifecycle::new();
        assert_eq!(lifecycle.state(), ConnectionState::Disconnected);

        lifecycle.on_connect(PEER, &stack).unwrap();

        assert_eq!(lifecycle.state(), ConnectionState::Connected { peer: PEER });
        assert_eq!(stack.calls(), vec![StackCall::StopAdvertising]);
    }

    #[test]
    fn test_duplicate_connect_is_rejected() {
        let stack = RecordingStack::new();
        let mut lifecycle = ConnectionLifecycle::new();
        lifecycle.on_connect(PEER, &stack).unwrap();
        stack.take_calls();

        let other = PeerAddress::from_le_bytes([1, 2, 3, 4, 5, 6]);
        let result = lifecycle.on_connect(other, &stack);

        assert!(matches!(
            result,
            Err(SteeringError::AlreadyConnected { current, rejected })
                if current == PEER && rejected == other
        ));
        assert_eq!(lifecycle.state(), ConnectionState::Connected { peer: PEER });
        assert!(stack.calls().is_empty());
    }

    #[test]
    fn test_disconnect_resets_subscriptions_and_advertises() {
        let stack = RecordingStack::new();
        let mut lifecycle = ConnectionLifecycle::new();
        let mut subscriptions = SubscriptionRegistry::new();

        lifecycle.on_connect(PEER, &stack).unwrap();
        subscriptions.set_steering_notify(true);
        subscriptions.set_response_indicate(true);
        subscriptions.set_battery_notify(true);

        lifecycle.on_disconnect(PEER, &mut subscriptions, &stack);

        assert!(!lifecycle.is_connected());
        assert!(!subscriptions.flags().any());
        assert_eq!(
            stack.calls(),
            vec![StackCall::StopAdvertising, StackCall::StartAdvertising]
        );
    }

    #[test]
    fn test_disconnect_while_disconnected_still_advertises() {
        let stack = RecordingStack::new();
        let mut lifecycle = ConnectionLifecycle::new();
        let mut subscriptions = SubscriptionRegistry::new();

        lifecycle.on_disconnect(PEER, &mut subscriptions, &stack);

        assert_eq!(lifecycle.state(), ConnectionState::Disconnected);
        assert_eq!(stack.calls(), vec![StackCall::StartAdvertising]);
    }
}
