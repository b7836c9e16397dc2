//! Helpers that turn NimBLE callbacks into [`PeripheralEvent`]s

use esp32_nimble::{utilities::mutex::Mutex, BLECharacteristic, BLEConnDesc};
use log::*;
use std::sync::{mpsc::Sender, Arc};
use steering_core::{connection::PeerAddress, event::PeripheralEvent, gatt::Characteristic};

/// Queue an event for the dispatcher. Callbacks run on the NimBLE host task
/// and must not touch the steering server directly.
pub fn send_event(tx: &Sender<PeripheralEvent>, event: PeripheralEvent) {
    if let Err(e) = tx.send(event) {
        warn!("Failed to queue BLE event: {:?}", e);
    }
}

pub fn peer_address(desc: &BLEConnDesc) -> PeerAddress {
    PeerAddress::from_le_bytes(desc.address().as_le_bytes())
}

/// Report CCCD writes on `chr` as subscribe events for `characteristic`.
/// An empty subscription means the central turned notify/indicate off.
pub fn forward_subscriptions(
    chr: &Arc<Mutex<BLECharacteristic>>,
    characteristic: Characteristic,
    tx: Sender<PeripheralEvent>,
) {
    chr.lock().on_subscribe(move |_chr, desc, sub| {
        debug!(
            "CCCD write from [{}] on {}: {:?}",
            peer_address(desc),
            characteristic,
            sub
        );
        send_event(
            &tx,
            PeripheralEvent::Subscribe {
                characteristic,
                enabled: !sub.is_empty(),
            },
        );
    });
}
