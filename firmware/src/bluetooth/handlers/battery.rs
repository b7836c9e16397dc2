//! Battery Service Handler

use crate::bluetooth::{types::*, util::*};
use esp32_nimble::{
    utilities::{mutex::Mutex as NimbleMutex, BleUuid},
    BLECharacteristic, BLEServer, NimbleProperties,
};
use log::*;
use std::sync::{mpsc::Sender, Arc};
use steering_core::{
    event::PeripheralEvent,
    gatt::{BATTERY_LEVEL_CHAR_UUID16, BATTERY_SERVICE_UUID16, Characteristic},
};

pub struct BatteryHandler {
    event_tx: Sender<PeripheralEvent>,
}

impl BatteryHandler {
    pub fn new(event_tx: Sender<PeripheralEvent>) -> Self {
        Self { event_tx }
    }

    /// Register the standard battery service (0x180F) with a readable,
    /// notifying battery level holding `initial_level`.
    pub fn register_characteristics(
        &self,
        server: &mut BLEServer,
        initial_level: u8,
    ) -> Result<Arc<NimbleMutex<BLECharacteristic>>> {
        info!("Define Battery Service...");
        let service = server.create_service(BleUuid::from_uuid16(BATTERY_SERVICE_UUID16));

        let level = service.lock().create_characteristic(
            BleUuid::from_uuid16(BATTERY_LEVEL_CHAR_UUID16),
            NimbleProperties::READ | NimbleProperties::NOTIFY,
        );
        level.lock().set_value(&[initial_level]);

        forward_subscriptions(&level, Characteristic::BatteryLevel, self.event_tx.clone());

        Ok(level)
    }
}
