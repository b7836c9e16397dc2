//! [`PeripheralStack`] on top of esp32-nimble.

use esp32_nimble::{utilities::mutex::Mutex as NimbleMutex, BLEAdvertising, BLECharacteristic};
use log::*;
use std::sync::Arc;
use steering_core::{gatt::Characteristic, stack::PeripheralStack};

pub struct NimbleStack {
    advertiser: &'static NimbleMutex<BLEAdvertising>,
    steering_angle: Arc<NimbleMutex<BLECharacteristic>>,
    response: Arc<NimbleMutex<BLECharacteristic>>,
    battery_level: Arc<NimbleMutex<BLECharacteristic>>,
}

impl NimbleStack {
    pub fn new(
        advertiser: &'static NimbleMutex<BLEAdvertising>,
        steering_angle: Arc<NimbleMutex<BLECharacteristic>>,
        response: Arc<NimbleMutex<BLECharacteristic>>,
        battery_level: Arc<NimbleMutex<BLECharacteristic>>,
    ) -> Self {
        Self {
            advertiser,
            steering_angle,
            response,
            battery_level,
        }
    }

    fn characteristic(
        &self,
        characteristic: Characteristic,
    ) -> Option<&Arc<NimbleMutex<BLECharacteristic>>> {
        match characteristic {
            Characteristic::SteeringAngle => Some(&self.steering_angle),
            Characteristic::Response => Some(&self.response),
            Characteristic::BatteryLevel => Some(&self.battery_level),
            Characteristic::RawCommand => None,
        }
    }

    fn push(&self, characteristic: Characteristic, payload: &[u8]) {
        match self.characteristic(characteristic) {
            Some(chr) => {
                chr.lock().set_value(payload).notify();
            }
            None => warn!("{} cannot push values", characteristic),
        }
    }
}

impl PeripheralStack for NimbleStack {
    fn start_advertising(&self) {
        if let Err(e) = self.advertiser.lock().start() {
            warn!("Failed to start advertising: {:?}", e);
        }
    }

    fn stop_advertising(&self) {
        // NimBLE stops connectable advertising on connect by itself, stopping
        // again may report an error.
        if let Err(e) = self.advertiser.lock().stop() {
            debug!("Stop advertising: {:?}", e);
        }
    }

    fn notify(&self, characteristic: Characteristic, payload: &[u8]) {
        self.push(characteristic, payload);
    }

    /// NimBLE sends an indication to every central that enabled indications
    /// in the CCCD, so this is the same call as [`Self::notify`].
    fn indicate(&self, characteristic: Characteristic, payload: &[u8]) {
        self.push(characteristic, payload);
    }
}
