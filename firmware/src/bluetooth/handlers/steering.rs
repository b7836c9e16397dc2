//! Steering Device Handler
//!
//! Registers the custom steering service: the angle (notify), the raw
//! command channel (write) and the response channel (indicate).

use crate::bluetooth::{types::*, util::*};
use esp32_nimble::{
    utilities::mutex::Mutex as NimbleMutex, uuid128, BLECharacteristic, BLEServer,
    NimbleProperties,
};
use log::*;
use std::sync::{mpsc::Sender, Arc};
use steering_core::{
    event::PeripheralEvent,
    gatt::{
        Characteristic, STEERING_ANGLE_CHAR_UUID, STEERING_RX_CHAR_UUID, STEERING_SERVICE_UUID,
        STEERING_TX_CHAR_UUID,
    },
};

/// Characteristics the stack pushes values through.
pub struct SteeringCharacteristics {
    pub angle: Arc<NimbleMutex<BLECharacteristic>>,
    pub response: Arc<NimbleMutex<BLECharacteristic>>,
}

pub struct SteeringHandler {
    event_tx: Sender<PeripheralEvent>,
}

impl SteeringHandler {
    pub fn new(event_tx: Sender<PeripheralEvent>) -> Self {
        Self { event_tx }
    }

    pub fn register_characteristics(&self, server: &mut BLEServer) -> Result<SteeringCharacteristics> {
        info!("Define Steering Device Service...");
        let service = server.create_service(uuid128!(STEERING_SERVICE_UUID));

        // Angle (30): board -> central notifications only.
        let angle = service.lock().create_characteristic(
            uuid128!(STEERING_ANGLE_CHAR_UUID),
            NimbleProperties::NOTIFY,
        );
        angle
            .lock()
            .set_value(Characteristic::SteeringAngle.initial_value());

        // Response (32): board -> central indications only.
        let response = service.lock().create_characteristic(
            uuid128!(STEERING_TX_CHAR_UUID),
            NimbleProperties::INDICATE,
        );
        response
            .lock()
            .set_value(Characteristic::Response.initial_value());

        // Raw command (31): central -> board writes only.
        let rx = service.lock().create_characteristic(
            uuid128!(STEERING_RX_CHAR_UUID),
            NimbleProperties::WRITE,
        );
        rx.lock()
            .set_value(Characteristic::RawCommand.initial_value());

        forward_subscriptions(&angle, Characteristic::SteeringAngle, self.event_tx.clone());
        forward_subscriptions(&response, Characteristic::Response, self.event_tx.clone());

        {
            let tx = self.event_tx.clone();
            rx.lock().on_write(move |args| {
                send_event(&tx, PeripheralEvent::Write(args.recv_data().to_vec()));
            });
        }

        Ok(SteeringCharacteristics { angle, response })
    }
}
