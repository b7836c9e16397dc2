//! Bluetooth LE peripheral on top of esp32-nimble
//!
//! NimBLE callbacks are turned into [`PeripheralEvent`]s and queued. A single
//! dispatcher thread applies them to the shared [`SteeringServer`] in order,
//! while the application pushes steering and battery updates through
//! [`BluetoothService`].

pub mod handlers;
pub mod stack;
pub mod types;
pub mod util;

use esp32_nimble::{uuid128, BLEAdvertisementData, BLEDevice};
use handlers::{BatteryHandler, SteeringHandler};
use log::*;
use stack::NimbleStack;
use std::sync::{
    mpsc::{self, Receiver},
    Arc, Mutex, MutexGuard,
};
use std::thread;
use steering_core::{
    config::ServerConfig,
    event::{PeripheralCallbacks, PeripheralEvent},
    gatt::STEERING_SERVICE_UUID,
    SteeringServer,
};
use types::*;
use util::{peer_address, send_event};

type SharedServer = Arc<Mutex<SteeringServer<NimbleStack>>>;

/// Main Bluetooth service that owns the steering server
pub struct BluetoothService {
    _device: &'static BLEDevice,
    server: SharedServer,
}

impl BluetoothService {
    /// Build the GATT table, start the event dispatcher and start advertising
    pub fn new(config: &ServerConfig) -> Result<Self> {
        info!("Initializing Bluetooth service");

        let device = BLEDevice::take();
        let advertiser = device.get_advertising();
        let server = device.get_server();

        // Advertising is restarted by the steering server after the
        // subscriptions have been cleared.
        server.advertise_on_disconnect(false);

        let (event_tx, event_rx) = mpsc::channel();

        let steering = SteeringHandler::new(event_tx.clone()).register_characteristics(server)?;
        let battery_level = BatteryHandler::new(event_tx.clone())
            .register_characteristics(server, config.initial_battery_level)?;

        {
            let tx = event_tx.clone();
            server.on_connect(move |server, desc| {
                if let Err(e) = server.update_conn_params(desc.conn_handle(), 24, 48, 0, 60) {
                    warn!("Failed to update connection params: {:?}", e);
                }
                send_event(&tx, PeripheralEvent::Connect(peer_address(desc)));
            });
        }

        {
            let tx = event_tx;
            server.on_disconnect(move |desc, reason| {
                debug!("BLE disconnect reason: {:?}", reason);
                send_event(&tx, PeripheralEvent::Disconnect(peer_address(desc)));
            });
        }

        let stack = NimbleStack::new(advertiser, steering.angle, steering.response, battery_level);
        let steering_server = Arc::new(Mutex::new(SteeringServer::with_config(stack, config)?));

        Self::start_dispatcher(steering_server.clone(), event_rx)?;

        advertiser
            .lock()
            .set_data(
                BLEAdvertisementData::new()
                    .name(&config.device_name)
                    .add_service_uuid(uuid128!(STEERING_SERVICE_UUID)),
            )
            .map_err(|e| BluetoothError::Transport(e.to_string()))?;

        lock(&steering_server).begin();

        info!("Bluetooth service initialized and advertising as {}", config.device_name);

        Ok(Self {
            _device: device,
            server: steering_server,
        })
    }

    fn start_dispatcher(server: SharedServer, event_rx: Receiver<PeripheralEvent>) -> Result<()> {
        thread::Builder::new()
            .name("ble-events".to_string())
            .spawn(move || {
                info!("BLE event dispatcher started");
                while let Ok(event) = event_rx.recv() {
                    if let Err(e) = lock(&server).dispatch(event) {
                        warn!("Failed to handle BLE event: {}", e);
                    }
                }
                info!("BLE event dispatcher exiting");
            })
            .map(|_| ())
            .map_err(|e| BluetoothError::Transport(e.to_string()))
    }

    /// Check if a client is connected
    pub fn is_connected(&self) -> bool {
        lock(&self.server).is_connected()
    }

    /// Notify a steering angle, returns false if nobody is subscribed
    pub fn update_steering(&self, angle: f32) -> bool {
        lock(&self.server).update_steering(angle)
    }

    /// Notify the battery level, returns false if nobody is subscribed
    pub fn update_battery(&self, percentage: u8) -> Result<bool> {
        Ok(lock(&self.server).update_battery(percentage)?)
    }

    /// Indicate a response, returns false if nobody is subscribed
    pub fn send_response(&self, data: &[u8]) -> bool {
        lock(&self.server).send_response(data)
    }
}

fn lock(server: &SharedServer) -> MutexGuard<'_, SteeringServer<NimbleStack>> {
    server.lock().unwrap_or_else(|e| e.into_inner())
}
