use std::thread::sleep;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::task::thread::ThreadSpawnConfiguration;
use esp_idf_svc::{log::EspLogger, nvs::EspDefaultNvsPartition};
use log::*;

mod bluetooth;
mod settings;
mod storage;

use bluetooth::BluetoothService;
use storage::Storage;

const UPDATE_INTERVAL: Duration = Duration::from_millis(100);
// One battery report per minute at 10 Hz.
const BATTERY_REPORT_TICKS: u32 = 600;

/// Stand-in for a steering sensor: turns the wheel from lock to lock and a
/// bit beyond, so clamping and the deadband both show up on the central.
struct SteeringSweep {
    angle: f32,
    step: f32,
}

impl SteeringSweep {
    const LIMIT: f32 = 40.0;

    fn new() -> Self {
        Self {
            angle: 0.0,
            step: 0.5,
        }
    }

    fn next_angle(&mut self) -> f32 {
        self.angle += self.step;
        if self.angle.abs() >= Self::LIMIT {
            self.step = -self.step;
        }
        self.angle
    }
}

fn main() -> Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly.
    esp_idf_sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    EspLogger::initialize_default();

    // Applies to the BLE event dispatcher thread spawned below.
    ThreadSpawnConfiguration {
        name: Some(b"ble-events\0"),
        stack_size: 8 * 1024,
        priority: 15,
        ..Default::default()
    }
    .set()?;

    let storage = Storage::new(EspDefaultNvsPartition::take()?)?;
    let config = settings::load_server_config(&storage);

    let bluetooth = BluetoothService::new(&config)?;

    let mut sweep = SteeringSweep::new();
    let mut ticks: u32 = 0;
    let mut was_connected = false;

    loop {
        let connected = bluetooth.is_connected();
        if connected != was_connected {
            info!("Central {}", if connected { "connected" } else { "gone" });
            was_connected = connected;
        }

        bluetooth.update_steering(sweep.next_angle());

        ticks = ticks.wrapping_add(1);
        if ticks % BATTERY_REPORT_TICKS == 0 {
            // No fuel gauge on this board, report the configured level.
            if let Err(e) = bluetooth.update_battery(config.initial_battery_level) {
                warn!("Failed to report battery level: {}", e);
            }
        }

        sleep(UPDATE_INTERVAL);
    }
}
