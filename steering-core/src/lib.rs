//! Virtual steering sensor exposed as a BLE GATT peripheral.
//!
//! The crate holds the part of the peripheral that does not depend on a
//! particular BLE stack: connection and subscription state, angle processing
//! and the gated notify/indicate updates. A stack plugs in through
//! [`stack::PeripheralStack`] (outbound) and drives [`event::PeripheralCallbacks`]
//! (inbound).

pub mod angle;
pub mod command;
pub mod config;
pub mod connection;
pub mod error;
pub mod event;
pub mod gatt;
pub mod mock;
pub mod server;
pub mod stack;
pub mod subscription;
pub mod telemetry;

pub use error::SteeringError;
pub use server::SteeringServer;
