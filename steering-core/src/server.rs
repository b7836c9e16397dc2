//! The steering peripheral as one explicitly constructed context.
//!
//! [`SteeringServer`] owns the connection state, the subscription flags and
//! the stack it talks to. The stack serializes its callbacks, the server does
//! no locking of its own: wrap it in a mutex when events and application
//! updates come from different threads.

use log::*;

use crate::{
    command::{InboundCommandSink, RawCommand},
    config::ServerConfig,
    connection::{ConnectionLifecycle, ConnectionState, PeerAddress},
    error::SteeringError,
    event::PeripheralCallbacks,
    gatt::Characteristic,
    stack::PeripheralStack,
    subscription::{SubscriptionFlags, SubscriptionRegistry},
    telemetry::TelemetryEmitter,
};

pub struct SteeringServer<S: PeripheralStack> {
    stack: S,
    connection: ConnectionLifecycle,
    subscriptions: SubscriptionRegistry,
    telemetry: TelemetryEmitter,
    commands: InboundCommandSink,
    snapshot_battery_level: u8,
}

impl<S: PeripheralStack> SteeringServer<S> {
    /// Server with the default configuration.
    pub fn new(stack: S) -> Self {
        let config = ServerConfig::default();
        Self {
            stack,
            connection: ConnectionLifecycle::new(),
            subscriptions: SubscriptionRegistry::new(),
            telemetry: TelemetryEmitter::new(config.angle_limits),
            commands: InboundCommandSink::new(),
            snapshot_battery_level: config.initial_battery_level,
        }
    }

    pub fn with_config(stack: S, config: &ServerConfig) -> Result<Self, SteeringError> {
        config.validate()?;
        Ok(Self {
            telemetry: TelemetryEmitter::new(config.angle_limits),
            snapshot_battery_level: config.initial_battery_level,
            ..Self::new(stack)
        })
    }

    /// Start advertising. Call once the GATT table is in place.
    pub fn begin(&self) {
        info!("Start Advertising...");
        self.stack.start_advertising();
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    pub fn subscriptions(&self) -> SubscriptionFlags {
        self.subscriptions.flags()
    }

    /// Subscriptions only exist while a central is connected. Outside of a
    /// connection the flag is left as is and `NotConnected` is returned.
    fn ensure_connected(&self, characteristic: Characteristic) -> Result<(), SteeringError> {
        if !self.connection.is_connected() {
            warn!("Ignoring {} subscription change, no central connected", characteristic);
            return Err(SteeringError::NotConnected(characteristic));
        }
        Ok(())
    }

    pub fn set_steering_notify(&mut self, enabled: bool) -> Result<(), SteeringError> {
        self.ensure_connected(Characteristic::SteeringAngle)?;
        self.subscriptions.set_steering_notify(enabled);
        Ok(())
    }

    pub fn set_response_indicate(&mut self, enabled: bool) -> Result<(), SteeringError> {
        self.ensure_connected(Characteristic::Response)?;
        self.subscriptions.set_response_indicate(enabled);
        Ok(())
    }

    /// Enabling also pushes one battery level right away: the real value
    /// only arrives once the application reports it, until then the battery
    /// is assumed full.
    pub fn set_battery_notify(&mut self, enabled: bool) -> Result<(), SteeringError> {
        self.ensure_connected(Characteristic::BatteryLevel)?;
        self.subscriptions.set_battery_notify(enabled);
        if enabled {
            self.update_battery(self.snapshot_battery_level)?;
        }
        Ok(())
    }

    /// See [`TelemetryEmitter::update_steering`].
    pub fn update_steering(&self, angle: f32) -> bool {
        self.telemetry
            .update_steering(&self.subscriptions, &self.stack, angle)
    }

    /// See [`TelemetryEmitter::update_battery`].
    pub fn update_battery(&self, percentage: u8) -> Result<bool, SteeringError> {
        self.telemetry
            .update_battery(&self.subscriptions, &self.stack, percentage)
    }

    /// See [`TelemetryEmitter::send_response`].
    pub fn send_response(&self, data: &[u8]) -> bool {
        self.telemetry
            .send_response(&self.subscriptions, &self.stack, data)
    }
}

impl<S: PeripheralStack> PeripheralCallbacks for SteeringServer<S> {
    fn on_connect(&mut self, peer: PeerAddress) -> Result<(), SteeringError> {
        self.connection.on_connect(peer, &self.stack)
    }

    fn on_disconnect(&mut self, peer: PeerAddress) {
        self.connection
            .on_disconnect(peer, &mut self.subscriptions, &self.stack);
    }

    fn on_subscribe(
        &mut self,
        characteristic: Characteristic,
        enabled: bool,
    ) -> Result<(), SteeringError> {
        match characteristic {
            Characteristic::SteeringAngle => self.set_steering_notify(enabled),
            Characteristic::Response => self.set_response_indicate(enabled),
            Characteristic::BatteryLevel => self.set_battery_notify(enabled),
            Characteristic::RawCommand => Err(SteeringError::NotSubscribable(characteristic)),
        }
    }

    fn on_write(&mut self, data: &[u8]) -> RawCommand {
        self.commands.on_raw_write(data)
    }
}
