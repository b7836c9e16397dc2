//! Outbound updates towards the central.
//!
//! Every update is gated by its subscription flag. Without a subscriber the
//! update is dropped on the spot and `false` is returned: nothing is queued or
//! retried later.

use log::*;

use crate::{
    angle::{encode_angle, AngleLimits},
    error::SteeringError,
    gatt::Characteristic,
    stack::PeripheralStack,
    subscription::SubscriptionRegistry,
};

#[derive(Debug, Default, Clone)]
pub struct TelemetryEmitter {
    limits: AngleLimits,
}

impl TelemetryEmitter {
    pub fn new(limits: AngleLimits) -> Self {
        Self { limits }
    }

    /// Constrain `angle` and notify it as a 4 byte little-endian float.
    /// The angle is not even processed when nobody listens.
    pub fn update_steering<S: PeripheralStack + ?Sized>(
        &self,
        subscriptions: &SubscriptionRegistry,
        stack: &S,
        angle: f32,
    ) -> bool {
        if !subscriptions.steering_notify() {
            trace!("Dropping steering angle {}, no subscriber", angle);
            return false;
        }

        let steer_angle = self.limits.constrain(angle);
        stack.notify(Characteristic::SteeringAngle, &encode_angle(steer_angle));
        true
    }

    /// Notify the battery level as a single byte.
    ///
    /// A percentage above 100 is a caller bug and is rejected whether or not
    /// anybody is subscribed.
    pub fn update_battery<S: PeripheralStack + ?Sized>(
        &self,
        subscriptions: &SubscriptionRegistry,
        stack: &S,
        percentage: u8,
    ) -> Result<bool, SteeringError> {
        if percentage > 100 {
            return Err(SteeringError::BatteryOutOfRange(percentage));
        }

        if !subscriptions.battery_notify() {
            return Ok(false);
        }

        stack.notify(Characteristic::BatteryLevel, &[percentage]);
        info!("Updated Battery Level: {:>3}%", percentage);
        Ok(true)
    }

    /// Indicate raw response bytes. The acknowledgement is handled by the stack.
    pub fn send_response<S: PeripheralStack + ?Sized>(
        &self,
        subscriptions: &SubscriptionRegistry,
        stack: &S,
        data: &[u8],
    ) -> bool {
        if !subscriptions.response_indicate() {
            return false;
        }

        stack.indicate(Characteristic::Response, data);
        true
    }
}
