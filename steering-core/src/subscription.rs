use log::*;

use crate::gatt::Characteristic;

/// Which characteristics the central currently listens to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionFlags {
    pub steering_notify: bool,
    pub response_indicate: bool,
    pub battery_notify: bool,
}

impl SubscriptionFlags {
    pub fn any(&self) -> bool {
        self.steering_notify || self.response_indicate || self.battery_notify
    }
}

#[derive(Debug, Default)]
pub struct SubscriptionRegistry {
    flags: SubscriptionFlags,
}

impl SubscriptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flags(&self) -> SubscriptionFlags {
        self.flags
    }

    pub fn steering_notify(&self) -> bool {
        self.flags.steering_notify
    }

    pub fn response_indicate(&self) -> bool {
        self.flags.response_indicate
    }

    pub fn battery_notify(&self) -> bool {
        self.flags.battery_notify
    }

    pub fn set_steering_notify(&mut self, enabled: bool) {
        info!("Central Notify {} {}", state_label(enabled), Characteristic::SteeringAngle);
        self.flags.steering_notify = enabled;
    }

    pub fn set_response_indicate(&mut self, enabled: bool) {
        info!("Central Indicate {} {}", state_label(enabled), Characteristic::Response);
        self.flags.response_indicate = enabled;
    }

    /// Only stores the flag. The battery snapshot that follows an enable is
    /// sent by [`crate::server::SteeringServer::set_battery_notify`].
    pub fn set_battery_notify(&mut self, enabled: bool) {
        info!("Central Notify {} {}", state_label(enabled), Characteristic::BatteryLevel);
        self.flags.battery_notify = enabled;
    }

    /// Clear every flag. Returns the characteristics that were subscribed
    /// before the call, in table order; only those are logged as disabled.
    pub fn reset_all(&mut self) -> Vec<Characteristic> {
        let previous = std::mem::take(&mut self.flags);
        let mut cleared = Vec::new();

        if previous.steering_notify {
            info!("Central Notify Disabled {}", Characteristic::SteeringAngle);
            cleared.push(Characteristic::SteeringAngle);
        }
        if previous.response_indicate {
            info!("Central Indicate Disabled {}", Characteristic::Response);
            cleared.push(Characteristic::Response);
        }
        if previous.battery_notify {
            info!("Central Notify Disabled {}", Characteristic::BatteryLevel);
            cleared.push(Characteristic::BatteryLevel);
        }

        cleared
    }
}

fn state_label(enabled: bool) -> &'static str {
    if enabled {
        "Enabled"
    } else {
        "Disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_unsubscribed() {
        let registry = SubscriptionRegistry::new();
        assert_eq!(registry.flags(), SubscriptionFlags::default());
        assert!(!registry.flags().any());
    }

    #[test]
    fn test_flags_are_independent() {
        let mut registry = SubscriptionRegistry::new();

        registry.set_response_indicate(true);
        assert!(registry.response_indicate());
        assert!(!registry.steering_notify());
        assert!(!registry.battery_notify());

        registry.set_steering_notify(true);
        registry.set_response_indicate(false);
        assert!(registry.steering_notify());
        assert!(!registry.response_indicate());
    }

    #[test]
    fn test_setting_twice_is_idempotent() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_battery_notify(true);
        let once = registry.flags();
        registry.set_battery_notify(true);
        assert_eq!(registry.flags(), once);
    }

    #[test]
    fn test_reset_all_reports_only_cleared_flags() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_steering_notify(true);
        registry.set_battery_notify(true);

        let cleared = registry.reset_all();

        assert_eq!(
            cleared,
            vec![Characteristic::SteeringAngle, Characteristic::BatteryLevel]
        );
        assert_eq!(registry.flags(), SubscriptionFlags::default());

        // Nothing left to clear.
        assert!(registry.reset_all().is_empty());
    }

    #[test]
    fn test_reset_all_skips_disabled_flags() {
        let mut registry = SubscriptionRegistry::new();
        registry.set_steering_notify(true);
        registry.set_response_indicate(true);
        registry.set_steering_notify(false);

        assert_eq!(registry.reset_all(), vec![Characteristic::Response]);
    }
}
