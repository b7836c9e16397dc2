use crate::gatt::Characteristic;

/// Outbound half of the BLE peripheral stack.
///
/// The core only asks the stack to advertise and to push values. Everything
/// else (GATT table, radio, acks for indications, retries) stays with the
/// implementation. Transmission is fire and forget: implementations handle
/// and log their own failures.
pub trait PeripheralStack {
    fn start_advertising(&self);
    fn stop_advertising(&self);
    fn notify(&self, characteristic: Characteristic, payload: &[u8]);
    fn indicate(&self, characteristic: Characteristic, payload: &[u8]);
}

impl<S: PeripheralStack + ?Sized> PeripheralStack for &S {
    fn start_advertising(&self) {
        (**self).start_advertising()
    }

    fn stop_advertising(&self) {
        (**self).stop_advertising()
    }

    fn notify(&self, characteristic: Characteristic, payload: &[u8]) {
        (**self).notify(characteristic, payload)
    }

    fn indicate(&self, characteristic: Characteristic, payload: &[u8]) {
        (**self).indicate(characteristic, payload)
    }
}
