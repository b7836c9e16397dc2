//! In-memory stack that records every outbound call.
//!
//! Used by the tests and the host simulator in place of a real radio.
//! Clones share the same call log, so a test can hand one clone to the
//! server and inspect the other.

use std::sync::{Arc, Mutex, MutexGuard};

use log::*;

use crate::{gatt::Characteristic, stack::PeripheralStack};

#[derive(Debug, Clone, PartialEq)]
pub enum StackCall {
    StartAdvertising,
    StopAdvertising,
    Notify {
        characteristic: Characteristic,
        payload: Vec<u8>,
    },
    Indicate {
        characteristic: Characteristic,
        payload: Vec<u8>,
    },
}

#[derive(Debug, Clone, Default)]
pub struct RecordingStack {
    calls: Arc<Mutex<Vec<StackCall>>>,
}

impl RecordingStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<StackCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn calls(&self) -> Vec<StackCall> {
        self.lock_calls().clone()
    }

    /// Return the recorded calls and start over with an empty log.
    pub fn take_calls(&self) -> Vec<StackCall> {
        std::mem::take(&mut *self.lock_calls())
    }

    /// Payloads notified on `characteristic`, oldest first.
    pub fn notifications(&self, characteristic: Characteristic) -> Vec<Vec<u8>> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                StackCall::Notify {
                    characteristic: c,
                    payload,
                } if *c == characteristic => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    /// Payloads indicated on `characteristic`, oldest first.
    pub fn indications(&self, characteristic: Characteristic) -> Vec<Vec<u8>> {
        self.lock_calls()
            .iter()
            .filter_map(|call| match call {
                StackCall::Indicate {
                    characteristic: c,
                    payload,
                } if *c == characteristic => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: StackCall) {
        debug!("stack call: {:?}", call);
        self.lock_calls().push(call);
    }
}

impl PeripheralStack for RecordingStack {
    fn start_advertising(&self) {
        self.record(StackCall::StartAdvertising);
    }

    fn stop_advertising(&self) {
        self.record(StackCall::StopAdvertising);
    }

    fn notify(&self, characteristic: Characteristic, payload: &[u8]) {
        self.record(StackCall::Notify {
            characteristic,
            payload: payload.to_vec(),
        });
    }

    fn indicate(&self, characteristic: Characteristic, payload: &[u8]) {
        self.record(StackCall::Indicate {
            characteristic,
            payload: payload.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_log() {
        let stack = RecordingStack::new();
        let handle = stack.clone();

        stack.start_advertising();
        stack.notify(Characteristic::BatteryLevel, &[100]);

        assert_eq!(handle.calls().len(), 2);
        assert_eq!(handle.notifications(Characteristic::BatteryLevel), vec![vec![100]]);
        assert!(handle.notifications(Characteristic::SteeringAngle).is_empty());
    }

    #[test]
    fn test_take_calls_empties_the_log() {
        let stack = RecordingStack::new();
        stack.indicate(Characteristic::Response, &[1, 2]);

        assert_eq!(
            stack.take_calls(),
            vec![StackCall::Indicate {
                characteristic: Characteristic::Response,
                payload: vec![1, 2],
            }]
        );
        assert!(stack.calls().is_empty());
    }
}
