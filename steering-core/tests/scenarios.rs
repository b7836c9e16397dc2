//! End to end sessions of a central against the steering server

use steering_core::{
    angle::decode_angle,
    connection::{ConnectionState, PeerAddress},
    event::{PeripheralCallbacks, PeripheralEvent},
    gatt::Characteristic,
    mock::{RecordingStack, StackCall},
    SteeringError, SteeringServer,
};

const SIMULATOR: PeerAddress = PeerAddress::from_le_bytes([0x10, 0x20, 0x30, 0x40, 0x50, 0x60]);

fn setup() -> (SteeringServer<RecordingStack>, RecordingStack) {
    let stack = RecordingStack::new();
    let server = SteeringServer::new(stack.clone());
    server.begin();
    stack.take_calls();
    (server, stack)
}

#[test]
fn test_steering_subscribe_then_unsubscribe() {
    let (mut server, stack) = setup();
    server.on_connect(SIMULATOR).unwrap();
    server
        .on_subscribe(Characteristic::SteeringAngle, true)
        .unwrap();
    stack.take_calls();

    assert!(server.update_steering(40.0));
    let sent = stack.notifications(Characteristic::SteeringAngle);
    assert_eq!(sent.len(), 1);
    assert_eq!(decode_angle(&sent[0]), Some(35.0));

    server
        .on_subscribe(Characteristic::SteeringAngle, false)
        .unwrap();
    stack.take_calls();

    assert!(!server.update_steering(40.0));
    assert!(stack.calls().is_empty());
}

#[test]
fn test_battery_subscription_does_not_survive_reconnect() {
    let (mut server, stack) = setup();

    server.dispatch(PeripheralEvent::Connect(SIMULATOR)).unwrap();
    server
        .dispatch(PeripheralEvent::Subscribe {
            characteristic: Characteristic::BatteryLevel,
            enabled: true,
        })
        .unwrap();
    assert_eq!(
        stack.notifications(Characteristic::BatteryLevel),
        vec![vec![0x64]]
    );

    server
        .dispatch(PeripheralEvent::Disconnect(SIMULATOR))
        .unwrap();
    let flags = server.subscriptions();
    assert!(!flags.steering_notify);
    assert!(!flags.response_indicate);
    assert!(!flags.battery_notify);

    server.dispatch(PeripheralEvent::Connect(SIMULATOR)).unwrap();
    stack.take_calls();

    assert!(!server.update_battery(50).unwrap());
    assert!(stack.calls().is_empty());
}

#[test]
fn test_disconnect_clears_everything() {
    let (mut server, stack) = setup();
    server.on_connect(SIMULATOR).unwrap();
    for characteristic in [
        Characteristic::SteeringAngle,
        Characteristic::Response,
        Characteristic::BatteryLevel,
    ] {
        server.on_subscribe(characteristic, true).unwrap();
    }
    assert!(server.subscriptions().any());

    server.on_disconnect(SIMULATOR);
    server.on_connect(SIMULATOR).unwrap();
    stack.take_calls();

    assert!(!server.subscriptions().any());
    assert!(!server.update_steering(10.0));
    assert!(!server.send_response(&[0x03, 0x10, 0x12, 0x34]));
    assert!(!server.update_battery(90).unwrap());
    assert!(stack.calls().is_empty());
}

#[test]
fn test_advertising_follows_the_connection() {
    let (mut server, stack) = setup();

    server.on_connect(SIMULATOR).unwrap();
    server.on_disconnect(SIMULATOR);
    server.on_connect(SIMULATOR).unwrap();

    assert_eq!(
        stack.calls(),
        vec![
            StackCall::StopAdvertising,
            StackCall::StartAdvertising,
            StackCall::StopAdvertising,
        ]
    );
    assert_eq!(
        server.connection_state(),
        ConnectionState::Connected { peer: SIMULATOR }
    );
}

#[test]
fn test_second_central_is_rejected() {
    let (mut server, stack) = setup();
    server.on_connect(SIMULATOR).unwrap();
    server
        .on_subscribe(Characteristic::SteeringAngle, true)
        .unwrap();

    let intruder = PeerAddress::from_le_bytes([0xaa; 6]);
    let result = server.dispatch(PeripheralEvent::Connect(intruder));

    assert!(matches!(result, Err(SteeringError::AlreadyConnected { .. })));
    assert!(server.subscriptions().steering_notify);
    assert_eq!(stack.calls(), vec![StackCall::StopAdvertising]);
}

#[test]
fn test_response_round_trip_with_raw_commands() {
    let (mut server, stack) = setup();
    server.on_connect(SIMULATOR).unwrap();
    server.on_subscribe(Characteristic::Response, true).unwrap();

    let command = server.on_write(&[0x03, 0x11]);
    assert_eq!(command.len(), 2);

    assert!(server.send_response(&[0x03, 0x11, 0xff]));
    assert_eq!(
        stack.indications(Characteristic::Response),
        vec![vec![0x03, 0x11, 0xff]]
    );
}

#[test]
fn test_angle_payload_is_exact() {
    let (mut server, stack) = setup();
    server.on_connect(SIMULATOR).unwrap();
    server.set_steering_notify(true).unwrap();

    assert!(server.update_steering(12.25));
    assert!(server.update_steering(-0.75));

    let sent = stack.notifications(Characteristic::SteeringAngle);
    assert_eq!(sent[0], 12.25f32.to_le_bytes().to_vec());
    assert_eq!(decode_angle(&sent[0]), Some(12.25));
    assert_eq!(sent[1], vec![0, 0, 0, 0]);
}

#[test]
fn test_central_must_connect_before_subscribing() {
    let (mut server, stack) = setup();

    let result = server.dispatch(PeripheralEvent::Subscribe {
        characteristic: Characteristic::BatteryLevel,
        enabled: true,
    });

    assert!(matches!(
        result,
        Err(SteeringError::NotConnected(Characteristic::BatteryLevel))
    ));
    assert!(!server.subscriptions().any());
    assert!(!server.update_battery(40).unwrap());
    assert!(stack.calls().is_empty());

    server.on_connect(SIMULATOR).unwrap();
    server
        .on_subscribe(Characteristic::BatteryLevel, true)
        .unwrap();
    assert_eq!(
        stack.notifications(Characteristic::BatteryLevel),
        vec![vec![100]]
    );
}
