// Drives a steering server from the terminal, acting as both the central and
// the application. Outbound BLE traffic is printed instead of sent.
//
// RUST_LOG=info cargo run --example simulator
// A JSON config can be passed via STEERING_CONFIG, e.g. '{"device_name":"WHEEL"}'.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use steering_core::{
    angle::decode_angle,
    config::ServerConfig,
    connection::{ConnectionState, PeerAddress},
    event::{PeripheralCallbacks, PeripheralEvent},
    gatt::Characteristic,
    mock::{RecordingStack, StackCall},
    SteeringServer,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("STEERING_CONFIG") {
        Ok(json) => ServerConfig::from_json(&json).context("STEERING_CONFIG is invalid")?,
        Err(_) => ServerConfig::default(),
    };

    println!("Steering peripheral simulator - {}", config.device_name);
    println!("------------------------------------");

    let stack = RecordingStack::new();
    let mut server = SteeringServer::with_config(stack.clone(), &config)?;
    server.begin();
    print_calls(&stack);

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim().to_lowercase();
        let parts: Vec<&str> = input.split_whitespace().collect();

        let result: Result<()> = match parts.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["status"] => {
                println!("connection: {:?}", server.connection_state());
                println!("subscriptions: {:?}", server.subscriptions());
                Ok(())
            }
            ["connect", mac] => parse_mac(mac).and_then(|peer| {
                server
                    .dispatch(PeripheralEvent::Connect(peer))
                    .map_err(Into::into)
            }),
            ["disconnect"] => {
                let peer = match server.connection_state() {
                    ConnectionState::Connected { peer } => peer,
                    ConnectionState::Disconnected => PeerAddress::default(),
                };
                server
                    .dispatch(PeripheralEvent::Disconnect(peer))
                    .map_err(Into::into)
            }
            ["sub", name, state] => parse_characteristic(name).and_then(|characteristic| {
                let enabled = match *state {
                    "on" => true,
                    "off" => false,
                    other => return Err(anyhow!("expected on/off, got '{}'", other)),
                };
                server
                    .dispatch(PeripheralEvent::Subscribe {
                        characteristic,
                        enabled,
                    })
                    .map_err(Into::into)
            }),
            ["angle", value] => value
                .parse::<f32>()
                .map_err(Into::into)
                .map(|angle| println!("sent: {}", server.update_steering(angle))),
            ["battery", value] => value
                .parse::<u8>()
                .map_err(Into::into)
                .and_then(|pct| server.update_battery(pct).map_err(Into::into))
                .map(|sent| println!("sent: {}", sent)),
            ["respond", bytes @ ..] => {
                parse_hex(bytes).map(|data| println!("sent: {}", server.send_response(&data)))
            }
            ["write", bytes @ ..] => parse_hex(bytes).map(|data| {
                server.on_write(&data);
            }),
            _ => {
                println!(
                    "Unknown command. Valid commands are: 'connect <mac>', 'disconnect', \
                     'sub <steering|response|battery> <on|off>', 'angle <deg>', \
                     'battery <pct>', 'respond <hex..>', 'write <hex..>', 'status', 'quit'"
                );
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Error: {:#}", e);
        }
        print_calls(&stack);
    }

    Ok(())
}

fn print_calls(stack: &RecordingStack) {
    for call in stack.take_calls() {
        match call {
            StackCall::Notify {
                characteristic: Characteristic::SteeringAngle,
                payload,
            } => println!(
                "  notify {} {:02X?} ({:?})",
                Characteristic::SteeringAngle,
                payload,
                decode_angle(&payload)
            ),
            StackCall::Notify {
                characteristic,
                payload,
            } => println!("  notify {} {:02X?}", characteristic, payload),
            StackCall::Indicate {
                characteristic,
                payload,
            } => println!("  indicate {} {:02X?}", characteristic, payload),
            other => println!("  {:?}", other),
        }
    }
}

/// Parses `AA:BB:CC:DD:EE:FF` (most significant byte first).
fn parse_mac(mac: &str) -> Result<PeerAddress> {
    let bytes = mac
        .split(':')
        .map(|part| u8::from_str_radix(part, 16))
        .collect::<Result<Vec<u8>, _>>()
        .with_context(|| format!("invalid mac address '{}'", mac))?;

    let mut le: [u8; 6] = bytes
        .try_into()
        .map_err(|_| anyhow!("mac address needs 6 bytes"))?;
    le.reverse();
    Ok(PeerAddress::from_le_bytes(le))
}

fn parse_characteristic(name: &str) -> Result<Characteristic> {
    match name {
        "steering" | "s" => Ok(Characteristic::SteeringAngle),
        "response" | "r" => Ok(Characteristic::Response),
        "battery" | "b" => Ok(Characteristic::BatteryLevel),
        "rx" => Ok(Characteristic::RawCommand),
        other => Err(anyhow!("unknown characteristic '{}'", other)),
    }
}

fn parse_hex(bytes: &[&str]) -> Result<Vec<u8>> {
    bytes
        .iter()
        .map(|b| u8::from_str_radix(b, 16).with_context(|| format!("invalid byte '{}'", b)))
        .collect()
}
