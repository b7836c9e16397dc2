use core::fmt;

use log::*;

use crate::gatt::Characteristic;

/// Bytes written by the central to the raw command characteristic.
///
/// There is no command protocol on this side. The bytes are only copied
/// out and logged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCommand {
    bytes: Vec<u8>,
}

impl RawCommand {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&[u8]> for RawCommand {
    fn from(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
        }
    }
}

/// Space separated uppercase hex, e.g. `03 10 12 34`.
impl fmt::Display for RawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InboundCommandSink;

impl InboundCommandSink {
    pub fn new() -> Self {
        Self
    }

    /// Copy a write out of the stack's buffer and log it. Zero length writes are fine.
    pub fn on_raw_write(&self, data: &[u8]) -> RawCommand {
        let command = RawCommand::from(data);
        info!(
            "{} [Len: {}] [Data: {}]",
            Characteristic::RawCommand,
            command.len(),
            command
        );
        command
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_exactly_the_written_bytes() {
        let sink = InboundCommandSink::new();
        let command = sink.on_raw_write(&[0x03, 0x10, 0x12, 0x34]);

        assert_eq!(command.len(), 4);
        assert_eq!(command.as_bytes(), &[0x03, 0x10, 0x12, 0x34]);
        assert_eq!(command.to_string(), "03 10 12 34");
    }

    #[test]
    fn test_empty_write_is_accepted() {
        let command = InboundCommandSink::new().on_raw_write(&[]);

        assert!(command.is_empty());
        assert_eq!(command, RawCommand::default());
        assert_eq!(command.to_string(), "");
    }
}
