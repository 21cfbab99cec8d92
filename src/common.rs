use std::fmt;

use crate::driver::Driver;
use crate::errors::*;
use crate::port::{Direction, VirtualPort};
use crate::traits::OutputDeviceImpl;

/// A MIDI message as handed to an output device.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MidiMessage {
    bytes: Vec<u8>,
    timestamp: u64,
}

impl MidiMessage {
    pub fn new(bytes: &[u8]) -> MidiMessage {
        MidiMessage {
            bytes: bytes.to_vec(),
            timestamp: 0,
        }
    }

    /// Attaches a timestamp in microseconds. Virtual ports send immediately and ignore it.
    pub fn with_timestamp(mut self, timestamp: u64) -> MidiMessage {
        self.timestamp = timestamp;
        self
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.bytes
    }

    pub fn raw_data_size(&self) -> usize {
        self.bytes.len()
    }

    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }
}

impl From<&[u8]> for MidiMessage {
    fn from(bytes: &[u8]) -> Self {
        MidiMessage::new(bytes)
    }
}

impl From<Vec<u8>> for MidiMessage {
    fn from(bytes: Vec<u8>) -> Self {
        MidiMessage { bytes, timestamp: 0 }
    }
}

impl OutputDeviceImpl for VirtualPort {
    fn identifier(&self) -> &str {
        VirtualPort::identifier(self)
    }

    fn name(&self) -> &str {
        VirtualPort::name(self)
    }

    fn send_message_now(&mut self, message: &MidiMessage) -> Result<(), SendError> {
        self.send(message.raw_data())
    }
}

/// Opens a virtual port and boxes it as an output device implementation.
pub fn create_output_wrapper(
    driver: &Driver,
    name: &str,
    direction: Direction,
) -> Result<Box<dyn OutputDeviceImpl>, CreateError> {
    let port = VirtualPort::open(driver, name, direction)?;
    Ok(Box::new(port))
}

/// An output device that other applications see as a MIDI input.
pub struct MidiOutput {
    name: String,
    identifier: String,
    internal: Box<dyn OutputDeviceImpl>,
}

impl MidiOutput {
    /// Creates a new virtual output device named `name`, using the shared driver.
    ///
    /// Returns `None` if the name is empty, the driver is not installed or the
    /// port could not be created.
    pub fn create_new_device(name: &str) -> Option<MidiOutput> {
        if name.is_empty() {
            return None;
        }
        Self::create_new_device_with(Driver::shared().as_ref(), name)
    }

    /// Like [`create_new_device`](MidiOutput::create_new_device), with an
    /// explicitly provided driver. `None` stands for a driver that could not be loaded.
    pub fn create_new_device_with(driver: Option<&Driver>, name: &str) -> Option<MidiOutput> {
        if name.is_empty() {
            return None;
        }
        let driver = match driver {
            Some(driver) => driver,
            None => {
                log::debug!("not creating virtual MIDI output '{}': no driver", name);
                return None;
            }
        };

        match create_output_wrapper(driver, name, Direction::TransmitOnly) {
            Ok(internal) => Some(MidiOutput {
                name: internal.name().to_owned(),
                identifier: internal.identifier().to_owned(),
                internal,
            }),
            Err(err) => {
                log::warn!("could not create virtual MIDI output: {}", err);
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Sends a message immediately, on the calling thread.
    pub fn send_message_now(&mut self, message: &MidiMessage) -> Result<(), SendError> {
        self.internal.send_message_now(message)
    }

    /// Sends raw MIDI bytes immediately.
    pub fn send(&mut self, message: &[u8]) -> Result<(), SendError> {
        self.send_message_now(&MidiMessage::new(message))
    }
}

impl fmt::Debug for MidiOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MidiOutput")
            .field("name", &self.name)
            .field("identifier", &self.identifier)
            .finish_non_exhaustive()
    }
}
