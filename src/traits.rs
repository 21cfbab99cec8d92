use crate::common::MidiMessage;
use crate::driver::{PortFlags, RawPort};
use crate::errors::*;

/// The three entry points of a virtual MIDI driver.
///
/// The Windows backend implements this on top of `teVirtualMIDI.dll`. Any
/// other implementation (e.g. an in-process fake) can be wrapped with
/// [`Driver::new`](crate::Driver::new).
pub trait VirtualMidiDriver: Send + Sync {
    /// Creates a port named `name`. No data callback is installed and the
    /// maximum sysex length is zero.
    ///
    /// Returns `DriverUnavailable` if the entry point is missing and
    /// `PortCreationFailed` if the driver returned a null port.
    fn create_port(&self, name: &str, flags: PortFlags) -> Result<RawPort, CreateErrorKind>;

    /// Closes a port. Must be called exactly once for every created port.
    fn close_port(&self, port: RawPort);

    /// Hands `data` to the driver as-is.
    fn send_data(&self, port: RawPort, data: &[u8]) -> Result<(), SendError>;
}

/// The implementation behind a host output device.
pub trait OutputDeviceImpl: Send {
    fn identifier(&self) -> &str;
    fn name(&self) -> &str;
    fn send_message_now(&mut self, message: &MidiMessage) -> Result<(), SendError>;
}
