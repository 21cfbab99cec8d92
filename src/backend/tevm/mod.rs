use std::ffi::c_void;

use crate::driver::{PortFlags, RawPort};
use crate::errors::*;
use crate::traits::VirtualMidiDriver;

#[cfg(target_os = "windows")]
mod loader;
#[cfg(target_os = "windows")]
pub use self::loader::load;

type DataCallback = unsafe extern "system" fn(*mut c_void, *mut u8, u32, usize);

type CreatePortEx2 = unsafe extern "system" fn(
    port_name: *const u16,
    callback: Option<DataCallback>,
    callback_instance: usize,
    max_sysex_length: u32,
    flags: u32,
) -> *mut c_void;

type ClosePort = unsafe extern "system" fn(port: *mut c_void);

type SendData = unsafe extern "system" fn(port: *mut c_void, data: *const u8, length: u32) -> i32;

// helper for string conversion
fn to_wide_null(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(Some(0)).collect()
}

fn data_length(len: usize) -> Result<u32, SendError> {
    u32::try_from(len).map_err(|_| SendError::InvalidData("message is too long for the driver"))
}

/// Entry points resolved from `teVirtualMIDI.dll`.
///
/// The library is never unloaded, so the function pointers stay valid for
/// the rest of the process.
pub struct TeVirtualMidi {
    create_port_ex2: Option<CreatePortEx2>,
    close_port: Option<ClosePort>,
    send_data: Option<SendData>,
}

impl VirtualMidiDriver for TeVirtualMidi {
    fn create_port(&self, name: &str, flags: PortFlags) -> Result<RawPort, CreateErrorKind> {
        let create = self.create_port_ex2.ok_or(CreateErrorKind::DriverUnavailable)?;
        let wide = to_wide_null(name);
        let port = unsafe { create(wide.as_ptr(), None, 0, 0, flags.bits()) };
        RawPort::from_raw(port).ok_or(CreateErrorKind::PortCreationFailed)
    }

    fn close_port(&self, port: RawPort) {
        match self.close_port {
            Some(close) => unsafe { close(port.as_ptr()) },
            None => log::warn!("cannot close virtual MIDI port, virtualMIDIClosePort is missing"),
        }
    }

    fn send_data(&self, port: RawPort, data: &[u8]) -> Result<(), SendError> {
        let send = self.send_data.ok_or(SendError::DriverUnavailable)?;
        let length = data_length(data.len())?;
        if unsafe { send(port.as_ptr(), data.as_ptr(), length) } != 0 {
            Ok(())
        } else {
            Err(SendError::Other("the driver failed to send the message"))
        }
    }
}
