use std::ffi::OsStr;

use crate::driver::{PortFlags, RawPort};
use crate::errors::*;
use crate::traits::VirtualMidiDriver;

/// The driver only exists on Windows, so a value of this type can never be created.
pub enum Unavailable {}

pub fn load(library: &OsStr) -> Result<Unavailable, InitError> {
    log::debug!("not loading {:?}: virtual MIDI driver is only supported on Windows", library);
    Err(InitError)
}

impl VirtualMidiDriver for Unavailable {
    fn create_port(&self, _name: &str, _flags: PortFlags) -> Result<RawPort, CreateErrorKind> {
        match *self {}
    }

    fn close_port(&self, _port: RawPort) {
        match *self {}
    }

    fn send_data(&self, _port: RawPort, _data: &[u8]) -> Result<(), SendError> {
        match *self {}
    }
}
