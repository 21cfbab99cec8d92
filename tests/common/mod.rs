#![allow(dead_code)]

use std::ffi::c_void;
use std::sync::Arc;

use parking_lot::Mutex;
use virtualmidi::{CreateErrorKind, Driver, PortFlags, RawPort, SendError, VirtualMidiDriver};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create { name: String, flags: PortFlags },
    Close(RawPort),
    Send(RawPort, Vec<u8>),
}

#[derive(Debug, Default)]
struct State {
    calls: Vec<Call>,
    next_port: usize,
}

/// What the fake driver does when asked to create a port or send data.
#[derive(Debug, Clone, Copy, Default)]
pub struct Behavior {
    pub missing_create: bool,
    pub refuse_create: bool,
    pub missing_send: bool,
    pub refuse_send: bool,
}

/// A driver that records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingDriver {
    state: Arc<Mutex<State>>,
    behavior: Behavior,
}

impl RecordingDriver {
    pub fn new() -> RecordingDriver {
        Self::with_behavior(Behavior::default())
    }

    pub fn with_behavior(behavior: Behavior) -> RecordingDriver {
        let _ = env_logger::builder().is_test(true).try_init();
        RecordingDriver {
            state: Arc::default(),
            behavior,
        }
    }

    /// A `Driver` sharing this recorder's call log.
    pub fn driver(&self) -> Driver {
        Driver::new(self.clone())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn creates(&self) -> Vec<(String, PortFlags)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create { name, flags } => Some((name, flags)),
                _ => None,
            })
            .collect()
    }

    pub fn closes(&self) -> Vec<RawPort> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Close(port) => Some(port),
                _ => None,
            })
            .collect()
    }

    pub fn sends(&self) -> Vec<(RawPort, Vec<u8>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send(port, data) => Some((port, data)),
                _ => None,
            })
            .collect()
    }
}

impl VirtualMidiDriver for RecordingDriver {
    fn create_port(&self, name: &str, flags: PortFlags) -> Result<RawPort, CreateErrorKind> {
        if self.behavior.missing_create {
            return Err(CreateErrorKind::DriverUnavailable);
        }
        let mut state = self.state.lock();
        state.calls.push(Call::Create {
            name: name.to_owned(),
            flags,
        });
        if self.behavior.refuse_create {
            return Err(CreateErrorKind::PortCreationFailed);
        }
        state.next_port += 1;
        Ok(RawPort::from_raw((state.next_port * 0x10) as *mut c_void).unwrap())
    }

    fn close_port(&self, port: RawPort) {
        self.state.lock().calls.push(Call::Close(port));
    }

    fn send_data(&self, port: RawPort, data: &[u8]) -> Result<(), SendError> {
        if self.behavior.missing_send {
            return Err(SendError::DriverUnavailable);
        }
        self.state.lock().calls.push(Call::Send(port, data.to_vec()));
        if self.behavior.refuse_send {
            return Err(SendError::Other("the driver failed to send the message"));
        }
        Ok(())
    }
}
