use crate::driver::{Driver, PortFlags, RawPort};
use crate::errors::*;

/// Which sides of a virtual port are visible to other applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Only the side other applications send to.
    ReceiveOnly,
    /// Only the side other applications receive from.
    TransmitOnly,
    #[default]
    Bidirectional,
}

impl Direction {
    /// The flags used to create a port with this direction.
    ///
    /// Received commands are always pre-parsed by the driver.
    pub fn port_flags(self) -> PortFlags {
        let instantiate = match self {
            Direction::ReceiveOnly => PortFlags::INSTANTIATE_RX_ONLY,
            Direction::TransmitOnly => PortFlags::INSTANTIATE_TX_ONLY,
            Direction::Bidirectional => PortFlags::empty(),
        };
        PortFlags::PARSE_RX | instantiate
    }
}

/// An open virtual MIDI port.
///
/// The port is closed when this value is dropped, or earlier through
/// [`close`](VirtualPort::close). The driver is told to close it exactly once.
#[derive(Debug)]
pub struct VirtualPort {
    driver: Driver,
    port: RawPort,
    closed: bool,
    name: String,
    direction: Direction,
}

impl VirtualPort {
    pub fn open(driver: &Driver, name: &str, direction: Direction) -> Result<VirtualPort, CreateError> {
        if name.is_empty() {
            return Err(CreateError::invalid_argument("port name must not be empty", name));
        }
        if name.contains('\0') {
            return Err(CreateError::invalid_argument("port name must not contain NUL characters", name));
        }

        let flags = direction.port_flags();
        let port = driver
            .create_port(name, flags)
            .map_err(|kind| CreateError::new(kind, name))?;
        log::debug!("opened virtual MIDI port '{}' ({:?})", name, direction);

        Ok(VirtualPort {
            driver: driver.clone(),
            port,
            closed: false,
            name: name.to_owned(),
            direction,
        })
    }

    /// The driver does not report an identifier of its own, so this is always empty.
    pub fn identifier(&self) -> &str {
        ""
    }

    /// The name the port was opened with.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Forwards raw MIDI bytes to the driver, unmodified, on the calling thread.
    pub fn send(&mut self, message: &[u8]) -> Result<(), SendError> {
        self.driver.send_data(self.port, message).map_err(|err| {
            log::warn!("sending to virtual MIDI port '{}' failed: {}", self.name, err);
            err
        })
    }

    pub fn close(mut self) {
        // The driver call happens here, `Drop` then finds nothing left to close
        self.close_internal();
    }

    fn close_internal(&mut self) {
        if !self.closed {
            self.closed = true;
            self.driver.close_port(self.port);
            log::debug!("closed virtual MIDI port '{}'", self.name);
        }
    }
}

impl Drop for VirtualPort {
    fn drop(&mut self) {
        self.close_internal()
    }
}
