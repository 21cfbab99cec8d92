use std::error::Error;
use std::fmt;

const DRIVER_UNAVAILABLE_MSG: &str = "the teVirtualMIDI driver is not available";

/// The driver library could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError;

impl Error for InitError {}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        DRIVER_UNAVAILABLE_MSG.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateErrorKind {
    /// The driver library is not loaded or does not export the entry point.
    DriverUnavailable,
    /// The driver refused to create the port (returned a null handle).
    PortCreationFailed,
    InvalidArgument(&'static str),
}

impl Error for CreateErrorKind {}

impl fmt::Display for CreateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CreateErrorKind::DriverUnavailable => DRIVER_UNAVAILABLE_MSG.fmt(f),
            CreateErrorKind::PortCreationFailed => "the driver could not create the virtual port".fmt(f),
            CreateErrorKind::InvalidArgument(msg) => msg.fmt(f),
        }
    }
}

/// An error that occurred while opening a virtual port.
#[derive(Clone, PartialEq, Eq)]
pub struct CreateError {
    kind: CreateErrorKind,
    port_name: String,
}

impl CreateError {
    pub fn new(kind: CreateErrorKind, port_name: &str) -> CreateError {
        CreateError {
            kind,
            port_name: port_name.to_owned(),
        }
    }

    /// Helper method to create `CreateErrorKind::InvalidArgument`.
    pub fn invalid_argument(msg: &'static str, port_name: &str) -> CreateError {
        Self::new(CreateErrorKind::InvalidArgument(msg), port_name)
    }

    pub fn kind(&self) -> CreateErrorKind {
        self.kind
    }

    /// The name of the port that was requested.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

impl fmt::Debug for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.kind.fmt(f)
    }
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (port '{}')", self.kind, self.port_name)
    }
}

impl Error for CreateError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// The driver does not export a send entry point.
    DriverUnavailable,
    InvalidData(&'static str),
    Other(&'static str),
}

impl Error for SendError {}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            SendError::DriverUnavailable => DRIVER_UNAVAILABLE_MSG.fmt(f),
            SendError::InvalidData(msg) => msg.fmt(f),
            SendError::Other(msg) => msg.fmt(f),
        }
    }
}
