//! Virtual MIDI output ports on Windows, backed by Tobias Erichsen's
//! teVirtualMIDI driver.
//!
//! Other applications see a port created by this crate as a regular MIDI
//! input device. The driver DLL (`teVirtualMIDI.dll`) is loaded at runtime;
//! if it is not installed, or on any other platform, no ports can be created
//! and the factory functions return `None` or an error instead.
//!
//! ```no_run
//! use virtualmidi::MidiOutput;
//!
//! if let Some(mut out) = MidiOutput::create_new_device("My Virtual Port") {
//!     out.send(&[0x90, 60, 100]).unwrap();
//!     out.send(&[0x80, 60, 0]).unwrap();
//! }
//! ```

mod backend;
mod common;
mod driver;
mod errors;
mod port;
mod traits;

pub use common::{create_output_wrapper, MidiMessage, MidiOutput};
pub use driver::{Driver, LazyDriver, PortFlags, RawPort, DEFAULT_LIBRARY};
pub use errors::*;
pub use port::{Direction, VirtualPort};
pub use traits::{OutputDeviceImpl, VirtualMidiDriver};
