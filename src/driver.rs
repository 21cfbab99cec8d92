use std::ffi::{c_void, OsStr};
use std::fmt;
use std::ptr::NonNull;
use std::sync::Arc;

use bitflags::bitflags;
use once_cell::sync::OnceCell;

use crate::backend;
use crate::errors::*;
use crate::traits::VirtualMidiDriver;

/// File name of the driver library that [`Driver::load`] looks for.
pub const DEFAULT_LIBRARY: &str = "teVirtualMIDI.dll";

bitflags! {
    /// Flags passed to the driver when a port is created.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PortFlags: u32 {
        /// The driver delivers only complete, pre-parsed MIDI commands.
        const PARSE_RX = 1;
        /// The driver parses everything handed to it for sending.
        const PARSE_TX = 2;
        /// Only the receiving ("midi-out" to other applications) side is created.
        const INSTANTIATE_RX_ONLY = 4;
        /// Only the transmitting ("midi-in" to other applications) side is created.
        const INSTANTIATE_TX_ONLY = 8;
    }
}

/// An opaque, non-null port handle handed out by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawPort(NonNull<c_void>);

// The handle is only an address owned by the driver, which accepts it from any thread.
unsafe impl Send for RawPort {}
unsafe impl Sync for RawPort {}

impl RawPort {
    /// Wraps a port pointer returned by the driver, `None` if it is null.
    pub fn from_raw(ptr: *mut c_void) -> Option<RawPort> {
        NonNull::new(ptr).map(RawPort)
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0.as_ptr()
    }
}

/// A handle to a loaded virtual MIDI driver.
///
/// Cloning is cheap: all clones share the same driver, which is kept alive as
/// long as any port created through it is open.
#[derive(Clone)]
pub struct Driver {
    imp: Arc<dyn VirtualMidiDriver>,
}

impl Driver {
    /// Wraps any driver implementation.
    pub fn new<D: VirtualMidiDriver + 'static>(imp: D) -> Driver {
        Driver { imp: Arc::new(imp) }
    }

    /// Loads the driver library by its default name.
    pub fn load() -> Result<Driver, InitError> {
        Self::load_from(DEFAULT_LIBRARY)
    }

    /// Loads the driver from a specific library name or path.
    pub fn load_from<S: AsRef<OsStr>>(library: S) -> Result<Driver, InitError> {
        backend::load(library.as_ref()).map(Driver::new)
    }

    /// The process-wide driver, loaded on first use.
    ///
    /// If loading fails, every call returns `None` and the load is not retried.
    pub fn shared() -> Option<Driver> {
        static SHARED: LazyDriver = LazyDriver::new(Driver::load);
        SHARED.get()
    }

    pub(crate) fn create_port(&self, name: &str, flags: PortFlags) -> Result<RawPort, CreateErrorKind> {
        self.imp.create_port(name, flags)
    }

    pub(crate) fn close_port(&self, port: RawPort) {
        self.imp.close_port(port)
    }

    pub(crate) fn send_data(&self, port: RawPort, data: &[u8]) -> Result<(), SendError> {
        self.imp.send_data(port, data)
    }
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Driver").finish_non_exhaustive()
    }
}

/// A driver that is loaded at most once, on first access.
///
/// Concurrent first accesses block until the single load attempt has
/// finished. The outcome (including failure) is kept for the lifetime of the
/// holder.
pub struct LazyDriver {
    cell: OnceCell<Option<Driver>>,
    loader: fn() -> Result<Driver, InitError>,
}

impl LazyDriver {
    pub const fn new(loader: fn() -> Result<Driver, InitError>) -> LazyDriver {
        LazyDriver {
            cell: OnceCell::new(),
            loader,
        }
    }

    pub fn get(&self) -> Option<Driver> {
        self.cell
            .get_or_init(|| match (self.loader)() {
                Ok(driver) => Some(driver),
                Err(err) => {
                    log::warn!("{}, virtual MIDI ports will not be available", err);
                    None
                }
            })
            .clone()
    }

    /// Whether the load has been attempted yet.
    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    struct NullDriver;

    impl VirtualMidiDriver for NullDriver {
        fn create_port(&self, _name: &str, _flags: PortFlags) -> Result<RawPort, CreateErrorKind> {
            Err(CreateErrorKind::PortCreationFailed)
        }

        fn close_port(&self, _port: RawPort) {}

        fn send_data(&self, _port: RawPort, _data: &[u8]) -> Result<(), SendError> {
            Ok(())
        }
    }

    #[test]
    fn null_pointer_is_not_a_port() {
        assert!(RawPort::from_raw(std::ptr::null_mut()).is_none());
        let port = RawPort::from_raw(0x10 as *mut c_void).unwrap();
        assert_eq!(port.as_ptr() as usize, 0x10);
    }

    #[test]
    fn flag_values_match_driver_header() {
        assert_eq!(PortFlags::PARSE_RX.bits(), 1);
        assert_eq!(PortFlags::PARSE_TX.bits(), 2);
        assert_eq!(PortFlags::INSTANTIATE_RX_ONLY.bits(), 4);
        assert_eq!(PortFlags::INSTANTIATE_TX_ONLY.bits(), 8);
    }

    static FAILED_LOADS: AtomicUsize = AtomicUsize::new(0);

    fn failing_loader() -> Result<Driver, InitError> {
        FAILED_LOADS.fetch_add(1, Ordering::SeqCst);
        Err(InitError)
    }

    #[test]
    fn failed_load_is_not_retried() {
        let lazy = LazyDriver::new(failing_loader);
        assert!(!lazy.is_initialized());
        for _ in 0..5 {
            assert!(lazy.get().is_none());
        }
        assert!(lazy.is_initialized());
        assert_eq!(FAILED_LOADS.load(Ordering::SeqCst), 1);
    }

    static CONCURRENT_LOADS: AtomicUsize = AtomicUsize::new(0);

    fn counting_loader() -> Result<Driver, InitError> {
        CONCURRENT_LOADS.fetch_add(1, Ordering::SeqCst);
        thread::sleep(std::time::Duration::from_millis(20));
        Ok(Driver::new(NullDriver))
    }

    #[test]
    fn concurrent_first_access_loads_once() {
        static LAZY: LazyDriver = LazyDriver::new(counting_loader);
        let handles: Vec<_> = (0..8).map(|_| thread::spawn(|| LAZY.get().is_some())).collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
        assert_eq!(CONCURRENT_LOADS.load(Ordering::SeqCst), 1);
    }
}
