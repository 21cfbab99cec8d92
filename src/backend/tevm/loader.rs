use std::ffi::OsStr;
use std::mem;
use std::os::windows::ffi::OsStrExt;

use windows::core::{PCSTR, PCWSTR};
use windows::Win32::Foundation::HMODULE;
use windows::Win32::System::LibraryLoader::{GetProcAddress, LoadLibraryW};

use super::{ClosePort, CreatePortEx2, SendData, TeVirtualMidi};
use crate::errors::InitError;

type FarProc = unsafe extern "system" fn() -> isize;

/// `name` must be NUL-terminated.
unsafe fn resolve(module: HMODULE, name: &'static [u8]) -> Option<FarProc> {
    debug_assert_eq!(name.last(), Some(&0));
    let entry = GetProcAddress(module, PCSTR::from_raw(name.as_ptr()));
    if entry.is_none() {
        let name = String::from_utf8_lossy(&name[..name.len() - 1]);
        log::warn!("teVirtualMIDI entry point {} is missing", name);
    }
    entry
}

pub fn load(library: &OsStr) -> Result<TeVirtualMidi, InitError> {
    let wide: Vec<u16> = library.encode_wide().chain(Some(0)).collect();
    let module = match unsafe { LoadLibraryW(PCWSTR::from_raw(wide.as_ptr())) } {
        Ok(module) => module,
        Err(err) => {
            log::debug!("could not load {:?}: {}", library, err);
            return Err(InitError);
        }
    };
    log::debug!("loaded virtual MIDI driver from {:?}", library);

    unsafe {
        Ok(TeVirtualMidi {
            create_port_ex2: resolve(module, b"virtualMIDICreatePortEx2\0")
                .map(|entry| mem::transmute::<FarProc, CreatePortEx2>(entry)),
            close_port: resolve(module, b"virtualMIDIClosePort\0")
                .map(|entry| mem::transmute::<FarProc, ClosePort>(entry)),
            send_data: resolve(module, b"virtualMIDISendData\0")
                .map(|entry| mem::transmute::<FarProc, SendData>(entry)),
        })
    }
}
