// This module is not public

// The entry-point table is portable; only loading the DLL needs Windows.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
mod tevm;
#[cfg(target_os = "windows")]
pub(crate) use self::tevm::load;

#[cfg(not(target_os = "windows"))]
mod dummy;
#[cfg(not(target_os = "windows"))]
pub(crate) use self::dummy::*;
