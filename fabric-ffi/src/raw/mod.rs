//! Fixed-layout native structs and discriminator constants.
//!
//! These mirror the cluster-management C ABI field for field. Every struct
//! that can grow carries a trailing `Reserved` pointer to its next extension
//! level (`_EX1`, `_EX2`, ...), or null when no later level is present.

#![allow(non_camel_case_types, non_snake_case)]

mod application;
mod entry_point;
mod health;
mod query;
mod service;
mod upgrade;

pub use application::*;
pub use entry_point::*;
pub use health::*;
pub use query::*;
pub use service::*;
pub use upgrade::*;

/// NUL-terminated UTF-16 string.
pub type LPCWSTR = *const u16;
/// A `fabric:` name carried as a wide string.
pub type FABRIC_URI = LPCWSTR;
pub type BOOLEAN = u8;
pub type BYTE = u8;
pub type ULONG = u32;
pub type DWORD = u32;
pub type LONG = i32;
pub type LONGLONG = i64;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GUID {
    pub Data1: u32,
    pub Data2: u16,
    pub Data3: u16,
    pub Data4: [u8; 8],
}

pub const FALSE: BOOLEAN = 0;
pub const TRUE: BOOLEAN = 1;
