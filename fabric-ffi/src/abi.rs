//! Primitive conversions between managed values and native fields, and the
//! fail-fast path for native data that does not match the known layout.

use crate::pin::PinCollection;
use crate::raw::{BOOLEAN, DWORD, FALSE, GUID, LPCWSTR, TRUE, ULONG};
use fabric_types::FabricUri;
use std::ffi::c_void;
use std::fmt::Display;
use std::ptr;
use std::time::Duration;
use uuid::Uuid;

/// Aborts the current call after native data disagreed with the ABI.
///
/// Reached for unknown discriminators, a tag whose required payload is
/// null, or a value that cannot be represented on the other side. These
/// are not recoverable.
#[cold]
#[track_caller]
pub fn abi_mismatch(what: &str, value: impl Display) -> ! {
    tracing::error!(what, value = %value, "native ABI mismatch");
    panic!("native ABI mismatch: unexpected {what} {value}");
}

/// Reads a NUL-terminated UTF-16 string. Null reads as empty.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated UTF-16 buffer.
#[track_caller]
pub unsafe fn read_string(ptr: LPCWSTR) -> String {
    unsafe { read_optional_string(ptr) }.unwrap_or_default()
}

/// Reads a NUL-terminated UTF-16 string. Null reads as `None`; an unpaired
/// surrogate is an ABI mismatch.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated UTF-16 buffer.
#[track_caller]
pub unsafe fn read_optional_string(ptr: LPCWSTR) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let mut len = 0;
    while unsafe { *ptr.add(len) } != 0 {
        len += 1;
    }
    let wide = unsafe { std::slice::from_raw_parts(ptr, len) };
    match String::from_utf16(wide) {
        Ok(text) => Some(text),
        Err(_) => abi_mismatch("UTF-16 string", String::from_utf16_lossy(wide)),
    }
}

/// Reads a required name. A null or malformed name is an ABI mismatch.
///
/// # Safety
/// Same as [`read_string`].
#[track_caller]
pub unsafe fn read_uri(ptr: LPCWSTR) -> FabricUri {
    match unsafe { read_optional_uri(ptr) } {
        Some(uri) => uri,
        None => abi_mismatch("fabric URI", "null"),
    }
}

/// Reads an optional name. A malformed name is an ABI mismatch.
///
/// # Safety
/// Same as [`read_string`].
#[track_caller]
pub unsafe fn read_optional_uri(ptr: LPCWSTR) -> Option<FabricUri> {
    let text = unsafe { read_optional_string(ptr) }?;
    match FabricUri::parse(&text) {
        Ok(uri) => Some(uri),
        Err(_) => abi_mismatch("fabric URI", text),
    }
}

/// Views a native counted array. A zero count or null pointer reads as empty.
///
/// # Safety
/// When non-null, `items` must point to `count` initialized values that
/// outlive `'a`.
pub unsafe fn read_array<'a, T>(count: ULONG, items: *const T) -> &'a [T] {
    if count == 0 || items.is_null() {
        return &[];
    }
    unsafe { std::slice::from_raw_parts(items, count as usize) }
}

/// Follows a `Reserved` pointer to the next extension level.
///
/// # Safety
/// `reserved` must be null or point to a live `T`.
pub unsafe fn extension<'a, T>(reserved: *mut c_void) -> Option<&'a T> {
    let next = unsafe { reserved.cast::<T>().as_ref() };
    if next.is_some() {
        tracing::trace!(level = std::any::type_name::<T>(), "following extension");
    }
    next
}

/// Dereferences a required payload pointer selected by a discriminator.
///
/// # Safety
/// `value` must be null or point to a live `T`.
#[track_caller]
pub unsafe fn payload<'a, T>(value: *const c_void, tag: i32) -> &'a T {
    match unsafe { value.cast::<T>().as_ref() } {
        Some(payload) => payload,
        None => abi_mismatch("null payload for tag", tag),
    }
}

/// Pins an extension level if present and returns the pointer for `Reserved`.
pub fn chain<T>(pin: &mut PinCollection, next: Option<T>) -> *mut c_void {
    next.map_or(ptr::null_mut(), |ext| pin.add_item(ext).cast())
}

/// Pins an optional nested struct, projecting `None` to null.
pub fn optional<T>(pin: &mut PinCollection, value: Option<T>) -> *const T {
    value.map_or(ptr::null(), |v| pin.add_item(v).cast_const())
}

pub fn to_boolean(value: bool) -> BOOLEAN {
    if value { TRUE } else { FALSE }
}

pub fn from_boolean(value: BOOLEAN) -> bool {
    value != FALSE
}

/// Narrows a validated managed count to its native width.
#[track_caller]
pub fn narrow<T: TryFrom<i64>>(what: &str, value: i64) -> T {
    T::try_from(value).unwrap_or_else(|_| abi_mismatch(what, value))
}

/// Whole seconds carried by a native `DWORD`.
#[track_caller]
pub fn to_seconds(what: &str, value: Duration) -> DWORD {
    DWORD::try_from(value.as_secs()).unwrap_or_else(|_| abi_mismatch(what, value.as_secs()))
}

pub fn from_seconds(seconds: DWORD) -> Duration {
    Duration::from_secs(u64::from(seconds))
}

pub fn to_guid(id: Uuid) -> GUID {
    let (data1, data2, data3, data4) = id.as_fields();
    GUID {
        Data1: data1,
        Data2: data2,
        Data3: data3,
        Data4: *data4,
    }
}

pub fn from_guid(guid: &GUID) -> Uuid {
    Uuid::from_fields(guid.Data1, guid.Data2, guid.Data3, &guid.Data4)
}

/// Reinterprets a native flag enum as the `DWORD` it is stored in.
pub fn flag_bits(flag: i32) -> DWORD {
    flag as DWORD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guid_roundtrip() {
        let id = Uuid::new_v4();
        assert_eq!(from_guid(&to_guid(id)), id);
        assert_eq!(to_guid(Uuid::nil()), GUID::default());
    }

    #[test]
    fn null_strings() {
        assert_eq!(unsafe { read_string(ptr::null()) }, "");
        assert_eq!(unsafe { read_optional_string(ptr::null()) }, None);
        assert_eq!(unsafe { read_optional_uri(ptr::null()) }, None);
    }

    #[test]
    fn wide_string_decodes() {
        let wide: Vec<u16> = "Shop\u{1F6D2}".encode_utf16().chain([0]).collect();
        assert_eq!(unsafe { read_string(wide.as_ptr()) }, "Shop\u{1F6D2}");
    }

    #[test]
    #[should_panic(expected = "native ABI mismatch: unexpected UTF-16 string")]
    fn unpaired_surrogate_is_fatal() {
        let wide: [u16; 3] = [0x0041, 0xD800, 0];
        let _ = unsafe { read_string(wide.as_ptr()) };
    }

    #[test]
    fn null_array_is_empty() {
        let items: &[u32] = unsafe { read_array(5, ptr::null()) };
        assert!(items.is_empty());
    }

    #[test]
    #[should_panic(expected = "native ABI mismatch")]
    fn malformed_uri_is_fatal() {
        let mut pin = PinCollection::new();
        let text = pin.add_string("not-a-uri");
        let _ = unsafe { read_uri(text) };
    }

    #[test]
    #[should_panic(expected = "native ABI mismatch")]
    fn narrowing_out_of_range_is_fatal() {
        let _: u32 = narrow("capacity", -1);
    }

    #[test]
    fn booleans() {
        assert_eq!(to_boolean(true), TRUE);
        assert!(from_boolean(2));
        assert!(!from_boolean(FALSE));
    }
}
