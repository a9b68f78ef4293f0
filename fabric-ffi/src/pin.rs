//! Call-scoped ownership of native allocations.

use crate::abi::abi_mismatch;
use crate::raw::{BYTE, FABRIC_URI, LPCWSTR, ULONG};
use fabric_types::FabricUri;
use std::ptr;

struct Pinned {
    ptr: *mut u8,
    len: usize,
    release: unsafe fn(*mut u8, usize),
}

unsafe fn release_item<T>(ptr: *mut u8, _len: usize) {
    drop(unsafe { Box::from_raw(ptr.cast::<T>()) });
}

unsafe fn release_slice<T>(ptr: *mut u8, len: usize) {
    let slice = ptr::slice_from_raw_parts_mut(ptr.cast::<T>(), len);
    drop(unsafe { Box::from_raw(slice) });
}

/// Owns every allocation referenced by a projected native struct.
///
/// Pointers handed out by the `add_*` methods stay valid, and do not move,
/// until the collection is dropped. Allocations are released in reverse
/// order of creation.
#[derive(Default)]
pub struct PinCollection {
    pinned: Vec<Pinned>,
}

impl PinCollection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live allocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pinned.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pinned.is_empty()
    }

    fn pin_slice<T>(&mut self, items: Box<[T]>) -> *mut T {
        let len = items.len();
        let ptr = Box::into_raw(items).cast::<T>();
        self.pinned.push(Pinned {
            ptr: ptr.cast(),
            len,
            release: release_slice::<T>,
        });
        ptr
    }

    /// Pins a NUL-terminated UTF-16 copy of `value`.
    pub fn add_string(&mut self, value: &str) -> LPCWSTR {
        let wide: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
        self.pin_slice(wide.into_boxed_slice()).cast_const()
    }

    /// Pins `value` if present; `None` projects to null.
    pub fn add_optional_string(&mut self, value: Option<&str>) -> LPCWSTR {
        value.map_or(ptr::null(), |v| self.add_string(v))
    }

    pub fn add_uri(&mut self, uri: &FabricUri) -> FABRIC_URI {
        self.add_string(uri.as_str())
    }

    pub fn add_optional_uri(&mut self, uri: Option<&FabricUri>) -> FABRIC_URI {
        uri.map_or(ptr::null(), |u| self.add_uri(u))
    }

    /// Pins a single value and returns its stable address.
    pub fn add_item<T>(&mut self, item: T) -> *mut T {
        let ptr = Box::into_raw(Box::new(item));
        self.pinned.push(Pinned {
            ptr: ptr.cast(),
            len: 1,
            release: release_item::<T>,
        });
        ptr
    }

    /// Pins a contiguous array and returns its native count and address.
    ///
    /// An empty array projects to `(0, null)` without allocating.
    pub fn add_array<T>(&mut self, items: Vec<T>) -> (ULONG, *const T) {
        if items.is_empty() {
            return (0, ptr::null());
        }
        let count = ULONG::try_from(items.len())
            .unwrap_or_else(|_| abi_mismatch("array length", items.len()));
        (count, self.pin_slice(items.into_boxed_slice()).cast_const())
    }

    /// Pins a copy of an opaque byte buffer.
    pub fn add_blob(&mut self, bytes: &[u8]) -> (ULONG, *const BYTE) {
        self.add_array(bytes.to_vec())
    }
}

impl Drop for PinCollection {
    fn drop(&mut self) {
        while let Some(pinned) = self.pinned.pop() {
            unsafe { (pinned.release)(pinned.ptr, pinned.len) };
        }
    }
}

impl std::fmt::Debug for PinCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinCollection")
            .field("pinned", &self.pinned.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::read_string;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct DropRecorder {
        id: u32,
        log: Rc<RefCell<Vec<u32>>>,
    }

    impl Drop for DropRecorder {
        fn drop(&mut self) {
            self.log.borrow_mut().push(self.id);
        }
    }

    #[test]
    fn strings_are_nul_terminated_utf16() {
        let mut pin = PinCollection::new();
        let ptr = pin.add_string("héllo");
        let text = unsafe { read_string(ptr) };
        assert_eq!(text, "héllo");
        assert_eq!(unsafe { *ptr.add(5) }, 0);
    }

    #[test]
    fn none_and_empty_arrays_do_not_allocate() {
        let mut pin = PinCollection::new();
        assert!(pin.add_optional_string(None).is_null());
        let (count, items) = pin.add_array(Vec::<u32>::new());
        assert_eq!(count, 0);
        assert!(items.is_null());
        assert!(pin.is_empty());
    }

    #[test]
    fn pointers_survive_moving_the_collection() {
        let mut pin = PinCollection::new();
        let item = pin.add_item(42u64);
        let (count, items) = pin.add_array(vec![1u16, 2, 3]);
        let moved = pin;
        assert_eq!(unsafe { *item }, 42);
        assert_eq!(count, 3);
        assert_eq!(unsafe { *items.add(2) }, 3);
        assert_eq!(moved.len(), 2);
    }

    #[test]
    fn releases_in_reverse_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let mut pin = PinCollection::new();
            for id in 0..3 {
                pin.add_item(DropRecorder {
                    id,
                    log: Rc::clone(&log),
                });
            }
            assert!(log.borrow().is_empty());
        }
        assert_eq!(*log.borrow(), vec![2, 1, 0]);
    }

    #[test]
    fn blob_is_copied() {
        let mut pin = PinCollection::new();
        let data = vec![7u8, 8, 9];
        let (count, bytes) = pin.add_blob(&data);
        drop(data);
        assert_eq!(count, 3);
        assert_eq!(unsafe { std::slice::from_raw_parts(bytes, 3) }, &[7, 8, 9]);
    }
}
