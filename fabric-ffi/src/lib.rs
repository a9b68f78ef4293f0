//! Native projection of cluster-management descriptions.
//!
//! Every description in `fabric-description` has a fixed-layout native twin
//! in [`raw`]. [`ToNative`] builds the native struct with all strings, arrays
//! and nested structs owned by a [`PinCollection`]; [`FromNative`] reads a
//! native struct back, following `Reserved` extension pointers until the
//! first null.
//!
//! A typical call validates, projects and invokes in one scope:
//!
//! ```ignore
//! let status = fabric_ffi::marshal(&description, |native| unsafe {
//!     create_application(native)
//! })?;
//! ```
//!
//! Native data with an unknown discriminator is never turned into an error:
//! it means the two sides disagree about the ABI and the call panics.

pub mod abi;
mod pin;
pub mod raw;

mod application;
mod entry_point;
mod health;
mod query;
mod service;
mod upgrade;

pub use abi::abi_mismatch;
pub use pin::PinCollection;

use fabric_types::{Result, Validate};

/// Projects a description into its native layout.
///
/// Projection never validates; use [`marshal`] to validate first.
pub trait ToNative {
    type Native;

    fn to_native(&self, pin: &mut PinCollection) -> Self::Native;
}

/// Reads a description back from its native layout.
pub trait FromNative: Sized {
    type Native;

    /// # Safety
    /// Every pointer reachable from `native` must be null or valid for reads
    /// for the duration of the call.
    unsafe fn from_native(native: &Self::Native) -> Self;

    /// Reads from a pointer. A null pointer is an ABI mismatch.
    ///
    /// # Safety
    /// Same as [`FromNative::from_native`].
    #[track_caller]
    unsafe fn from_native_ptr(native: *const Self::Native) -> Self {
        match unsafe { native.as_ref() } {
            Some(native) => unsafe { Self::from_native(native) },
            None => abi_mismatch(std::any::type_name::<Self::Native>(), "null pointer"),
        }
    }
}

/// Validates `description`, projects it, and hands the native struct to `call`.
///
/// Every pinned allocation is released when this returns.
pub fn marshal<D, R>(description: &D, call: impl FnOnce(&D::Native) -> R) -> Result<R>
where
    D: ToNative + Validate,
{
    description.validate()?;
    let mut pin = PinCollection::new();
    let native = description.to_native(&mut pin);
    tracing::debug!(
        description = std::any::type_name::<D>(),
        pinned = pin.len(),
        "projected description"
    );
    Ok(call(&native))
}
