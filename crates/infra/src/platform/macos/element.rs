//! Owned `AXUIElementRef` behind the [`RemoteObject`] seam

use std::any::Any;
use std::fmt;

use axbridge_domain::RemoteObject;
use core_foundation::base::{CFType, TCFType};
use core_foundation_sys::base::{CFEqual, CFHash};

use super::ffi::AXUIElementRef;

/// A retained accessibility element. Released on drop.
///
/// Equality and hashing go through `CFEqual`/`CFHash`, so two references
/// obtained separately for the same remote element compare equal.
pub struct AxElementObject {
    cf: CFType,
}

// SAFETY: AXUIElementRef is an immutable CF object; the ApplicationServices
// accessibility calls accept it from any thread and CF retain/release is
// atomic.
unsafe impl Send for AxElementObject {}
// SAFETY: see above; no interior state is mutated through `&self`.
unsafe impl Sync for AxElementObject {}

impl AxElementObject {
    /// Take ownership of a +1 reference. `None` for a null pointer.
    ///
    /// # Safety
    /// `raw` must be null or a valid `AXUIElementRef` the caller owns.
    pub(crate) unsafe fn from_create_rule(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        Some(Self { cf: CFType::wrap_under_create_rule(raw.cast()) })
    }

    /// Retain a borrowed reference. `None` for a null pointer.
    ///
    /// # Safety
    /// `raw` must be null or a valid `AXUIElementRef`.
    pub(crate) unsafe fn from_get_rule(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        Some(Self { cf: CFType::wrap_under_get_rule(raw.cast()) })
    }

    pub(crate) fn as_raw(&self) -> AXUIElementRef {
        self.cf.as_CFTypeRef().cast()
    }

    pub(crate) fn as_cf_type(&self) -> &CFType {
        &self.cf
    }
}

impl RemoteObject for AxElementObject {
    fn identity_hash(&self) -> u64 {
        // SAFETY: `cf` is a valid, retained CF object.
        unsafe { CFHash(self.cf.as_CFTypeRef()) as u64 }
    }

    fn same_object(&self, other: &dyn RemoteObject) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| {
            // SAFETY: both sides are valid, retained CF objects.
            unsafe { CFEqual(self.cf.as_CFTypeRef(), other.cf.as_CFTypeRef()) != 0 }
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Debug for AxElementObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AxElementObject({:p})", self.as_raw())
    }
}
