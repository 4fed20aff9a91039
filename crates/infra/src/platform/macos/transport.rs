//! ApplicationServices implementation of [`AccessibilityTransport`]

use std::ptr;

use axbridge_core::{AccessibilityTransport, BatchPolicy, WireResult};
use axbridge_domain::{AxStatus, ElementRef, TransportConfig, WireValue};
use core_foundation::base::{CFType, TCFType};
use core_foundation::string::CFString;
use core_foundation_sys::array::CFArrayRef;
use core_foundation_sys::base::{Boolean, CFTypeRef};

use super::element::AxElementObject;
use super::ffi::{
    kAXCopyMultipleAttributeOptionStopOnError, AXUIElementCopyActionNames,
    AXUIElementCopyAttributeNames, AXUIElementCopyAttributeValue, AXUIElementCopyElementAtPosition,
    AXUIElementCopyMultipleAttributeValues, AXUIElementCreateApplication,
    AXUIElementCreateSystemWide, AXUIElementGetPid, AXUIElementIsAttributeSettable,
    AXUIElementPerformAction, AXUIElementRef, AXUIElementSetAttributeValue,
    AXUIElementSetMessagingTimeout,
};
use super::value::{cf_from_wire, list_from_cf, name_array, names_from_owned_array, wire_from_owned_cf};

/// Transport over the macOS accessibility API.
///
/// Every call blocks until the remote application answers or the messaging
/// timeout expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct AxTransport {
    messaging_timeout: Option<f32>,
}

impl AxTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &TransportConfig) -> Self {
        Self { messaging_timeout: config.messaging_timeout_secs }
    }

    /// Timeout applied to every root element this transport creates.
    pub fn with_messaging_timeout(mut self, secs: f32) -> Self {
        self.messaging_timeout = Some(secs);
        self
    }

    fn root(&self, raw: AXUIElementRef) -> WireResult<ElementRef> {
        // SAFETY: `raw` comes straight from an AXUIElementCreate* call.
        let object = unsafe { AxElementObject::from_create_rule(raw) }.ok_or(AxStatus::FAILURE)?;
        if let Some(secs) = self.messaging_timeout {
            // SAFETY: `object` holds a valid element.
            let status = AxStatus(unsafe { AXUIElementSetMessagingTimeout(object.as_raw(), secs) });
            if !status.is_success() {
                tracing::debug!(status = %status, "Failed to set messaging timeout");
            }
        }
        Ok(ElementRef::new(object))
    }
}

fn raw_of(element: &ElementRef) -> WireResult<AXUIElementRef> {
    element.downcast_ref::<AxElementObject>().map(AxElementObject::as_raw).ok_or(AxStatus::ILLEGAL_ARGUMENT)
}

fn check(code: i32) -> WireResult<()> {
    let status = AxStatus(code);
    if status.is_success() {
        Ok(())
    } else {
        Err(status)
    }
}

impl AccessibilityTransport for AxTransport {
    fn create_system_wide(&self) -> WireResult<ElementRef> {
        // SAFETY: no arguments; returns a +1 reference.
        self.root(unsafe { AXUIElementCreateSystemWide() })
    }

    fn create_application(&self, pid: i32) -> WireResult<ElementRef> {
        // SAFETY: any pid is accepted; an unknown one yields an element whose
        // calls fail with an invalid-element status.
        self.root(unsafe { AXUIElementCreateApplication(pid) })
    }

    fn copy_element_at_position(
        &self,
        root: &ElementRef,
        x: f32,
        y: f32,
    ) -> WireResult<Option<ElementRef>> {
        let root = raw_of(root)?;
        let mut hit: AXUIElementRef = ptr::null();
        // SAFETY: `root` is valid for the call and `hit` is a valid out slot.
        let status = AxStatus(unsafe { AXUIElementCopyElementAtPosition(root, x, y, &mut hit) });
        if status == AxStatus::NO_VALUE {
            return Ok(None);
        }
        check(status.0)?;
        // SAFETY: on success `hit` is null or a +1 reference.
        Ok(unsafe { AxElementObject::from_create_rule(hit) }.map(ElementRef::new))
    }

    fn copy_attribute_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        let raw = raw_of(element)?;
        let mut names: CFArrayRef = ptr::null();
        // SAFETY: valid element and out slot.
        check(unsafe { AXUIElementCopyAttributeNames(raw, &mut names) })?;
        // SAFETY: on success `names` is null or a +1 array.
        Ok(unsafe { names_from_owned_array(names) })
    }

    fn copy_attribute_value(&self, element: &ElementRef, attribute: &str) -> WireResult<WireValue> {
        let raw = raw_of(element)?;
        let name = CFString::new(attribute);
        let mut value: CFTypeRef = ptr::null();
        // SAFETY: valid element, attribute string alive for the call, valid
        // out slot.
        check(unsafe {
            AXUIElementCopyAttributeValue(raw, name.as_concrete_TypeRef(), &mut value)
        })?;
        // SAFETY: on success `value` is null or a +1 reference.
        Ok(unsafe { wire_from_owned_cf(value) })
    }

    fn copy_multiple_attribute_values(
        &self,
        element: &ElementRef,
        attributes: &[&str],
        policy: BatchPolicy,
    ) -> WireResult<Vec<WireValue>> {
        let raw = raw_of(element)?;
        let names = name_array(attributes);
        let options = match policy {
            BatchPolicy::StopOnError => kAXCopyMultipleAttributeOptionStopOnError,
            BatchPolicy::Continue => 0,
        };
        let mut values: CFArrayRef = ptr::null();
        // SAFETY: valid element, name array alive for the call, valid out
        // slot.
        check(unsafe {
            AXUIElementCopyMultipleAttributeValues(
                raw,
                names.as_concrete_TypeRef(),
                options,
                &mut values,
            )
        })?;
        if values.is_null() {
            return Err(AxStatus::FAILURE);
        }
        // SAFETY: non-null +1 array; released by the wrapper after decoding.
        let owned = unsafe { CFType::wrap_under_create_rule(values.cast()) };
        // SAFETY: `owned` keeps the array alive while it is read.
        Ok(unsafe { list_from_cf(owned.as_CFTypeRef().cast()) })
    }

    fn set_attribute_value(
        &self,
        element: &ElementRef,
        attribute: &str,
        value: &WireValue,
    ) -> WireResult<()> {
        let raw = raw_of(element)?;
        let encoded = cf_from_wire(value)?;
        let name = CFString::new(attribute);
        // SAFETY: element, name and value are alive for the call.
        check(unsafe {
            AXUIElementSetAttributeValue(raw, name.as_concrete_TypeRef(), encoded.as_CFTypeRef())
        })
    }

    fn is_attribute_settable(&self, element: &ElementRef, attribute: &str) -> WireResult<bool> {
        let raw = raw_of(element)?;
        let name = CFString::new(attribute);
        let mut settable: Boolean = 0;
        // SAFETY: valid element, name and out slot.
        check(unsafe {
            AXUIElementIsAttributeSettable(raw, name.as_concrete_TypeRef(), &mut settable)
        })?;
        Ok(settable != 0)
    }

    fn copy_action_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        let raw = raw_of(element)?;
        let mut names: CFArrayRef = ptr::null();
        // SAFETY: valid element and out slot.
        check(unsafe { AXUIElementCopyActionNames(raw, &mut names) })?;
        // SAFETY: on success `names` is null or a +1 array.
        Ok(unsafe { names_from_owned_array(names) })
    }

    fn perform_action(&self, element: &ElementRef, action: &str) -> WireResult<()> {
        let raw = raw_of(element)?;
        let name = CFString::new(action);
        // SAFETY: valid element and action string.
        check(unsafe { AXUIElementPerformAction(raw, name.as_concrete_TypeRef()) })
    }

    fn pid(&self, element: &ElementRef) -> WireResult<i32> {
        let raw = raw_of(element)?;
        let mut pid = 0_i32;
        // SAFETY: valid element and out slot.
        check(unsafe { AXUIElementGetPid(raw, &mut pid) })?;
        Ok(pid)
    }
}
