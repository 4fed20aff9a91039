//! Conversion between Core Foundation values and [`WireValue`]

use std::ffi::c_void;

use axbridge_core::WireResult;
use axbridge_domain::{
    AxStatus, BoxedValue, CharRange, ElementRef, Number, OpaqueValue, Point, Rect, Size, WireValue,
};
use core_foundation::array::CFArray;
use core_foundation::base::{CFType, TCFType};
use core_foundation::boolean::CFBoolean;
use core_foundation::number::CFNumber;
use core_foundation::string::CFString;
use core_foundation_sys::array::{
    CFArrayGetCount, CFArrayGetTypeID, CFArrayGetValueAtIndex, CFArrayRef,
};
use core_foundation_sys::base::{
    CFCopyDescription, CFCopyTypeIDDescription, CFGetTypeID, CFIndex, CFNullGetTypeID, CFRange,
    CFTypeRef,
};
use core_foundation_sys::number::{
    CFBooleanGetTypeID, CFBooleanGetValue, CFNumberGetTypeID, CFNumberIsFloatType,
};
use core_foundation_sys::string::CFStringGetTypeID;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};

use super::element::AxElementObject;
use super::ffi::{
    kAXValueTypeAXError, kAXValueTypeCFRange, kAXValueTypeCGPoint, kAXValueTypeCGRect,
    kAXValueTypeCGSize, AXUIElementGetTypeID, AXValueCreate, AXValueGetType, AXValueGetTypeID,
    AXValueGetValue, AXValueRef, AXValueType,
};

/// Decode a borrowed CF value.
///
/// # Safety
/// `value` must be null or a valid CF object for the duration of the call.
pub(crate) unsafe fn wire_from_cf(value: CFTypeRef) -> WireValue {
    if value.is_null() {
        return WireValue::Null;
    }

    let type_id = CFGetTypeID(value);
    if type_id == CFStringGetTypeID() {
        WireValue::String(CFString::wrap_under_get_rule(value.cast()).to_string())
    } else if type_id == CFBooleanGetTypeID() {
        WireValue::Bool(CFBooleanGetValue(value.cast()))
    } else if type_id == CFNumberGetTypeID() {
        let number = CFNumber::wrap_under_get_rule(value.cast());
        let parsed = if CFNumberIsFloatType(value.cast()) != 0 {
            number.to_f64().map(Number::Float)
        } else {
            number.to_i64().map(Number::Int)
        };
        parsed.map_or_else(|| opaque(value), WireValue::Number)
    } else if type_id == AXUIElementGetTypeID() {
        AxElementObject::from_get_rule(value.cast())
            .map_or(WireValue::Null, |object| WireValue::Element(ElementRef::new(object)))
    } else if type_id == CFArrayGetTypeID() {
        WireValue::List(list_from_cf(value.cast()))
    } else if type_id == AXValueGetTypeID() {
        WireValue::Boxed(unbox(value.cast()))
    } else if type_id == CFNullGetTypeID() {
        WireValue::Null
    } else {
        opaque(value)
    }
}

/// Decode and release a +1 CF value.
///
/// # Safety
/// `value` must be null or a valid CF object owned by the caller.
pub(crate) unsafe fn wire_from_owned_cf(value: CFTypeRef) -> WireValue {
    if value.is_null() {
        return WireValue::Null;
    }
    let owned = CFType::wrap_under_create_rule(value);
    wire_from_cf(owned.as_CFTypeRef())
}

/// # Safety
/// `array` must be a valid `CFArrayRef`.
pub(crate) unsafe fn list_from_cf(array: CFArrayRef) -> Vec<WireValue> {
    let count = CFArrayGetCount(array);
    (0..count).map(|index| wire_from_cf(CFArrayGetValueAtIndex(array, index))).collect()
}

/// String entries of an owned array of names; non-strings are skipped.
///
/// # Safety
/// `array` must be null or a valid `CFArrayRef` owned by the caller.
pub(crate) unsafe fn names_from_owned_array(array: CFArrayRef) -> Vec<String> {
    match wire_from_owned_cf(array.cast()) {
        WireValue::List(items) => items
            .into_iter()
            .filter_map(|item| match item {
                WireValue::String(name) => Some(name),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Encode a value for an attribute write.
///
/// Null and opaque payloads cannot be sent.
pub(crate) fn cf_from_wire(value: &WireValue) -> WireResult<CFType> {
    match value {
        WireValue::String(s) => Ok(CFString::new(s).as_CFType()),
        WireValue::Bool(b) => Ok(CFBoolean::from(*b).as_CFType()),
        WireValue::Number(Number::Int(v)) => Ok(CFNumber::from(*v).as_CFType()),
        WireValue::Number(Number::Float(v)) => Ok(CFNumber::from(*v).as_CFType()),
        WireValue::Element(element) => element
            .downcast_ref::<AxElementObject>()
            .map(|object| object.as_cf_type().clone())
            .ok_or(AxStatus::ILLEGAL_ARGUMENT),
        WireValue::List(items) => {
            let converted = items.iter().map(cf_from_wire).collect::<WireResult<Vec<_>>>()?;
            Ok(CFArray::from_CFTypes(&converted).as_CFType())
        }
        WireValue::Boxed(boxed) => boxed_to_cf(boxed),
        WireValue::Null | WireValue::Opaque(_) => Err(AxStatus::ILLEGAL_ARGUMENT),
    }
}

/// Array of attribute names for a batch read.
pub(crate) fn name_array(names: &[&str]) -> CFArray<CFString> {
    let strings: Vec<CFString> = names.iter().map(|name| CFString::new(name)).collect();
    CFArray::from_CFTypes(&strings)
}

fn boxed_to_cf(boxed: &BoxedValue) -> WireResult<CFType> {
    // SAFETY: each payload is a live local of the layout AXValueCreate
    // expects for the given type tag; AXValueCreate copies it.
    let raw = unsafe {
        match boxed {
            BoxedValue::Point(p) => create_box(kAXValueTypeCGPoint, &CGPoint::new(p.x, p.y)),
            BoxedValue::Size(s) => create_box(kAXValueTypeCGSize, &CGSize::new(s.width, s.height)),
            BoxedValue::Rect(r) => create_box(
                kAXValueTypeCGRect,
                &CGRect::new(
                    &CGPoint::new(r.origin.x, r.origin.y),
                    &CGSize::new(r.size.width, r.size.height),
                ),
            ),
            BoxedValue::Range(r) => create_box(
                kAXValueTypeCFRange,
                &CFRange::init(r.location as CFIndex, r.length as CFIndex),
            ),
            BoxedValue::Error(_) | BoxedValue::Illegal => return Err(AxStatus::ILLEGAL_ARGUMENT),
        }
    };

    if raw.is_null() {
        return Err(AxStatus::FAILURE);
    }
    // SAFETY: AXValueCreate returned a non-null +1 reference.
    Ok(unsafe { CFType::wrap_under_create_rule(raw.cast()) })
}

unsafe fn create_box<T>(value_type: AXValueType, payload: &T) -> AXValueRef {
    AXValueCreate(value_type, (payload as *const T).cast::<c_void>())
}

unsafe fn read_box<T>(value: AXValueRef, value_type: AXValueType, mut out: T) -> Option<T> {
    (AXValueGetValue(value, value_type, (&mut out as *mut T).cast::<c_void>()) != 0).then_some(out)
}

unsafe fn unbox(value: AXValueRef) -> BoxedValue {
    let unboxed = match AXValueGetType(value) {
        kAXValueTypeCGPoint => read_box(value, kAXValueTypeCGPoint, CGPoint::new(0.0, 0.0))
            .map(|p| BoxedValue::Point(Point::new(p.x, p.y))),
        kAXValueTypeCGSize => read_box(value, kAXValueTypeCGSize, CGSize::new(0.0, 0.0))
            .map(|s| BoxedValue::Size(Size::new(s.width, s.height))),
        kAXValueTypeCGRect => read_box(
            value,
            kAXValueTypeCGRect,
            CGRect::new(&CGPoint::new(0.0, 0.0), &CGSize::new(0.0, 0.0)),
        )
        .map(|r| {
            BoxedValue::Rect(Rect::new(
                Point::new(r.origin.x, r.origin.y),
                Size::new(r.size.width, r.size.height),
            ))
        }),
        kAXValueTypeCFRange => read_box(value, kAXValueTypeCFRange, CFRange::init(0, 0))
            .map(|r| BoxedValue::Range(CharRange::new(r.location as i64, r.length as i64))),
        kAXValueTypeAXError => {
            read_box(value, kAXValueTypeAXError, 0_i32).map(|code| BoxedValue::Error(AxStatus(code)))
        }
        _ => None,
    };
    unboxed.unwrap_or(BoxedValue::Illegal)
}

unsafe fn opaque(value: CFTypeRef) -> WireValue {
    let type_name = CFString::wrap_under_create_rule(CFCopyTypeIDDescription(CFGetTypeID(value)));
    let description = CFString::wrap_under_create_rule(CFCopyDescription(value));
    WireValue::Opaque(OpaqueValue {
        type_name: type_name.to_string(),
        description: description.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxed_geometry_survives_cf() {
        let frame = Rect::new(Point::new(10.0, 20.0), Size::new(300.0, 40.0));
        let cf = cf_from_wire(&WireValue::from(frame)).unwrap();
        let decoded = unsafe { wire_from_cf(cf.as_CFTypeRef()) };
        assert_eq!(decoded, WireValue::from(frame));
    }

    #[test]
    fn test_scalars_decode_to_matching_tags() {
        let text = cf_from_wire(&WireValue::from("hello")).unwrap();
        let flag = cf_from_wire(&WireValue::from(true)).unwrap();
        let count = cf_from_wire(&WireValue::from(12_i64)).unwrap();

        unsafe {
            assert_eq!(wire_from_cf(text.as_CFTypeRef()), WireValue::from("hello"));
            assert_eq!(wire_from_cf(flag.as_CFTypeRef()), WireValue::Bool(true));
            assert_eq!(wire_from_cf(count.as_CFTypeRef()).type_name(), "integer");
        }
    }

    #[test]
    fn test_null_and_error_boxes_cannot_be_sent() {
        assert_eq!(cf_from_wire(&WireValue::Null).unwrap_err(), AxStatus::ILLEGAL_ARGUMENT);
        assert_eq!(
            cf_from_wire(&WireValue::Boxed(BoxedValue::Error(AxStatus::NO_VALUE))).unwrap_err(),
            AxStatus::ILLEGAL_ARGUMENT
        );
    }
}
