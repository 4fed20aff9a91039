//! Decoding wire values into local types and back
//!
//! Decoding is structural: a value decodes only if its wire tag matches what
//! the target type expects. Nothing is coerced (no string from a number, no
//! boolean from an integer), and boxed geometry is unboxed only against its
//! own kind.

use std::sync::Arc;

use axbridge_domain::{AxError, AxResult, CharRange, ElementRef, Point, Rect, Size, WireValue};

use crate::element::Element;
use crate::session::Session;

/// A local type an attribute value can be decoded into.
pub trait FromWire: Sized {
    /// Name of the expected wire shape, reported in type-mismatch errors.
    const EXPECTED: &'static str;

    /// Decode a present (non-null) value. The session is needed to wrap
    /// element references into [`Element`] handles.
    fn from_wire(value: WireValue, session: &Arc<Session>) -> AxResult<Self>;
}

/// A local type that can be written back to the remote side.
pub trait IntoWire {
    fn into_wire(self) -> WireValue;
}

fn mismatch<T: FromWire>(value: &WireValue) -> AxError {
    AxError::type_mismatch(T::EXPECTED, value.type_name())
}

impl FromWire for WireValue {
    const EXPECTED: &'static str = "any";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        Ok(value)
    }
}

impl FromWire for String {
    const EXPECTED: &'static str = "string";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match value {
            WireValue::String(s) => Ok(s),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromWire for bool {
    const EXPECTED: &'static str = "boolean";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match value {
            WireValue::Bool(b) => Ok(b),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromWire for i64 {
    const EXPECTED: &'static str = "integer";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match &value {
            WireValue::Number(n) => n.as_i64().ok_or_else(|| mismatch::<Self>(&value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromWire for Element {
    const EXPECTED: &'static str = "element";

    fn from_wire(value: WireValue, session: &Arc<Session>) -> AxResult<Self> {
        match value {
            WireValue::Element(raw) => Ok(Self::new(raw, Arc::clone(session))),
            other => Err(mismatch::<Self>(&other)),
        }
    }
}

impl FromWire for Vec<Element> {
    const EXPECTED: &'static str = "list<element>";

    /// Every item must be an element; a single foreign item fails the whole
    /// list rather than being dropped.
    fn from_wire(value: WireValue, session: &Arc<Session>) -> AxResult<Self> {
        let items = match value {
            WireValue::List(items) => items,
            other => return Err(mismatch::<Self>(&other)),
        };
        items
            .into_iter()
            .map(|item| match item {
                WireValue::Element(raw) => Ok(Element::new(raw, Arc::clone(session))),
                other => Err(AxError::type_mismatch(Self::EXPECTED, format!("list<{}>", other.type_name()))),
            })
            .collect()
    }
}

impl FromWire for Point {
    const EXPECTED: &'static str = "boxed(point)";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match &value {
            WireValue::Boxed(boxed) => boxed.unbox_point().ok_or_else(|| mismatch::<Self>(&value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromWire for Size {
    const EXPECTED: &'static str = "boxed(size)";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match &value {
            WireValue::Boxed(boxed) => boxed.unbox_size().ok_or_else(|| mismatch::<Self>(&value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromWire for Rect {
    const EXPECTED: &'static str = "boxed(rect)";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match &value {
            WireValue::Boxed(boxed) => boxed.unbox_rect().ok_or_else(|| mismatch::<Self>(&value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl FromWire for CharRange {
    const EXPECTED: &'static str = "boxed(range)";

    fn from_wire(value: WireValue, _session: &Arc<Session>) -> AxResult<Self> {
        match &value {
            WireValue::Boxed(boxed) => boxed.unbox_range().ok_or_else(|| mismatch::<Self>(&value)),
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl IntoWire for WireValue {
    fn into_wire(self) -> WireValue {
        self
    }
}

impl IntoWire for String {
    fn into_wire(self) -> WireValue {
        WireValue::String(self)
    }
}

impl IntoWire for &str {
    fn into_wire(self) -> WireValue {
        WireValue::from(self)
    }
}

impl IntoWire for bool {
    fn into_wire(self) -> WireValue {
        WireValue::Bool(self)
    }
}

impl IntoWire for i64 {
    fn into_wire(self) -> WireValue {
        self.into()
    }
}

impl IntoWire for Point {
    fn into_wire(self) -> WireValue {
        self.into()
    }
}

impl IntoWire for Size {
    fn into_wire(self) -> WireValue {
        self.into()
    }
}

impl IntoWire for Rect {
    fn into_wire(self) -> WireValue {
        self.into()
    }
}

impl IntoWire for CharRange {
    fn into_wire(self) -> WireValue {
        self.into()
    }
}

impl IntoWire for &Element {
    fn into_wire(self) -> WireValue {
        WireValue::Element(ElementRef::clone(self.raw()))
    }
}
