//! Tagged wire values
//!
//! Everything the remote service hands back is one of the variants of
//! [`WireValue`]. Geometry travels as an opaque box that must be unboxed
//! against an expected [`BoxKind`]; unboxing against the wrong kind yields
//! nothing rather than a reinterpreted payload.

use serde::{Deserialize, Serialize};

use crate::errors::AxStatus;
use crate::geometry::{CharRange, Point, Rect, Size};
use crate::impl_name_conversions;
use crate::remote::ElementRef;

/// A value as received from (or sent to) the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// Successful reply with no payload.
    Null,
    /// Text.
    String(String),
    /// Boolean flag.
    Bool(bool),
    /// Integer or floating point number.
    Number(Number),
    /// Reference to another remote UI object.
    Element(ElementRef),
    /// Ordered list; element lists arrive as a list of `Element` values.
    List(Vec<WireValue>),
    /// Geometry, range or per-slot error box.
    Boxed(BoxedValue),
    /// Payload of a type this layer does not model (dates, URLs, attributed
    /// strings, ...).
    Opaque(OpaqueValue),
}

impl WireValue {
    /// Name of the wire tag, used in type-mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Bool(_) => "boolean",
            Self::Number(Number::Int(_)) => "integer",
            Self::Number(Number::Float(_)) => "float",
            Self::Element(_) => "element",
            Self::List(_) => "list",
            Self::Boxed(boxed) => boxed.type_name(),
            Self::Opaque(_) => "opaque",
        }
    }

    /// Whether this is a successful reply with no payload.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value marks an absent slot in a batch reply.
    ///
    /// The service fills slots it could not resolve with either a null or a
    /// boxed error status.
    pub const fn is_absent_marker(&self) -> bool {
        matches!(self, Self::Null | Self::Boxed(BoxedValue::Error(_)))
    }

    /// The text payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::Int(value))
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        Self::Number(Number::Float(value))
    }
}

impl From<ElementRef> for WireValue {
    fn from(value: ElementRef) -> Self {
        Self::Element(value)
    }
}

impl From<Point> for WireValue {
    fn from(value: Point) -> Self {
        Self::Boxed(BoxedValue::Point(value))
    }
}

impl From<Size> for WireValue {
    fn from(value: Size) -> Self {
        Self::Boxed(BoxedValue::Size(value))
    }
}

impl From<Rect> for WireValue {
    fn from(value: Rect) -> Self {
        Self::Boxed(BoxedValue::Rect(value))
    }
}

impl From<CharRange> for WireValue {
    fn from(value: CharRange) -> Self {
        Self::Boxed(BoxedValue::Range(value))
    }
}

/// Numeric payload. The service stores numbers either as integers or as
/// floating point depending on the attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Number {
    /// Integer-typed number.
    Int(i64),
    /// Floating-point number.
    Float(f64),
}

impl Number {
    /// The integer value, if it can be represented without loss.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::Float(v) => {
                // i64::MIN is exactly -2^63; 2^63 itself is out of range.
                const LIMIT: f64 = 9_223_372_036_854_775_808.0;
                if !(-LIMIT..LIMIT).contains(&v) {
                    return None;
                }
                let truncated = v as i64;
                (truncated as f64 == v).then_some(truncated)
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    /// The value as a float; large integers may lose precision.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Discriminator of a boxed geometry payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoxKind {
    /// `CGPoint`.
    Point,
    /// `CGSize`.
    Size,
    /// `CGRect`.
    Rect,
    /// `CFRange`.
    Range,
    /// `AXError` status.
    Error,
    /// Unknown box type.
    Illegal,
}

impl_name_conversions!(BoxKind {
    Point => "point",
    Size => "size",
    Rect => "rect",
    Range => "range",
    Error => "error",
    Illegal => "illegal",
});

/// Opaque boxed value (an `AXValue` on the wire).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxedValue {
    /// Boxed point.
    Point(Point),
    /// Boxed size.
    Size(Size),
    /// Boxed rectangle.
    Rect(Rect),
    /// Boxed character range.
    Range(CharRange),
    /// Per-slot failure status inside a batch reply.
    Error(AxStatus),
    /// A box the service could not describe.
    Illegal,
}

impl BoxedValue {
    /// Discriminator of this box.
    pub const fn kind(&self) -> BoxKind {
        match self {
            Self::Point(_) => BoxKind::Point,
            Self::Size(_) => BoxKind::Size,
            Self::Rect(_) => BoxKind::Rect,
            Self::Range(_) => BoxKind::Range,
            Self::Error(_) => BoxKind::Error,
            Self::Illegal => BoxKind::Illegal,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Self::Point(_) => "boxed(point)",
            Self::Size(_) => "boxed(size)",
            Self::Rect(_) => "boxed(rect)",
            Self::Range(_) => "boxed(range)",
            Self::Error(_) => "boxed(error)",
            Self::Illegal => "boxed(illegal)",
        }
    }

    /// The point, if this box holds one.
    pub const fn unbox_point(&self) -> Option<Point> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// The size, if this box holds one.
    pub const fn unbox_size(&self) -> Option<Size> {
        match self {
            Self::Size(s) => Some(*s),
            _ => None,
        }
    }

    /// The rectangle, if this box holds one.
    pub const fn unbox_rect(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(*r),
            _ => None,
        }
    }

    /// The character range, if this box holds one.
    pub const fn unbox_range(&self) -> Option<CharRange> {
        match self {
            Self::Range(r) => Some(*r),
            _ => None,
        }
    }
}

/// Description of a payload that is not otherwise modeled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueValue {
    /// Type name reported by the remote side (e.g. `CFDate`).
    pub type_name: String,
    /// Textual rendering of the payload, for diagnostics only.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(WireValue::from("x").type_name(), "string");
        assert_eq!(WireValue::from(true).type_name(), "boolean");
        assert_eq!(WireValue::from(3_i64).type_name(), "integer");
        assert_eq!(WireValue::from(Point::ZERO).type_name(), "boxed(point)");
        assert_eq!(WireValue::List(vec![]).type_name(), "list");
    }

    #[test]
    fn test_unbox_requires_matching_kind() {
        let boxed = BoxedValue::Point(Point::new(1.0, 2.0));
        assert_eq!(boxed.unbox_point(), Some(Point::new(1.0, 2.0)));
        assert_eq!(boxed.unbox_size(), None);
        assert_eq!(boxed.kind(), BoxKind::Point);
    }

    #[test]
    fn test_absent_markers() {
        assert!(WireValue::Null.is_absent_marker());
        assert!(WireValue::Boxed(BoxedValue::Error(AxStatus::NO_VALUE)).is_absent_marker());
        assert!(!WireValue::from("AXButton").is_absent_marker());
    }

    #[test]
    fn test_number_integer_view() {
        assert_eq!(Number::Int(5).as_i64(), Some(5));
        assert_eq!(Number::Float(5.0).as_i64(), Some(5));
        assert_eq!(Number::Float(5.5).as_i64(), None);
        assert_eq!(Number::Float(f64::NAN).as_i64(), None);
    }

    #[test]
    fn test_number_integer_view_rejects_out_of_range_floats() {
        let two_pow_63 = 9_223_372_036_854_775_808.0_f64;
        assert_eq!(Number::Float(two_pow_63).as_i64(), None);
        assert_eq!(Number::Float(-two_pow_63).as_i64(), Some(i64::MIN));
        assert_eq!(Number::Float(f64::INFINITY).as_i64(), None);
        assert_eq!(Number::Float(-1.0e19).as_i64(), None);
        assert_eq!(Number::Int(2).as_f64(), 2.0);
    }
}
