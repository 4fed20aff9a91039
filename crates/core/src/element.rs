//! Element handles and the typed marshaller
//!
//! An [`Element`] is a cheap, clonable handle to one remote UI object. All
//! reads and writes go through here: the permission gate is consulted, one
//! remote request is made, the raw status is mapped exactly once, and the
//! reply is decoded into the key's local type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use axbridge_domain::{AxError, AxResult, CharRange, ElementRef, Point, Rect, Size, WireValue};
use tracing::trace;

use crate::attribute::{keys, AttributeKey, FromWire, IntoWire};
use crate::ports::{AccessibilityTransport, RequestKind};
use crate::session::{remote_error, Session};

/// Handle to one remote UI object.
///
/// Two handles are equal when they refer to the same remote object, even if
/// they were obtained independently (e.g. once as a child and once as the
/// focused element).
#[derive(Clone)]
pub struct Element {
    raw: ElementRef,
    session: Arc<Session>,
}

impl Element {
    pub(crate) fn new(raw: ElementRef, session: Arc<Session>) -> Self {
        Self { raw, session }
    }

    /// The underlying remote reference.
    pub fn raw(&self) -> &ElementRef {
        &self.raw
    }

    /// Session this handle was created through.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    fn transport(&self) -> &dyn AccessibilityTransport {
        self.session.transport()
    }

    /// One raw read with status mapping. A successful reply with no payload
    /// becomes `AttributeNil`.
    pub fn raw_value(&self, attribute: &str) -> AxResult<WireValue> {
        self.session.ensure_granted()?;
        let value = self
            .transport()
            .copy_attribute_value(&self.raw, attribute)
            .map_err(|status| {
                remote_error(RequestKind::CopyAttributeValue, status, Some(attribute))
            })?;
        if value.is_null() {
            return Err(AxError::attribute_nil(attribute));
        }
        Ok(value)
    }

    /// Read and decode one attribute.
    pub fn get<T: FromWire>(&self, key: &AttributeKey<T>) -> AxResult<T> {
        self.attribute(key.name())
    }

    /// Like [`Element::get`], collapsing every failure into `None`.
    pub fn get_or_nil<T: FromWire>(&self, key: &AttributeKey<T>) -> Option<T> {
        self.attribute_or_nil(key.name())
    }

    /// Read and decode an attribute by name.
    pub fn attribute<T: FromWire>(&self, name: &str) -> AxResult<T> {
        let value = self.raw_value(name)?;
        T::from_wire(value, &self.session)
    }

    /// Like [`Element::attribute`], collapsing every failure into `None`.
    pub fn attribute_or_nil<T: FromWire>(&self, name: &str) -> Option<T> {
        match self.attribute(name) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(attribute = name, error_kind = err.kind(), "optional read yielded nothing");
                None
            }
        }
    }

    /// Read a text attribute by name.
    pub fn string(&self, name: &str) -> AxResult<String> {
        self.attribute(name)
    }

    /// Read a boolean attribute by name.
    pub fn bool(&self, name: &str) -> AxResult<bool> {
        self.attribute(name)
    }

    /// Read an integer attribute by name.
    pub fn int(&self, name: &str) -> AxResult<i64> {
        self.attribute(name)
    }

    /// Read a boxed point attribute by name.
    pub fn point(&self, name: &str) -> AxResult<Point> {
        self.attribute(name)
    }

    /// Read a boxed size attribute by name.
    pub fn size(&self, name: &str) -> AxResult<Size> {
        self.attribute(name)
    }

    /// Read a boxed character range attribute by name.
    pub fn range(&self, name: &str) -> AxResult<CharRange> {
        self.attribute(name)
    }

    /// Read an element-valued attribute by name.
    pub fn element(&self, name: &str) -> AxResult<Element> {
        self.attribute(name)
    }

    /// Read an element list attribute by name.
    pub fn elements(&self, name: &str) -> AxResult<Vec<Element>> {
        self.attribute(name)
    }

    /// Rectangle built from a position attribute and a size attribute.
    pub fn rect(&self, position: &str, size: &str) -> AxResult<Rect> {
        Ok(Rect::new(self.point(position)?, self.size(size)?))
    }

    /// Write one attribute.
    pub fn set<T: IntoWire>(&self, key: &AttributeKey<T>, value: T) -> AxResult<()> {
        self.set_attribute(key.name(), &value.into_wire())
    }

    /// Write an attribute by name.
    ///
    /// When the write is refused and the attribute reports itself as not
    /// settable, the error is `NotSettable`; otherwise the remote status is
    /// mapped as usual.
    pub fn set_attribute(&self, name: &str, value: &WireValue) -> AxResult<()> {
        self.session.ensure_granted()?;
        let Err(status) = self.transport().set_attribute_value(&self.raw, name, value) else {
            return Ok(());
        };
        if matches!(self.transport().is_attribute_settable(&self.raw, name), Ok(false)) {
            trace!(attribute = name, "write refused on read-only attribute");
            return Err(AxError::NotSettable);
        }
        Err(remote_error(RequestKind::SetAttributeValue, status, Some(name)))
    }

    /// Write a boxed point by attribute name.
    pub fn set_point(&self, name: &str, value: Point) -> AxResult<()> {
        self.set_attribute(name, &value.into_wire())
    }

    /// Write a boxed size by attribute name.
    pub fn set_size(&self, name: &str, value: Size) -> AxResult<()> {
        self.set_attribute(name, &value.into_wire())
    }

    /// Write text by attribute name.
    pub fn set_string(&self, name: &str, value: &str) -> AxResult<()> {
        self.set_attribute(name, &value.into_wire())
    }

    /// Write a boolean by attribute name.
    pub fn set_bool(&self, name: &str, value: bool) -> AxResult<()> {
        self.set_attribute(name, &value.into_wire())
    }

    /// Whether the key's attribute accepts writes.
    pub fn is_settable<T>(&self, key: &AttributeKey<T>) -> AxResult<bool> {
        self.is_attribute_settable(key.name())
    }

    /// Whether the named attribute accepts writes.
    pub fn is_attribute_settable(&self, name: &str) -> AxResult<bool> {
        self.session.ensure_granted()?;
        self.transport()
            .is_attribute_settable(&self.raw, name)
            .map_err(|status| remote_error(RequestKind::IsAttributeSettable, status, Some(name)))
    }

    /// Names of every attribute the element exposes.
    pub fn attribute_names(&self) -> AxResult<Vec<String>> {
        self.session.ensure_granted()?;
        self.transport()
            .copy_attribute_names(&self.raw)
            .map_err(|status| remote_error(RequestKind::CopyAttributeNames, status, None))
    }

    /// Names of every action the element supports.
    pub fn action_names(&self) -> AxResult<Vec<String>> {
        self.session.ensure_granted()?;
        self.transport()
            .copy_action_names(&self.raw)
            .map_err(|status| remote_error(RequestKind::CopyActionNames, status, None))
    }

    /// Perform a named action.
    pub fn perform_action(&self, action: &str) -> AxResult<()> {
        self.session.ensure_granted()?;
        self.transport()
            .perform_action(&self.raw, action)
            .map_err(|status| remote_error(RequestKind::PerformAction, status, None))
    }

    /// Process that owns this element.
    pub fn pid(&self) -> AxResult<i32> {
        self.session.ensure_granted()?;
        self.transport()
            .pid(&self.raw)
            .map_err(|status| remote_error(RequestKind::GetPid, status, None))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.raw).finish()
    }
}

/// `Element(<role> "<title>" #<identifier>)`, omitting parts that are absent.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (role, title, identifier) =
            self.attributes((keys::ROLE, keys::TITLE, keys::IDENTIFIER));
        let mut parts = Vec::with_capacity(3);
        if let Some(role) = role {
            parts.push(role);
        }
        if let Some(title) = title {
            parts.push(format!("\"{title}\""));
        }
        if let Some(identifier) = identifier {
            parts.push(format!("#{identifier}"));
        }
        write!(f, "Element({})", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use axbridge_domain::AxStatus;

    use super::*;
    use crate::ports::StaticGate;
    use crate::testing::{NodeSpec, SyntheticTransport};

    fn fixture() -> (Arc<SyntheticTransport>, Arc<Session>, Element) {
        let transport = Arc::new(SyntheticTransport::new());
        let app = transport.add_application(
            100,
            NodeSpec::new("AXApplication")
                .title("Demo")
                .child(NodeSpec::new("AXButton").title("OK").identifier("ok")),
        );
        let session = Session::builder(transport.clone(), Arc::new(StaticGate(true))).build();
        let root = session.wrap(transport.element_ref(app));
        (transport, session, root)
    }

    #[test]
    fn test_get_decodes_and_maps_nil() {
        let (_transport, _session, root) = fixture();
        assert_eq!(root.get(&keys::TITLE), Ok("Demo".to_string()));
        assert_eq!(root.get(&keys::IDENTIFIER), Err(AxError::attribute_nil("AXIdentifier")));
        assert_eq!(root.get_or_nil(&keys::IDENTIFIER), None);
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let (_transport, _session, root) = fixture();
        let err = root.attribute::<bool>("AXTitle").unwrap_err();
        assert_eq!(err, AxError::type_mismatch("boolean", "string"));
    }

    #[test]
    fn test_handles_from_different_paths_are_equal() {
        let (transport, session, root) = fixture();
        let via_children = root.get(&keys::CHILDREN).unwrap();
        let button = transport.find_node("ok").unwrap();
        let direct = session.wrap(transport.element_ref(button));

        assert_eq!(via_children[0], direct);
        let set: HashSet<Element> = [via_children[0].clone(), direct].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stale_handle_is_invalid_reference() {
        let (transport, _session, root) = fixture();
        let button = root.get(&keys::CHILDREN).unwrap().remove(0);
        transport.invalidate(transport.find_node("ok").unwrap());

        assert_eq!(button.get(&keys::ROLE), Err(AxError::InvalidReference));
        assert_eq!(button.get_or_nil(&keys::ROLE), None);
    }

    #[test]
    fn test_read_only_write_is_not_settable() {
        let (_transport, _session, root) = fixture();
        assert_eq!(root.set(&keys::TITLE, "x".to_string()), Err(AxError::NotSettable));
    }

    #[test]
    fn test_injected_status_maps_once() {
        let (transport, _session, root) = fixture();
        let app = transport.find_by_role("AXApplication").unwrap();
        transport.fail_attribute(app, "AXTitle", AxStatus::CANNOT_COMPLETE);
        assert_eq!(root.get(&keys::TITLE), Err(AxError::CannotComplete));
    }

    #[test]
    fn test_display() {
        let (_transport, _session, root) = fixture();
        let button = root.get(&keys::CHILDREN).unwrap().remove(0);
        assert_eq!(button.to_string(), "Element(AXButton \"OK\" #ok)");
        assert_eq!(root.to_string(), "Element(AXApplication \"Demo\")");
    }
}
