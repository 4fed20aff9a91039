//! Multi-attribute reads in one round trip
//!
//! Batching is the main lever for cutting remote traffic. Two forms exist:
//!
//! - [`Element::attributes`] takes a tuple of typed keys and returns a tuple
//!   of optional values of the matching types.
//! - [`BatchRequest`] / [`BatchResponse`] take a list of keys built at
//!   runtime and return untyped slots that can be decoded one by one.
//!
//! Both issue a single stop-on-error request. Batches never fail: if the
//! remote call fails, or the process is not trusted, every slot is `None`.
//! A slot whose value does not decode into its key's type is also `None`.
//! The reply always has exactly as many slots as keys were asked for.

use std::borrow::Cow;
use std::sync::Arc;

use axbridge_domain::WireValue;
use tracing::{debug, trace};

use crate::attribute::{AttributeKey, FromWire};
use crate::element::Element;
use crate::ports::{BatchPolicy, RequestKind};
use crate::session::{remote_error, Session};

/// Attribute names to read together, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRequest {
    names: Vec<Cow<'static, str>>,
}

impl BatchRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key, builder style.
    pub fn with<T>(mut self, key: &AttributeKey<T>) -> Self {
        self.push(key);
        self
    }

    /// Append a key and return its slot index.
    pub fn push<T>(&mut self, key: &AttributeKey<T>) -> usize {
        self.push_name(key.name_cow())
    }

    /// Append an untyped attribute name and return its slot index.
    pub fn push_name(&mut self, name: impl Into<Cow<'static, str>>) -> usize {
        self.names.push(name.into());
        self.names.len() - 1
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(AsRef::as_ref)
    }
}

/// Index-aligned reply to a [`BatchRequest`].
#[derive(Debug, Clone)]
pub struct BatchResponse {
    slots: Vec<Option<WireValue>>,
    session: Arc<Session>,
}

impl BatchResponse {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw value of one slot; `None` when absent or out of range.
    pub fn get(&self, index: usize) -> Option<&WireValue> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Decode one slot as `T`. A value of another shape yields `None`.
    pub fn decode<T: FromWire>(&self, index: usize) -> Option<T> {
        decode_slot(self.get(index).cloned(), &self.session)
    }

    /// Decode one slot using the type of the key that requested it.
    pub fn decode_as<T: FromWire>(&self, index: usize, _key: &AttributeKey<T>) -> Option<T> {
        self.decode(index)
    }

    /// Number of slots that carry a value.
    pub fn present_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn slots(&self) -> &[Option<WireValue>] {
        &self.slots
    }

    pub fn into_slots(self) -> Vec<Option<WireValue>> {
        self.slots
    }
}

/// A fixed set of typed keys read in one batch.
///
/// Implemented for tuples of up to eight [`AttributeKey`]s.
pub trait KeySet {
    type Output;

    fn names(&self) -> Vec<&str>;

    fn decode(&self, slots: Vec<Option<WireValue>>, session: &Arc<Session>) -> Self::Output;
}

fn decode_slot<T: FromWire>(slot: Option<WireValue>, session: &Arc<Session>) -> Option<T> {
    let value = slot?;
    match T::from_wire(value, session) {
        Ok(decoded) => Some(decoded),
        Err(err) => {
            trace!(error = %err, "batch slot did not decode");
            None
        }
    }
}

impl KeySet for () {
    type Output = ();

    fn names(&self) -> Vec<&str> {
        Vec::new()
    }

    fn decode(&self, _slots: Vec<Option<WireValue>>, _session: &Arc<Session>) -> Self::Output {}
}

macro_rules! impl_key_set {
    ($($ty:ident => $idx:tt),+) => {
        impl<$($ty: FromWire),+> KeySet for ($(AttributeKey<$ty>,)+) {
            type Output = ($(Option<$ty>,)+);

            fn names(&self) -> Vec<&str> {
                vec![$(self.$idx.name()),+]
            }

            fn decode(&self, slots: Vec<Option<WireValue>>, session: &Arc<Session>) -> Self::Output {
                let mut slots = slots.into_iter();
                ($(decode_slot::<$ty>(slots.next().flatten(), session),)+)
            }
        }
    };
}

impl_key_set!(A => 0);
impl_key_set!(A => 0, B => 1);
impl_key_set!(A => 0, B => 1, C => 2);
impl_key_set!(A => 0, B => 1, C => 2, D => 3);
impl_key_set!(A => 0, B => 1, C => 2, D => 3, E => 4);
impl_key_set!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5);
impl_key_set!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6);
impl_key_set!(A => 0, B => 1, C => 2, D => 3, E => 4, F => 5, G => 6, H => 7);

impl Element {
    /// Read a tuple of typed keys in one round trip.
    ///
    /// ```ignore
    /// let (role, identifier, title) =
    ///     button.attributes((keys::ROLE, keys::IDENTIFIER, keys::TITLE));
    /// ```
    pub fn attributes<K: KeySet>(&self, keys: K) -> K::Output {
        let slots = self.read_slots(&keys.names(), BatchPolicy::StopOnError);
        keys.decode(slots, self.session())
    }

    /// Read a runtime-built list of keys in one round trip.
    pub fn fetch_batch(&self, request: &BatchRequest) -> BatchResponse {
        let names: Vec<&str> = request.names().collect();
        BatchResponse {
            slots: self.read_slots(&names, BatchPolicy::StopOnError),
            session: Arc::clone(self.session()),
        }
    }

    /// One multi-attribute request, aligned to `names`.
    pub(crate) fn read_slots(&self, names: &[&str], policy: BatchPolicy) -> Vec<Option<WireValue>> {
        if names.is_empty() {
            return Vec::new();
        }
        if self.session().ensure_granted().is_err() {
            return vec![None; names.len()];
        }
        match self.session().transport().copy_multiple_attribute_values(self.raw(), names, policy)
        {
            Ok(values) => align(values, names.len()),
            Err(status) => {
                let error = remote_error(RequestKind::CopyMultipleAttributeValues, status, None);
                debug!(keys = names.len(), error = %error, "batch read failed; all slots absent");
                vec![None; names.len()]
            }
        }
    }
}

/// Strip absence markers and force the reply to `expected` slots.
fn align(values: Vec<WireValue>, expected: usize) -> Vec<Option<WireValue>> {
    if values.len() != expected {
        debug!(expected, received = values.len(), "batch reply length differs from request");
    }
    let mut slots: Vec<Option<WireValue>> = values
        .into_iter()
        .take(expected)
        .map(|value| (!value.is_absent_marker()).then_some(value))
        .collect();
    slots.resize(expected, None);
    slots
}

#[cfg(test)]
mod tests {
    use axbridge_domain::{AxStatus, BoxedValue};

    use super::*;

    #[test]
    fn test_align_strips_markers_and_pads() {
        let values = vec![
            WireValue::from("AXButton"),
            WireValue::Null,
            WireValue::Boxed(BoxedValue::Error(AxStatus::NO_VALUE)),
        ];
        let slots = align(values, 4);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0], Some(WireValue::from("AXButton")));
        assert!(slots[1..].iter().all(Option::is_none));
    }

    #[test]
    fn test_align_truncates_long_replies() {
        let slots = align(vec![WireValue::from(true), WireValue::from(false)], 1);
        assert_eq!(slots, vec![Some(WireValue::Bool(true))]);
    }

    #[test]
    fn test_request_indices() {
        let mut request = BatchRequest::new();
        assert_eq!(request.push(&crate::attribute::keys::ROLE), 0);
        assert_eq!(request.push_name("AXCustom"), 1);
        assert_eq!(request.names().collect::<Vec<_>>(), vec!["AXRole", "AXCustom"]);
    }
}
