//! Typed attribute keys
//!
//! An [`AttributeKey<T>`] pairs a wire attribute name with the local type the
//! value is decoded into. Keys carry no remote state and are usually taken
//! from the [`keys`] catalog.

pub mod codec;
pub mod keys;

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

pub use codec::{FromWire, IntoWire};

/// Attribute name plus the type its value decodes into.
pub struct AttributeKey<T> {
    name: Cow<'static, str>,
    _value: PhantomData<fn() -> T>,
}

impl<T> AttributeKey<T> {
    /// Key for a name known at compile time.
    pub const fn from_static(name: &'static str) -> Self {
        Self { name: Cow::Borrowed(name), _value: PhantomData }
    }

    /// Key for a name built at runtime (custom or app-private attributes).
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into(), _value: PhantomData }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn name_cow(&self) -> Cow<'static, str> {
        self.name.clone()
    }
}

impl<T: FromWire> AttributeKey<T> {
    /// Name of the local type this key decodes into.
    pub const fn expected_type(&self) -> &'static str {
        T::EXPECTED
    }
}

impl<T> Clone for AttributeKey<T> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(), _value: PhantomData }
    }
}

impl<T> PartialEq for AttributeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for AttributeKey<T> {}

impl<T> fmt::Debug for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttributeKey").field(&self.name).finish()
    }
}

impl<T> fmt::Display for AttributeKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
