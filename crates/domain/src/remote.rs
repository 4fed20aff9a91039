//! Identity token for one remote UI object
//!
//! The transport owns the actual foreign reference. Locally it is held behind
//! [`ElementRef`], whose equality and hash delegate to the transport's notion
//! of remote identity rather than to the address of the local wrapper. Two
//! references obtained independently for the same remote object compare equal
//! and hash identically.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A transport-owned reference to one object in a remote accessibility tree.
///
/// Implementations release the foreign reference when dropped.
pub trait RemoteObject: Send + Sync + fmt::Debug {
    /// Hash of the remote identity. Equal objects must return equal hashes.
    fn identity_hash(&self) -> u64;

    /// Whether `other` refers to the same remote object.
    fn same_object(&self, other: &dyn RemoteObject) -> bool;

    /// Downcast support, so a transport can recover its own reference type.
    fn as_any(&self) -> &dyn Any;
}

/// Shared, cheaply clonable handle to a [`RemoteObject`].
#[derive(Clone)]
pub struct ElementRef(Arc<dyn RemoteObject>);

impl ElementRef {
    pub fn new<O: RemoteObject + 'static>(object: O) -> Self {
        Self(Arc::new(object))
    }

    /// Borrow the underlying object as a concrete transport type.
    pub fn downcast_ref<O: RemoteObject + 'static>(&self) -> Option<&O> {
        self.0.as_any().downcast_ref::<O>()
    }

    pub fn identity_hash(&self) -> u64 {
        self.0.identity_hash()
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.same_object(other.0.as_ref())
    }
}

impl Eq for ElementRef {}

impl Hash for ElementRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0.identity_hash());
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
