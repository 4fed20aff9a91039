//! # axbridge Core
//!
//! Typed client layer over the accessibility object graph.
//!
//! This crate contains:
//! - Port traits for the remote service, the permission gate and the
//!   application resolver
//! - The session and element handles
//! - The typed marshaller (attribute keys, decoding, status mapping)
//! - Batched reads, bounded tree search and convenience accessors
//!
//! ## Architecture Principles
//! - Only depends on `axbridge-domain`
//! - No FFI or platform code; the OS is reached only through
//!   [`AccessibilityTransport`]
//! - Raw statuses are mapped to [`AxError`](axbridge_domain::AxError) once,
//!   here

mod accessors;
pub mod attribute;
pub mod batch;
pub mod element;
pub mod ports;
pub mod search;
pub mod session;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use attribute::{keys, AttributeKey, FromWire, IntoWire};
pub use batch::{BatchRequest, BatchResponse, KeySet};
pub use element::Element;
pub use ports::{
    AccessibilityTransport, ApplicationResolver, BatchPolicy, NoApplications, PermissionGate,
    RequestKind, StaticGate, WireResult,
};
pub use search::SearchOptions;
pub use session::{Session, SessionBuilder};
