//! Test doubles for the port traits
//!
//! Enabled with the `test-utils` feature so downstream crates can drive a
//! [`Session`](crate::Session) without a live accessibility service.

mod transport;

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub use transport::{NodeId, NodeSpec, SyntheticObject, SyntheticTransport};

use crate::ports::{ApplicationResolver, PermissionGate};

/// Gate whose state can be flipped while a session is live.
#[derive(Debug)]
pub struct SwitchGate {
    granted: AtomicBool,
    requests: AtomicUsize,
}

impl SwitchGate {
    pub fn new(granted: bool) -> Self {
        Self { granted: AtomicBool::new(granted), requests: AtomicUsize::new(0) }
    }

    pub fn set(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    /// How many times `request` was called.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl PermissionGate for SwitchGate {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request(&self, _prompt: bool) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.is_granted()
    }
}

/// Resolver backed by fixed tables.
#[derive(Debug, Clone, Default)]
pub struct StaticResolver {
    pub bundles: HashMap<String, i32>,
    pub frontmost: Option<i32>,
    pub regular: Vec<i32>,
}

impl StaticResolver {
    pub fn with_bundle(mut self, bundle_id: &str, pid: i32) -> Self {
        self.bundles.insert(bundle_id.to_string(), pid);
        self.regular.push(pid);
        self
    }

    pub fn with_frontmost(mut self, pid: i32) -> Self {
        self.frontmost = Some(pid);
        self
    }
}

impl ApplicationResolver for StaticResolver {
    fn pid_for_bundle_id(&self, bundle_id: &str) -> Option<i32> {
        self.bundles.get(bundle_id).copied()
    }

    fn frontmost_pid(&self) -> Option<i32> {
        self.frontmost
    }

    fn regular_application_pids(&self) -> Vec<i32> {
        self.regular.clone()
    }
}
