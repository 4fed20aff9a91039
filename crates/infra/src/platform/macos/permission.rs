//! Accessibility trust check with a TTL cache

use std::time::{Duration, Instant};

use axbridge_core::PermissionGate;
use axbridge_domain::constants::TRUSTED_CHECK_OPTION_PROMPT;
use axbridge_domain::PermissionConfig;
use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;
use parking_lot::RwLock;

use super::ffi::AXIsProcessTrustedWithOptions;

#[derive(Clone, Copy)]
struct CachedPermission {
    value: bool,
    checked_at: Instant,
}

/// [`PermissionGate`] backed by `AXIsProcessTrustedWithOptions`.
///
/// `is_granted` reuses the last answer until it is older than the TTL, so
/// that a user who flips the switch in System Settings is picked up without
/// hammering the OS on every call. `request` always asks again.
pub struct AxPermissionGate {
    ttl: Duration,
    cache: RwLock<Option<CachedPermission>>,
}

impl AxPermissionGate {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, cache: RwLock::new(None) }
    }

    pub fn from_config(config: &PermissionConfig) -> Self {
        Self::new(Duration::from_secs(config.cache_ttl_secs))
    }

    /// Forget the cached answer.
    pub fn invalidate(&self) {
        *self.cache.write() = None;
    }

    fn query(&self, prompt: bool) -> bool {
        let key = CFString::from_static_string(TRUSTED_CHECK_OPTION_PROMPT);
        let value = CFBoolean::from(prompt);
        let options = CFDictionary::from_CFType_pairs(&[(key.as_CFType(), value.as_CFType())]);

        // SAFETY: `options` is a valid CFDictionary alive for the call; the
        // function does not retain it.
        let trusted = unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) != 0 };

        *self.cache.write() = Some(CachedPermission { value: trusted, checked_at: Instant::now() });

        if trusted {
            tracing::info!("Accessibility permission granted");
        } else {
            tracing::warn!(prompt, "Accessibility permission not granted");
        }
        trusted
    }
}

impl std::fmt::Debug for AxPermissionGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AxPermissionGate").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl PermissionGate for AxPermissionGate {
    fn is_granted(&self) -> bool {
        if let Some(entry) = *self.cache.read() {
            if entry.checked_at.elapsed() < self.ttl {
                return entry.value;
            }
        }
        self.query(false)
    }

    fn request(&self, prompt: bool) -> bool {
        self.query(prompt)
    }
}
