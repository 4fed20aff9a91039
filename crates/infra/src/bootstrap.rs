//! Session construction from configuration
//!
//! Wires the platform transport, permission gate and application resolver
//! into a [`Session`] and applies the configured search depth, messaging
//! timeout and start-up permission prompt.

use std::sync::Arc;

use axbridge_core::{AccessibilityTransport, ApplicationResolver, PermissionGate, Session};
use axbridge_domain::AxConfig;

use crate::errors::InfraResult;
use crate::observability::{InstrumentedTransport, RemoteCallMetrics};

/// Build a session over the given collaborators.
///
/// Platform independent; [`session`] and [`instrumented_session`] call it
/// with the macOS implementations.
pub fn assemble(
    config: &AxConfig,
    transport: Arc<dyn AccessibilityTransport>,
    gate: Arc<dyn PermissionGate>,
    resolver: Arc<dyn ApplicationResolver>,
) -> Arc<Session> {
    let session = Session::builder(transport, gate)
        .with_resolver(resolver)
        .with_search_config(&config.search)
        .build();

    if config.permission.prompt_on_start {
        let granted = session.request_permission(true);
        tracing::info!(granted, "Requested accessibility permission on start");
    }

    session
}

/// Session over the live accessibility API.
///
/// # Errors
/// Returns `InfraError::Platform` on platforms without the accessibility
/// API.
pub fn session(config: &AxConfig) -> InfraResult<Arc<Session>> {
    let (transport, gate, resolver) = platform::collaborators(config)?;
    Ok(assemble(config, Arc::new(transport), gate, resolver))
}

/// Like [`session`], with every remote call recorded in the returned
/// metrics.
///
/// # Errors
/// Returns `InfraError::Platform` on platforms without the accessibility
/// API.
pub fn instrumented_session(
    config: &AxConfig,
) -> InfraResult<(Arc<Session>, Arc<RemoteCallMetrics>)> {
    let (transport, gate, resolver) = platform::collaborators(config)?;
    let metrics = Arc::new(RemoteCallMetrics::new());
    let transport = InstrumentedTransport::new(transport, Arc::clone(&metrics));
    Ok((assemble(config, Arc::new(transport), gate, resolver), metrics))
}

#[cfg(target_os = "macos")]
mod platform {
    use std::sync::Arc;

    use axbridge_core::{ApplicationResolver, PermissionGate};
    use axbridge_domain::AxConfig;

    use crate::errors::InfraResult;
    use crate::platform::{AxPermissionGate, AxTransport, WorkspaceResolver};

    pub(super) fn collaborators(
        config: &AxConfig,
    ) -> InfraResult<(AxTransport, Arc<dyn PermissionGate>, Arc<dyn ApplicationResolver>)> {
        tracing::debug!(
            messaging_timeout_secs = ?config.transport.messaging_timeout_secs,
            cache_ttl_secs = config.permission.cache_ttl_secs,
            "Creating macOS accessibility session"
        );
        Ok((
            AxTransport::from_config(&config.transport),
            Arc::new(AxPermissionGate::from_config(&config.permission)),
            Arc::new(WorkspaceResolver::new()),
        ))
    }
}

#[cfg(not(target_os = "macos"))]
mod platform {
    use std::sync::Arc;

    use axbridge_core::{
        AccessibilityTransport, ApplicationResolver, BatchPolicy, PermissionGate, WireResult,
    };
    use axbridge_domain::{AxConfig, ElementRef, WireValue};

    use crate::errors::{InfraError, InfraResult};

    /// Never constructed; keeps the signature identical across platforms.
    pub(super) enum Unsupported {}

    impl AccessibilityTransport for Unsupported {
        fn create_system_wide(&self) -> WireResult<ElementRef> {
            match *self {}
        }

        fn create_application(&self, _pid: i32) -> WireResult<ElementRef> {
            match *self {}
        }

        fn copy_element_at_position(
            &self,
            _root: &ElementRef,
            _x: f32,
            _y: f32,
        ) -> WireResult<Option<ElementRef>> {
            match *self {}
        }

        fn copy_attribute_names(&self, _element: &ElementRef) -> WireResult<Vec<String>> {
            match *self {}
        }

        fn copy_attribute_value(&self, _element: &ElementRef, _attribute: &str) -> WireResult<WireValue> {
            match *self {}
        }

        fn copy_multiple_attribute_values(
            &self,
            _element: &ElementRef,
            _attributes: &[&str],
            _policy: BatchPolicy,
        ) -> WireResult<Vec<WireValue>> {
            match *self {}
        }

        fn set_attribute_value(
            &self,
            _element: &ElementRef,
            _attribute: &str,
            _value: &WireValue,
        ) -> WireResult<()> {
            match *self {}
        }

        fn is_attribute_settable(&self, _element: &ElementRef, _attribute: &str) -> WireResult<bool> {
            match *self {}
        }

        fn copy_action_names(&self, _element: &ElementRef) -> WireResult<Vec<String>> {
            match *self {}
        }

        fn perform_action(&self, _element: &ElementRef, _action: &str) -> WireResult<()> {
            match *self {}
        }

        fn pid(&self, _element: &ElementRef) -> WireResult<i32> {
            match *self {}
        }
    }

    pub(super) fn collaborators(
        _config: &AxConfig,
    ) -> InfraResult<(Unsupported, Arc<dyn PermissionGate>, Arc<dyn ApplicationResolver>)> {
        Err(InfraError::platform("The accessibility API is only available on macOS"))
    }
}
