//! Session: the entry point to the accessibility graph
//!
//! A [`Session`] owns the transport, the permission gate and the application
//! resolver. Every [`Element`] keeps the session alive through an `Arc`, so
//! handles stay usable for as long as anyone holds one.

use std::fmt;
use std::sync::Arc;

use axbridge_domain::{AxError, AxResult, AxStatus, ElementRef, Point, SearchConfig};
use tracing::{debug, warn};

use crate::element::Element;
use crate::ports::{
    AccessibilityTransport, ApplicationResolver, NoApplications, PermissionGate, RequestKind,
};
use crate::search::SearchOptions;

/// Shared context behind every element handle.
pub struct Session {
    transport: Arc<dyn AccessibilityTransport>,
    gate: Arc<dyn PermissionGate>,
    resolver: Arc<dyn ApplicationResolver>,
    search: SearchOptions,
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    transport: Arc<dyn AccessibilityTransport>,
    gate: Arc<dyn PermissionGate>,
    resolver: Arc<dyn ApplicationResolver>,
    search: SearchOptions,
}

impl SessionBuilder {
    /// Resolver used by the bundle-id and frontmost-application factories.
    pub fn with_resolver(mut self, resolver: Arc<dyn ApplicationResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_search_options(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    pub fn with_search_config(self, config: &SearchConfig) -> Self {
        self.with_search_options(SearchOptions::from(config))
    }

    pub fn build(self) -> Arc<Session> {
        Arc::new(Session {
            transport: self.transport,
            gate: self.gate,
            resolver: self.resolver,
            search: self.search,
        })
    }
}

impl Session {
    pub fn builder(
        transport: Arc<dyn AccessibilityTransport>,
        gate: Arc<dyn PermissionGate>,
    ) -> SessionBuilder {
        SessionBuilder {
            transport,
            gate,
            resolver: Arc::new(NoApplications),
            search: SearchOptions::default(),
        }
    }

    pub(crate) fn transport(&self) -> &dyn AccessibilityTransport {
        self.transport.as_ref()
    }

    pub fn search_options(&self) -> SearchOptions {
        self.search
    }

    /// Current trust state as reported by the gate.
    pub fn is_granted(&self) -> bool {
        self.gate.is_granted()
    }

    /// Ask the OS for trust again, optionally showing the system prompt.
    pub fn request_permission(&self, prompt: bool) -> bool {
        let granted = self.gate.request(prompt);
        debug!(prompt, granted, "accessibility permission requested");
        granted
    }

    /// Fail fast when the process is not trusted, before any remote call.
    pub(crate) fn ensure_granted(&self) -> AxResult<()> {
        if self.gate.is_granted() {
            Ok(())
        } else {
            warn!("accessibility permission not granted; refusing remote call");
            Err(AxError::AccessibilityDisabled)
        }
    }

    /// Wrap a raw reference into a handle bound to this session.
    pub fn wrap(self: &Arc<Self>, raw: ElementRef) -> Element {
        Element::new(raw, Arc::clone(self))
    }

    /// Root of the system-wide tree.
    pub fn system_wide(self: &Arc<Self>) -> AxResult<Element> {
        self.ensure_granted()?;
        let raw = self
            .transport
            .create_system_wide()
            .map_err(|status| remote_error(RequestKind::CreateSystemWide, status, None))?;
        Ok(self.wrap(raw))
    }

    /// Root of one application's tree.
    ///
    /// Creating the handle does not prove the process exists; the first read
    /// on a dead pid fails with `InvalidReference`.
    pub fn application(self: &Arc<Self>, pid: i32) -> AxResult<Element> {
        self.ensure_granted()?;
        let raw = self
            .transport
            .create_application(pid)
            .map_err(|status| remote_error(RequestKind::CreateApplication, status, None))?;
        Ok(self.wrap(raw))
    }

    /// Root of the running application with this bundle identifier.
    pub fn application_by_bundle_id(self: &Arc<Self>, bundle_id: &str) -> AxResult<Element> {
        self.ensure_granted()?;
        let pid = self
            .resolver
            .pid_for_bundle_id(bundle_id)
            .ok_or_else(|| AxError::application_not_found(bundle_id))?;
        self.application(pid)
    }

    /// Root of the frontmost application, if any.
    pub fn frontmost_application(self: &Arc<Self>) -> AxResult<Option<Element>> {
        self.ensure_granted()?;
        self.resolver.frontmost_pid().map(|pid| self.application(pid)).transpose()
    }

    /// Roots of all regular (dock-visible) applications.
    pub fn running_applications(self: &Arc<Self>) -> AxResult<Vec<Element>> {
        self.ensure_granted()?;
        self.resolver.regular_application_pids().into_iter().map(|pid| self.application(pid)).collect()
    }

    /// Topmost element at a screen position.
    ///
    /// Searches from `root` when given, otherwise from the system-wide root.
    #[allow(clippy::cast_possible_truncation)]
    pub fn element_at(self: &Arc<Self>, point: Point, root: Option<&Element>) -> AxResult<Element> {
        self.ensure_granted()?;
        let root = match root {
            Some(root) => root.clone(),
            None => self.system_wide()?,
        };
        let hit = self
            .transport
            .copy_element_at_position(root.raw(), point.x as f32, point.y as f32)
            .map_err(|status| remote_error(RequestKind::CopyElementAtPosition, status, None))?;
        hit.map(|raw| self.wrap(raw)).ok_or_else(|| {
            AxError::element_not_found(format!("no element at ({}, {})", point.x, point.y))
        })
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("search", &self.search).finish_non_exhaustive()
    }
}

/// Map a raw status once, at the boundary, and log it.
pub(crate) fn remote_error(kind: RequestKind, status: AxStatus, attribute: Option<&str>) -> AxError {
    let error = AxError::from_status(status, attribute);
    debug!(
        request = %kind,
        status = status.code(),
        attribute = attribute.unwrap_or(""),
        error_kind = error.kind(),
        "remote request failed"
    );
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StaticGate;
    use crate::testing::{StaticResolver, SyntheticTransport};

    #[test]
    fn test_ungranted_session_fails_fast() {
        let transport = Arc::new(SyntheticTransport::new());
        let session = Session::builder(transport.clone(), Arc::new(StaticGate(false))).build();

        assert_eq!(session.system_wide().unwrap_err(), AxError::AccessibilityDisabled);
        assert_eq!(session.application(42).unwrap_err(), AxError::AccessibilityDisabled);
        assert_eq!(transport.total_requests(), 0);
    }

    #[test]
    fn test_unknown_bundle_id() {
        let transport = Arc::new(SyntheticTransport::new());
        let session = Session::builder(transport, Arc::new(StaticGate(true)))
            .with_resolver(Arc::new(StaticResolver::default()))
            .build();

        let err = session.application_by_bundle_id("com.example.missing").unwrap_err();
        assert_eq!(err, AxError::application_not_found("com.example.missing"));
    }

    #[test]
    fn test_search_config_flows_into_options() {
        let transport = Arc::new(SyntheticTransport::new());
        let session = Session::builder(transport, Arc::new(StaticGate(true)))
            .with_search_config(&SearchConfig { max_depth: 3 })
            .build();
        assert_eq!(session.search_options().max_depth, 3);
    }
}
