//! Transport decorator that records every remote call
//!
//! Wraps any [`AccessibilityTransport`], times each round trip, feeds
//! [`RemoteCallMetrics`] and opens a trace span per request.

use std::sync::Arc;
use std::time::Instant;

use axbridge_core::{AccessibilityTransport, BatchPolicy, RequestKind, WireResult};
use axbridge_domain::{ElementRef, WireValue};
use tracing::trace_span;

use super::metrics::RemoteCallMetrics;

/// Metrics-recording wrapper around a transport
pub struct InstrumentedTransport<T> {
    inner: T,
    metrics: Arc<RemoteCallMetrics>,
}

impl<T: AccessibilityTransport> InstrumentedTransport<T> {
    pub fn new(inner: T, metrics: Arc<RemoteCallMetrics>) -> Self {
        Self { inner, metrics }
    }

    pub fn metrics(&self) -> &Arc<RemoteCallMetrics> {
        &self.metrics
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    fn observe<R>(&self, kind: RequestKind, call: impl FnOnce(&T) -> WireResult<R>) -> WireResult<R> {
        let span = trace_span!("ax_request", kind = kind.as_str());
        let _entered = span.enter();

        let started = Instant::now();
        let result = call(&self.inner);
        let elapsed = started.elapsed();

        if let Err(status) = &result {
            tracing::trace!(kind = kind.as_str(), status = status.0, "remote call failed");
        }
        if let Err(e) = self.metrics.record_call(kind, elapsed, result.is_ok()) {
            tracing::warn!(error = %e, "Failed to record remote call metric");
        }
        result
    }
}

impl<T: AccessibilityTransport> AccessibilityTransport for InstrumentedTransport<T> {
    fn create_system_wide(&self) -> WireResult<ElementRef> {
        self.observe(RequestKind::CreateSystemWide, |t| t.create_system_wide())
    }

    fn create_application(&self, pid: i32) -> WireResult<ElementRef> {
        self.observe(RequestKind::CreateApplication, |t| t.create_application(pid))
    }

    fn copy_element_at_position(
        &self,
        root: &ElementRef,
        x: f32,
        y: f32,
    ) -> WireResult<Option<ElementRef>> {
        self.observe(RequestKind::CopyElementAtPosition, |t| t.copy_element_at_position(root, x, y))
    }

    fn copy_attribute_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        self.observe(RequestKind::CopyAttributeNames, |t| t.copy_attribute_names(element))
    }

    fn copy_attribute_value(&self, element: &ElementRef, attribute: &str) -> WireResult<WireValue> {
        self.observe(RequestKind::CopyAttributeValue, |t| t.copy_attribute_value(element, attribute))
    }

    fn copy_multiple_attribute_values(
        &self,
        element: &ElementRef,
        attributes: &[&str],
        policy: BatchPolicy,
    ) -> WireResult<Vec<WireValue>> {
        self.observe(RequestKind::CopyMultipleAttributeValues, |t| {
            t.copy_multiple_attribute_values(element, attributes, policy)
        })
    }

    fn set_attribute_value(
        &self,
        element: &ElementRef,
        attribute: &str,
        value: &WireValue,
    ) -> WireResult<()> {
        self.observe(RequestKind::SetAttributeValue, |t| {
            t.set_attribute_value(element, attribute, value)
        })
    }

    fn is_attribute_settable(&self, element: &ElementRef, attribute: &str) -> WireResult<bool> {
        self.observe(RequestKind::IsAttributeSettable, |t| t.is_attribute_settable(element, attribute))
    }

    fn copy_action_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        self.observe(RequestKind::CopyActionNames, |t| t.copy_action_names(element))
    }

    fn perform_action(&self, element: &ElementRef, action: &str) -> WireResult<()> {
        self.observe(RequestKind::PerformAction, |t| t.perform_action(element, action))
    }

    fn pid(&self, element: &ElementRef) -> WireResult<i32> {
        self.observe(RequestKind::GetPid, |t| t.pid(element))
    }
}

#[cfg(test)]
mod tests {
    use axbridge_core::testing::{NodeSpec, SyntheticTransport};
    use axbridge_core::{Session, StaticGate};

    use super::*;

    #[test]
    fn test_counts_calls_through_session() {
        let synthetic = SyntheticTransport::new();
        synthetic.add_application(7, NodeSpec::new("AXApplication").title("Notes"));
        let metrics = Arc::new(RemoteCallMetrics::new());
        let transport = InstrumentedTransport::new(synthetic, Arc::clone(&metrics));
        let session = Session::builder(Arc::new(transport), Arc::new(StaticGate(true))).build();

        let app = session.application(7).unwrap();
        assert_eq!(app.title().as_deref(), Some("Notes"));
        assert!(app.perform_action("AXNoSuchAction").is_err());

        assert_eq!(metrics.calls_of(RequestKind::CreateApplication), 1);
        assert_eq!(metrics.calls_of(RequestKind::CopyAttributeValue), 1);
        assert_eq!(metrics.calls_of(RequestKind::PerformAction), 1);
        assert_eq!(metrics.failed_calls(), 1);
    }
}
