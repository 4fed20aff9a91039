//! Integration tests for metrics and the async executor over a synthetic
//! accessibility tree.

use std::sync::Arc;
use std::time::Duration;

use axbridge_core::keys;
use axbridge_core::testing::{NodeSpec, SwitchGate, SyntheticTransport};
use axbridge_core::{PermissionGate, RequestKind, Session};
use axbridge_domain::{AxConfig, AxError, Point, Rect, Size};
use axbridge_infra::bootstrap::assemble;
use axbridge_infra::observability::{InstrumentedTransport, RemoteCallMetrics};
use axbridge_infra::BlockingExecutor;

const PID: i32 = 501;

fn app() -> NodeSpec {
    NodeSpec::new("AXApplication").title("Preview").child(
        NodeSpec::new("AXWindow")
            .title("Document")
            .identifier("doc")
            .frame(Rect::new(Point::new(0.0, 0.0), Size::new(640.0, 480.0)))
            .child(NodeSpec::new("AXButton").title("Share").identifier("share").action("AXPress")),
    )
}

fn instrumented(gate: Arc<SwitchGate>) -> (Arc<Session>, Arc<RemoteCallMetrics>) {
    let synthetic = SyntheticTransport::new();
    synthetic.add_application(PID, app());
    let metrics = Arc::new(RemoteCallMetrics::new());
    let transport = InstrumentedTransport::new(synthetic, Arc::clone(&metrics));
    let session = assemble(
        &AxConfig::default(),
        Arc::new(transport),
        gate as Arc<dyn PermissionGate>,
        Arc::new(axbridge_core::NoApplications),
    );
    (session, metrics)
}

/// Batched reads are one round trip in the metrics.
///
/// # Test Steps
/// 1. Read three attributes of a window through the tuple batch form
/// 2. Check exactly one multi-value request was recorded
#[test]
fn test_batch_is_one_recorded_round_trip() {
    let (session, metrics) = instrumented(Arc::new(SwitchGate::new(true)));
    let app = session.application(PID).unwrap();
    let window = app.find_first_by_role("AXWindow").unwrap();
    metrics.reset();

    let (role, title, identifier) =
        window.attributes((keys::ROLE, keys::TITLE, keys::IDENTIFIER));

    assert_eq!(role.as_deref(), Some("AXWindow"));
    assert_eq!(title.as_deref(), Some("Document"));
    assert_eq!(identifier.as_deref(), Some("doc"));
    assert_eq!(metrics.calls_of(RequestKind::CopyMultipleAttributeValues), 1);
    assert_eq!(metrics.total_calls(), 1);
}

/// A closed gate makes no remote request at all.
///
/// # Test Steps
/// 1. Create an application handle while granted
/// 2. Revoke the gate and reset metrics
/// 3. Read, write and act; all fail with `AccessibilityDisabled`
/// 4. Check no call reached the transport
#[test]
fn test_denied_gate_records_no_calls() {
    let gate = Arc::new(SwitchGate::new(true));
    let (session, metrics) = instrumented(Arc::clone(&gate));
    let app = session.application(PID).unwrap();

    gate.set(false);
    metrics.reset();

    assert_eq!(app.get(&keys::TITLE).unwrap_err(), AxError::AccessibilityDisabled);
    assert_eq!(app.set_string("AXTitle", "x").unwrap_err(), AxError::AccessibilityDisabled);
    assert_eq!(app.press().unwrap_err(), AxError::AccessibilityDisabled);
    assert_eq!(metrics.total_calls(), 0);
}

/// Failed remote calls are counted as failures.
#[test]
fn test_failed_calls_counted() {
    let (session, metrics) = instrumented(Arc::new(SwitchGate::new(true)));
    let app = session.application(PID).unwrap();
    metrics.reset();

    assert_eq!(app.get(&keys::MENU_BAR).unwrap_err().kind(), "attribute_nil");
    assert_eq!(metrics.failed_calls(), 1);
    assert!(metrics.p50_latency_us().is_ok());
}

/// Blocking element calls run through the executor.
///
/// # Test Steps
/// 1. Move an element handle into a blocking closure
/// 2. Search and press from the blocking pool
/// 3. Check the value comes back to the async caller
#[tokio::test]
async fn test_executor_runs_element_calls() {
    let (session, metrics) = instrumented(Arc::new(SwitchGate::new(true)));
    let app = session.application(PID).unwrap();
    let executor = BlockingExecutor::new(Some(Duration::from_secs(5)));

    let pressed = executor
        .run(move || {
            let button = app.find_button("Share")?;
            button.press()?;
            button.identifier().ok_or_else(|| AxError::attribute_nil("AXIdentifier"))
        })
        .await
        .unwrap();

    assert_eq!(pressed, "share");
    assert_eq!(metrics.calls_of(RequestKind::PerformAction), 1);
}
