//! Integration tests for session factories and the permission gate

mod support;

use std::collections::HashSet;
use std::sync::Arc;

use axbridge_core::testing::{StaticResolver, SwitchGate, SyntheticTransport};
use axbridge_core::{keys, Element, RequestKind, Session};
use axbridge_domain::{AxError, Point};
use support::{dialog_app, Fixture, APP_PID};

fn session_with_resolver(fx: &Fixture, resolver: StaticResolver) -> Arc<Session> {
    Session::builder(fx.transport.clone(), fx.gate.clone()).with_resolver(Arc::new(resolver)).build()
}

#[test]
fn test_application_by_pid_and_bundle_id() {
    let fx = Fixture::new(dialog_app());
    let session = session_with_resolver(
        &fx,
        StaticResolver::default().with_bundle("com.example.demo", APP_PID).with_frontmost(APP_PID),
    );

    let by_pid = session.application(APP_PID).unwrap();
    let by_bundle = session.application_by_bundle_id("com.example.demo").unwrap();
    assert_eq!(by_pid, by_bundle);
    assert_eq!(by_pid, fx.root());
    assert_eq!(by_pid.title().as_deref(), Some("Demo"));

    assert_eq!(session.frontmost_application(), Ok(Some(fx.root())));
    assert_eq!(session.running_applications(), Ok(vec![fx.root()]));
}

#[test]
fn test_no_frontmost_application() {
    let fx = Fixture::new(dialog_app());
    let session = session_with_resolver(&fx, StaticResolver::default());

    assert_eq!(session.frontmost_application(), Ok(None));
    assert_eq!(session.running_applications(), Ok(Vec::new()));
}

#[test]
fn test_dead_pid_fails_on_first_read() {
    let fx = Fixture::new(dialog_app());

    let ghost = fx.session.application(1).unwrap();
    assert_eq!(ghost.get(&keys::ROLE), Err(AxError::InvalidReference));
    assert_eq!(ghost.role(), None);
}

#[test]
fn test_system_wide_and_hit_testing() {
    let fx = Fixture::new(dialog_app());

    let system = fx.session.system_wide().unwrap();
    assert_eq!(system.role().as_deref(), Some("AXSystemWide"));
    assert_eq!(system.children(), vec![fx.root()]);

    let hit = fx.session.element_at(Point::new(310.0, 360.0), None).unwrap();
    assert_eq!(hit.identifier().as_deref(), Some("ok"));

    let window = fx.element(fx.node("main-window"));
    let hit = fx.session.element_at(Point::new(150.0, 150.0), Some(&window)).unwrap();
    assert_eq!(hit, window);

    let miss = fx.session.element_at(Point::new(5000.0, 5000.0), None).unwrap_err();
    assert!(matches!(miss, AxError::ElementNotFound { .. }));
}

/// Verifies that handles reached through different paths collapse into one
/// entry of a hash set.
#[test]
fn test_identity_across_paths() {
    let fx = Fixture::new(dialog_app());
    let ok_by_search = fx.root().find_button("OK").unwrap();
    let ok_by_children = fx.element(fx.node("main-window")).children().remove(0);
    let ok_by_hit = fx.session.element_at(Point::new(310.0, 360.0), None).unwrap();

    let set: HashSet<Element> = [ok_by_search, ok_by_children, ok_by_hit].into_iter().collect();
    assert_eq!(set.len(), 1);
}

/// Verifies fail-fast behaviour when the process is not trusted.
///
/// # Test Steps
/// 1. Revoke trust on a live session
/// 2. Verify every operation reports `AccessibilityDisabled`
/// 3. Verify no remote request was issued
/// 4. Restore trust and verify reads work again
#[test]
fn test_revoked_permission_fails_fast() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));
    fx.gate.set(false);
    fx.transport.reset_counts();

    assert_eq!(ok.get(&keys::ROLE), Err(AxError::AccessibilityDisabled));
    assert_eq!(ok.press(), Err(AxError::AccessibilityDisabled));
    assert_eq!(ok.set_string("AXValue", "x"), Err(AxError::AccessibilityDisabled));
    assert_eq!(ok.attribute_names(), Err(AxError::AccessibilityDisabled));
    assert_eq!(ok.pid(), Err(AxError::AccessibilityDisabled));
    assert_eq!(fx.session.system_wide(), Err(AxError::AccessibilityDisabled));
    assert_eq!(ok.role(), None);
    assert_eq!(fx.transport.total_requests(), 0);

    fx.gate.set(true);
    assert_eq!(ok.role().as_deref(), Some("AXButton"));
    assert_eq!(fx.transport.request_count(RequestKind::CopyAttributeValue), 1);
}

#[test]
fn test_request_permission_goes_through_gate() {
    let transport = Arc::new(SyntheticTransport::new());
    let gate = Arc::new(SwitchGate::new(false));
    let session = Session::builder(transport, gate.clone()).build();

    assert!(!session.request_permission(true));
    gate.set(true);
    assert!(session.request_permission(false));
    assert!(session.is_granted());
    assert_eq!(gate.request_count(), 2);
}

#[test]
fn test_handles_are_shareable_across_threads() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ok = ok.clone();
            std::thread::spawn(move || ok.title())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("OK"));
    }
}
