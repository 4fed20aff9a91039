//! Integration tests for batched attribute reads

mod support;

use axbridge_core::{keys, AttributeKey, BatchRequest, RequestKind};
use axbridge_domain::{AxStatus, Point, WireValue};
use support::{dialog_app, Fixture};

/// Verifies the canonical batch: three typed keys, one of them absent, read
/// in a single round trip.
///
/// # Test Steps
/// 1. Read (role, identifier, title) from a button with no identifier
/// 2. Verify the absent slot is `None` and the others are decoded
/// 3. Verify exactly one remote request was made
#[test]
fn test_typed_batch_with_absent_slot() {
    let fx = Fixture::new(dialog_app());
    let node = fx.node("ok");
    let ok = fx.element(node);
    fx.transport.set_node_attribute(node, "AXIdentifier", WireValue::Null);
    fx.transport.reset_counts();

    let (role, identifier, title) = ok.attributes((keys::ROLE, keys::IDENTIFIER, keys::TITLE));

    assert_eq!(role.as_deref(), Some("AXButton"));
    assert_eq!(identifier, None);
    assert_eq!(title.as_deref(), Some("OK"));
    assert_eq!(fx.transport.total_requests(), 1);
    assert_eq!(fx.transport.request_count(RequestKind::CopyMultipleAttributeValues), 1);
}

#[test]
fn test_unresolvable_name_blanks_every_slot() {
    let fx = Fixture::new(dialog_app());
    let node = fx.node("ok");
    let ok = fx.element(node);
    fx.transport.fail_attribute(node, "AXTitle", AxStatus::ATTRIBUTE_UNSUPPORTED);

    let (role, title, enabled) = ok.attributes((keys::ROLE, keys::TITLE, keys::ENABLED));
    assert_eq!((role, title, enabled), (None, None, None));
}

#[test]
fn test_stale_handle_yields_all_absent() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));
    fx.transport.invalidate(fx.node("ok"));

    let response = ok.fetch_batch(&BatchRequest::new().with(&keys::ROLE).with(&keys::TITLE));
    assert_eq!(response.len(), 2);
    assert_eq!(response.present_count(), 0);
}

#[test]
fn test_decode_failure_is_per_slot() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));
    let title_as_bool: AttributeKey<bool> = AttributeKey::new("AXTitle");

    let (role, title) = ok.attributes((keys::ROLE, title_as_bool));
    assert_eq!(role.as_deref(), Some("AXButton"));
    assert_eq!(title, None);
}

#[test]
fn test_empty_batch_makes_no_request() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));
    fx.transport.reset_counts();

    ok.attributes(());
    let response = ok.fetch_batch(&BatchRequest::new());

    assert!(response.is_empty());
    assert_eq!(fx.transport.total_requests(), 0);
}

/// Verifies the runtime-built form: slots stay index-aligned with the
/// request and decode on demand.
#[test]
fn test_dynamic_batch() {
    let fx = Fixture::new(dialog_app());
    let window = fx.element(fx.node("main-window"));

    let mut request = BatchRequest::new();
    let title = request.push(&keys::TITLE);
    let position = request.push(&keys::POSITION);
    let missing = request.push_name("AXSubrole");
    let children = request.push(&keys::CHILDREN);

    let response = window.fetch_batch(&request);
    assert_eq!(response.len(), 4);
    assert_eq!(response.decode_as(title, &keys::TITLE).as_deref(), Some("Confirm"));
    assert_eq!(response.decode_as(position, &keys::POSITION), Some(Point::new(100.0, 100.0)));
    assert_eq!(response.get(missing), None);
    assert_eq!(response.decode_as(children, &keys::CHILDREN).map(|c| c.len()), Some(3));
    assert_eq!(response.decode::<String>(position), None);
    assert_eq!(response.get(99), None);
}

#[test]
fn test_ungranted_batch_makes_no_request() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));
    fx.gate.set(false);
    fx.transport.reset_counts();

    let (role,) = ok.attributes((keys::ROLE,));
    assert_eq!(role, None);
    assert_eq!(fx.transport.total_requests(), 0);
}

#[test]
fn test_eight_key_batch() {
    let fx = Fixture::new(dialog_app());
    let ok = fx.element(fx.node("ok"));

    let (role, title, identifier, enabled, position, size, parent, children) = ok.attributes((
        keys::ROLE,
        keys::TITLE,
        keys::IDENTIFIER,
        keys::ENABLED,
        keys::POSITION,
        keys::SIZE,
        keys::PARENT,
        keys::CHILDREN,
    ));

    assert_eq!(role.as_deref(), Some("AXButton"));
    assert_eq!(title.as_deref(), Some("OK"));
    assert_eq!(identifier.as_deref(), Some("ok"));
    assert_eq!(enabled, Some(true));
    assert!(position.is_some() && size.is_some());
    assert_eq!(parent, Some(fx.element(fx.node("main-window"))));
    assert_eq!(children.map(|c| c.len()), Some(0));
}
