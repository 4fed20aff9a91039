//! Shared fixtures for `axbridge-core` integration tests.
//!
//! Each fixture builds a small synthetic application tree and a session over
//! it, so tests can focus on behaviour instead of wiring.

#![allow(dead_code)]

use std::sync::Arc;

use axbridge_core::testing::{NodeId, NodeSpec, SwitchGate, SyntheticTransport};
use axbridge_core::{Element, Session};
use axbridge_domain::{Point, Rect, Size};

pub const APP_PID: i32 = 4242;

pub struct Fixture {
    pub transport: Arc<SyntheticTransport>,
    pub gate: Arc<SwitchGate>,
    pub session: Arc<Session>,
    pub app: NodeId,
}

impl Fixture {
    pub fn new(app: NodeSpec) -> Self {
        let transport = Arc::new(SyntheticTransport::new());
        let app = transport.add_application(APP_PID, app);
        let gate = Arc::new(SwitchGate::new(true));
        let session = Session::builder(transport.clone(), gate.clone()).build();
        Self { transport, gate, session, app }
    }

    pub fn root(&self) -> Element {
        self.element(self.app)
    }

    pub fn element(&self, node: NodeId) -> Element {
        self.session.wrap(self.transport.element_ref(node))
    }

    pub fn node(&self, identifier: &str) -> NodeId {
        self.transport.find_node(identifier).expect("fixture node exists")
    }
}

/// Application → window → {OK button, Cancel button, text field}.
pub fn dialog_app() -> NodeSpec {
    NodeSpec::new("AXApplication").title("Demo").child(
        NodeSpec::new("AXWindow")
            .title("Confirm")
            .identifier("main-window")
            .frame(Rect::new(Point::new(100.0, 100.0), Size::new(400.0, 300.0)))
            .settable("AXPosition")
            .settable("AXSize")
            .action("AXRaise")
            .child(
                NodeSpec::new("AXButton")
                    .title("OK")
                    .identifier("ok")
                    .attribute("AXEnabled", true)
                    .frame(Rect::new(Point::new(300.0, 350.0), Size::new(80.0, 30.0)))
                    .action("AXPress"),
            )
            .child(
                NodeSpec::new("AXButton")
                    .title("Cancel")
                    .identifier("cancel")
                    .attribute("AXEnabled", false)
                    .action("AXPress"),
            )
            .child(
                NodeSpec::new("AXTextField")
                    .identifier("name")
                    .attribute("AXValue", "")
                    .attribute("AXFocused", false)
                    .settable("AXValue")
                    .settable("AXFocused"),
            ),
    )
}

/// A chain of groups `depth` levels below the application, ending in a
/// button with identifier `deep`.
pub fn deep_chain(depth: usize) -> NodeSpec {
    let mut node = NodeSpec::new("AXButton").identifier("deep");
    for level in (1..depth).rev() {
        node = NodeSpec::new("AXGroup").identifier(&format!("group-{level}")).child(node);
    }
    NodeSpec::new("AXApplication").child(node)
}
