//! In-memory transport over a synthetic element tree

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use axbridge_domain::constants::{attributes, roles};
use axbridge_domain::{AxStatus, BoxedValue, ElementRef, Point, Rect, RemoteObject, WireValue};
use parking_lot::Mutex;

use crate::ports::{AccessibilityTransport, BatchPolicy, RequestKind, WireResult};

/// Index of a node inside a [`SyntheticTransport`].
pub type NodeId = usize;

/// Declarative description of a node and its subtree.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    attributes: BTreeMap<String, WireValue>,
    children: Vec<NodeSpec>,
    actions: Vec<String>,
    settable: BTreeSet<String>,
}

impl NodeSpec {
    pub fn new(role: &str) -> Self {
        Self::default().attribute(attributes::ROLE, role)
    }

    pub fn title(self, title: &str) -> Self {
        self.attribute(attributes::TITLE, title)
    }

    pub fn identifier(self, identifier: &str) -> Self {
        self.attribute(attributes::IDENTIFIER, identifier)
    }

    pub fn attribute(mut self, name: &str, value: impl Into<WireValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Position and size attributes from one rectangle.
    pub fn frame(self, frame: Rect) -> Self {
        self.attribute(attributes::POSITION, frame.origin).attribute(attributes::SIZE, frame.size)
    }

    pub fn settable(mut self, name: &str) -> Self {
        self.settable.insert(name.to_string());
        self
    }

    pub fn action(mut self, name: &str) -> Self {
        self.actions.push(name.to_string());
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

/// Remote reference handed out by [`SyntheticTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticObject {
    pub node: NodeId,
}

impl RemoteObject for SyntheticObject {
    fn identity_hash(&self) -> u64 {
        self.node as u64
    }

    fn same_object(&self, other: &dyn RemoteObject) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|o| o.node == self.node)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Default)]
struct Node {
    attributes: BTreeMap<String, WireValue>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    actions: Vec<String>,
    settable: BTreeSet<String>,
    failures: HashMap<String, AxStatus>,
    pid: i32,
    valid: bool,
    reads: usize,
}

#[derive(Debug, Default)]
struct State {
    nodes: Vec<Node>,
    applications: HashMap<i32, NodeId>,
    counts: HashMap<RequestKind, usize>,
    performed: Vec<(NodeId, String)>,
}

const SYSTEM_WIDE: NodeId = 0;

impl State {
    fn insert(&mut self, spec: NodeSpec, parent: Option<NodeId>, pid: i32) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            attributes: spec.attributes,
            parent,
            actions: spec.actions,
            settable: spec.settable,
            pid,
            valid: true,
            ..Node::default()
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        for child in spec.children {
            self.insert(child, Some(id), pid);
        }
        id
    }

    fn count(&mut self, kind: RequestKind) {
        *self.counts.entry(kind).or_default() += 1;
    }

    fn resolve(&self, element: &ElementRef) -> WireResult<NodeId> {
        let object =
            element.downcast_ref::<SyntheticObject>().ok_or(AxStatus::ILLEGAL_ARGUMENT)?;
        match self.nodes.get(object.node) {
            Some(node) if node.valid => Ok(object.node),
            _ => Err(AxStatus::INVALID_UI_ELEMENT),
        }
    }

    fn read(&self, id: NodeId, name: &str) -> WireResult<WireValue> {
        let node = &self.nodes[id];
        if let Some(status) = node.failures.get(name) {
            return Err(*status);
        }
        if let Some(value) = node.attributes.get(name) {
            return Ok(value.clone());
        }
        match name {
            attributes::CHILDREN => Ok(WireValue::List(
                node.children.iter().map(|&child| WireValue::Element(element_ref(child))).collect(),
            )),
            attributes::PARENT => {
                node.parent.map(|parent| WireValue::Element(element_ref(parent))).ok_or(AxStatus::NO_VALUE)
            }
            _ => Err(AxStatus::NO_VALUE),
        }
    }

    fn is_readable(&self, id: NodeId, name: &str) -> bool {
        let node = &self.nodes[id];
        node.attributes.contains_key(name)
            || name == attributes::CHILDREN
            || (name == attributes::PARENT && node.parent.is_some())
    }

    fn frame(&self, id: NodeId) -> Option<Rect> {
        let node = &self.nodes[id];
        let origin = match node.attributes.get(attributes::POSITION)? {
            WireValue::Boxed(boxed) => boxed.unbox_point()?,
            _ => return None,
        };
        let size = match node.attributes.get(attributes::SIZE)? {
            WireValue::Boxed(boxed) => boxed.unbox_size()?,
            _ => return None,
        };
        Some(Rect::new(origin, size))
    }

    /// Deepest node under `id` (inclusive) whose frame contains `point`.
    fn hit_test(&self, id: NodeId, point: Point) -> Option<NodeId> {
        let node = &self.nodes[id];
        if !node.valid {
            return None;
        }
        let deeper = node.children.iter().rev().find_map(|&child| self.hit_test(child, point));
        deeper.or_else(|| self.frame(id).filter(|frame| frame.contains(point)).map(|_| id))
    }
}

fn element_ref(node: NodeId) -> ElementRef {
    ElementRef::new(SyntheticObject { node })
}

/// [`AccessibilityTransport`] over an in-memory tree.
///
/// Node 0 is the system-wide root; applications added with
/// [`SyntheticTransport::add_application`] hang below it. Missing attributes
/// reply "no value". Every request is counted per [`RequestKind`], and every
/// attribute read is counted per node.
#[derive(Debug)]
pub struct SyntheticTransport {
    state: Mutex<State>,
}

impl Default for SyntheticTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticTransport {
    pub fn new() -> Self {
        let mut state = State::default();
        state.insert(NodeSpec::new(roles::SYSTEM_WIDE), None, 0);
        Self { state: Mutex::new(state) }
    }

    /// Add an application tree owned by `pid`.
    pub fn add_application(&self, pid: i32, spec: NodeSpec) -> NodeId {
        let mut state = self.state.lock();
        let id = state.insert(spec, Some(SYSTEM_WIDE), pid);
        state.applications.insert(pid, id);
        id
    }

    /// Append a subtree under an existing node.
    pub fn add_child(&self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let mut state = self.state.lock();
        let pid = state.nodes[parent].pid;
        state.insert(spec, Some(parent), pid)
    }

    pub fn element_ref(&self, node: NodeId) -> ElementRef {
        element_ref(node)
    }

    pub fn system_wide_node(&self) -> NodeId {
        SYSTEM_WIDE
    }

    /// First node (in creation order) with this `AXIdentifier`.
    pub fn find_node(&self, identifier: &str) -> Option<NodeId> {
        self.find_by_attribute(attributes::IDENTIFIER, identifier)
    }

    /// First node (in creation order) with this `AXRole`.
    pub fn find_by_role(&self, role: &str) -> Option<NodeId> {
        self.find_by_attribute(attributes::ROLE, role)
    }

    fn find_by_attribute(&self, name: &str, expected: &str) -> Option<NodeId> {
        let state = self.state.lock();
        state
            .nodes
            .iter()
            .position(|node| node.attributes.get(name).and_then(WireValue::as_str) == Some(expected))
    }

    /// Make the node stale: every later request on it fails with
    /// `INVALID_UI_ELEMENT`.
    pub fn invalidate(&self, node: NodeId) {
        self.state.lock().nodes[node].valid = false;
    }

    /// Make reads of one attribute fail with `status`.
    pub fn fail_attribute(&self, node: NodeId, name: &str, status: AxStatus) {
        self.state.lock().nodes[node].failures.insert(name.to_string(), status);
    }

    /// Change an attribute behind the client's back.
    pub fn set_node_attribute(&self, node: NodeId, name: &str, value: impl Into<WireValue>) {
        self.state.lock().nodes[node].attributes.insert(name.to_string(), value.into());
    }

    pub fn node_attribute(&self, node: NodeId, name: &str) -> Option<WireValue> {
        self.state.lock().nodes[node].attributes.get(name).cloned()
    }

    pub fn request_count(&self, kind: RequestKind) -> usize {
        self.state.lock().counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_requests(&self) -> usize {
        self.state.lock().counts.values().sum()
    }

    /// Attribute reads (single or batched) that targeted `node`.
    pub fn reads_of(&self, node: NodeId) -> usize {
        self.state.lock().nodes[node].reads
    }

    pub fn reset_counts(&self) {
        let mut state = self.state.lock();
        state.counts.clear();
        for node in &mut state.nodes {
            node.reads = 0;
        }
    }

    /// Actions performed so far, in order.
    pub fn performed_actions(&self) -> Vec<(NodeId, String)> {
        self.state.lock().performed.clone()
    }
}

impl AccessibilityTransport for SyntheticTransport {
    fn create_system_wide(&self) -> WireResult<ElementRef> {
        self.state.lock().count(RequestKind::CreateSystemWide);
        Ok(element_ref(SYSTEM_WIDE))
    }

    fn create_application(&self, pid: i32) -> WireResult<ElementRef> {
        let mut state = self.state.lock();
        state.count(RequestKind::CreateApplication);
        if let Some(&id) = state.applications.get(&pid) {
            return Ok(element_ref(id));
        }
        // Like the OS, hand out a reference that only fails once used.
        let id = state.insert(NodeSpec::default(), None, pid);
        state.nodes[id].valid = false;
        state.applications.insert(pid, id);
        Ok(element_ref(id))
    }

    fn copy_element_at_position(
        &self,
        root: &ElementRef,
        x: f32,
        y: f32,
    ) -> WireResult<Option<ElementRef>> {
        let mut state = self.state.lock();
        state.count(RequestKind::CopyElementAtPosition);
        let root = state.resolve(root)?;
        let point = Point::new(f64::from(x), f64::from(y));
        Ok(state.hit_test(root, point).map(element_ref))
    }

    fn copy_attribute_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        let mut state = self.state.lock();
        state.count(RequestKind::CopyAttributeNames);
        let id = state.resolve(element)?;
        let node = &state.nodes[id];
        let mut names: BTreeSet<String> = node.attributes.keys().cloned().collect();
        names.insert(attributes::CHILDREN.to_string());
        if node.parent.is_some() {
            names.insert(attributes::PARENT.to_string());
        }
        Ok(names.into_iter().collect())
    }

    fn copy_attribute_value(&self, element: &ElementRef, attribute: &str) -> WireResult<WireValue> {
        let mut state = self.state.lock();
        state.count(RequestKind::CopyAttributeValue);
        let id = state.resolve(element)?;
        state.nodes[id].reads += 1;
        state.read(id, attribute)
    }

    fn copy_multiple_attribute_values(
        &self,
        element: &ElementRef,
        attributes: &[&str],
        policy: BatchPolicy,
    ) -> WireResult<Vec<WireValue>> {
        let mut state = self.state.lock();
        state.count(RequestKind::CopyMultipleAttributeValues);
        let id = state.resolve(element)?;
        state.nodes[id].reads += 1;
        attributes
            .iter()
            .map(|name| match state.read(id, name) {
                Ok(value) => Ok(value),
                Err(AxStatus::NO_VALUE) => Ok(WireValue::Boxed(BoxedValue::Error(AxStatus::NO_VALUE))),
                Err(status) => match policy {
                    BatchPolicy::StopOnError => Err(status),
                    BatchPolicy::Continue => Ok(WireValue::Boxed(BoxedValue::Error(status))),
                },
            })
            .collect()
    }

    fn set_attribute_value(
        &self,
        element: &ElementRef,
        attribute: &str,
        value: &WireValue,
    ) -> WireResult<()> {
        let mut state = self.state.lock();
        state.count(RequestKind::SetAttributeValue);
        let id = state.resolve(element)?;
        let node = &mut state.nodes[id];
        if let Some(status) = node.failures.get(attribute) {
            return Err(*status);
        }
        if !node.settable.contains(attribute) {
            return Err(AxStatus::ATTRIBUTE_UNSUPPORTED);
        }
        node.attributes.insert(attribute.to_string(), value.clone());
        Ok(())
    }

    fn is_attribute_settable(&self, element: &ElementRef, attribute: &str) -> WireResult<bool> {
        let mut state = self.state.lock();
        state.count(RequestKind::IsAttributeSettable);
        let id = state.resolve(element)?;
        if state.nodes[id].settable.contains(attribute) {
            Ok(true)
        } else if state.is_readable(id, attribute) {
            Ok(false)
        } else {
            Err(AxStatus::ATTRIBUTE_UNSUPPORTED)
        }
    }

    fn copy_action_names(&self, element: &ElementRef) -> WireResult<Vec<String>> {
        let mut state = self.state.lock();
        state.count(RequestKind::CopyActionNames);
        let id = state.resolve(element)?;
        Ok(state.nodes[id].actions.clone())
    }

    fn perform_action(&self, element: &ElementRef, action: &str) -> WireResult<()> {
        let mut state = self.state.lock();
        state.count(RequestKind::PerformAction);
        let id = state.resolve(element)?;
        if !state.nodes[id].actions.iter().any(|a| a == action) {
            return Err(AxStatus::ACTION_UNSUPPORTED);
        }
        state.performed.push((id, action.to_string()));
        Ok(())
    }

    fn pid(&self, element: &ElementRef) -> WireResult<i32> {
        let mut state = self.state.lock();
        state.count(RequestKind::GetPid);
        let id = state.resolve(element)?;
        Ok(state.nodes[id].pid)
    }
}

#[cfg(test)]
mod tests {
    use axbridge_domain::Size;

    use super::*;

    #[test]
    fn test_identity_survives_separate_refs() {
        let transport = SyntheticTransport::new();
        let app = transport.add_application(1, NodeSpec::new("AXApplication"));
        assert_eq!(transport.element_ref(app), transport.element_ref(app));
        assert_ne!(transport.element_ref(app), transport.element_ref(SYSTEM_WIDE));
    }

    #[test]
    fn test_stop_on_error_fails_whole_batch() {
        let transport = SyntheticTransport::new();
        let app = transport.add_application(1, NodeSpec::new("AXApplication"));
        transport.fail_attribute(app, "AXTitle", AxStatus::ATTRIBUTE_UNSUPPORTED);
        let element = transport.element_ref(app);

        let stop = transport.copy_multiple_attribute_values(
            &element,
            &["AXRole", "AXTitle"],
            BatchPolicy::StopOnError,
        );
        assert_eq!(stop, Err(AxStatus::ATTRIBUTE_UNSUPPORTED));

        let cont = transport
            .copy_multiple_attribute_values(&element, &["AXRole", "AXTitle"], BatchPolicy::Continue)
            .unwrap();
        assert_eq!(cont[0], WireValue::from("AXApplication"));
        assert!(cont[1].is_absent_marker());
    }

    #[test]
    fn test_hit_test_prefers_deepest_node() {
        let transport = SyntheticTransport::new();
        transport.add_application(
            1,
            NodeSpec::new("AXWindow")
                .frame(Rect::new(Point::ZERO, Size::new(100.0, 100.0)))
                .child(
                    NodeSpec::new("AXButton")
                        .identifier("inner")
                        .frame(Rect::new(Point::new(10.0, 10.0), Size::new(20.0, 20.0))),
                ),
        );
        let root = transport.element_ref(SYSTEM_WIDE);
        let inner = transport.find_node("inner").unwrap();

        let hit = transport.copy_element_at_position(&root, 15.0, 15.0).unwrap();
        assert_eq!(hit, Some(transport.element_ref(inner)));
        assert_eq!(transport.copy_element_at_position(&root, 500.0, 500.0).unwrap(), None);
    }

    #[test]
    fn test_unknown_pid_fails_on_use() {
        let transport = SyntheticTransport::new();
        let ghost = transport.create_application(999).unwrap();
        assert_eq!(transport.copy_attribute_value(&ghost, "AXRole"), Err(AxStatus::INVALID_UI_ELEMENT));
    }
}
