//! Port interfaces for the remote accessibility service
//!
//! These traits define the boundary between the typed client layer and the
//! platform code that actually talks to the OS. Every method is a single,
//! synchronous, blocking round trip; implementations report failures as the
//! raw [`AxStatus`] and leave the mapping into `AxError` to the core.

use axbridge_domain::{impl_name_conversions, AxStatus, ElementRef, WireValue};

/// Result of one remote request, before status mapping.
pub type WireResult<T> = Result<T, AxStatus>;

/// How a multi-attribute read treats a name it cannot resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Abort the whole batch on the first failing name.
    #[default]
    StopOnError,
    /// Report per-slot failures inside the reply.
    Continue,
}

/// Kind of remote request, for metrics and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    CreateSystemWide,
    CreateApplication,
    CopyElementAtPosition,
    CopyAttributeNames,
    CopyAttributeValue,
    CopyMultipleAttributeValues,
    SetAttributeValue,
    IsAttributeSettable,
    CopyActionNames,
    PerformAction,
    GetPid,
}

impl_name_conversions!(RequestKind {
    CreateSystemWide => "create_system_wide",
    CreateApplication => "create_application",
    CopyElementAtPosition => "copy_element_at_position",
    CopyAttributeNames => "copy_attribute_names",
    CopyAttributeValue => "copy_attribute_value",
    CopyMultipleAttributeValues => "copy_multiple_attribute_values",
    SetAttributeValue => "set_attribute_value",
    IsAttributeSettable => "is_attribute_settable",
    CopyActionNames => "copy_action_names",
    PerformAction => "perform_action",
    GetPid => "get_pid",
});

impl RequestKind {
    pub const ALL: [Self; 11] = [
        Self::CreateSystemWide,
        Self::CreateApplication,
        Self::CopyElementAtPosition,
        Self::CopyAttributeNames,
        Self::CopyAttributeValue,
        Self::CopyMultipleAttributeValues,
        Self::SetAttributeValue,
        Self::IsAttributeSettable,
        Self::CopyActionNames,
        Self::PerformAction,
        Self::GetPid,
    ];
}

/// The remote wire protocol.
///
/// Implementations must be safe to call from several threads if the
/// underlying OS call is reentrant; the core holds no locks around them.
pub trait AccessibilityTransport: Send + Sync {
    /// Root of the system-wide tree.
    fn create_system_wide(&self) -> WireResult<ElementRef>;

    /// Root of one application's tree.
    fn create_application(&self, pid: i32) -> WireResult<ElementRef>;

    /// Topmost element at a screen position, searching from `root`.
    /// `Ok(None)` means the call succeeded but nothing is there.
    fn copy_element_at_position(
        &self,
        root: &ElementRef,
        x: f32,
        y: f32,
    ) -> WireResult<Option<ElementRef>>;

    fn copy_attribute_names(&self, element: &ElementRef) -> WireResult<Vec<String>>;

    /// Read one attribute. A successful reply without payload is
    /// [`WireValue::Null`].
    fn copy_attribute_value(&self, element: &ElementRef, attribute: &str) -> WireResult<WireValue>;

    /// Read several attributes in one round trip. On success the reply is
    /// index-aligned with `attributes`; absent slots carry an absence marker.
    fn copy_multiple_attribute_values(
        &self,
        element: &ElementRef,
        attributes: &[&str],
        policy: BatchPolicy,
    ) -> WireResult<Vec<WireValue>>;

    fn set_attribute_value(
        &self,
        element: &ElementRef,
        attribute: &str,
        value: &WireValue,
    ) -> WireResult<()>;

    fn is_attribute_settable(&self, element: &ElementRef, attribute: &str) -> WireResult<bool>;

    fn copy_action_names(&self, element: &ElementRef) -> WireResult<Vec<String>>;

    fn perform_action(&self, element: &ElementRef, action: &str) -> WireResult<()>;

    /// Process that owns the element.
    fn pid(&self, element: &ElementRef) -> WireResult<i32>;
}

/// Process-wide accessibility trust state.
pub trait PermissionGate: Send + Sync {
    /// Last known trust state. Cheap; implementations may cache.
    fn is_granted(&self) -> bool;

    /// Ask the OS again, optionally showing the system prompt.
    fn request(&self, prompt: bool) -> bool;
}

/// Maps application identifiers to running processes.
pub trait ApplicationResolver: Send + Sync {
    /// Process id of a running instance with this bundle identifier.
    fn pid_for_bundle_id(&self, bundle_id: &str) -> Option<i32>;

    /// Process id of the frontmost application.
    fn frontmost_pid(&self) -> Option<i32>;

    /// Process ids of regular (dock-visible) applications.
    fn regular_application_pids(&self) -> Vec<i32>;
}

/// Gate that always reports the same state.
///
/// Useful for tools that checked trust themselves before building a session.
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

impl PermissionGate for StaticGate {
    fn is_granted(&self) -> bool {
        self.0
    }

    fn request(&self, _prompt: bool) -> bool {
        self.0
    }
}

/// Resolver that knows no applications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoApplications;

impl ApplicationResolver for NoApplications {
    fn pid_for_bundle_id(&self, _bundle_id: &str) -> Option<i32> {
        None
    }

    fn frontmost_pid(&self) -> Option<i32> {
        None
    }

    fn regular_application_pids(&self) -> Vec<i32> {
        Vec::new()
    }
}
