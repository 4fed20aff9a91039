//! Running application lookup through NSWorkspace

use axbridge_core::ApplicationResolver;
use objc2::rc::autoreleasepool;
use objc2_app_kit::{NSApplicationActivationPolicy, NSWorkspace};
use objc2_foundation::NSString;

/// [`ApplicationResolver`] over the shared `NSWorkspace`.
///
/// Needs no accessibility permission.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkspaceResolver;

impl WorkspaceResolver {
    pub fn new() -> Self {
        Self
    }
}

impl ApplicationResolver for WorkspaceResolver {
    fn pid_for_bundle_id(&self, bundle_id: &str) -> Option<i32> {
        autoreleasepool(|_| {
            let wanted = NSString::from_str(bundle_id);
            let workspace = NSWorkspace::sharedWorkspace();
            let pid = workspace
                .runningApplications()
                .iter()
                .find(|app| app.bundleIdentifier().is_some_and(|id| id.isEqualToString(&wanted)))
                .map(|app| app.processIdentifier());
            tracing::debug!(bundle_id, pid = ?pid, "Resolved bundle identifier");
            pid
        })
    }

    fn frontmost_pid(&self) -> Option<i32> {
        autoreleasepool(|_| {
            NSWorkspace::sharedWorkspace().frontmostApplication().map(|app| app.processIdentifier())
        })
    }

    fn regular_application_pids(&self) -> Vec<i32> {
        autoreleasepool(|_| {
            NSWorkspace::sharedWorkspace()
                .runningApplications()
                .iter()
                .filter(|app| app.activationPolicy() == NSApplicationActivationPolicy::Regular)
                .map(|app| app.processIdentifier())
                .collect()
        })
    }
}
