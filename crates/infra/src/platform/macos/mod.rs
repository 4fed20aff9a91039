//! macOS accessibility platform adapters
//!
//! # Modules
//!
//! - [`transport`] - `AccessibilityTransport` over the AXUIElement API
//! - [`permission`] - Trust check with a TTL cache
//! - [`applications`] - NSWorkspace application lookup
//!
//! # Permission Requirements
//!
//! - **NSWorkspace**: No special permissions (bundle ID, PID)
//! - **Accessibility API**: Requires user approval in System Settings >
//!   Privacy & Security > Accessibility

mod element;
mod ffi;
mod value;

pub mod applications;
pub mod permission;
pub mod transport;

pub use applications::WorkspaceResolver;
pub use element::AxElementObject;
pub use permission::AxPermissionGate;
pub use transport::AxTransport;
