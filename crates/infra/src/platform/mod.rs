//! Platform-specific implementations
//!
//! # Platform Support
//!
//! - **macOS**: Full support via the Accessibility API and NSWorkspace
//! - **Other platforms**: No transport; session bootstrap returns
//!   `InfraError::Platform`

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::{AxPermissionGate, AxTransport, WorkspaceResolver};
