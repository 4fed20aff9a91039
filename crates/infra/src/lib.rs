//! # axbridge Infrastructure
//!
//! Implementations of the `axbridge-core` ports plus the ambient services
//! around them.
//!
//! This crate contains:
//! - The macOS accessibility transport, permission gate and application
//!   resolver
//! - Configuration loading (file + environment)
//! - Tracing setup and remote call metrics
//! - An async executor for the blocking accessibility calls
//! - Session bootstrap from configuration
//!
//! ## Architecture
//! - Implements traits defined in `axbridge-core`
//! - Contains all "impure" code (FFI, file and environment I/O)

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod observability;
pub mod platform;
pub mod runtime;

// Re-export commonly used items
pub use bootstrap::{instrumented_session, session};
pub use errors::{InfraError, InfraResult};
pub use runtime::BlockingExecutor;
