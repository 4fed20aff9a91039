//! # axbridge Domain
//!
//! Pure data types shared by every axbridge crate.
//!
//! This crate contains:
//! - The closed error taxonomy and the remote status mapping
//! - Geometry payloads (point, size, rect, character range)
//! - The tagged wire value received from the accessibility service
//! - The identity token for one remote UI object
//! - Catalogs of well-known role, subrole, attribute and action names
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other axbridge crates
//! - No I/O and no platform code

pub mod config;
pub mod constants;
pub mod errors;
pub mod geometry;
pub mod macros;
pub mod remote;
pub mod value;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use geometry::*;
pub use remote::{ElementRef, RemoteObject};
pub use value::{BoxKind, BoxedValue, Number, OpaqueValue, WireValue};
