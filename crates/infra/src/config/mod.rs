//! Configuration loading
//!
//! This module provides utilities for loading [`AxConfig`] from files and
//! environment variables.
//!
//! [`AxConfig`]: axbridge_domain::AxConfig

pub mod loader;

// Re-export commonly used items
pub use loader::{
    apply_overrides, load, load_from_env_overrides, load_from_file, probe_config_paths, validate,
};
