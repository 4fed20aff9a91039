//! Observability: logging setup and remote call metrics
//!
//! ## Poison Recovery
//!
//! All mutex locks in the metrics use explicit poison recovery:
//! ```rust,ignore
//! let guard = match mutex.lock() {
//!     Ok(guard) => guard,
//!     Err(poison_err) => {
//!         tracing::warn!("Mutex poisoned, recovering");
//!         poison_err.into_inner()
//!     }
//! };
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axbridge_infra::observability::{init_tracing, InstrumentedTransport, RemoteCallMetrics};
//!
//! init_tracing(&config.logging)?;
//! let metrics = Arc::new(RemoteCallMetrics::new());
//! let transport = InstrumentedTransport::new(transport, Arc::clone(&metrics));
//! ```

pub mod instrumented;
pub mod metrics;

use axbridge_domain::LoggingConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use instrumented::InstrumentedTransport;
pub use metrics::{RemoteCallMetrics, RemoteCallSnapshot};

use crate::errors::{InfraError, InfraResult};

/// Metrics error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    /// Empty data set - cannot calculate aggregate metric
    #[error("Empty data: cannot calculate {metric}")]
    EmptyData {
        /// Metric name that failed (e.g., "P95", "P50")
        metric: &'static str,
    },
}

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.level` is the filter.
///
/// # Errors
/// Returns `InfraError::Config` if the level is not a valid filter
/// directive or a global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> InfraResult<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            InfraError::config(format!("Invalid log level '{}': {e}", config.level))
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    result.map_err(|e| InfraError::config(format!("Failed to install tracing subscriber: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig { level: "=[".to_string(), json: false };
        assert!(matches!(init_tracing(&config), Err(InfraError::Config(_))));
    }

    #[test]
    fn test_empty_data_display() {
        let err = MetricsError::EmptyData { metric: "P95" };
        assert_eq!(err.to_string(), "Empty data: cannot calculate P95");
    }
}
