//! Tracing subscriber setup for hosts embedding the invite workflow

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use traincast_domain::{Result, TraincastError};

/// Install a global subscriber filtered by `RUST_LOG` (default `info`).
///
/// `json` switches to one JSON object per event. Fails if a global
/// subscriber is already installed.
pub fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    installed.map_err(|e| TraincastError::Internal(format!("tracing already initialized: {e}")))?;
    tracing::debug!(json, "tracing initialized");
    Ok(())
}
