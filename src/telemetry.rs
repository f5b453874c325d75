//! Optional tracing bootstrap.
//!
//! The library only emits `tracing` events and never installs a subscriber
//! on its own. Hosts that want quick diagnostics without wiring their own
//! subscriber can enable the `telemetry` feature and call
//! [`init_default_tracing`].

/// Installs a compact `tracing-subscriber` honoring `RUST_LOG`, falling back
/// to the `info` level.
///
/// Returns `true` when the subscriber was installed; `false` when the
/// `telemetry` feature is off or the host already set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
