//! Telemetry helpers for applications embedding `chart-panes`.
//!
//! Layout passes, pane state changes and rejected setter calls are reported
//! through `tracing`. Hosts either call `init_default_tracing` or install
//! their own subscriber.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter comes from `RUST_LOG` and falls back to `default_directive`
/// (for example `"chart_panes=debug"`). Returns `false` when the feature is
/// disabled or a global subscriber was already set by the host application.
#[must_use]
pub fn init_tracing_with(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}

/// Same as [`init_tracing_with`] using the `info` level.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with("info")
}
