// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Opt-in log output for binaries and tests.
//!
//! The library only emits `tracing` events (DST adjustments, rejected parser
//! input, navigation hitting the 1900/9999 boundary). Nothing is printed
//! unless the host installs a subscriber, either its own or the one below.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`
/// (default `calperiod=warn`).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("calperiod=warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
