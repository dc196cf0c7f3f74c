// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use crate::constants::{DEFAULT_COOLDOWN, DEFAULT_FAILURE_THRESHOLD, DEFAULT_HALF_OPEN_REQUESTS, DEFAULT_TIMEOUT, DEFAULT_WINDOW};

/// Plain configuration of a [`CircuitBreaker`][crate::CircuitBreaker].
///
/// Apply it with [`CircuitBreakerBuilder::config`][crate::CircuitBreakerBuilder::config].
/// Missing fields fall back to their defaults when deserialized.
///
/// With the `serde` feature the configuration can be loaded from any serde format.
/// Durations use a human friendly notation:
///
/// ```json
/// {
///     "failure_threshold": 0.5,
///     "window": "5s",
///     "timeout": "2s",
///     "cooldown": "3s",
///     "half_open_requests": 2
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(any(feature = "serde", test), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(feature = "serde", test), serde(default))]
#[non_exhaustive]
pub struct BreakerConfig {
    /// Ratio of recent failures that opens the circuit, in `(0.0, 1.0]`.
    pub failure_threshold: f32,

    /// Trailing window in which failures are counted.
    #[cfg_attr(
        any(feature = "serde", test),
        serde(with = "jiff::fmt::serde::unsigned_duration::friendly::compact::required")
    )]
    pub window: Duration,

    /// Soft timeout after which a completed call counts as a failure.
    #[cfg_attr(
        any(feature = "serde", test),
        serde(with = "jiff::fmt::serde::unsigned_duration::friendly::compact::required")
    )]
    pub timeout: Duration,

    /// Time the circuit stays open before probes are let through.
    #[cfg_attr(
        any(feature = "serde", test),
        serde(with = "jiff::fmt::serde::unsigned_duration::friendly::compact::required")
    )]
    pub cooldown: Duration,

    /// Successful probes required to close the circuit.
    pub half_open_requests: u32,

    /// Emit log events. Only effective with the `logs` feature.
    pub logs: bool,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            window: DEFAULT_WINDOW,
            timeout: DEFAULT_TIMEOUT,
            cooldown: DEFAULT_COOLDOWN,
            half_open_requests: DEFAULT_HALF_OPEN_REQUESTS,
            logs: false,
        }
    }
}
