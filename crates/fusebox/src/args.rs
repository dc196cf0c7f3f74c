// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// Arguments for the [`on_opened`][crate::CircuitBreakerBuilder::on_opened] callback.
///
/// Provides context when the circuit opens, either because the failure ratio reached the
/// threshold or because a probe failed while half-open.
#[derive(Debug)]
#[non_exhaustive]
pub struct OnOpenedArgs<'a> {
    pub(crate) name: &'a str,
    pub(crate) recent_failures: u32,
    pub(crate) reopened: bool,
}

impl OnOpenedArgs<'_> {
    /// Returns the name of the circuit breaker.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the number of failures inside the window when the circuit opened.
    #[must_use]
    pub fn recent_failures(&self) -> u32 {
        self.recent_failures
    }

    /// Returns `true` when a failed probe reopened a half-open circuit.
    #[must_use]
    pub fn reopened(&self) -> bool {
        self.reopened
    }
}

/// Arguments for the [`on_half_open`][crate::CircuitBreakerBuilder::on_half_open] callback.
#[derive(Debug)]
#[non_exhaustive]
pub struct OnHalfOpenArgs<'a> {
    pub(crate) name: &'a str,
    pub(crate) open_duration: Duration,
}

impl OnHalfOpenArgs<'_> {
    /// Returns the name of the circuit breaker.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns how long the circuit stayed open before probing started.
    #[must_use]
    pub fn open_duration(&self) -> Duration {
        self.open_duration
    }
}

/// Arguments for the [`on_closed`][crate::CircuitBreakerBuilder::on_closed] callback.
#[derive(Debug)]
#[non_exhaustive]
pub struct OnClosedArgs<'a> {
    pub(crate) name: &'a str,
    pub(crate) open_duration: Duration,
}

impl OnClosedArgs<'_> {
    /// Returns the name of the circuit breaker.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
    }

    /// Returns the time elapsed between the last opening of the circuit and its closing,
    /// including the time spent probing.
    #[must_use]
    pub fn open_duration(&self) -> Duration {
        self.open_duration
    }
}
