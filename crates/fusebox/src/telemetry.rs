// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::time::Duration;

#[cfg(any(feature = "logs", test))]
use crate::CircuitState;
use crate::engine::Transition;

/// Emits structured log events for a single circuit breaker.
///
/// All methods are no-ops unless the `logs` feature is enabled and logging was requested
/// with [`enable_logs`][crate::CircuitBreakerBuilder::enable_logs].
#[derive(Debug, Clone)]
pub(crate) struct Telemetry {
    #[cfg(any(feature = "logs", test))]
    name: Cow<'static, str>,
    #[cfg(any(feature = "logs", test))]
    logs_enabled: bool,
}

impl Telemetry {
    #[cfg(any(feature = "logs", test))]
    pub fn new(name: Cow<'static, str>, logs_enabled: bool) -> Self {
        Self { name, logs_enabled }
    }

    #[cfg(not(any(feature = "logs", test)))]
    pub fn new(_name: Cow<'static, str>, _logs_enabled: bool) -> Self {
        Self {}
    }

    pub fn transition(&self, transition: Transition) {
        #[cfg(any(feature = "logs", test))]
        if self.logs_enabled {
            match transition {
                Transition::Opened {
                    recent_failures,
                    reopened,
                } => {
                    tracing::event!(
                        name: "fusebox.circuit_breaker.opened",
                        tracing::Level::WARN,
                        circuit_breaker.name = %self.name,
                        circuit_breaker.state = CircuitState::Open.as_str(),
                        circuit_breaker.recent_failures = recent_failures,
                        circuit_breaker.reopened = reopened,
                    );
                }
                Transition::HalfOpened { open_duration } => {
                    tracing::event!(
                        name: "fusebox.circuit_breaker.half_open",
                        tracing::Level::INFO,
                        circuit_breaker.name = %self.name,
                        circuit_breaker.state = CircuitState::HalfOpen.as_str(),
                        circuit_breaker.open_duration = open_duration.as_secs_f64(),
                    );
                }
                Transition::Closed { open_duration } => {
                    tracing::event!(
                        name: "fusebox.circuit_breaker.closed",
                        tracing::Level::INFO,
                        circuit_breaker.name = %self.name,
                        circuit_breaker.state = CircuitState::Closed.as_str(),
                        circuit_breaker.open_duration = open_duration.as_secs_f64(),
                    );
                }
            }
        }

        _ = transition;
    }

    pub fn rejected(&self) {
        #[cfg(any(feature = "logs", test))]
        if self.logs_enabled {
            tracing::event!(
                name: "fusebox.circuit_breaker.rejected",
                tracing::Level::WARN,
                circuit_breaker.name = %self.name,
                circuit_breaker.state = CircuitState::Open.as_str(),
            );
        }
    }

    pub fn timeout(&self, elapsed: Duration, timeout: Duration) {
        #[cfg(any(feature = "logs", test))]
        if self.logs_enabled {
            tracing::event!(
                name: "fusebox.circuit_breaker.timeout",
                tracing::Level::WARN,
                circuit_breaker.name = %self.name,
                circuit_breaker.elapsed = elapsed.as_secs_f64(),
                circuit_breaker.timeout = timeout.as_secs_f64(),
            );
        }

        _ = (elapsed, timeout);
    }

    pub fn fallback(&self, reason: &'static str) {
        #[cfg(any(feature = "logs", test))]
        if self.logs_enabled {
            tracing::event!(
                name: "fusebox.circuit_breaker.fallback",
                tracing::Level::WARN,
                circuit_breaker.name = %self.name,
                circuit_breaker.fallback.reason = reason,
            );
        }

        _ = reason;
    }
}
