// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{Display, Formatter};

/// The lifecycle state of a [`CircuitBreaker`][crate::CircuitBreaker].
///
/// Read it with [`CircuitBreaker::state`][crate::CircuitBreaker::state]. Reading the state
/// never changes it; transitions only happen when a call enters or leaves the breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(any(feature = "serde", test), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(feature = "serde", test), serde(rename_all = "snake_case"))]
pub enum CircuitState {
    /// Calls pass through and failures are tracked.
    Closed,

    /// Calls are rejected without invoking the operation.
    Open,

    /// Calls are let through as probes to test whether the dependency recovered.
    HalfOpen,
}

impl CircuitState {
    /// Returns the `snake_case` name of the state, as used in log events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

impl Display for CircuitState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
