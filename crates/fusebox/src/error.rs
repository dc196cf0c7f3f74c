// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use thiserror::Error;

use crate::{Recovery, RecoveryInfo};

/// An error surfaced by [`CircuitBreaker::call`][crate::CircuitBreaker::call].
///
/// Only two variants are produced by the breaker itself: [`Open`][BreakerError::Open] and
/// [`Timeout`][BreakerError::Timeout]. Errors returned by the protected operation are passed
/// through unchanged inside [`Operation`][BreakerError::Operation].
///
/// # Thread safety
///
/// This type is thread-safe when `E` is.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BreakerError<E> {
    /// The circuit is open and the call was rejected without invoking the operation.
    ///
    /// The caller can retry later or use a fallback.
    #[error("circuit is open")]
    Open,

    /// The operation returned after the configured timeout elapsed.
    ///
    /// The operation is not cancelled, so it may have completed its side effects even
    /// though the call is reported as failed. Treat its outcome as unknown.
    #[error("operation took {elapsed:?}, exceeding the {timeout:?} timeout")]
    Timeout {
        /// How long the operation ran.
        elapsed: Duration,
        /// The configured timeout.
        timeout: Duration,
    },

    /// The operation itself failed.
    #[error("operation failed")]
    Operation(#[source] E),
}

impl<E> BreakerError<E> {
    /// Returns `true` if the call was rejected because the circuit is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }

    /// Returns `true` if the operation exceeded the timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns a reference to the operation error, if the operation failed.
    #[must_use]
    pub fn as_operation(&self) -> Option<&E> {
        match self {
            Self::Operation(error) => Some(error),
            Self::Open | Self::Timeout { .. } => None,
        }
    }

    /// Consumes the error and returns the operation error, if the operation failed.
    #[must_use]
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(error) => Some(error),
            Self::Open | Self::Timeout { .. } => None,
        }
    }

    pub(crate) fn kind_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Timeout { .. } => "timeout",
            Self::Operation(_) => "operation",
        }
    }
}

impl<E: Recovery> Recovery for BreakerError<E> {
    fn recovery(&self) -> RecoveryInfo {
        match self {
            Self::Open => RecoveryInfo::unavailable(),
            Self::Timeout { .. } => RecoveryInfo::retry(),
            Self::Operation(error) => error.recovery(),
        }
    }
}
