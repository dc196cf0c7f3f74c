// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// Default ratio of recent failures that opens the circuit.
pub(crate) const DEFAULT_FAILURE_THRESHOLD: f32 = 0.5;

/// Default length of the trailing window in which failures are counted.
pub(crate) const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

/// Default soft timeout after which a completed call is reclassified as a failure.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

/// Default time the circuit stays open before letting probes through.
pub(crate) const DEFAULT_COOLDOWN: Duration = Duration::from_secs(30);

/// Default number of successful probes required to close the circuit again.
pub(crate) const DEFAULT_HALF_OPEN_REQUESTS: u32 = 2;

pub(crate) const ERR_POISONED_LOCK: &str =
    "poisoned lock - cannot continue execution because the circuit breaker state can no longer be trusted";

/// Clamps a failure threshold into `(0.0, 1.0]`, falling back to the default for NaN.
pub(crate) fn sanitize_threshold(threshold: f32) -> f32 {
    if threshold.is_nan() {
        return DEFAULT_FAILURE_THRESHOLD;
    }

    threshold.clamp(f32::MIN_POSITIVE, 1.0)
}
