// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Timestamps of failed calls, evaluated over a trailing time window.
///
/// Timestamps older than the window are ignored when counting and are purged lazily
/// whenever a new failure is recorded.
#[derive(Debug, Default)]
pub(crate) struct FailureWindow {
    timestamps: VecDeque<Instant>,
}

impl FailureWindow {
    pub fn record(&mut self, now: Instant, window: Duration) {
        // Remove failures that fell out of the window
        while let Some(front) = self.timestamps.front()
            && now.saturating_duration_since(*front) > window
        {
            self.timestamps.pop_front();
        }

        self.timestamps.push_back(now);
    }

    /// Number of failures recorded within `window` before `now`, bounds inclusive.
    pub fn recent(&self, now: Instant, window: Duration) -> u32 {
        let count = self
            .timestamps
            .iter()
            .filter(|failed_at| now.saturating_duration_since(**failed_at) <= window)
            .count();

        u32::try_from(count).unwrap_or(u32::MAX)
    }

    pub fn clear(&mut self) {
        self.timestamps.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }
}

/// Decides whether `recent_failures` trip a circuit with the given threshold.
///
/// The denominator is the number of recent failures plus one rather than the number of
/// attempted calls, so a single failure in a quiet window yields a ratio of `0.5`.
///
/// The ratio is compared at the precision of the threshold, so a ratio of exactly `4 / 5`
/// meets a threshold of `0.8`. The ratio never reaches `1.0`, so that threshold never trips.
#[expect(clippy::cast_possible_truncation, reason = "the ratio is compared at f32 precision")]
pub(crate) fn trips(recent_failures: u32, failure_threshold: f32) -> bool {
    if failure_threshold >= 1.0 {
        return false;
    }

    let failures = f64::from(recent_failures);
    let ratio = failures / (failures + 1.0).max(1.0);

    ratio as f32 >= failure_threshold
}
