// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tick::Clock;

use crate::CircuitState;
use crate::constants::ERR_POISONED_LOCK;
use crate::failures::{FailureWindow, trips};

/// Settings the engine evaluates its transitions against.
#[derive(Debug, Clone)]
pub(crate) struct EngineOptions {
    pub failure_threshold: f32,
    pub window: Duration,
    pub timeout: Duration,
    pub cooldown: Duration,
    pub half_open_requests: u32,
}

/// The outcome of an execution, from the perspective of the circuit breaker.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) enum ExecutionResult {
    Success,
    Failure,
}

impl ExecutionResult {
    pub fn from_ok(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Failure }
    }
}

/// How an admitted call was let through the circuit.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) enum ExecutionMode {
    /// Admitted while the circuit was closed.
    Normal,
    /// Admitted while the circuit was half-open, its outcome decides whether the circuit closes.
    Trial,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum EnterCircuitResult {
    Accepted {
        mode: ExecutionMode,
        transition: Option<Transition>,
    },
    Rejected,
}

/// A committed state change, reported to telemetry and callbacks after the lock is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    Opened { recent_failures: u32, reopened: bool },
    HalfOpened { open_duration: Duration },
    Closed { open_duration: Duration },
}

/// Owns the circuit state and the failure history.
///
/// Every read and write goes through the mutex. The lock is held only while entering and
/// exiting the circuit, never while the protected operation runs.
#[derive(Debug)]
pub(crate) struct Engine {
    core: Mutex<Core>,
    options: EngineOptions,
    clock: Clock,
}

impl Engine {
    pub fn new(options: EngineOptions, clock: Clock) -> Self {
        Self {
            core: Mutex::new(Core {
                state: State::Closed,
                failures: FailureWindow::default(),
            }),
            options,
            clock,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn enter(&self) -> EnterCircuitResult {
        // NOTE: Read the clock outside the lock.
        let now = self.clock.instant();

        self.core.lock().expect(ERR_POISONED_LOCK).enter(now, &self.options)
    }

    pub fn exit(&self, result: ExecutionResult, mode: ExecutionMode) -> Option<Transition> {
        let now = self.clock.instant();

        self.core.lock().expect(ERR_POISONED_LOCK).exit(result, mode, now, &self.options)
    }

    pub fn state(&self) -> CircuitState {
        self.core.lock().expect(ERR_POISONED_LOCK).state.as_circuit_state()
    }

    pub fn recent_failures(&self) -> u32 {
        let now = self.clock.instant();

        self.core
            .lock()
            .expect(ERR_POISONED_LOCK)
            .failures
            .recent(now, self.options.window)
    }

    pub fn half_open_successes(&self) -> u32 {
        match self.core.lock().expect(ERR_POISONED_LOCK).state {
            State::HalfOpen { successes, .. } => successes,
            State::Closed | State::Open { .. } => 0,
        }
    }
}

#[derive(Debug)]
struct Core {
    state: State,
    failures: FailureWindow,
}

#[derive(Debug, Clone, Copy)]
enum State {
    Closed,
    Open { opened_at: Instant },
    HalfOpen { opened_at: Instant, successes: u32 },
}

impl State {
    fn as_circuit_state(self) -> CircuitState {
        match self {
            Self::Closed => CircuitState::Closed,
            Self::Open { .. } => CircuitState::Open,
            Self::HalfOpen { .. } => CircuitState::HalfOpen,
        }
    }
}

impl Core {
    fn enter(&mut self, now: Instant, options: &EngineOptions) -> EnterCircuitResult {
        let transition = self.reconcile(now, options);

        match self.state {
            State::Open { .. } => EnterCircuitResult::Rejected,
            State::Closed => EnterCircuitResult::Accepted {
                mode: ExecutionMode::Normal,
                transition,
            },
            State::HalfOpen { .. } => EnterCircuitResult::Accepted {
                mode: ExecutionMode::Trial,
                transition,
            },
        }
    }

    /// Applies at most one pending time or counter based transition.
    fn reconcile(&mut self, now: Instant, options: &EngineOptions) -> Option<Transition> {
        match self.state {
            State::Open { opened_at } => {
                let open_duration = now.saturating_duration_since(opened_at);
                if open_duration < options.cooldown {
                    return None;
                }

                self.state = State::HalfOpen { opened_at, successes: 0 };
                Some(Transition::HalfOpened { open_duration })
            }
            State::HalfOpen { opened_at, successes } if successes >= options.half_open_requests => {
                self.state = State::Closed;
                self.failures.clear();

                Some(Transition::Closed {
                    open_duration: now.saturating_duration_since(opened_at),
                })
            }
            State::HalfOpen { .. } | State::Closed => None,
        }
    }

    fn exit(
        &mut self,
        result: ExecutionResult,
        mode: ExecutionMode,
        now: Instant,
        options: &EngineOptions,
    ) -> Option<Transition> {
        if result == ExecutionResult::Success {
            // Only calls admitted while half-open count towards closing the circuit
            if mode == ExecutionMode::Trial
                && let State::HalfOpen { successes, .. } = &mut self.state
            {
                *successes = successes.saturating_add(1);
            }

            return None;
        }

        self.failures.record(now, options.window);
        let recent_failures = self.failures.recent(now, options.window);

        match (self.state, mode) {
            (State::Closed, _) if trips(recent_failures, options.failure_threshold) => {
                self.state = State::Open { opened_at: now };
                Some(Transition::Opened {
                    recent_failures,
                    reopened: false,
                })
            }
            // A single failed probe is enough to reopen the circuit
            (State::HalfOpen { .. }, ExecutionMode::Trial) => {
                self.state = State::Open { opened_at: now };
                Some(Transition::Opened {
                    recent_failures,
                    reopened: true,
                })
            }
            // The circuit changed state while this call was running, the failure only
            // lands in the history.
            (State::Closed | State::Open { .. }, _) | (State::HalfOpen { .. }, ExecutionMode::Normal) => None,
        }
    }
}
