// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        clippy::unchecked_time_subtraction,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]

//! Failure isolation for calls into unreliable dependencies.
//!
//! This crate provides [`CircuitBreaker`], a guard that wraps calls to a downstream
//! operation, tracks recent failures and timeouts, and stops calling the dependency once
//! failures cross a threshold. After a cooldown the breaker lets probe calls through and
//! closes again once the dependency shows evidence of recovery.
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use fusebox::{BreakerError, CircuitBreaker, CircuitState};
//! use tick::Clock;
//!
//! # fn example(clock: &Clock) {
//! let breaker = CircuitBreaker::builder("payments", clock)
//!     .failure_threshold(0.5)
//!     .window(Duration::from_secs(10))
//!     .timeout(Duration::from_secs(2))
//!     .cooldown(Duration::from_secs(30))
//!     .half_open_requests(2)
//!     .build();
//!
//! match breaker.call(|| charge_card(42)) {
//!     Ok(receipt) => println!("charged: {receipt}"),
//!     Err(BreakerError::Open) => println!("payments are unavailable, try again later"),
//!     Err(error) => println!("payment failed: {error}"),
//! }
//!
//! assert_eq!(breaker.state(), CircuitState::Closed);
//! # }
//! # fn charge_card(order: u32) -> Result<String, String> { Ok(format!("order {order}")) }
//! ```
//!
//! > **Note**: The breaker reads every instant from a [`Clock`][tick::Clock] of the [`tick`]
//! > crate. The clock is runtime-specific and must be provided. In tests, drive it with
//! > `tick::ClockControl` to move time forward without sleeping.
//!
//! # Circuit States and Transitions
//!
//! ```text
//! ┌────────┐      failure ratio >= threshold      ┌──────────┐
//! │ Closed │ ────────────────────────────────────▶│   Open   │
//! └────────┘                                      └──────────┘
//!      ▲                                            │      ▲
//!      │                                   cooldown │      │ probe
//!      │            ┌────────────────┐     elapsed  │      │ failed
//!      └────────────│   Half-Open    │◀─────────────┘      │
//!   enough probes   └────────────────┘─────────────────────┘
//!   succeeded
//! ```
//!
//! - **Closed**: calls pass through. Each failure is timestamped and the circuit opens when
//!   the failures inside the trailing [`window`][CircuitBreakerBuilder::window] reach the
//!   [`failure_threshold`][CircuitBreakerBuilder::failure_threshold].
//! - **Open**: calls are rejected with [`BreakerError::Open`] without invoking the operation.
//! - **Half-Open**: calls are let through as probes. A single failed probe reopens the circuit.
//!   Once [`half_open_requests`][CircuitBreakerBuilder::half_open_requests] probes succeeded,
//!   the next call closes the circuit and clears the failure history.
//!
//! Time-based transitions are evaluated lazily when a call enters the breaker. There are no
//! background threads or timers, so [`CircuitBreaker::state`] keeps reporting `Open` after
//! the cooldown elapsed until the next call arrives.
//!
//! ## Failure Ratio
//!
//! The ratio compares the number of recent failures `n` (including the one just recorded)
//! against `n + 1`, not against the number of attempted calls. With the default threshold
//! of `0.5` a single failure in a quiet window is enough to open the circuit, and a threshold
//! of `1.0` never opens it from the closed state.
//!
//! # Timeouts
//!
//! The [`timeout`][CircuitBreakerBuilder::timeout] is a soft limit: the operation is never
//! cancelled. When it returns after the limit, its value is discarded, the call counts as a
//! failure and [`BreakerError::Timeout`] is returned. The operation may have completed its
//! side effects, so its outcome must be treated as unknown.
//!
//! # Concurrency
//!
//! [`CircuitBreaker`] is cheap to clone, and clones share the same state. The internal lock
//! is held only while the breaker updates its bookkeeping before and after an operation;
//! the operation itself runs without the lock, so concurrent callers never wait for each
//! other's operations and a hung operation does not block other callers.
//!
//! # Fallbacks
//!
//! [`CircuitBreaker::decorate`] wraps an operation into a [`Decorated`] value that implements
//! [`Invoke`]. Attaching a [`fallback`][Decorated::fallback] makes every error surfaced by the
//! breaker (open circuit, timeout or operation failure) fall back to a replacement result:
//!
//! ```rust
//! # use fusebox::{CircuitBreaker, Invoke};
//! # use tick::Clock;
//! # fn example(clock: &Clock) {
//! let breaker = CircuitBreaker::new("inventory", clock);
//!
//! let lookup = breaker
//!     .decorate(|sku: String| -> Result<u32, String> { Err(format!("{sku}: backend down")) })
//!     .fallback(|_sku: String| Ok(0));
//!
//! assert_eq!(lookup.invoke("sku-1".to_string()), Ok(0));
//! # }
//! ```
//!
//! # Recovery Metadata
//!
//! [`BreakerError`] implements [`Recovery`] so callers can classify it the same way as any
//! other error: a rejected call is [`RecoveryKind::Unavailable`], a timeout is
//! [`RecoveryKind::Retry`] and operation errors forward their own classification.
//!
//! # Features
//!
//! - `logs`: emits structured `tracing` events for state transitions, rejections, timeouts
//!   and fallbacks. Logging must also be switched on per breaker with
//!   [`enable_logs`][CircuitBreakerBuilder::enable_logs].
//! - `serde`: implements `Serialize` and `Deserialize` for [`BreakerConfig`] and
//!   [`CircuitState`]. Durations use a human friendly format such as `"10s"` or `"250ms"`.

#[doc(inline)]
pub use recoverable::{Recovery, RecoveryInfo, RecoveryKind};

mod args;
mod breaker;
mod callbacks;
mod config;
mod constants;
mod decorate;
mod engine;
mod error;
mod failures;
mod fn_wrapper;
mod state;
mod telemetry;

pub use args::{OnClosedArgs, OnHalfOpenArgs, OnOpenedArgs};
pub use breaker::{CircuitBreaker, CircuitBreakerBuilder};
pub use config::BreakerConfig;
pub use decorate::{Decorated, Invoke, NoFallback, WithFallback};
pub use error::BreakerError;
pub use state::CircuitState;

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
pub(crate) mod testing;
