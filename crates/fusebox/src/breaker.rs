// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use tick::Clock;

use crate::callbacks::{OnClosed, OnHalfOpen, OnOpened};
use crate::constants::{
    DEFAULT_COOLDOWN, DEFAULT_FAILURE_THRESHOLD, DEFAULT_HALF_OPEN_REQUESTS, DEFAULT_TIMEOUT, DEFAULT_WINDOW, sanitize_threshold,
};
use crate::decorate::Decorated;
use crate::engine::{Engine, EngineOptions, EnterCircuitResult, ExecutionMode, ExecutionResult, Transition};
use crate::telemetry::Telemetry;
use crate::{BreakerConfig, BreakerError, CircuitState, OnClosedArgs, OnHalfOpenArgs, OnOpenedArgs};

/// Guards calls to an unreliable operation and stops calling it while it keeps failing.
///
/// Create a breaker with [`CircuitBreaker::new`] for the default settings or with
/// [`CircuitBreaker::builder`] to customize them. Create one breaker per protected resource
/// and share it: cloning is cheap and all clones observe and update the same state.
///
/// See the [crate] documentation for the state machine and the failure ratio rule.
///
/// # Thread Safety
///
/// `CircuitBreaker` is `Send` and `Sync`. The internal lock is held only while the breaker
/// updates its bookkeeping, never while the protected operation, a fallback or a callback
/// runs.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    pub(crate) shared: Arc<BreakerShared>,
}

#[derive(Debug)]
pub(crate) struct BreakerShared {
    pub(crate) name: Cow<'static, str>,
    pub(crate) clock: Clock,
    pub(crate) engine: Engine,
    pub(crate) telemetry: Telemetry,
    pub(crate) on_opened: Option<OnOpened>,
    pub(crate) on_half_open: Option<OnHalfOpen>,
    pub(crate) on_closed: Option<OnClosed>,
}

impl CircuitBreaker {
    /// Creates a circuit breaker with the default settings.
    ///
    /// The `name` identifies the breaker in logs and callbacks and should use `snake_case`.
    /// The `clock` supplies every instant the breaker reads.
    ///
    /// | Setting | Default |
    /// |---------|---------|
    /// | [`failure_threshold`][CircuitBreakerBuilder::failure_threshold] | `0.5` |
    /// | [`window`][CircuitBreakerBuilder::window] | 10 seconds |
    /// | [`timeout`][CircuitBreakerBuilder::timeout] | 2 seconds |
    /// | [`cooldown`][CircuitBreakerBuilder::cooldown] | 30 seconds |
    /// | [`half_open_requests`][CircuitBreakerBuilder::half_open_requests] | `2` |
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, clock: impl AsRef<Clock>) -> Self {
        Self::builder(name, clock).build()
    }

    /// Creates a builder used to configure a circuit breaker.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::time::Duration;
    /// # use fusebox::CircuitBreaker;
    /// # use tick::Clock;
    /// # fn example(clock: &Clock) {
    /// let breaker = CircuitBreaker::builder("payments", clock)
    ///     .failure_threshold(0.5)
    ///     .window(Duration::from_secs(5))
    ///     .cooldown(Duration::from_secs(3))
    ///     .on_opened(|args| println!("{} opened after {} failures", args.name(), args.recent_failures()))
    ///     .build();
    /// # }
    /// ```
    pub fn builder(name: impl Into<Cow<'static, str>>, clock: impl AsRef<Clock>) -> CircuitBreakerBuilder {
        CircuitBreakerBuilder::new(name.into(), clock.as_ref().clone())
    }

    /// Calls `operation` through the circuit breaker.
    ///
    /// Pending time-based transitions are applied first. When the circuit is open the call
    /// fails with [`BreakerError::Open`] and `operation` is not invoked. Otherwise the
    /// operation runs without holding the breaker lock and its outcome is recorded:
    ///
    /// - an error is recorded as a failure and returned as [`BreakerError::Operation`];
    /// - a value returned after the [`timeout`][CircuitBreakerBuilder::timeout] elapsed is
    ///   discarded, recorded as a failure and reported as [`BreakerError::Timeout`];
    /// - any other value is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`BreakerError::Open`] when the call is rejected, [`BreakerError::Timeout`]
    /// when the operation ran too long, and [`BreakerError::Operation`] when it failed.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use fusebox::{BreakerError, CircuitBreaker};
    /// # use tick::Clock;
    /// # fn example(clock: &Clock) {
    /// let breaker = CircuitBreaker::new("payments", clock);
    ///
    /// let result = breaker.call(|| -> Result<u32, String> { Err("declined".to_string()) });
    ///
    /// assert_eq!(result, Err(BreakerError::Operation("declined".to_string())));
    /// # }
    /// ```
    pub fn call<T, E, F>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mode = self.shared.before_execute()?;

        let stopwatch = self.shared.clock.stopwatch();
        let result = operation();

        self.shared.after_execute(result, mode, stopwatch.elapsed())
    }

    /// Calls an asynchronous operation through the circuit breaker.
    ///
    /// Behaves exactly like [`call`][CircuitBreaker::call]. The future is only created when
    /// the call is admitted, and the breaker lock is never held across an `.await`. The
    /// breaker does not spawn tasks or start timers, so it works with any async runtime.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`call`][CircuitBreaker::call].
    pub async fn call_async<T, E, F, Fut>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mode = self.shared.before_execute()?;

        let stopwatch = self.shared.clock.stopwatch();
        let result = operation().await;

        self.shared.after_execute(result, mode, stopwatch.elapsed())
    }

    /// Wraps `operation` into a [`Decorated`] operation that calls it through this breaker.
    ///
    /// The decorated operation takes the same input as `operation`. Operations that need
    /// several arguments take them as a tuple. Attach a fallback with
    /// [`Decorated::fallback`] to replace errors with a fallback result.
    pub fn decorate<Op>(&self, operation: Op) -> Decorated<Op> {
        Decorated::new(self.clone(), operation)
    }

    /// Returns the current state of the circuit.
    ///
    /// Reading the state never changes it. Time-based transitions are applied only when a
    /// call enters the breaker, so an open circuit whose cooldown elapsed still reports
    /// [`CircuitState::Open`] until the next call.
    #[must_use]
    pub fn state(&self) -> CircuitState {
        self.shared.engine.state()
    }

    /// Returns the name of the circuit breaker.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.shared.name
    }

    /// Returns the number of recorded failures inside the trailing window.
    #[must_use]
    pub fn recent_failures(&self) -> u32 {
        self.shared.engine.recent_failures()
    }

    /// Returns the number of successful probes since the circuit became half-open.
    ///
    /// Always `0` unless the circuit is [`CircuitState::HalfOpen`].
    #[must_use]
    pub fn half_open_successes(&self) -> u32 {
        self.shared.engine.half_open_successes()
    }
}

impl BreakerShared {
    fn before_execute<E>(&self) -> Result<ExecutionMode, BreakerError<E>> {
        match self.engine.enter() {
            EnterCircuitResult::Accepted { mode, transition } => {
                if let Some(transition) = transition {
                    self.notify(transition);
                }

                Ok(mode)
            }
            EnterCircuitResult::Rejected => {
                self.telemetry.rejected();
                Err(BreakerError::Open)
            }
        }
    }

    fn after_execute<T, E>(
        &self,
        result: Result<T, E>,
        mode: ExecutionMode,
        elapsed: Duration,
    ) -> Result<T, BreakerError<E>> {
        let timeout = self.engine.options().timeout;

        let output = match result {
            Ok(_) if elapsed > timeout => {
                self.telemetry.timeout(elapsed, timeout);
                Err(BreakerError::Timeout { elapsed, timeout })
            }
            Ok(value) => Ok(value),
            Err(error) => Err(BreakerError::Operation(error)),
        };

        if let Some(transition) = self.engine.exit(ExecutionResult::from_ok(output.is_ok()), mode) {
            self.notify(transition);
        }

        output
    }

    fn notify(&self, transition: Transition) {
        self.telemetry.transition(transition);

        match transition {
            Transition::Opened {
                recent_failures,
                reopened,
            } => {
                if let Some(on_opened) = &self.on_opened {
                    on_opened.call(OnOpenedArgs {
                        name: &self.name,
                        recent_failures,
                        reopened,
                    });
                }
            }
            Transition::HalfOpened { open_duration } => {
                if let Some(on_half_open) = &self.on_half_open {
                    on_half_open.call(OnHalfOpenArgs {
                        name: &self.name,
                        open_duration,
                    });
                }
            }
            Transition::Closed { open_duration } => {
                if let Some(on_closed) = &self.on_closed {
                    on_closed.call(OnClosedArgs {
                        name: &self.name,
                        open_duration,
                    });
                }
            }
        }
    }
}

/// Builder for configuring a [`CircuitBreaker`].
///
/// Created by [`CircuitBreaker::builder`]. All settings are optional and start from the
/// defaults listed on [`CircuitBreaker::new`].
#[derive(Debug)]
#[must_use]
pub struct CircuitBreakerBuilder {
    name: Cow<'static, str>,
    clock: Clock,
    failure_threshold: f32,
    window: Duration,
    timeout: Duration,
    cooldown: Duration,
    half_open_requests: u32,
    logs_enabled: bool,
    on_opened: Option<OnOpened>,
    on_half_open: Option<OnHalfOpen>,
    on_closed: Option<OnClosed>,
}

impl CircuitBreakerBuilder {
    fn new(name: Cow<'static, str>, clock: Clock) -> Self {
        Self {
            name,
            clock,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            window: DEFAULT_WINDOW,
            timeout: DEFAULT_TIMEOUT,
            cooldown: DEFAULT_COOLDOWN,
            half_open_requests: DEFAULT_HALF_OPEN_REQUESTS,
            logs_enabled: false,
            on_opened: None,
            on_half_open: None,
            on_closed: None,
        }
    }

    /// Sets the ratio of recent failures that opens the circuit.
    ///
    /// The ratio is `n / (n + 1)` where `n` is the number of failures inside the
    /// [`window`][Self::window], so `0.5` opens on the first failure in a quiet window and
    /// `1.0` never opens the circuit from the closed state. Values are clamped into
    /// `(0.0, 1.0]`; NaN falls back to the default.
    ///
    /// **Default**: `0.5`
    pub fn failure_threshold(mut self, threshold: f32) -> Self {
        self.failure_threshold = sanitize_threshold(threshold);
        self
    }

    /// Sets the trailing window in which failures are counted.
    ///
    /// **Default**: 10 seconds
    pub fn window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    /// Sets the soft timeout of a call.
    ///
    /// An operation that returns after this duration counts as a failure. It is not
    /// cancelled while running.
    ///
    /// **Default**: 2 seconds
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets how long the circuit stays open before probes are let through.
    ///
    /// **Default**: 30 seconds
    pub fn cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the number of successful probes required to close a half-open circuit.
    ///
    /// Only calls admitted while the circuit is half-open count. A call that
    /// started before the circuit opened and completes while it is half-open neither counts
    /// towards closing it nor reopens it.
    ///
    /// **Default**: `2`
    pub fn half_open_requests(mut self, requests: u32) -> Self {
        self.half_open_requests = requests;
        self
    }

    /// Emits log events for this breaker. Requires the `logs` feature.
    ///
    /// **Default**: disabled
    pub fn enable_logs(mut self) -> Self {
        self.logs_enabled = true;
        self
    }

    /// Applies all settings from `config`, replacing previously configured values.
    pub fn config(self, config: &BreakerConfig) -> Self {
        let builder = self
            .failure_threshold(config.failure_threshold)
            .window(config.window)
            .timeout(config.timeout)
            .cooldown(config.cooldown)
            .half_open_requests(config.half_open_requests);

        Self {
            logs_enabled: config.logs,
            ..builder
        }
    }

    /// Sets the callback invoked after the circuit opens.
    ///
    /// Called both when the failure ratio opens a closed circuit and when a failed probe
    /// reopens a half-open one.
    ///
    /// **Default**: no callback
    pub fn on_opened(mut self, callback: impl Fn(OnOpenedArgs<'_>) + Send + Sync + 'static) -> Self {
        self.on_opened = Some(OnOpened::new(callback));
        self
    }

    /// Sets the callback invoked after an open circuit becomes half-open.
    ///
    /// **Default**: no callback
    pub fn on_half_open(mut self, callback: impl Fn(OnHalfOpenArgs<'_>) + Send + Sync + 'static) -> Self {
        self.on_half_open = Some(OnHalfOpen::new(callback));
        self
    }

    /// Sets the callback invoked after a half-open circuit closes.
    ///
    /// **Default**: no callback
    pub fn on_closed(mut self, callback: impl Fn(OnClosedArgs<'_>) + Send + Sync + 'static) -> Self {
        self.on_closed = Some(OnClosed::new(callback));
        self
    }

    /// Builds the circuit breaker. The circuit starts closed.
    pub fn build(self) -> CircuitBreaker {
        let options = EngineOptions {
            failure_threshold: self.failure_threshold,
            window: self.window,
            timeout: self.timeout,
            cooldown: self.cooldown,
            half_open_requests: self.half_open_requests,
        };

        CircuitBreaker {
            shared: Arc::new(BreakerShared {
                telemetry: Telemetry::new(self.name.clone(), self.logs_enabled),
                engine: Engine::new(options, self.clock.clone()),
                name: self.name,
                clock: self.clock,
                on_opened: self.on_opened,
                on_half_open: self.on_half_open,
                on_closed: self.on_closed,
            }),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use static_assertions::assert_impl_all;
    use tick::ClockControl;
    use tracing_subscriber::util::SubscriberInitExt;

    use super::*;
    use crate::testing::LogCapture;

    assert_impl_all!(CircuitBreaker: Send, Sync, Clone, std::fmt::Debug);
    assert_impl_all!(CircuitBreakerBuilder: Send, Sync);

    fn failing() -> Result<(), String> {
        Err("downstream error".to_string())
    }

    fn succeeding() -> Result<&'static str, String> {
        Ok("ok")
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "Test")]
    fn builder_defaults() {
        let breaker = CircuitBreaker::new("defaults", Clock::new_frozen());
        let options = breaker.shared.engine.options();

        assert_eq!(breaker.name(), "defaults");
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(options.failure_threshold, 0.5);
        assert_eq!(options.window, Duration::from_secs(10));
        assert_eq!(options.timeout, Duration::from_secs(2));
        assert_eq!(options.cooldown, Duration::from_secs(30));
        assert_eq!(options.half_open_requests, 2);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "Test")]
    fn builder_clamps_threshold() {
        let clock = Clock::new_frozen();

        let breaker = CircuitBreaker::builder("clamped", &clock).failure_threshold(7.0).build();
        assert_eq!(breaker.shared.engine.options().failure_threshold, 1.0);

        let breaker = CircuitBreaker::builder("nan", &clock).failure_threshold(f32::NAN).build();
        assert_eq!(breaker.shared.engine.options().failure_threshold, 0.5);
    }

    #[test]
    #[expect(clippy::float_cmp, reason = "Test")]
    fn builder_applies_config() {
        let config = BreakerConfig {
            failure_threshold: 0.75,
            window: Duration::from_secs(5),
            timeout: Duration::from_millis(100),
            cooldown: Duration::from_secs(3),
            half_open_requests: 4,
            logs: true,
        };

        let breaker = CircuitBreaker::builder("configured", Clock::new_frozen()).config(&config).build();
        let options = breaker.shared.engine.options();

        assert_eq!(options.failure_threshold, 0.75);
        assert_eq!(options.window, Duration::from_secs(5));
        assert_eq!(options.timeout, Duration::from_millis(100));
        assert_eq!(options.cooldown, Duration::from_secs(3));
        assert_eq!(options.half_open_requests, 4);
    }

    #[test]
    fn call_passes_value_through() {
        let breaker = CircuitBreaker::new("passthrough", Clock::new_frozen());

        assert_eq!(breaker.call(succeeding), Ok("ok"));
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.recent_failures(), 0);
    }

    #[test]
    fn call_wraps_operation_error() {
        let breaker = CircuitBreaker::new("failing", Clock::new_frozen());

        assert_eq!(
            breaker.call(failing),
            Err(BreakerError::Operation("downstream error".to_string()))
        );
        assert_eq!(breaker.recent_failures(), 1);
    }

    #[test]
    fn call_when_open_does_not_invoke_operation() {
        let breaker = CircuitBreaker::new("open", Clock::new_frozen());
        breaker.call(failing).unwrap_err();
        assert_eq!(breaker.state(), CircuitState::Open);

        let invoked = AtomicBool::new(false);
        let result = breaker.call(|| {
            invoked.store(true, Ordering::SeqCst);
            succeeding()
        });

        assert_eq!(result, Err(BreakerError::Open));
        assert!(!invoked.load(Ordering::SeqCst));
    }

    #[test]
    fn call_exceeding_timeout_fails() {
        let control = ClockControl::new();
        let breaker = CircuitBreaker::builder("slow", control.to_clock())
            .timeout(Duration::from_millis(100))
            .failure_threshold(1.0)
            .build();

        let result = breaker.call(|| {
            control.advance(Duration::from_millis(200));
            succeeding()
        });

        assert_eq!(
            result,
            Err(BreakerError::Timeout {
                elapsed: Duration::from_millis(200),
                timeout: Duration::from_millis(100),
            })
        );
        assert_eq!(breaker.recent_failures(), 1);
    }

    #[test]
    fn call_at_timeout_succeeds() {
        let control = ClockControl::new();
        let breaker = CircuitBreaker::builder("exact", control.to_clock())
            .timeout(Duration::from_millis(100))
            .build();

        let result = breaker.call(|| {
            control.advance(Duration::from_millis(100));
            succeeding()
        });

        assert_eq!(result, Ok("ok"));
        assert_eq!(breaker.recent_failures(), 0);
    }

    #[test]
    fn call_failing_slowly_keeps_operation_error() {
        let control = ClockControl::new();
        let breaker = CircuitBreaker::builder("slow_failure", control.to_clock())
            .timeout(Duration::from_millis(100))
            .build();

        let result = breaker.call(|| {
            control.advance(Duration::from_secs(1));
            failing()
        });

        assert_eq!(result, Err(BreakerError::Operation("downstream error".to_string())));
    }

    #[test]
    fn operation_runs_without_lock() {
        let breaker = CircuitBreaker::new("reentrant", Clock::new_frozen());

        // would deadlock if the operation ran under the breaker lock
        let result = breaker.call(|| Ok::<_, String>((breaker.state(), breaker.recent_failures())));

        assert_eq!(result, Ok((CircuitState::Closed, 0)));
    }

    #[test]
    fn callbacks_follow_the_lifecycle() {
        let control = ClockControl::new();
        let events = Arc::new(Mutex::new(Vec::new()));
        let (opened, half_open, closed) = (Arc::clone(&events), Arc::clone(&events), Arc::clone(&events));

        let breaker = CircuitBreaker::builder("lifecycle", control.to_clock())
            .cooldown(Duration::from_secs(1))
            .half_open_requests(1)
            .on_opened(move |args| {
                assert_eq!(args.name(), "lifecycle");
                opened
                    .lock()
                    .unwrap()
                    .push(format!("opened:{}:{}", args.recent_failures(), args.reopened()));
            })
            .on_half_open(move |args| {
                half_open
                    .lock()
                    .unwrap()
                    .push(format!("half_open:{}", args.open_duration().as_secs()));
            })
            .on_closed(move |args| {
                closed.lock().unwrap().push(format!("closed:{}", args.open_duration().as_secs()));
            })
            .build();

        breaker.call(failing).unwrap_err();
        control.advance(Duration::from_secs(1));
        breaker.call(failing).unwrap_err();
        control.advance(Duration::from_secs(1));
        breaker.call(succeeding).unwrap();
        breaker.call(succeeding).unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "opened:1:false".to_string(),
                "half_open:1".to_string(),
                "opened:2:true".to_string(),
                "half_open:1".to_string(),
                "closed:1".to_string(),
            ]
        );
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn callbacks_may_read_breaker_state() {
        let observed = Arc::new(AtomicU32::new(0));
        let observed_clone = Arc::clone(&observed);
        let slot: Arc<Mutex<Option<CircuitBreaker>>> = Arc::new(Mutex::new(None));
        let slot_clone = Arc::clone(&slot);

        let breaker = CircuitBreaker::builder("observer", Clock::new_frozen())
            .on_opened(move |_| {
                let guard = slot_clone.lock().unwrap();
                let breaker = guard.as_ref().unwrap();
                observed_clone.store(breaker.recent_failures(), Ordering::SeqCst);
                assert_eq!(breaker.state(), CircuitState::Open);
            })
            .build();
        *slot.lock().unwrap() = Some(breaker.clone());

        breaker.call(failing).unwrap_err();

        assert_eq!(observed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn clones_share_state() {
        let breaker = CircuitBreaker::new("shared", Clock::new_frozen());
        let clone = breaker.clone();

        clone.call(failing).unwrap_err();

        assert_eq!(breaker.state(), CircuitState::Open);
        assert_eq!(breaker.call(succeeding), Err(BreakerError::Open));
    }

    #[tokio::test]
    async fn call_async_ok() {
        let breaker = CircuitBreaker::new("async", Clock::new_frozen());

        let result = breaker.call_async(|| async { Ok::<_, String>(42) }).await;

        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn call_async_when_open_does_not_create_future() {
        let breaker = CircuitBreaker::new("async_open", Clock::new_frozen());
        breaker.call_async(|| async { failing() }).await.unwrap_err();

        let created = AtomicBool::new(false);
        let result = breaker
            .call_async(|| {
                created.store(true, Ordering::SeqCst);
                async { succeeding() }
            })
            .await;

        assert_eq!(result, Err(BreakerError::Open));
        assert!(!created.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn call_async_exceeding_timeout_fails() {
        let control = ClockControl::new();
        let breaker = CircuitBreaker::builder("async_slow", control.to_clock())
            .timeout(Duration::from_millis(100))
            .build();

        let control_ref = &control;

        let result = breaker
            .call_async(move || async move {
                control_ref.advance(Duration::from_millis(150));
                succeeding()
            })
            .await;

        assert!(result.unwrap_err().is_timeout());
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[test]
    fn call_emits_logs() {
        let log_capture = LogCapture::new();
        let _guard = log_capture.subscriber().set_default();

        let breaker = CircuitBreaker::builder("log_test_breaker", Clock::new_frozen())
            .enable_logs()
            .build();

        breaker.call(failing).unwrap_err();
        breaker.call(succeeding).unwrap_err();

        log_capture.assert_contains("log_test_breaker");
        log_capture.assert_contains("circuit_breaker.reopened=false");
        log_capture.assert_contains("WARN");
    }

    #[test]
    fn call_without_logs_is_quiet() {
        let log_capture = LogCapture::new();
        let _guard = log_capture.subscriber().set_default();

        let breaker = CircuitBreaker::new("quiet", Clock::new_frozen());
        breaker.call(failing).unwrap_err();
        breaker.call(succeeding).unwrap_err();

        assert!(log_capture.output().is_empty());
    }
}
