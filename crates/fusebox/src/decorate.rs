// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Debug, Formatter};

use crate::{BreakerError, CircuitBreaker};

/// A single-method interface over operations decorated by a [`CircuitBreaker`].
///
/// Implemented by [`Decorated`] both with and without a fallback, so callers can accept
/// either shape through one bound.
pub trait Invoke<In> {
    /// The result of one invocation.
    type Output;

    /// Invokes the decorated operation with `input`.
    fn invoke(&self, input: In) -> Self::Output;
}

/// Marker for a [`Decorated`] operation without a fallback.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct NoFallback;

/// Holds the fallback of a [`Decorated`] operation.
#[derive(Clone)]
pub struct WithFallback<Fb>(Fb);

impl<Fb> Debug for WithFallback<Fb> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("WithFallback").finish_non_exhaustive()
    }
}

/// An operation that is called through a [`CircuitBreaker`].
///
/// Created by [`CircuitBreaker::decorate`]. Without a fallback, [`invoke`][Invoke::invoke]
/// behaves like [`CircuitBreaker::call`] and returns `Result<T, BreakerError<E>>`.
///
/// After [`fallback`][Decorated::fallback] is attached, any error surfaced by the breaker
/// (an open circuit, a timeout or an operation error) is replaced by the result of the
/// fallback invoked with the same input, and `invoke` returns `Result<T, E>`. The fallback
/// runs outside the breaker and never affects its statistics.
///
/// # Example
///
/// ```rust
/// # use fusebox::{CircuitBreaker, Invoke};
/// # use tick::Clock;
/// # fn example(clock: &Clock) {
/// let breaker = CircuitBreaker::new("pricing", clock);
///
/// let price = breaker
///     .decorate(|(sku, quantity): (&str, u32)| -> Result<u32, String> {
///         Err(format!("no price for {quantity} x {sku}"))
///     })
///     .fallback(|(_sku, quantity): (&str, u32)| Ok(quantity * 10));
///
/// assert_eq!(price.invoke(("sku-1", 3)), Ok(30));
/// # }
/// ```
pub struct Decorated<Op, Fb = NoFallback> {
    breaker: CircuitBreaker,
    operation: Op,
    fallback: Fb,
}

impl<Op, Fb: Debug> Debug for Decorated<Op, Fb> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorated")
            .field("breaker", &self.breaker.name())
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl<Op: Clone, Fb: Clone> Clone for Decorated<Op, Fb> {
    fn clone(&self) -> Self {
        Self {
            breaker: self.breaker.clone(),
            operation: self.operation.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<Op> Decorated<Op> {
    pub(crate) fn new(breaker: CircuitBreaker, operation: Op) -> Self {
        Self {
            breaker,
            operation,
            fallback: NoFallback,
        }
    }

    /// Attaches a fallback invoked with the same input whenever the call fails.
    ///
    /// The fallback's own result, including its error, is returned unchanged.
    #[must_use]
    pub fn fallback<Fb>(self, fallback: Fb) -> Decorated<Op, WithFallback<Fb>> {
        Decorated {
            breaker: self.breaker,
            operation: self.operation,
            fallback: WithFallback(fallback),
        }
    }
}

impl<Op, Fb> Decorated<Op, Fb> {
    /// Returns the circuit breaker guarding this operation.
    #[must_use]
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

impl<Op, In, T, E> Invoke<In> for Decorated<Op, NoFallback>
where
    Op: Fn(In) -> Result<T, E>,
{
    type Output = Result<T, BreakerError<E>>;

    fn invoke(&self, input: In) -> Self::Output {
        self.breaker.call(|| (self.operation)(input))
    }
}

impl<Op, Fb, In, T, E> Invoke<In> for Decorated<Op, WithFallback<Fb>>
where
    Op: Fn(In) -> Result<T, E>,
    Fb: Fn(In) -> Result<T, E>,
    In: Clone,
{
    type Output = Result<T, E>;

    fn invoke(&self, input: In) -> Self::Output {
        let fallback_input = input.clone();

        match self.breaker.call(|| (self.operation)(input)) {
            Ok(value) => Ok(value),
            Err(error) => {
                self.breaker.shared.telemetry.fallback(error.kind_str());
                (self.fallback.0)(fallback_input)
            }
        }
    }
}
