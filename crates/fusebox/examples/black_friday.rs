// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Simulates a Black Friday order rush against a flaky payment provider.
//!
//! The first phase pushes orders through a circuit breaker while the provider fails about
//! 40% of the time and occasionally stalls. The second phase protects a provider that fails
//! a few times and then recovers, using a decorated operation with a fallback so customers
//! always get an answer.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use fusebox::{BreakerConfig, BreakerError, CircuitBreaker, Invoke};
use ohno::{AppError, app_err};
use tick::Clock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const CONFIG: &str = r#"{
    "failure_threshold": 0.5,
    "window": "5s",
    "timeout": "300ms",
    "cooldown": "1s",
    "half_open_requests": 2,
    "logs": true
}"#;

const ORDERS: u32 = 30;
const FAILURE_RATE: f32 = 0.4;
const ORDER_INTERVAL: Duration = Duration::from_millis(200);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    tracing_subscriber::registry().with(tracing_subscriber::fmt::layer()).init();

    let config: BreakerConfig = serde_json::from_str(CONFIG)?;
    let clock = Clock::new_tokio();

    rush(&clock, &config).await;
    flapper(&clock, &config).await?;

    Ok(())
}

async fn rush(clock: &Clock, config: &BreakerConfig) {
    let breaker = CircuitBreaker::builder("payment_provider", clock)
        .config(config)
        .on_opened(|args| println!("!! {} opened after {} recent failures", args.name(), args.recent_failures()))
        .on_closed(|args| println!("ok {} closed after {:?}", args.name(), args.open_duration()))
        .build();

    let (mut approved, mut declined, mut timed_out, mut rejected) = (0, 0, 0, 0);

    for order in 1..=ORDERS {
        let result = breaker.call_async(|| charge(clock, order)).await;

        match &result {
            Ok(receipt) => {
                approved += 1;
                println!("order {order:>2}: {receipt}");
            }
            Err(BreakerError::Open) => rejected += 1,
            Err(BreakerError::Timeout { elapsed, .. }) => {
                timed_out += 1;
                println!("order {order:>2}: payment stalled for {elapsed:?}");
            }
            Err(BreakerError::Operation(error)) => {
                declined += 1;
                println!("order {order:>2}: {error}");
            }
        }

        println!("order {order:>2}: circuit is {}", breaker.state());
        clock.delay(ORDER_INTERVAL).await;
    }

    println!(
        "\napproved: {approved}, declined: {declined}, timed out: {timed_out}, rejected: {rejected}, total: {ORDERS}\n"
    );
}

async fn flapper(clock: &Clock, config: &BreakerConfig) -> Result<(), AppError> {
    let breaker = CircuitBreaker::builder("flapping_provider", clock).config(config).build();
    let attempts = AtomicU32::new(0);

    let checkout = breaker
        .decorate(|order: u32| {
            if attempts.fetch_add(1, Ordering::Relaxed) < 3 {
                Err(app_err!("provider rejected order {order}"))
            } else {
                Ok(format!("order {order} charged"))
            }
        })
        .fallback(|order: u32| Ok(format!("order {order} queued for later")));

    for order in 1..=8 {
        let outcome = checkout.invoke(order)?;
        println!("{outcome} (circuit is {})", checkout.breaker().state());
        clock.delay(Duration::from_millis(500)).await;
    }

    Ok(())
}

async fn charge(clock: &Clock, order: u32) -> Result<String, AppError> {
    // one in ten payments stalls past the timeout and still goes through
    if fastrand::u8(0..10) == 0 {
        clock.delay(Duration::from_millis(400)).await;
        return Ok(format!("charged order {order} after a stall"));
    }

    if fastrand::f32() < FAILURE_RATE {
        return Err(app_err!("payment for order {order} declined"));
    }

    Ok(format!("charged order {order}"))
}
