//! Time source for the minimum-duration floor
//!
//! The submission and reset flows never sleep directly; they go through a
//! [`Clock`] so tests can drive time with [`crate::testing::ManualClock`].

use async_trait::async_trait;
use std::time::Duration;

/// Monotonic time and sleeping
#[async_trait(?Send)]
pub trait Clock {
	/// Time elapsed since an arbitrary fixed origin
	fn now(&self) -> Duration;

	async fn sleep(&self, duration: Duration);
}

/// Sleep until `minimum` has passed since `started`
///
/// Returns the time actually slept, zero when the floor was already met.
///
/// # Examples
///
/// ```
/// use churnguard_pages::clock::{Clock, hold_for_minimum};
/// use churnguard_pages::testing::ManualClock;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let clock = ManualClock::new();
/// let started = clock.now();
/// clock.advance(Duration::from_millis(300));
///
/// let slept = hold_for_minimum(&clock, started, Duration::from_millis(1000)).await;
/// assert_eq!(slept, Duration::from_millis(700));
/// # }
/// ```
pub async fn hold_for_minimum<K>(clock: &K, started: Duration, minimum: Duration) -> Duration
where
	K: Clock + ?Sized,
{
	let elapsed = clock.now().saturating_sub(started);
	let remaining = minimum.saturating_sub(elapsed);
	if !remaining.is_zero() {
		clock.sleep(remaining).await;
	}
	remaining
}

/// Clock backed by the tokio runtime
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct TokioClock {
	origin: tokio::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl TokioClock {
	pub fn new() -> Self {
		Self {
			origin: tokio::time::Instant::now(),
		}
	}
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for TokioClock {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(not(target_arch = "wasm32"))]
#[async_trait(?Send)]
impl Clock for TokioClock {
	fn now(&self) -> Duration {
		self.origin.elapsed()
	}

	async fn sleep(&self, duration: Duration) {
		tokio::time::sleep(duration).await;
	}
}

/// Clock backed by `Date.now()` and `setTimeout`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Clock for BrowserClock {
	fn now(&self) -> Duration {
		Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
	}

	async fn sleep(&self, duration: Duration) {
		gloo_timers::future::sleep(duration).await;
	}
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
	use super::*;
	use crate::testing::ManualClock;
	use rstest::rstest;

	#[rstest]
	#[case(0, 1000, 1000)]
	#[case(250, 1000, 750)]
	#[case(1000, 1000, 0)]
	#[case(4000, 1000, 0)]
	#[tokio::test]
	async fn test_hold_for_minimum(
		#[case] elapsed_ms: u64,
		#[case] minimum_ms: u64,
		#[case] expected_ms: u64,
	) {
		let clock = ManualClock::new();
		let started = clock.now();
		clock.advance(Duration::from_millis(elapsed_ms));

		let slept = hold_for_minimum(&clock, started, Duration::from_millis(minimum_ms)).await;

		assert_eq!(slept, Duration::from_millis(expected_ms));
		assert_eq!(clock.now() - started, Duration::from_millis(elapsed_ms.max(minimum_ms)));
	}

	#[rstest]
	#[tokio::test]
	async fn test_zero_floor_never_sleeps() {
		let clock = ManualClock::new();
		hold_for_minimum(&clock, clock.now(), Duration::ZERO).await;
		assert!(clock.sleeps().is_empty());
	}

	#[rstest]
	#[tokio::test]
	async fn test_tokio_clock_sleeps() {
		let clock = TokioClock::new();
		let started = clock.now();
		clock.sleep(Duration::from_millis(40)).await;
		assert!(clock.now() - started >= Duration::from_millis(40));
	}
}
