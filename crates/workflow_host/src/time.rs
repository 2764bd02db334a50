//! Time helpers and the timer contract used for client-side timeouts.

use std::{future::Future, pin::Pin};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Object-safe boxed future used by [`Timer`].
pub type TimerFuture<'a> = Pin<Box<dyn Future<Output = ()> + 'a>>;

/// Host timer used to bound slow requests.
pub trait Timer {
    /// Resolves after roughly `ms` milliseconds.
    fn sleep_ms(&self, ms: u32) -> TimerFuture<'_>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer whose sleeps complete immediately, so every timeout fires at once.
pub struct ImmediateTimer;

impl Timer for ImmediateTimer {
    fn sleep_ms(&self, _ms: u32) -> TimerFuture<'_> {
        Box::pin(async {})
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Timer whose sleeps never complete, so timeouts never fire.
pub struct PendingTimer;

impl Timer for PendingTimer {
    fn sleep_ms(&self, _ms: u32) -> TimerFuture<'_> {
        Box::pin(std::future::pending())
    }
}

#[cfg(test)]
mod tests {
    use futures::{executor::block_on, future::Either};

    use super::*;

    #[test]
    fn immediate_and_pending_timers_decide_races() {
        let timer: &dyn Timer = &ImmediateTimer;
        block_on(timer.sleep_ms(8_000));

        let raced = block_on(futures::future::select(
            PendingTimer.sleep_ms(1),
            Box::pin(async { 7 }),
        ));
        assert!(matches!(raced, Either::Right((7, _))));
        assert!(unix_time_ms_now() > 1_600_000_000_000);
    }
}
