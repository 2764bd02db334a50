//! `setTimeout`-backed timer.

use workflow_host::{Timer, TimerFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser timer; outside wasm32 the bridge rejects the sleep and the future resolves at once.
pub struct WebTimer;

impl Timer for WebTimer {
    fn sleep_ms(&self, ms: u32) -> TimerFuture<'_> {
        Box::pin(async move {
            let _ = crate::bridge::sleep_ms(ms).await;
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_sleep_resolves_immediately() {
        block_on(WebTimer.sleep_ms(8_000));
    }
}
