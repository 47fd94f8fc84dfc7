//! Timer helpers shared by the network utilities.

/// Suspend for `ms` milliseconds without blocking the main thread.
#[cfg(target_arch = "wasm32")]
pub async fn sleep_ms(ms: u64) {
    let clamped = u32::try_from(ms).unwrap_or(u32::MAX);
    gloo_timers::future::TimeoutFuture::new(clamped).await;
}

/// Suspend for `ms` milliseconds (requires a tokio runtime with timers).
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
