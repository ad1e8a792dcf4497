//! Scoped fan-out helpers
//!
//! Store calls are blocking; independent calls are issued on scoped
//! threads and jointly awaited.

use std::thread::ScopedJoinHandle;

/// Wait for a scoped call, turning a panic into an error
pub(crate) fn join<T>(handle: ScopedJoinHandle<'_, anyhow::Result<T>>, what: &str) -> anyhow::Result<T> {
    handle.join().unwrap_or_else(|_| Err(anyhow::anyhow!("{what} panicked")))
}
