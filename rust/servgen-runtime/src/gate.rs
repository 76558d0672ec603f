use std::future::Future;

use tokio::sync::Semaphore;

/// Counting limiter bounding how many calls a client has in flight.
///
/// This is the behaviour generated `safe` call variants rely on:
/// `limit_.wait(1)` before the direct call, `limit_.signal(1)` in a
/// `finally` hook once it settles. Each client owns its own gate.
pub struct AdmissionGate {
    units: Semaphore,
    capacity: usize,
}

/// Returned when a call is attempted on a gate that has been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateClosed;

impl std::fmt::Display for GateClosed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "admission gate is closed")
    }
}

impl std::error::Error for GateClosed {}

impl AdmissionGate {
    /// Create a gate with `capacity` units, all free.
    pub fn new(capacity: usize) -> Self {
        Self {
            units: Semaphore::new(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Units not currently held by an in-flight call.
    pub fn available(&self) -> usize {
        self.units.available_permits()
    }

    /// Run `call` while holding one unit.
    ///
    /// Suspends until a unit is free (no timeout). The unit is returned
    /// exactly once when `call` settles, whatever its output, and also when
    /// the returned future is dropped before completion.
    pub async fn limited<F>(&self, call: F) -> Result<F::Output, GateClosed>
    where
        F: Future,
    {
        let permit = self.units.acquire().await.map_err(|_| GateClosed)?;
        let output = call.await;
        drop(permit);
        Ok(output)
    }

    /// Reject all waiting and future calls. Calls already holding a unit
    /// run to completion.
    pub fn close(&self) {
        self.units.close();
    }
}
