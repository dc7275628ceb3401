//! Fuel gauge and its background timer.
//!
//! The level is the only state shared between the render frame and the
//! timer thread. Every mutation goes through one mutex, so a refill on
//! consumption can never be overwritten by a decrement computed from a
//! stale read.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Decrementing counter with refill-on-event semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelGauge {
    level: i32,
    full: i32,
}

impl FuelGauge {
    pub fn new(full: i32) -> Self {
        Self { level: full, full }
    }

    /// Burn one unit. There is no floor: an empty tank keeps counting down.
    pub fn tick(&mut self) -> i32 {
        self.level = self.level.saturating_sub(1);
        self.level
    }

    /// Refill to the full level.
    pub fn reset(&mut self) -> i32 {
        self.level = self.full;
        self.level
    }

    pub fn level(&self) -> i32 {
        self.level
    }

    pub fn full(&self) -> i32 {
        self.full
    }

    /// Level as a progress bar renders it, clamped to `[0, full]`.
    pub fn display_level(&self) -> i32 {
        self.level.clamp(0, self.full.max(0))
    }
}

/// Thread-safe handle to one gauge. Clones share the same level.
#[derive(Debug, Clone)]
pub struct SharedFuelGauge {
    inner: Arc<Mutex<FuelGauge>>,
}

impl SharedFuelGauge {
    pub fn new(full: i32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FuelGauge::new(full))),
        }
    }

    /// Exclusive access for multi-step updates. The gauge is a plain
    /// integer, so a poisoned lock is still consistent and is recovered.
    pub fn lock(&self) -> MutexGuard<'_, FuelGauge> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tick(&self) -> i32 {
        self.lock().tick()
    }

    pub fn reset(&self) -> i32 {
        self.lock().reset()
    }

    pub fn level(&self) -> i32 {
        self.lock().level()
    }

    pub fn display_level(&self) -> i32 {
        self.lock().display_level()
    }
}

/// Background timer that ticks a shared gauge at a fixed period.
///
/// Stops when [`FuelTimer::stop`] is called or the timer is dropped.
#[derive(Debug)]
pub struct FuelTimer {
    stop_tx: Option<mpsc::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl FuelTimer {
    pub fn start(gauge: SharedFuelGauge, period: Duration) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("oilrun-fuel-timer".into())
            .spawn(move || loop {
                match stop_rx.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => {
                        let level = gauge.tick();
                        tracing::trace!(level, "fuel tick");
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        tracing::debug!(period_ms = period.as_millis() as u64, "fuel timer started");
        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the thread and wait for it to exit. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("fuel timer thread panicked");
            }
            tracing::debug!("fuel timer stopped");
        }
    }
}

impl Drop for FuelTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
