//! System clock adapter.
//!
//! Implements [`TimePort`] for the monitor loop.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! Sleeps go through `std::thread::sleep` on both targets; under ESP-IDF
//! that yields the FreeRTOS task for the duration.

use core::time::Duration;

use crate::app::ports::TimePort;

pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimePort for SystemClock {
    #[cfg(target_os = "espidf")]
    fn uptime(&self) -> Duration {
        // SAFETY: esp_timer_get_time reads a monotonic hardware counter;
        // safe from any task context.
        Duration::from_micros((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64)
    }

    #[cfg(not(target_os = "espidf"))]
    fn uptime(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
