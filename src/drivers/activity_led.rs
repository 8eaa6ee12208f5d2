//! On-board activity LED — lit while a cycle body is running so a glance
//! at the board shows whether the monitor is mid-cycle or cooling down.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the activity GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct ActivityLed {
    on: bool,
}

impl ActivityLed {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::ACTIVITY_LED_GPIO, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for ActivityLed {
    fn default() -> Self {
        Self::new()
    }
}
