//! Discrete RGB indicator LED driver.
//!
//! Three digital output pins drive a common-cathode RGB LED. No PWM — the
//! indicator states are plain on/off colours.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three GPIO outputs via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct RgbLed {
    current: (bool, bool, bool),
}

impl RgbLed {
    pub fn new() -> Self {
        Self {
            current: (false, false, false),
        }
    }

    pub fn set(&mut self, r: bool, g: bool, b: bool) {
        hw_init::gpio_write(pins::LED_R_GPIO, r);
        hw_init::gpio_write(pins::LED_G_GPIO, g);
        hw_init::gpio_write(pins::LED_B_GPIO, b);
        self.current = (r, g, b);
    }

    pub fn off(&mut self) {
        self.set(false, false, false);
    }

    pub fn current(&self) -> (bool, bool, bool) {
        self.current
    }
}

impl Default for RgbLed {
    fn default() -> Self {
        Self::new()
    }
}
