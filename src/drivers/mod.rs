//! Indicator drivers, the character LCD, and one-shot hardware init.

pub mod activity_led;
pub mod buzzer;
pub mod display;
pub mod hw_init;
pub mod lcd1602;
pub mod rgb_led;
