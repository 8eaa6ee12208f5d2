//! Display presenter — renders monitor screens onto the character LCD.
//!
//! Two screens exist: the numeric reading screen and the threshold alert
//! screen. Row formatting is pure and host-testable; the degree glyph is
//! loaded into CGRAM slot 0 once at construction and referenced by its
//! control code inside formatted rows.

use core::fmt::Write;

use crate::app::sample::Sample;
use crate::drivers::lcd1602::I2cLcd;

/// CGRAM slot holding the degree symbol.
pub const DEGREE_SLOT: u8 = 0;

/// Control code that selects the degree glyph in panel text.
pub const DEGREE_CHAR: char = '\u{0}';

/// 5x8 bitmap of a small raised circle.
pub const DEGREE_GLYPH: [u8; 8] = [0x0C, 0x12, 0x12, 0x0C, 0x00, 0x00, 0x00, 0x00];

/// One panel row of text. Content past the panel edge is clipped.
pub type Row = heapless::String<16>;

/// Format the two reading-screen rows.
pub fn reading_rows(sample: &Sample) -> (Row, Row) {
    let mut top = Row::new();
    let _ = write!(top, "Temperature:{}{}C", sample.temperature_c, DEGREE_CHAR);
    let mut bottom = Row::new();
    let _ = write!(bottom, "Humidity:   {}%", sample.humidity_pct);
    (top, bottom)
}

/// Format the two alert-screen rows.
pub fn alert_rows(threshold_c: i8) -> (Row, Row) {
    let mut top = Row::new();
    let _ = write!(top, "Temperature");
    let mut bottom = Row::new();
    let _ = write!(bottom, "exceeded {}{}C", threshold_c, DEGREE_CHAR);
    (top, bottom)
}

/// Owns the panel and knows how to draw each screen.
pub struct DisplayPresenter {
    lcd: I2cLcd,
}

impl DisplayPresenter {
    /// Wrap the panel and register the degree glyph.
    pub fn new(mut lcd: I2cLcd) -> Self {
        lcd.custom_char(DEGREE_SLOT, &DEGREE_GLYPH);
        Self { lcd }
    }

    pub fn show_reading(&mut self, sample: &Sample) {
        let (top, bottom) = reading_rows(sample);
        self.draw(&top, &bottom);
    }

    pub fn show_alert(&mut self, threshold_c: i8) {
        let (top, bottom) = alert_rows(threshold_c);
        self.draw(&top, &bottom);
    }

    pub fn clear(&mut self) {
        self.lcd.clear();
    }

    /// Borrow the panel (host tests read the grid back).
    #[cfg(not(target_os = "espidf"))]
    pub fn lcd(&self) -> &I2cLcd {
        &self.lcd
    }

    fn draw(&mut self, top: &str, bottom: &str) {
        self.lcd.move_to(0, 0);
        self.lcd.putstr(top);
        self.lcd.move_to(0, 1);
        self.lcd.putstr(bottom);
    }
}
