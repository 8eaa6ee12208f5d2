//! 16x2 character LCD (HD44780) behind a PCF8574 I2C backpack.
//!
//! The backpack maps one I2C byte onto the panel's control lines:
//! data nibble in the high four bits, then EN / RW / RS / backlight in the
//! low four. Every panel byte therefore costs four bus writes (two nibble
//! transfers, each strobed with EN).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: owns the `I2cDriver` and talks to the real panel.
//! On host/test: renders into an in-memory character grid that tests can
//! read back row by row.

#[cfg(target_os = "espidf")]
use esp_idf_hal::delay::{Ets, BLOCK};
#[cfg(target_os = "espidf")]
use esp_idf_hal::i2c::I2cDriver;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::error::DisplayError;

/// Panel width in characters.
pub const LCD_COLS: usize = 16;
/// Panel height in rows.
pub const LCD_ROWS: usize = 2;

// HD44780 command set (the subset this panel uses).
const CMD_CLEAR: u8 = 0x01;
#[cfg(target_os = "espidf")]
const CMD_ENTRY_MODE: u8 = 0x06; // cursor advances right, no shift
#[cfg(target_os = "espidf")]
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off, blink off
#[cfg(target_os = "espidf")]
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit bus, 2 lines, 5x8 font
const CMD_SET_CGRAM: u8 = 0x40;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM base address per row.
const ROW_OFFSETS: [u8; LCD_ROWS] = [0x00, 0x40];

// PCF8574 bit assignments.
#[cfg(target_os = "espidf")]
const BIT_RS: u8 = 0x01;
#[cfg(target_os = "espidf")]
const BIT_EN: u8 = 0x04;
#[cfg(target_os = "espidf")]
const BIT_BACKLIGHT: u8 = 0x08;

pub struct I2cLcd {
    addr: u8,
    col: usize,
    row: usize,
    #[cfg(target_os = "espidf")]
    i2c: I2cDriver<'static>,
    #[cfg(target_os = "espidf")]
    bus_fault: bool,
    #[cfg(not(target_os = "espidf"))]
    grid: [[u8; LCD_COLS]; LCD_ROWS],
    #[cfg(not(target_os = "espidf"))]
    glyphs: [[u8; 8]; 8],
}

// ── Bus scan ──────────────────────────────────────────────────

/// Probe every 7-bit address and return the first device that ACKs.
/// Startup aborts if this comes back empty — the panel is not optional.
#[cfg(target_os = "espidf")]
pub fn scan_bus(i2c: &mut I2cDriver<'static>) -> Option<u8> {
    (0x08..=0x77).find(|&addr| i2c.write(addr, &[], BLOCK).is_ok())
}

impl I2cLcd {
    // ── Construction ──────────────────────────────────────────

    /// Take ownership of the bus and run the HD44780 4-bit init sequence.
    #[cfg(target_os = "espidf")]
    pub fn new(i2c: I2cDriver<'static>, addr: u8) -> Result<Self, DisplayError> {
        let mut lcd = Self {
            addr,
            col: 0,
            row: 0,
            i2c,
            bus_fault: false,
        };
        lcd.init()?;
        Ok(lcd)
    }

    /// Host construction: an in-memory panel at the given address.
    #[cfg(not(target_os = "espidf"))]
    pub fn new(addr: u8) -> Result<Self, DisplayError> {
        Ok(Self {
            addr,
            col: 0,
            row: 0,
            grid: [[b' '; LCD_COLS]; LCD_ROWS],
            glyphs: [[0; 8]; 8],
        })
    }

    /// The backpack address this panel answers on.
    pub fn address(&self) -> u8 {
        self.addr
    }

    // ── Panel operations ──────────────────────────────────────

    /// Blank the panel and home the cursor.
    pub fn clear(&mut self) {
        self.command(CMD_CLEAR);
        #[cfg(target_os = "espidf")]
        Ets::delay_us(2_000);
        #[cfg(not(target_os = "espidf"))]
        {
            self.grid = [[b' '; LCD_COLS]; LCD_ROWS];
        }
        self.col = 0;
        self.row = 0;
    }

    /// Move the cursor. Out-of-range coordinates clamp to the panel edge.
    pub fn move_to(&mut self, col: usize, row: usize) {
        self.col = col.min(LCD_COLS - 1);
        self.row = row.min(LCD_ROWS - 1);
        self.set_ddram_cursor();
    }

    /// Write text at the cursor, advancing and wrapping to the next row at
    /// the panel edge. Bytes 0x00–0x07 select the matching custom glyph.
    pub fn putstr(&mut self, s: &str) {
        for byte in s.bytes() {
            if self.col >= LCD_COLS {
                self.col = 0;
                self.row = (self.row + 1) % LCD_ROWS;
                self.set_ddram_cursor();
            }
            self.put_byte(byte);
            self.col += 1;
        }
    }

    /// Load a 5x8 bitmap into one of the eight CGRAM glyph slots. The
    /// glyph is referenced afterwards by embedding `slot as char` in text.
    pub fn custom_char(&mut self, slot: u8, map: &[u8; 8]) {
        let slot = slot & 0x07;
        self.command(CMD_SET_CGRAM | (slot << 3));
        for &line in map {
            self.data(line);
        }
        #[cfg(not(target_os = "espidf"))]
        {
            self.glyphs[slot as usize] = *map;
        }
        // CGRAM writes leave the address counter in CGRAM; return to DDRAM.
        self.set_ddram_cursor();
    }

    // ── Host inspection (tests) ───────────────────────────────

    /// The rendered text of one row, trailing blanks included.
    #[cfg(not(target_os = "espidf"))]
    pub fn row_bytes(&self, row: usize) -> &[u8; LCD_COLS] {
        &self.grid[row]
    }

    /// A registered glyph bitmap.
    #[cfg(not(target_os = "espidf"))]
    pub fn glyph(&self, slot: u8) -> [u8; 8] {
        self.glyphs[(slot & 0x07) as usize]
    }

    // ── Internal ──────────────────────────────────────────────

    fn set_ddram_cursor(&mut self) {
        let addr = ROW_OFFSETS[self.row] + self.col as u8;
        self.command(CMD_SET_DDRAM | addr);
    }

    #[cfg(target_os = "espidf")]
    fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on: force the controller into 4-bit mode (three 0x03
        // nibbles, then 0x02), per the HD44780 datasheet reset sequence.
        Ets::delay_us(50_000);
        self.try_nibble(0x03, false)?;
        Ets::delay_us(4_500);
        self.try_nibble(0x03, false)?;
        Ets::delay_us(4_500);
        self.try_nibble(0x03, false)?;
        Ets::delay_us(150);
        self.try_nibble(0x02, false)?;

        self.command(CMD_FUNCTION_SET);
        self.command(CMD_DISPLAY_ON);
        self.command(CMD_CLEAR);
        Ets::delay_us(2_000);
        self.command(CMD_ENTRY_MODE);
        Ok(())
    }

    fn command(&mut self, cmd: u8) {
        self.send(cmd, false);
    }

    fn data(&mut self, value: u8) {
        self.send(value, true);
    }

    fn put_byte(&mut self, byte: u8) {
        self.data(byte);
        #[cfg(not(target_os = "espidf"))]
        {
            self.grid[self.row][self.col] = byte;
        }
    }

    #[cfg(target_os = "espidf")]
    fn send(&mut self, value: u8, rs: bool) {
        self.nibble(value >> 4, rs);
        self.nibble(value & 0x0F, rs);
        Ets::delay_us(50);
    }

    #[cfg(not(target_os = "espidf"))]
    fn send(&mut self, _value: u8, _rs: bool) {}

    /// Strobe one nibble onto the panel: data + EN high, then EN low.
    #[cfg(target_os = "espidf")]
    fn nibble(&mut self, nibble: u8, rs: bool) {
        let byte = (nibble << 4) | BIT_BACKLIGHT | if rs { BIT_RS } else { 0 };
        self.bus_write(byte | BIT_EN);
        self.bus_write(byte);
    }

    #[cfg(target_os = "espidf")]
    fn try_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let byte = (nibble << 4) | BIT_BACKLIGHT | if rs { BIT_RS } else { 0 };
        self.i2c
            .write(self.addr, &[byte | BIT_EN], BLOCK)
            .and_then(|()| self.i2c.write(self.addr, &[byte], BLOCK))
            .map_err(|_| DisplayError::BusWriteFailed)
    }

    #[cfg(target_os = "espidf")]
    fn bus_write(&mut self, byte: u8) {
        if self.i2c.write(self.addr, &[byte], BLOCK).is_err() && !self.bus_fault {
            warn!("LCD: I2C write failed, panel output degraded");
            self.bus_fault = true;
        }
    }
}
