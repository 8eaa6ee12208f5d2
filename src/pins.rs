//! GPIO / peripheral pin assignments for the ClimaSense board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers. Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Climate sensor (DHT11, single-wire protocol)
// ---------------------------------------------------------------------------

/// DHT11 data line (open-drain, external pull-up).
pub const DHT_DATA_GPIO: i32 = 21;

// ---------------------------------------------------------------------------
// Indicators
// ---------------------------------------------------------------------------

/// Piezo buzzer (active HIGH).
pub const BUZZER_GPIO: i32 = 22;

/// Discrete RGB indicator LED (common cathode, active HIGH).
pub const LED_R_GPIO: i32 = 26;
pub const LED_G_GPIO: i32 = 27;
pub const LED_B_GPIO: i32 = 28;

/// On-board activity LED — lit while a cycle body is running.
pub const ACTIVITY_LED_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// I2C bus (character LCD backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 8;
pub const I2C_SCL_GPIO: i32 = 9;

/// I2C master clock rate.
pub const I2C_FREQ_HZ: u32 = 400_000;
