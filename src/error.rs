//! Unified error types for the ClimaSense firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! monitor loop's error handling uniform. All variants are `Copy` so they
//! can be passed through the cycle driver without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The climate sensor could not be read or returned corrupt data.
    Sensor(SensorError),
    /// A telemetry publish could not be delivered.
    Publish(PublishError),
    /// The character display could not be initialised or addressed.
    Display(DisplayError),
    /// Peripheral or service initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Publish(e) => write!(f, "publish: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor did not answer within its protocol timing window.
    Timeout,
    /// The reading arrived but its checksum did not match.
    ChecksumMismatch,
    /// The data line could not be driven or sampled.
    GpioFault,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "measurement timed out"),
            Self::ChecksumMismatch => write!(f, "checksum mismatch"),
            Self::GpioFault => write!(f, "data line GPIO fault"),
        }
    }
}

impl core::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Publish errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// The broker session is gone (transport dropped, not yet re-established).
    ConnectionLost,
    /// The broker refused the message.
    BrokerRejected,
    /// The payload could not be rendered as decimal text.
    Encoding,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionLost => write!(f, "broker connection lost"),
            Self::BrokerRejected => write!(f, "broker rejected publish"),
            Self::Encoding => write!(f, "payload encoding failed"),
        }
    }
}

impl core::error::Error for PublishError {}

impl From<PublishError> for Error {
    fn from(e: PublishError) -> Self {
        Self::Publish(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// No device answered the startup bus scan.
    NoDeviceFound,
    /// An I2C transaction to the panel failed.
    BusWriteFailed,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeviceFound => write!(f, "no display found on I2C bus"),
            Self::BusWriteFailed => write!(f, "I2C write to display failed"),
        }
    }
}

impl core::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
