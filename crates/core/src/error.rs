//! Error types for usb-geiger-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// HID subsystem failure (initialisation, enumeration).
    #[error("HID error: {0}")]
    Hid(String),

    /// Writing the command report failed.
    #[error("hid write failed: {0}")]
    TransportWrite(String),

    /// Reading the sensor report failed or timed out.
    #[error("hid read failed: {0}")]
    TransportRead(String),

    /// Feature report retrieval failed.
    #[error("feature report failed: {0}")]
    TransportFeature(String),

    /// A report did not have the fixed wire length.
    #[error("framing error: got {actual} bytes, expected {expected}")]
    Framing { expected: usize, actual: usize },

    /// The device path could not be opened.
    #[error("cannot open device {path}: {reason}")]
    DeviceOpen { path: String, reason: String },

    /// No device matched the selection.
    #[error("device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
