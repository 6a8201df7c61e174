//! HID transport abstraction for device communication.
//!
//! Provides a trait-based transport layer so that real HID devices and
//! mock devices share the same interface.

use thiserror::Error;

/// Failure reported by a transport primitive, carrying its diagnostic text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<hidapi::HidError> for TransportError {
    fn from(err: hidapi::HidError) -> Self {
        Self(err.to_string())
    }
}

/// Abstraction over the raw HID primitives used by a device session.
///
/// Each call blocks the calling thread. Byte counts are returned exactly as
/// the underlying stack reports them; framing checks belong to the caller.
pub trait HidTransport: Send {
    /// Write an output report, returning the number of bytes written.
    fn write(&self, data: &[u8]) -> Result<usize, TransportError>;

    /// Read an input report, waiting at most `timeout_ms` milliseconds.
    ///
    /// Returns `Ok(0)` when the timeout elapses without data.
    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize, TransportError>;

    /// Request and retrieve a feature report in a single blocking call.
    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize, TransportError>;
}

impl HidTransport for hidapi::HidDevice {
    fn write(&self, data: &[u8]) -> Result<usize, TransportError> {
        Ok(hidapi::HidDevice::write(self, data)?)
    }

    fn read_timeout(&self, buf: &mut [u8], timeout_ms: i32) -> Result<usize, TransportError> {
        Ok(hidapi::HidDevice::read_timeout(self, buf, timeout_ms)?)
    }

    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize, TransportError> {
        Ok(hidapi::HidDevice::get_feature_report(self, buf)?)
    }
}
