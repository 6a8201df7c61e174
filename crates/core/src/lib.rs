//! usb-geiger-core: report codec, device session, and discovery for the
//! Strawberry Linux USB-GEIGER V2 counter.
//!
//! The counter is a USB HID device that answers a 7-byte command report with
//! a 7-byte value report holding its pulse count and elapsed time, and
//! exposes its firmware date as a feature report.

pub mod config;
pub mod device;
pub mod error;
pub mod poll;
pub mod report;
pub mod session;
pub mod transport;

/// Strawberry Linux USB Vendor ID.
pub const USB_GEIGER_VID: u16 = 0x1774;

/// USB-GEIGER V2 Product ID.
pub const USB_GEIGER_PID: u16 = 0x1002;
