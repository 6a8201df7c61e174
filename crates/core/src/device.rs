//! Device model: discovery and connection.

use crate::error::{Error, Result};
use crate::transport::HidTransport;
use serde::{Deserialize, Serialize};
use std::ffi::CStr;
use tracing::{debug, info};

/// An open device, exclusively owned by one caller. Dropping it closes the device.
pub type DeviceHandle = Box<dyn HidTransport>;

/// Information about one enumerated HID device.
///
/// Only the platform path identifies the physical device; the other fields
/// are for display. `path` is a lossy rendering of `raw_path` and is never
/// used to open the device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub path: String,
    /// Platform path exactly as enumerated, including the trailing NUL.
    #[serde(skip)]
    pub raw_path: Vec<u8>,
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub release_number: u16,
    pub manufacturer: Option<String>,
    pub product: Option<String>,
    pub interface_number: i32,
}

impl DeviceDescriptor {
    /// A descriptor for `path` with no metadata filled in.
    pub fn with_path(path: &CStr) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            raw_path: path.to_bytes_with_nul().to_vec(),
            ..Self::default()
        }
    }

    fn from_info(info: &hidapi::DeviceInfo) -> Self {
        Self {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial_number: info.serial_number().map(|s| s.to_string()),
            release_number: info.release_number(),
            manufacturer: info.manufacturer_string().map(|s| s.to_string()),
            product: info.product_string().map(|s| s.to_string()),
            interface_number: info.interface_number(),
            ..Self::with_path(info.path())
        }
    }

    /// The platform path to open, byte-for-byte as enumerated.
    pub fn open_path(&self) -> Result<&CStr> {
        CStr::from_bytes_with_nul(&self.raw_path).map_err(|e| Error::DeviceOpen {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Emit every descriptor field as a debug event.
    pub fn trace(&self, number: usize) {
        debug!(
            number,
            path = %self.path,
            vid = format_args!("0x{:04X}", self.vendor_id),
            pid = format_args!("0x{:04X}", self.product_id),
            serial = self.serial_number.as_deref().unwrap_or(""),
            release = format_args!("0x{:X}", self.release_number),
            manufacturer = self.manufacturer.as_deref().unwrap_or(""),
            product = self.product.as_deref().unwrap_or(""),
            interface = self.interface_number,
            "USB-GEIGER descriptor"
        );
    }
}

/// Source of matching devices and the handles used to talk to them.
pub trait DeviceBackend {
    /// List devices matching the vendor/product pair, in the platform's order.
    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceDescriptor>>;

    /// Open the device at `device.raw_path`.
    fn open(&self, device: &DeviceDescriptor) -> Result<DeviceHandle>;
}

/// Backend over the host HID stack via `hidapi`.
pub struct HidApiBackend {
    api: hidapi::HidApi,
}

impl HidApiBackend {
    /// Initialise the HID library and take a snapshot of attached devices.
    pub fn new() -> Result<Self> {
        let api = hidapi::HidApi::new().map_err(|e| Error::Hid(e.to_string()))?;
        Ok(Self { api })
    }
}

impl DeviceBackend for HidApiBackend {
    fn enumerate(&self, vendor_id: u16, product_id: u16) -> Result<Vec<DeviceDescriptor>> {
        debug!("Starting HID device enumeration");

        let devices: Vec<DeviceDescriptor> = self
            .api
            .device_list()
            .filter(|info| info.vendor_id() == vendor_id && info.product_id() == product_id)
            .map(DeviceDescriptor::from_info)
            .inspect(|dev| {
                info!(
                    path = %dev.path,
                    serial = dev.serial_number.as_deref().unwrap_or(""),
                    "Found USB-GEIGER device"
                )
            })
            .collect();

        debug!(count = devices.len(), "Device enumeration complete");
        Ok(devices)
    }

    fn open(&self, device: &DeviceDescriptor) -> Result<DeviceHandle> {
        let handle = self
            .api
            .open_path(device.open_path()?)
            .map_err(|e| Error::DeviceOpen {
                path: device.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(handle))
    }
}
