//! Text and JSON rendering of polling results and device listings.

use serde::Serialize;
use usb_geiger_core::config::PollConfig;
use usb_geiger_core::device::DeviceDescriptor;
use usb_geiger_core::poll::{DeviceReading, PollSummary};

/// Timestamp layout used at the start of a reading line.
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d-%H:%M:%S";

/// Render successful readings as one line:
/// `tm:<timestamp> [vN:YY/MM/DD ]ecN:<count> etN:<seconds> ...`
pub fn reading_line(timestamp: &str, summary: &PollSummary) -> String {
    let mut fields = vec![format!("tm:{timestamp}")];
    for (number, reading) in summary.readings() {
        if let Some(version) = reading.version {
            fields.push(format!("v{number}:{version}"));
        }
        fields.push(format!("ec{number}:{}", reading.sensor.pulse_count));
        fields.push(format!("et{number}:{}", reading.sensor.elapsed_seconds));
    }
    fields.join(" ")
}

/// Render a device listing, one `N:path` line per device plus a count line.
pub fn listing_text(devices: &[(usize, DeviceDescriptor)]) -> String {
    let mut out = String::new();
    for (number, dev) in devices {
        out.push_str(&format!("{number}:{}\n", dev.path));
    }
    out.push_str(&format!("{} device(s) found", devices.len()));
    out
}

#[derive(Debug, Serialize)]
pub struct ListedDevice<'a> {
    pub number: usize,
    #[serde(flatten)]
    pub descriptor: &'a DeviceDescriptor,
}

#[derive(Debug, Serialize)]
pub struct ListingOutput<'a> {
    pub count: usize,
    pub devices: Vec<ListedDevice<'a>>,
}

impl<'a> ListingOutput<'a> {
    pub fn new(devices: &'a [(usize, DeviceDescriptor)]) -> Self {
        Self {
            count: devices.len(),
            devices: devices
                .iter()
                .map(|(number, descriptor)| ListedDevice {
                    number: *number,
                    descriptor,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeviceOutput<'a> {
    pub number: usize,
    pub path: &'a str,
    #[serde(flatten)]
    pub reading: Option<&'a DeviceReading>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PollOutput<'a> {
    pub timestamp: &'a str,
    pub config: &'a PollConfig,
    pub devices: Vec<DeviceOutput<'a>>,
}

impl<'a> PollOutput<'a> {
    pub fn new(timestamp: &'a str, config: &'a PollConfig, summary: &'a PollSummary) -> Self {
        let devices = summary
            .outcomes
            .iter()
            .map(|o| DeviceOutput {
                number: o.number,
                path: &o.path,
                reading: o.result.as_ref().ok(),
                error: o.result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        Self {
            timestamp,
            config,
            devices,
        }
    }
}
