//! Device selection and sequential polling across enumerated devices.
//!
//! Devices are numbered from 1 in enumeration order. Each selected device is
//! opened, queried and closed before the next one is touched, and a failure
//! on one device never stops the others from being polled.

use crate::config::PollConfig;
use crate::device::{DeviceBackend, DeviceDescriptor};
use crate::error::{Error, Result};
use crate::report::{SensorReport, VersionReport};
use crate::session;
use crate::{USB_GEIGER_PID, USB_GEIGER_VID};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use tracing::{debug, warn};

/// Which enumerated devices to poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceSelector {
    /// Every matching device.
    #[default]
    All,
    /// Only the device with this 1-based number.
    Number(NonZeroUsize),
}

impl DeviceSelector {
    /// Build a selector from a user-facing device number, where 0 means all.
    pub fn from_number(number: usize) -> Self {
        NonZeroUsize::new(number).map_or(Self::All, Self::Number)
    }

    /// The user-facing device number, 0 for all.
    pub fn number(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Number(n) => n.get(),
        }
    }
}

/// Pick devices by selector, pairing each with its 1-based number.
///
/// A number past the end of the list selects nothing.
pub fn select(
    devices: &[DeviceDescriptor],
    selector: DeviceSelector,
) -> Vec<(usize, &DeviceDescriptor)> {
    match selector {
        DeviceSelector::All => devices.iter().enumerate().map(|(i, d)| (i + 1, d)).collect(),
        DeviceSelector::Number(n) => devices
            .get(n.get() - 1)
            .map(|d| vec![(n.get(), d)])
            .unwrap_or_default(),
    }
}

/// Values read from one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceReading {
    /// Present only when version reporting was requested.
    pub version: Option<VersionReport>,
    pub sensor: SensorReport,
}

/// Result of polling one selected device.
#[derive(Debug)]
pub struct DeviceOutcome {
    /// 1-based position in enumeration order.
    pub number: usize,
    pub path: String,
    pub result: Result<DeviceReading>,
}

/// Outcomes of one polling pass, in enumeration order.
#[derive(Debug, Default)]
pub struct PollSummary {
    pub outcomes: Vec<DeviceOutcome>,
}

impl PollSummary {
    /// Whether any polled device failed.
    pub fn any_failed(&self) -> bool {
        self.outcomes.iter().any(|o| o.result.is_err())
    }

    /// Successful readings with their device numbers.
    pub fn readings(&self) -> impl Iterator<Item = (usize, &DeviceReading)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|r| (o.number, r)))
    }
}

/// Open one device, read it, and close it again.
///
/// When the version is requested and cannot be read, the whole device fails
/// and the sensor is not read.
pub fn poll_device(
    backend: &dyn DeviceBackend,
    device: &DeviceDescriptor,
    config: &PollConfig,
) -> Result<DeviceReading> {
    let handle = backend.open(device)?;

    let version = if config.show_version {
        Some(session::read_version(&*handle)?)
    } else {
        None
    };
    let sensor = session::read_sensor(&*handle, config.clear_counter)?;

    Ok(DeviceReading { version, sensor })
}

/// Enumerate USB-GEIGER devices and poll every selected one in order.
///
/// Fails with [`Error::DeviceNotFound`] only when no device was polled;
/// per-device failures are reported in the summary.
pub fn poll_devices(backend: &dyn DeviceBackend, config: &PollConfig) -> Result<PollSummary> {
    let devices = backend.enumerate(USB_GEIGER_VID, USB_GEIGER_PID)?;
    for (i, device) in devices.iter().enumerate() {
        device.trace(i + 1);
    }
    let selected = select(&devices, config.selector);
    debug!(
        attached = devices.len(),
        selected = selected.len(),
        selector = config.selector.number(),
        "Polling USB-GEIGER devices"
    );

    if selected.is_empty() {
        return Err(Error::DeviceNotFound(match config.selector {
            DeviceSelector::All => "no USB-GEIGER attached".to_string(),
            DeviceSelector::Number(n) => {
                format!("no device number {n} ({} attached)", devices.len())
            }
        }));
    }

    let mut summary = PollSummary::default();
    for (number, device) in selected {
        let result = poll_device(backend, device, config);
        if let Err(ref e) = result {
            warn!(number, path = %device.path, error = %e, "Device poll failed");
        }
        summary.outcomes.push(DeviceOutcome {
            number,
            path: device.path.clone(),
            result,
        });
    }

    Ok(summary)
}

/// Enumerate USB-GEIGER devices with their 1-based numbers.
pub fn list_devices(backend: &dyn DeviceBackend) -> Result<Vec<(usize, DeviceDescriptor)>> {
    let devices = backend.enumerate(USB_GEIGER_VID, USB_GEIGER_PID)?;
    Ok(devices
        .into_iter()
        .enumerate()
        .map(|(i, d)| {
            d.trace(i + 1);
            (i + 1, d)
        })
        .collect())
}
