//! Device session: one request/response exchange against an open device.
//!
//! A sensor read is a synchronous write-then-read pair; a version read is a
//! single feature report query. Neither operation retries.

use crate::error::{Error, Result};
use crate::report::{self, SensorReport, VersionReport, REPORT_LEN};
use crate::transport::HidTransport;
use tracing::debug;

/// Upper bound on how long a sensor read waits for the device's reply.
pub const READ_TIMEOUT_MS: i32 = 5000;

/// Send a command report and read back the current sensor value.
///
/// With `clear` set the device zeroes its counter once the reply is taken.
pub fn read_sensor(transport: &dyn HidTransport, clear: bool) -> Result<SensorReport> {
    let command = report::encode_command(clear);
    debug!(report_hex = %report::hex_dump(&command), clear, "USB-GEIGER TX");

    transport
        .write(&command)
        .map_err(|e| Error::TransportWrite(e.to_string()))?;

    let mut buf = [0u8; REPORT_LEN];
    let n = transport
        .read_timeout(&mut buf, READ_TIMEOUT_MS)
        .map_err(|e| Error::TransportRead(e.to_string()))?;
    debug!(
        len = n,
        report_hex = %report::hex_dump(buf.get(..n).unwrap_or(&buf)),
        "USB-GEIGER RX"
    );

    if n != REPORT_LEN {
        return Err(Error::Framing {
            expected: REPORT_LEN,
            actual: n,
        });
    }

    report::decode_sensor(&buf)
}

/// Query the firmware version feature report.
pub fn read_version(transport: &dyn HidTransport) -> Result<VersionReport> {
    let mut buf = [0u8; REPORT_LEN];
    buf[0] = report::COMMAND_REPORT_ID;

    let n = transport
        .get_feature_report(&mut buf)
        .map_err(|e| Error::TransportFeature(e.to_string()))?;
    let data = buf.get(..n).ok_or(Error::Framing {
        expected: REPORT_LEN,
        actual: n,
    })?;
    debug!(len = n, report_hex = %report::hex_dump(data), "USB-GEIGER feature RX");

    report::decode_version(data)
}
