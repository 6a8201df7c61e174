//! USB-GEIGER report encoding and decoding.
//!
//! Every report exchanged with the counter is exactly 7 bytes:
//! - Command (host → device, output report): `[report_id=0x00, clear_marker, 0, 0, 0, 0, 0]`
//! - Sensor value (device → host, input report): `[c0, c1, c2, c3, t0, t1, t2]`
//!   where `c` is a little-endian u32 pulse count and `t` a little-endian u24
//!   elapsed-seconds counter.
//! - Firmware version (feature report): `[year, month, day, r0, r1, r2, r3]`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Length of every USB-GEIGER report, in bytes.
pub const REPORT_LEN: usize = 7;

/// Report ID placed in byte 0 of the command report.
pub const COMMAND_REPORT_ID: u8 = 0x00;

/// Byte 1 value that asks the device to zero its pulse counter.
pub const CLEAR_MARKER: u8 = 0xAA;

/// Largest value the 3-byte elapsed-time field can carry.
pub const MAX_ELAPSED_SECONDS: u32 = 0x00FF_FFFF;

/// A decoded sensor value report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorReport {
    /// Cumulative pulse count since the last clear.
    pub pulse_count: u32,
    /// Seconds elapsed since the last clear (24-bit).
    pub elapsed_seconds: u32,
}

/// A decoded firmware version feature report.
///
/// Values are reported as the device supplies them; no calendar validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionReport {
    pub year: u8,
    pub month: u8,
    pub day: u8,
}

impl std::fmt::Display for VersionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// Build the command report sent before every sensor read.
pub fn encode_command(clear: bool) -> [u8; REPORT_LEN] {
    let mut buf = [0u8; REPORT_LEN];
    buf[0] = COMMAND_REPORT_ID;
    if clear {
        buf[1] = CLEAR_MARKER;
    }
    buf
}

fn check_len(data: &[u8]) -> Result<&[u8; REPORT_LEN]> {
    data.try_into().map_err(|_| Error::Framing {
        expected: REPORT_LEN,
        actual: data.len(),
    })
}

/// Decode a sensor value report.
///
/// Fails with [`Error::Framing`] unless `data` is exactly [`REPORT_LEN`] bytes.
pub fn decode_sensor(data: &[u8]) -> Result<SensorReport> {
    let buf = check_len(data)?;
    let pulse_count = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let elapsed_seconds = u32::from_le_bytes([buf[4], buf[5], buf[6], 0]);
    Ok(SensorReport {
        pulse_count,
        elapsed_seconds,
    })
}

/// Decode a firmware version feature report. Reserved bytes 3..7 are ignored.
pub fn decode_version(data: &[u8]) -> Result<VersionReport> {
    let buf = check_len(data)?;
    Ok(VersionReport {
        year: buf[0],
        month: buf[1],
        day: buf[2],
    })
}

/// Format raw report bytes as space-separated lowercase hex for debug traces.
pub fn hex_dump(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_command_without_clear_is_all_zero() {
        assert_eq!(encode_command(false), [0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn encode_command_with_clear_sets_marker() {
        assert_eq!(encode_command(true), [0, 0xAA, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn decode_sensor_small_values() {
        let report = decode_sensor(&[0x01, 0x00, 0x00, 0x00, 0x0A, 0x00, 0x00]).unwrap();
        assert_eq!(
            report,
            SensorReport {
                pulse_count: 1,
                elapsed_seconds: 10
            }
        );
    }

    #[test]
    fn decode_sensor_is_little_endian() {
        let report = decode_sensor(&[0x78, 0x56, 0x34, 0x12, 0x03, 0x02, 0x01]).unwrap();
        assert_eq!(report.pulse_count, 0x1234_5678);
        assert_eq!(report.elapsed_seconds, 0x0001_0203);
    }

    #[test]
    fn decode_sensor_maximum_values() {
        let report = decode_sensor(&[0xFF; REPORT_LEN]).unwrap();
        assert_eq!(report.pulse_count, u32::MAX);
        assert_eq!(report.elapsed_seconds, MAX_ELAPSED_SECONDS);
        assert_eq!(report.elapsed_seconds, 16_777_215);
    }

    #[test]
    fn decode_sensor_rejects_short_and_long_input() {
        for len in [0usize, 1, 6, 8, 64] {
            let data = vec![0u8; len];
            match decode_sensor(&data) {
                Err(Error::Framing { expected, actual }) => {
                    assert_eq!(expected, REPORT_LEN);
                    assert_eq!(actual, len);
                }
                other => panic!("expected framing error for {len} bytes, got {other:?}"),
            }
        }
    }

    #[test]
    fn decode_version_maps_first_three_bytes() {
        let version = decode_version(&[21, 3, 15, 0, 0, 0, 0]).unwrap();
        assert_eq!(
            version,
            VersionReport {
                year: 21,
                month: 3,
                day: 15
            }
        );
    }

    #[test]
    fn decode_version_ignores_reserved_bytes() {
        let version = decode_version(&[21, 3, 15, 0xDE, 0xAD, 0xBE, 0xEF]).unwrap();
        assert_eq!(version.year, 21);
        assert_eq!(version.month, 3);
        assert_eq!(version.day, 15);
    }

    #[test]
    fn decode_version_does_not_validate_calendar() {
        let version = decode_version(&[0, 13, 99, 0, 0, 0, 0]).unwrap();
        assert_eq!((version.year, version.month, version.day), (0, 13, 99));
    }

    #[test]
    fn decode_version_rejects_wrong_length() {
        assert!(matches!(
            decode_version(&[21, 3, 15]),
            Err(Error::Framing { actual: 3, .. })
        ));
    }

    #[test]
    fn version_display_is_zero_padded() {
        let version = VersionReport {
            year: 21,
            month: 3,
            day: 5,
        };
        assert_eq!(version.to_string(), "21/03/05");
    }

    #[test]
    fn hex_dump_formats_bytes() {
        assert_eq!(hex_dump(&encode_command(true)), "00 aa 00 00 00 00 00");
        assert_eq!(hex_dump(&[]), "");
    }
}
