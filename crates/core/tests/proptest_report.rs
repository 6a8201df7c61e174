//! Property-based tests for the USB-GEIGER report codec.
//!
//! Uses proptest with 500 cases to check the little-endian field packing and
//! the fixed 7-byte framing rule of every decoder.

use proptest::prelude::*;
use usb_geiger_core::error::Error;
use usb_geiger_core::report::{
    decode_sensor, decode_version, encode_command, MAX_ELAPSED_SECONDS, REPORT_LEN,
};

/// Pack a pulse count and a 24-bit elapsed time the way the device does.
fn pack_sensor(pulse_count: u32, elapsed_seconds: u32) -> Vec<u8> {
    let mut report = pulse_count.to_le_bytes().to_vec();
    report.extend_from_slice(&elapsed_seconds.to_le_bytes()[..3]);
    report
}

/// Strategy: any buffer whose length is not the report length.
fn arb_misframed_bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..=64).prop_filter("not 7 bytes", |v| {
        v.len() != REPORT_LEN
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// decode_sensor recovers both counters from their packed form.
    #[test]
    fn prop_sensor_decode_inverts_packing(
        pulse_count in any::<u32>(),
        elapsed_seconds in 0u32..=MAX_ELAPSED_SECONDS,
    ) {
        let report = decode_sensor(&pack_sensor(pulse_count, elapsed_seconds))
            .map_err(|e| TestCaseError::fail(format!("{e:?}")))?;
        prop_assert_eq!(report.pulse_count, pulse_count);
        prop_assert_eq!(report.elapsed_seconds, elapsed_seconds);
    }

    /// Every 7-byte buffer decodes, and the fields follow the byte-order rule.
    #[test]
    fn prop_sensor_decode_any_seven_bytes(data in any::<[u8; 7]>()) {
        let report = decode_sensor(&data)
            .map_err(|e| TestCaseError::fail(format!("{e:?}")))?;
        let expected_count = u32::from(data[0])
            | u32::from(data[1]) << 8
            | u32::from(data[2]) << 16
            | u32::from(data[3]) << 24;
        let expected_time =
            u32::from(data[4]) | u32::from(data[5]) << 8 | u32::from(data[6]) << 16;
        prop_assert_eq!(report.pulse_count, expected_count);
        prop_assert_eq!(report.elapsed_seconds, expected_time);
        prop_assert!(report.elapsed_seconds <= MAX_ELAPSED_SECONDS);
    }

    /// Version fields are the first three bytes verbatim, whatever the rest holds.
    #[test]
    fn prop_version_decode_takes_first_three_bytes(data in any::<[u8; 7]>()) {
        let version = decode_version(&data)
            .map_err(|e| TestCaseError::fail(format!("{e:?}")))?;
        prop_assert_eq!((version.year, version.month, version.day), (data[0], data[1], data[2]));
    }

    /// decode_sensor rejects any length other than 7 with the actual length.
    #[test]
    fn prop_sensor_decode_rejects_misframed(data in arb_misframed_bytes()) {
        let len = data.len();
        let framed = matches!(
            decode_sensor(&data),
            Err(Error::Framing { expected: REPORT_LEN, actual }) if actual == len
        );
        prop_assert!(framed, "decode_sensor must reject {} bytes", len);
    }

    /// decode_version rejects any length other than 7 with the actual length.
    #[test]
    fn prop_version_decode_rejects_misframed(data in arb_misframed_bytes()) {
        let len = data.len();
        let framed = matches!(
            decode_version(&data),
            Err(Error::Framing { expected: REPORT_LEN, actual }) if actual == len
        );
        prop_assert!(framed, "decode_version must reject {} bytes", len);
    }

    /// The command report only ever differs from all-zero in the clear marker byte.
    #[test]
    fn prop_command_is_zero_padded(clear in any::<bool>()) {
        let command = encode_command(clear);
        prop_assert_eq!(command.len(), REPORT_LEN);
        prop_assert_eq!(command[0], 0);
        prop_assert!(command[2..].iter().all(|&b| b == 0));
        prop_assert_eq!(command[1] != 0, clear);
    }
}
