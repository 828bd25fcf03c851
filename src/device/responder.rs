// src/device/responder.rs

use crate::common::{
    error::AirtuneError,
    hal_traits::{AirflowSensor, CallerBuffer},
    reading::render_reading,
};
use tracing::{error, trace};

/// Per-handle read position.
///
/// Starts at zero on open. Once a read moves it past zero, every further read
/// on that handle reports end-of-stream.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SessionCursor {
    offset: u64,
}

impl SessionCursor {
    pub const fn new() -> Self {
        SessionCursor { offset: 0 }
    }

    #[inline]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// True once the reading has been handed out.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.offset > 0
    }

    fn advance(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count as u64);
    }
}

/// Serves one read request on a session.
///
/// On a fresh cursor the sensor is queried and `"<reading>\n"` is copied to
/// `buf`, truncated to its capacity. The cursor advances by the bytes copied.
/// An exhausted cursor yields `Ok(0)` without touching the sensor.
///
/// A zero-capacity request leaves the cursor at zero, so the next read queries
/// the sensor again.
///
/// # Errors
///
/// `TransferFault` if copying to the caller fails; the cursor is not moved.
pub fn respond<S, B>(
    sensor: &mut S,
    cursor: &mut SessionCursor,
    buf: &mut B,
) -> Result<usize, AirtuneError<B::Error>>
where
    S: AirflowSensor + ?Sized,
    B: CallerBuffer + ?Sized,
{
    if cursor.is_exhausted() {
        return Ok(0);
    }

    let reading = sensor.read_sensor();
    let line = render_reading(reading)?;
    let bytes = line.as_bytes();
    let count = bytes.len().min(buf.capacity());

    if let Err(e) = buf.copy_from_device(&bytes[..count]) {
        error!(?e, "copy of reading to caller failed");
        return Err(AirtuneError::TransferFault(e));
    }

    cursor.advance(count);
    trace!(reading, count, "reading delivered");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FaultyBuffer, MockSensor, MockTransferError};

    #[test]
    fn test_first_read_returns_line_then_eof() {
        let mut sensor = MockSensor::new(4321);
        let mut cursor = SessionCursor::new();
        let mut buf = [0u8; 32];

        let n = respond(&mut sensor, &mut cursor, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"4321\n");
        assert_eq!(cursor.offset(), 5);

        let n = respond(&mut sensor, &mut cursor, &mut buf).unwrap();
        assert_eq!(n, 0);
        assert_eq!(sensor.reads, 1); // EOF does not touch the sensor
    }

    #[test]
    fn test_negative_reading() {
        let mut sensor = MockSensor::new(-250);
        let mut cursor = SessionCursor::new();
        let mut buf = [0u8; 32];
        let n = respond(&mut sensor, &mut cursor, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"-250\n");
    }

    #[test]
    fn test_short_transfer_still_ends_epoch() {
        let mut sensor = MockSensor::new(123456);
        let mut cursor = SessionCursor::new();
        let mut buf = [0u8; 3];

        assert_eq!(respond(&mut sensor, &mut cursor, &mut buf).unwrap(), 3);
        assert_eq!(&buf, b"123");
        assert!(cursor.is_exhausted());
        assert_eq!(respond(&mut sensor, &mut cursor, &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_zero_capacity_requeries_sensor() {
        let mut sensor = MockSensor::new(10).with_drift(1);
        let mut cursor = SessionCursor::new();
        let mut empty = [0u8; 0];
        let mut buf = [0u8; 8];

        assert_eq!(respond(&mut sensor, &mut cursor, &mut empty).unwrap(), 0);
        assert!(!cursor.is_exhausted());

        let n = respond(&mut sensor, &mut cursor, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"11\n");
        assert_eq!(sensor.reads, 2);
    }

    #[test]
    fn test_transfer_fault_keeps_cursor() {
        let mut sensor = MockSensor::new(42);
        let mut cursor = SessionCursor::new();
        let mut faulty = FaultyBuffer::new(16);

        let result = respond(&mut sensor, &mut cursor, &mut faulty);
        assert_eq!(result, Err(AirtuneError::TransferFault(MockTransferError)));
        assert_eq!(cursor.offset(), 0);
        assert_eq!(faulty.attempts, 1);

        // The next read on the same handle tries again.
        let mut buf = [0u8; 16];
        let n = respond(&mut sensor, &mut cursor, &mut buf).unwrap();
        assert_eq!(&buf[..n], b"42\n");
    }
}
