// src/common/hal_traits.rs

use core::convert::Infallible;
use core::fmt::Debug;

/// Capabilities consumed from the airflow sensor driver.
///
/// Acquisition and the actual application of gain, offset and reference are the
/// driver's business. From the protocol's point of view every call succeeds.
pub trait AirflowSensor {
    /// Takes a fresh reading. Never cached by callers.
    fn read_sensor(&mut self) -> i64;

    fn set_gain(&mut self, gain: i64);

    fn set_offset(&mut self, offset: i64);

    /// Sets the output reference value.
    fn set_reference_value(&mut self, reference: i64);
}

impl<S: AirflowSensor + ?Sized> AirflowSensor for &mut S {
    fn read_sensor(&mut self) -> i64 {
        (**self).read_sensor()
    }

    fn set_gain(&mut self, gain: i64) {
        (**self).set_gain(gain)
    }

    fn set_offset(&mut self, offset: i64) {
        (**self).set_offset(offset)
    }

    fn set_reference_value(&mut self, reference: i64) {
        (**self).set_reference_value(reference)
    }
}

/// Destination memory supplied by the reader.
///
/// Stands in for the host's copy-to-caller primitive: a host binding implements
/// it over its user-space pointer and reports faults through `Error`.
pub trait CallerBuffer {
    /// Associated error type for failed transfers.
    type Error: Debug;

    /// Maximum number of bytes the caller asked for.
    fn capacity(&self) -> usize;

    /// Copies `bytes` to the start of the caller's memory.
    ///
    /// Callers never pass more than `capacity()` bytes.
    fn copy_from_device(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

impl CallerBuffer for [u8] {
    type Error = Infallible;

    fn capacity(&self) -> usize {
        self.len()
    }

    fn copy_from_device(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        let n = bytes.len().min(self.len());
        self[..n].copy_from_slice(&bytes[..n]);
        Ok(())
    }
}

impl<const N: usize> CallerBuffer for [u8; N] {
    type Error = Infallible;

    fn capacity(&self) -> usize {
        N
    }

    fn copy_from_device(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        self.as_mut_slice().copy_from_device(bytes)
    }
}
