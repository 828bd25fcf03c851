// src/lib.rs

#![no_std] // Specify no_std at the crate root

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod calibration;
pub mod common;
pub mod device;

#[cfg(feature = "std")]
pub mod client;

#[cfg(test)]
mod testing;

// Re-export key types for convenience
pub use common::{AirflowSensor, AirtuneError, Command, DeviceConfig, Parameter};
pub use device::{Device, Session};
