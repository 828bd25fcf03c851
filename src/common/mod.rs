// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod config;
pub mod error;
pub mod hal_traits;
pub mod limits;
pub mod parameter;
pub mod reading;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{Command, CommandFrame, CommandText};

// From config.rs
pub use config::{DeviceConfig, MalformedWritePolicy, ZeroValuePolicy};

// From error.rs
pub use error::AirtuneError;

// From hal_traits.rs
pub use hal_traits::{AirflowSensor, CallerBuffer};

// From parameter.rs
pub use parameter::Parameter;

// From reading.rs
pub use reading::{parse_reading, render_reading, ReadingLine};

// From limits.rs (constants - users can access via common::limits::*)
pub use limits::COMMAND_BUFFER_CAPACITY;
