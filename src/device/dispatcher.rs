// src/device/dispatcher.rs

use crate::common::{
    command::{Command, CommandFrame},
    error::AirtuneError,
    hal_traits::AirflowSensor,
    parameter::Parameter,
};
use tracing::{info, warn};

/// Routes a parsed frame to the matching sensor capability.
///
/// The header is decoded first; an undecodable header is logged as an invalid
/// input header and nothing on the sensor changes. Stateless: every call maps
/// straight to at most one sensor call, with no deduplication.
///
/// Returns the applied command, or `InvalidParameter` so the caller can decide
/// whether to surface it.
pub fn dispatch<S>(sensor: &mut S, frame: CommandFrame) -> Result<Command, AirtuneError>
where
    S: AirflowSensor + ?Sized,
{
    let command = match frame.decode() {
        Ok(command) => command,
        Err(e) => {
            warn!(header = frame.header, value = frame.value, "invalid input header");
            return Err(e);
        }
    };

    apply(sensor, command);
    Ok(command)
}

/// Invokes the sensor capability for an already decoded command.
pub fn apply<S>(sensor: &mut S, command: Command)
where
    S: AirflowSensor + ?Sized,
{
    let value = command.value;
    match command.parameter {
        Parameter::Gain => {
            info!(value, "setting gain");
            sensor.set_gain(value);
        }
        Parameter::Offset => {
            info!(value, "setting offset");
            sensor.set_offset(value);
        }
        Parameter::Reference => {
            info!(value, "setting reference");
            sensor.set_reference_value(value);
        }
    }
}
