// src/device/mod.rs

// Device-side protocol: the pieces a host binding calls from its
// open/read/write/release entry points.

pub mod dispatcher; // Frame -> sensor capability
pub mod parser; // Write payload -> CommandFrame
pub mod responder; // Sensor reading -> single-shot line

pub use dispatcher::{apply, dispatch};
pub use parser::{parse_command, CommandBuffer};
pub use responder::{respond, SessionCursor};

use crate::common::{
    command::Command,
    config::{DeviceConfig, MalformedWritePolicy},
    error::AirtuneError,
    hal_traits::{AirflowSensor, CallerBuffer},
    limits::COMMAND_BUFFER_CAPACITY,
};
use tracing::{debug, info, warn};

/// State of one open handle.
///
/// Each session owns its own command buffer, so "clear, copy, parse" on one
/// handle cannot interleave with a write on another.
#[derive(Debug, Clone, Default)]
pub struct Session {
    cursor: SessionCursor,
    buffer: CommandBuffer,
}

impl Session {
    fn new() -> Self {
        Session { cursor: SessionCursor::new(), buffer: CommandBuffer::new() }
    }

    pub fn cursor(&self) -> SessionCursor {
        self.cursor
    }

    /// The latest write payload seen on this handle.
    pub fn command_buffer(&self) -> &CommandBuffer {
        &self.buffer
    }
}

/// The sensor exposed as a byte-stream device.
#[derive(Debug)]
pub struct Device<S> {
    sensor: S,
    config: DeviceConfig,
}

impl<S> Device<S>
where
    S: AirflowSensor,
{
    pub fn new(sensor: S) -> Self {
        Self::with_config(sensor, DeviceConfig::default())
    }

    pub fn with_config(sensor: S, config: DeviceConfig) -> Self {
        Device { sensor, config }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn into_inner(self) -> S {
        self.sensor
    }

    /// Opens a handle with a fresh cursor and an empty command buffer.
    pub fn open(&self) -> Session {
        debug!(device = self.config.name, "device opened");
        Session::new()
    }

    pub fn release(&self, session: Session) {
        info!(device = self.config.name, offset = session.cursor.offset(), "device closed");
    }

    /// Reads from a handle: the reading line on the first call, EOF afterwards.
    pub fn read<B>(
        &mut self,
        session: &mut Session,
        buf: &mut B,
    ) -> Result<usize, AirtuneError<B::Error>>
    where
        B: CallerBuffer + ?Sized,
    {
        respond(&mut self.sensor, &mut session.cursor, buf)
    }

    /// Writes a command to a handle.
    ///
    /// Always reports `COMMAND_BUFFER_CAPACITY` bytes accepted, whatever the
    /// payload length. Malformed payloads and unknown headers are logged and
    /// dropped unless the device is configured with
    /// `MalformedWritePolicy::Reject`.
    pub fn write(&mut self, session: &mut Session, payload: &[u8]) -> Result<usize, AirtuneError> {
        match self.write_checked(session, payload) {
            Err(e) if e.is_ignored_write() && self.config.malformed_write == MalformedWritePolicy::Silent => {
                Ok(COMMAND_BUFFER_CAPACITY)
            }
            result => result,
        }
    }

    /// Like [`Device::write`], but parse failures and unknown headers are
    /// always returned, whatever the configured policy.
    pub fn write_checked(&mut self, session: &mut Session, payload: &[u8]) -> Result<usize, AirtuneError> {
        if payload.len() > COMMAND_BUFFER_CAPACITY {
            debug!(
                device = self.config.name,
                len = payload.len(),
                "payload truncated to command buffer capacity"
            );
        }

        self.apply_payload(session, payload).map(|_| COMMAND_BUFFER_CAPACITY)
    }

    fn apply_payload(&mut self, session: &mut Session, payload: &[u8]) -> Result<Command, AirtuneError> {
        let frame = match session.buffer.parse(payload, self.config.zero_value) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(device = self.config.name, error = %e, "ignoring command; could not parse");
                return Err(e);
            }
        };
        dispatch(&mut self.sensor, frame)
    }
}
