// src/client.rs

//! Device-file access for user-space tools (requires the `std` feature).

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::calibration::DeviceIo;
use crate::common::{command::Command, error::AirtuneError, limits::DEFAULT_DEVICE_PATH, reading::parse_reading};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("error writing to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("error parsing reading from {path}: {source}")]
    Parse { path: PathBuf, source: AirtuneError },

    /// Command text that did not fit the fixed formatting buffer.
    #[error("could not format command: {0}")]
    Format(AirtuneError),
}

/// A device node, e.g. `/dev/airtune`, accessed through the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFile {
    path: PathBuf,
}

impl DeviceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DeviceFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes raw text to the device in a single write call.
    pub fn write_raw(&self, text: &str) -> Result<(), ClientError> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| ClientError::Open { path: self.path.clone(), source })?;
        file.write_all(text.as_bytes())
            .map_err(|source| ClientError::Write { path: self.path.clone(), source })?;
        debug!(path = %self.path.display(), text, "command written");
        Ok(())
    }
}

impl Default for DeviceFile {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_PATH)
    }
}

impl DeviceIo for DeviceFile {
    type Error = ClientError;

    /// Reads the whole file: one line, then end-of-stream.
    fn read_reading(&mut self) -> Result<i64, Self::Error> {
        let bytes = fs::read(&self.path)
            .map_err(|source| ClientError::Open { path: self.path.clone(), source })?;
        parse_reading(&bytes).map_err(|source| ClientError::Parse { path: self.path.clone(), source })
    }

    fn write_command(&mut self, command: &Command) -> Result<(), Self::Error> {
        let text = command.format_into().map_err(ClientError::Format)?;
        self.write_raw(&text)
    }
}
