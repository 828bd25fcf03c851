// src/calibration/mod.rs

//! User-side calibration: sweep the reference value, average readings at each
//! step, and fit a line through the averages to recover gain and offset.

pub mod regression;

pub use regression::Regression;

use crate::common::{
    command::Command,
    error::AirtuneError,
    hal_traits::AirflowSensor,
    limits::READING_LINE_CAPACITY,
    reading::parse_reading,
};
use crate::device::Device;
use core::convert::Infallible;
use core::fmt::{Debug, Display};
use tracing::{debug, info};

/// Access to a device the way a user-space client sees it.
pub trait DeviceIo {
    /// Associated error type for failed device access.
    type Error: Debug + Display;

    /// Reads one reading (open, read the line, close).
    fn read_reading(&mut self) -> Result<i64, Self::Error>;

    /// Sends one command as wire text.
    fn write_command(&mut self, command: &Command) -> Result<(), Self::Error>;
}

impl<D: DeviceIo + ?Sized> DeviceIo for &mut D {
    type Error = D::Error;

    fn read_reading(&mut self) -> Result<i64, Self::Error> {
        (**self).read_reading()
    }

    fn write_command(&mut self, command: &Command) -> Result<(), Self::Error> {
        (**self).write_command(command)
    }
}

/// In-process access: every call opens and releases its own session.
///
/// Writes go through [`Device::write_checked`], so a command the device drops
/// (e.g. `O=0` under `ZeroValuePolicy::RejectZero`) fails the caller instead of
/// skewing a calibration.
impl<S: AirflowSensor> DeviceIo for Device<S> {
    type Error = AirtuneError;

    fn read_reading(&mut self) -> Result<i64, Self::Error> {
        let mut session = self.open();
        let mut line = [0u8; READING_LINE_CAPACITY];
        let n = self
            .read(&mut session, &mut line)
            .map_err(|e| e.map_transfer::<(), _>(|never: Infallible| match never {}))?;
        self.release(session);
        parse_reading(&line[..n])
    }

    fn write_command(&mut self, command: &Command) -> Result<(), Self::Error> {
        let text = command.format_into()?;
        let mut session = self.open();
        let result = self.write_checked(&mut session, text.as_bytes());
        self.release(session);
        result.map(|_| ())
    }
}

/// Tunables for a calibration run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CalibrationSettings {
    /// Readings averaged per reference step.
    pub sample_size: u32,
    /// Reference steps after the zero step; `increments + 1` points are fitted.
    pub increments: u32,
    /// Reference value added per step.
    pub reference_step: i64,
    /// Gain written before the sweep.
    pub initial_gain: i64,
    /// Offset written before the sweep.
    pub initial_offset: i64,
    /// Averages are divided by this before fitting.
    pub reading_scale: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        CalibrationSettings {
            sample_size: 100,
            increments: 10,
            reference_step: 1000,
            initial_gain: 1000,
            initial_offset: 0,
            reading_scale: 1000.0,
        }
    }
}

/// Result of a calibration run.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Calibration {
    pub gain: f64,
    pub offset: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum CalibrationError<E>
where
    E: Debug + Display,
{
    /// Reading from or writing to the device failed.
    #[error("device access failed: {0}")]
    Device(E),

    #[error("sample size must be non-zero")]
    EmptySample,

    /// The sweep produced no spread in reference values to fit against.
    #[error("regression is degenerate ({points} points)")]
    Degenerate { points: u32 },
}

/// Drives a calibration sweep against a device.
#[derive(Debug)]
pub struct Calibrator<D> {
    device: D,
    settings: CalibrationSettings,
}

impl<D> Calibrator<D>
where
    D: DeviceIo,
{
    pub fn new(device: D) -> Self {
        Self::with_settings(device, CalibrationSettings::default())
    }

    pub fn with_settings(device: D, settings: CalibrationSettings) -> Self {
        Calibrator { device, settings }
    }

    pub fn settings(&self) -> &CalibrationSettings {
        &self.settings
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Writes the known starting gain and offset.
    pub fn set_initial_values(&mut self) -> Result<(), CalibrationError<D::Error>> {
        let gain = Command::gain(self.settings.initial_gain);
        let offset = Command::offset(self.settings.initial_offset);
        self.device.write_command(&gain).map_err(CalibrationError::Device)?;
        self.device.write_command(&offset).map_err(CalibrationError::Device)?;
        info!(gain = gain.value, offset = offset.value, "initial values set");
        Ok(())
    }

    /// Mean of `sample_size` consecutive readings.
    pub fn average_reading(&mut self) -> Result<f64, CalibrationError<D::Error>> {
        let samples = self.settings.sample_size;
        if samples == 0 {
            return Err(CalibrationError::EmptySample);
        }

        let mut sum = 0.0;
        for _ in 0..samples {
            let reading = self.device.read_reading().map_err(CalibrationError::Device)?;
            sum += reading as f64;
        }
        Ok(sum / f64::from(samples))
    }

    /// Sweeps the reference value and fits gain and offset.
    ///
    /// Does not write the initial values; see [`Calibrator::run`].
    pub fn calibrate(&mut self) -> Result<Calibration, CalibrationError<D::Error>> {
        let mut rg = Regression::new();

        for step in 0..=self.settings.increments {
            let reference = i64::from(step).saturating_mul(self.settings.reference_step);
            self.device
                .write_command(&Command::reference(reference))
                .map_err(CalibrationError::Device)?;

            let x = f64::from(step);
            let y = self.average_reading()? / self.settings.reading_scale;
            debug!(step, reference, y, "calibration point");
            rg.add(x, y);
        }

        match (rg.slope(), rg.intercept()) {
            (Some(gain), Some(offset)) => {
                info!(gain, offset, points = rg.points(), "calibration complete");
                Ok(Calibration { gain, offset })
            }
            _ => Err(CalibrationError::Degenerate { points: rg.points() }),
        }
    }

    /// Writes the initial values, then calibrates.
    pub fn run(&mut self) -> Result<Calibration, CalibrationError<D::Error>> {
        self.set_initial_values()?;
        self.calibrate()
    }
}
