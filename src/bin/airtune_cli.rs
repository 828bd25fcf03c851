// src/bin/airtune_cli.rs

use std::path::PathBuf;
use std::process::ExitCode;

use airtune::calibration::{CalibrationSettings, Calibrator};
use airtune::client::DeviceFile;
use airtune::common::limits::DEFAULT_DEVICE_PATH;
use clap::{Parser, ValueEnum};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> tracing::level_filters::LevelFilter {
        match self {
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        }
    }
}

fn init_logging(level: LogLevel) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Send a tuning command to the airflow sensor, or calibrate it.
#[derive(Parser, Debug)]
#[command(name = "airtune-cli", version, about = "Airflow sensor tuning tool")]
struct Cli {
    /// Device node to talk to.
    #[arg(long, env = "AIRTUNE_DEVICE", default_value = DEFAULT_DEVICE_PATH)]
    device: PathBuf,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: LogLevel,

    /// Readings averaged per calibration step.
    #[arg(long, default_value_t = 100)]
    samples: u32,

    /// Reference steps in the calibration sweep.
    #[arg(long, default_value_t = 10)]
    increments: u32,

    /// Command to pass to the device, e.g. `G=1000`. Calibrates when omitted.
    command: Option<String>,
}

fn run(cli: Cli) -> Result<(), String> {
    let device = DeviceFile::new(&cli.device);

    if let Some(command) = cli.command {
        println!("Passing '{}' to {}", command, cli.device.display());
        return device.write_raw(&command).map_err(|e| e.to_string());
    }

    let settings = CalibrationSettings {
        sample_size: cli.samples,
        increments: cli.increments,
        ..CalibrationSettings::default()
    };
    let mut calibrator = Calibrator::with_settings(device, settings);

    println!("Setting initial values:");
    calibrator.set_initial_values().map_err(|e| e.to_string())?;
    println!("\t{:<18} {:>5}", "Gain set to", settings.initial_gain);
    println!("\t{:<18} {:>5}", "Offset set to", settings.initial_offset);

    let result = calibrator.calibrate().map_err(|e| e.to_string())?;
    println!("Results:");
    println!("\t{:<22} {:4.2}", "Gain:", result.gain);
    println!("\t{:<21} {:4.2}", "Offset:", result.offset);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
