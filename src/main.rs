use clap::Parser;
use serial_line_monitor::config::{Config, ConfigLoader};
use serial_line_monitor::monitor::{Console, Language, LineMonitor, MonitorSettings, StopFlag};
use serial_line_monitor::port::{list_ports, SystemPortOpener};
use serial_line_monitor::{logging, AppError, AppResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::signal;
use tracing::{error, info};

// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Print every line received on a serial port until interrupted.",
    long_about = "Opens one serial device, polls it for incoming bytes and prints each \
                  decoded line. Settings come from config.toml, LINE_MONITOR_* environment \
                  variables and these flags, in increasing order of priority."
)]
struct Args {
    /// Device address (e.g. COM13 or /dev/ttyUSB0), or a configured alias.
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate.
    #[arg(short, long)]
    baud: Option<u32>,

    /// Read timeout in milliseconds.
    #[arg(short, long, conflicts_with = "timeout")]
    timeout_ms: Option<u64>,

    /// Read timeout in seconds (e.g. 1 or 0.5).
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Load configuration from this file instead of the standard locations.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix every received line with the local time.
    #[arg(long)]
    timestamps: bool,

    /// Console message language: en or ru.
    #[arg(long)]
    lang: Option<Language>,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,

    /// List available serial ports and exit.
    #[arg(short, long)]
    list_ports: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(ref port) = self.port {
            config.serial.port = port.clone();
        }
        if let Some(baud) = self.baud {
            config.serial.baud = baud;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.serial.set_timeout_ms(timeout_ms);
        }
        if let Some(secs) = self.timeout {
            config.serial.timeout = Some(secs);
        }
        if self.timestamps {
            config.monitor.show_timestamps = true;
        }
        if let Some(lang) = self.lang {
            config.monitor.language = lang;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
    }
}

// --- Main Application Entry Point ---
#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "serial_line_monitor exited with an error");
            // Open failures were already explained on the console.
            if !matches!(e, AppError::Monitor(_)) {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> AppResult<()> {
    let mut config = match args.config {
        Some(ref path) => ConfigLoader::load_from(path)?.into_config(),
        None => ConfigLoader::load()?.into_config(),
    };
    args.apply(&mut config);
    config.validate()?;

    logging::init(&config.logging)?;

    if args.list_ports {
        for listing in list_ports()? {
            println!("{}\t{}", listing.port_name, listing.kind);
        }
        return Ok(());
    }

    let stop = StopFlag::new();
    tokio::spawn(shutdown_signal(stop.clone()));

    let console = Console::stdout(config.monitor.language)
        .with_timestamps(config.monitor.show_timestamps);
    let monitor = LineMonitor::new(
        SystemPortOpener,
        MonitorSettings::from_config(&config),
        console,
        stop,
    );

    let report = tokio::task::spawn_blocking(move || monitor.run())
        .await
        .map_err(|e| AppError::Task(e.to_string()))??;

    info!(
        port = %report.port_name,
        lines = report.lines,
        bytes = report.bytes_received,
        "monitor finished"
    );
    Ok(())
}

// --- Graceful Shutdown Handler ---
async fn shutdown_signal(stop: StopFlag) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("signal received, stopping monitor");
    stop.raise();
}
