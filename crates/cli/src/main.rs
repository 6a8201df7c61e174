//! usbgeiger CLI: read pulse counts from USB-GEIGER counters.

mod output;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use usb_geiger_core::config::PollConfig;
use usb_geiger_core::device::HidApiBackend;
use usb_geiger_core::poll::{self, DeviceSelector};

#[derive(Parser)]
#[command(
    name = "usbgeiger",
    version,
    disable_version_flag = true,
    about = "Read pulse counts from Strawberry Linux USB-GEIGER counters"
)]
struct Cli {
    /// Enable debug traces (raw reports, device descriptors).
    #[arg(short, long)]
    debug: bool,

    /// List matching devices instead of reading them.
    #[arg(short, long)]
    list: bool,

    /// Device number to read (0 = all).
    #[arg(short, long = "select", value_name = "N", default_value_t = 0)]
    select: usize,

    /// Show the firmware version of each device.
    #[arg(short = 'V', long)]
    show_version: bool,

    /// Clear the pulse counter after reading.
    #[arg(short = 'C', long)]
    clear: bool,

    /// Print machine-readable JSON.
    #[arg(long)]
    json: bool,

    /// Print version.
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    fn poll_config(&self) -> PollConfig {
        PollConfig {
            selector: DeviceSelector::from_number(self.select),
            clear_counter: self.clear,
            show_version: self.show_version,
            debug: self.debug,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.poll_config();

    let filter = config.log_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "Starting usbgeiger");

    let backend = HidApiBackend::new().context("hidapi init")?;

    if cli.list {
        let devices = poll::list_devices(&backend)?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output::ListingOutput::new(&devices))?
            );
        } else {
            println!("{}", output::listing_text(&devices));
        }
        return Ok(ExitCode::SUCCESS);
    }

    let timestamp = chrono::Local::now()
        .format(output::TIMESTAMP_FORMAT)
        .to_string();
    let summary = poll::poll_devices(&backend, &config)?;

    for outcome in &summary.outcomes {
        if let Err(e) = &outcome.result {
            eprintln!("error: device {} ({}): {e}", outcome.number, outcome.path);
        }
    }

    if cli.json {
        let out = output::PollOutput::new(&timestamp, &config, &summary);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", output::reading_line(&timestamp, &summary));
    }

    Ok(if summary.any_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
