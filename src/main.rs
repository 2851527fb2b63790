//! switch-configgen - Switch emulator launcher
//!
//! Writes the controller configuration of yuzu or Ryujinx for the players the
//! front-end assigned, then starts the emulator.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use switch_configgen::config::LaunchRequest;
use switch_configgen::drivers::{self, GenerationContext};
use switch_configgen::input::gamepad::{
    default_enumerator, diagnostics, resolve_slots, PhysicalDevice, Udevadm,
};
use switch_configgen::paths::AppPaths;

/// Switch configgen - controller mapping and launch for yuzu and Ryujinx
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the launch request
    #[arg(short, long, default_value = "launch.yaml")]
    request: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// userdata root (defaults to /userdata when present)
    #[arg(long, env = "SWITCH_CONFIGGEN_ROOT")]
    root: Option<PathBuf>,

    /// YAML device list used instead of SDL enumeration
    #[arg(long)]
    devices: Option<PathBuf>,

    /// List enumerated controllers and exit
    #[arg(long)]
    list_devices: bool,

    /// Write the configuration and print the command without launching
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    let code = run(&args)?;
    std::process::exit(code);
}

fn run(args: &Args) -> Result<i32> {
    let paths = AppPaths::detect(args.root.as_deref());
    let enumerator = default_enumerator(args.devices.as_deref());

    if args.list_devices {
        let devices = enumerator.enumerate(&Udevadm)?;
        diagnostics::print_device_list(&devices);
        return Ok(0);
    }

    info!("Starting switch-configgen...");
    info!("Launch request: {}", args.request.display());

    let request = LaunchRequest::load(&args.request)?;
    let options = request.switch_options();
    let debug = paths.debug_controllers_enabled();
    if debug {
        info!("📋 Controller debug dumps enabled");
    }

    let driver = drivers::for_emulator(request.emulator);
    info!("Driver: {} ({})", driver.name(), request.rom.display());

    // Enumeration failure aborts before any file is touched
    let devices: Vec<PhysicalDevice> = if driver.auto_controller_config(&options) {
        enumerator
            .enumerate(&Udevadm)
            .context("Controller enumeration failed")?
    } else {
        Vec::new()
    };
    if debug {
        diagnostics::log_devices(&devices);
    }

    let players = request.players();
    let slots = if driver.auto_controller_config(&options) {
        resolve_slots(&players, &devices, &Udevadm, &options, driver.max_players())
    } else {
        Vec::new()
    };
    if debug {
        diagnostics::log_slots(&slots);
    }

    let ctx = GenerationContext {
        emulator: request.emulator,
        paths: &paths,
        request: &request,
        options: &options,
        slots: &slots,
        debug,
    };

    let command = driver.command(&ctx)?;
    driver.write_config(&ctx)?;

    if args.dry_run {
        println!("{}", command);
        return Ok(0);
    }

    let status = command.spawn()?;
    if !status.success() {
        warn!("⚠️  {} exited with {}", driver.name(), status);
    }
    Ok(status.code().unwrap_or(1))
}

/// Initialize tracing subscriber
///
/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}
