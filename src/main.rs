use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{error, info};

use ma_bridge::bootstrap::{
    file_state_store, load_config, resolve_state_dir, tracing::init_tracing_subscriber,
    wire_simulated,
};
use ma_bridge::commands::{device, policy, provisioning, tamper};
use ma_bridge::{AgentRuntime, CommandError};
use ma_core::config::AgentConfig;
use ma_core::lifecycle::DeviceLifecycleEvent;
use ma_core::policy::RestrictionSet;
use ma_core::ports::StateStorePort;
use ma_infra::InMemoryStateStore;
use ma_platform::SimulatedDevice;

const DEVICE_FILE_NAME: &str = "device.json";

#[derive(Parser)]
#[command(name = "mdm-agent")]
#[command(about = "Managed device provisioning and policy agent", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the state directory
    #[arg(long, global = true)]
    state_dir: Option<PathBuf>,

    /// Keep provisioning state and the simulated device in memory only
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the provisioning-complete onboarding sequence
    Provision {
        /// Provisioning extra as key=value (deviceId, customerName, serverUrl)
        #[arg(short, long = "extra", value_parser = parse_extra)]
        extras: Vec<(String, String)>,
    },
    /// Show the persisted provisioning record
    Record,
    /// Deliver a device-administration lifecycle event
    Event {
        #[arg(value_enum)]
        event: LifecycleArg,
    },
    /// Apply a restriction set (JSON); without one the lockdown preset applies
    Enforce {
        #[arg(long, value_parser = parse_restriction_set)]
        set: Option<RestrictionSet>,
    },
    Camera {
        #[arg(value_enum)]
        state: Toggle,
    },
    ScreenCapture {
        #[arg(value_enum)]
        state: Toggle,
    },
    /// Disallow wifi and/or mobile network configuration
    Network {
        #[arg(long)]
        disable_wifi: bool,
        #[arg(long)]
        disable_mobile_data: bool,
    },
    Kiosk {
        #[arg(value_enum)]
        action: KioskAction,
    },
    /// Reconcile with a remotely decided lock state
    LockState {
        #[arg(value_enum)]
        state: LockArg,
    },
    /// Lock the screen now
    Lock,
    /// Audit owner and admin status once
    Tamper,
    /// Run the periodic tamper audit for N checks
    Monitor {
        #[arg(short, long, default_value_t = 3)]
        ticks: usize,
    },
    /// Show admin and owner status
    Status,
    /// Ask for device-administration activation
    RequestAdmin,
    /// Show the carrier name
    Sim,
    /// Factory reset the device
    Wipe,
    /// Give up device ownership
    Release,
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    /// Feature disabled by policy
    Off,
    On,
}

#[derive(Clone, Copy, ValueEnum)]
enum KioskAction {
    Enter,
    Exit,
}

#[derive(Clone, Copy, ValueEnum)]
enum LockArg {
    Locked,
    Unlocked,
}

#[derive(Clone, Copy, ValueEnum)]
enum LifecycleArg {
    AdminEnabled,
    AdminDisabled,
}

fn parse_extra(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{raw}`"))
}

fn parse_restriction_set(raw: &str) -> Result<RestrictionSet, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid restriction set: {e}"))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(error = %format!("{err:#}"), "agent command failed");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => load_config(path.clone())?,
        None => AgentConfig::default(),
    };

    let log_dir = (!config.log_dir.as_os_str().is_empty()).then_some(config.log_dir.as_path());
    init_tracing_subscriber(log_dir)?;

    let (device, state_store, device_path) = if cli.ephemeral {
        let store: Arc<dyn StateStorePort> = Arc::new(InMemoryStateStore::new());
        (SimulatedDevice::managed(), store, None)
    } else {
        let state_dir = resolve_state_dir(&config, cli.state_dir.as_deref())?;
        let device_path = state_dir.join(DEVICE_FILE_NAME);
        let device = SimulatedDevice::load(&device_path).await?;
        (device, file_state_store(&state_dir), Some(device_path))
    };
    info!(ephemeral = cli.ephemeral, "agent starting");

    let wiring = wire_simulated(&config, device, state_store);
    let device = wiring.device;
    let runtime = AgentRuntime::new(wiring.deps, config);

    let result = dispatch(&runtime, cli.command).await;
    runtime.drain_pending_dismissals().await;
    let code = result?;

    if let Some(path) = device_path {
        save_device(&device, &path).await?;
    }
    Ok(code)
}

async fn dispatch(runtime: &AgentRuntime, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Provision { extras } => {
            let extras: HashMap<String, String> = extras.into_iter().collect();
            let extras = (!extras.is_empty()).then_some(extras);
            print_json(&provisioning::on_provisioning_complete(runtime, extras).await)
        }
        Commands::Record => respond(provisioning::get_provisioning_record(runtime).await),
        Commands::Event { event } => {
            let event = match event {
                LifecycleArg::AdminEnabled => DeviceLifecycleEvent::AdminEnabled,
                LifecycleArg::AdminDisabled => DeviceLifecycleEvent::AdminDisabled,
            };
            print_json(&provisioning::on_lifecycle_event(runtime, event).await)
        }
        Commands::Enforce { set } => {
            respond(policy::enforce_device_restrictions(runtime, set).await)
        }
        Commands::Camera { state } => respond(
            policy::set_camera_disabled(runtime, Some(matches!(state, Toggle::Off))).await,
        ),
        Commands::ScreenCapture { state } => respond(
            policy::set_screen_capture_disabled(runtime, Some(matches!(state, Toggle::Off)))
                .await,
        ),
        Commands::Network {
            disable_wifi,
            disable_mobile_data,
        } => respond(
            policy::set_network_restrictions(runtime, Some(disable_wifi), Some(disable_mobile_data))
                .await,
        ),
        Commands::Kiosk { action } => respond(match action {
            KioskAction::Enter => policy::enter_kiosk_mode(runtime).await,
            KioskAction::Exit => policy::exit_kiosk_mode(runtime).await,
        }),
        Commands::LockState { state } => respond(
            policy::apply_lock_state(runtime, matches!(state, LockArg::Locked)).await,
        ),
        Commands::Lock => respond(device::lock_device_now(runtime).await),
        Commands::Tamper => print_json(&tamper::check_tamper_status(runtime).await),
        Commands::Monitor { ticks } => run_monitor(runtime, ticks).await,
        Commands::Status => print_json(&device::get_admin_status(runtime).await),
        Commands::RequestAdmin => respond(device::request_admin_elevation(runtime).await),
        Commands::Sim => respond(device::get_sim_info(runtime).await),
        Commands::Wipe => respond(device::wipe(runtime).await),
        Commands::Release => respond(device::release_ownership(runtime).await),
    }
}

async fn run_monitor(runtime: &AgentRuntime, ticks: usize) -> Result<ExitCode> {
    let monitor = runtime.usecases().start_tamper_monitor();
    let mut verdicts = monitor.subscribe();

    for _ in 0..ticks {
        verdicts
            .changed()
            .await
            .context("tamper monitor stopped unexpectedly")?;
        let verdict = *verdicts.borrow_and_update();
        if let Some(verdict) = verdict {
            print_json(&verdict)?;
        }
    }

    monitor.shutdown().await;
    Ok(ExitCode::SUCCESS)
}

/// Print a command result: the DTO on success, the structured error and a
/// failing exit code otherwise.
fn respond<T: Serialize>(result: Result<T, CommandError>) -> Result<ExitCode> {
    match result {
        Ok(value) => print_json(&value),
        Err(err) => {
            println!("{}", serde_json::to_string_pretty(&err)?);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<ExitCode> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize command output failed")?
    );
    Ok(ExitCode::SUCCESS)
}

async fn save_device(device: &SimulatedDevice, path: &Path) -> Result<()> {
    device
        .save(path)
        .await
        .with_context(|| format!("failed to persist device model to {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extra_splits_on_first_equals() {
        assert_eq!(
            parse_extra("serverUrl=https://mdm.acme.test/?a=b").unwrap(),
            ("serverUrl".to_string(), "https://mdm.acme.test/?a=b".to_string())
        );
        assert!(parse_extra("deviceId").is_err());
    }

    #[test]
    fn test_parse_restriction_set_accepts_partial_json() {
        let set = parse_restriction_set(r#"{"cameraDisabled": true}"#).unwrap();
        assert_eq!(set.camera_disabled, Some(true));
        assert!(set.user_restrictions().is_empty());
    }

    #[test]
    fn test_cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mdm-agent",
            "provision",
            "--extra",
            "deviceId=D100",
            "--ephemeral",
        ])
        .unwrap();

        assert!(cli.ephemeral);
        match cli.command {
            Commands::Provision { extras } => {
                assert_eq!(extras, vec![("deviceId".to_string(), "D100".to_string())]);
            }
            _ => panic!("expected provision"),
        }
    }
}
