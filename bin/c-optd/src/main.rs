//! ---
//! opt_section: "05-daemon"
//! opt_subsection: "binary"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Binary entrypoint for the C-OPT daemon."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};

use c_opt_common::config::{AppConfig, FaultKind};
use c_opt_common::logging::init_tracing;
use c_opt_core::{ProposalFeed, TelemetryFeed};
use c_opt_sim::{RandomProposalSource, RandomTelemetrySampler};
use c_opt_status::{energy_status, format_metric, format_trend_pct, kiln_temp_status};

const DEFAULT_CONFIG_CANDIDATES: [&str; 2] = ["c-opt.toml", "configs/c-opt.toml"];

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "C-OPT simulation daemon",
    long_about = None
)]
struct Cli {
    #[arg(long, value_name = "FILE", help = "Path to configuration file")]
    config: Option<PathBuf>,

    #[arg(long, help = "Override the simulation random seed")]
    seed: Option<u64>,

    #[arg(
        long,
        value_name = "KIND",
        help = "Inject a plant fault (e.g. mill-vibration)"
    )]
    fault: Option<FaultKind>,

    #[arg(
        long,
        value_name = "TICK",
        help = "First sampler tick affected by the fault"
    )]
    fault_start_tick: Option<u64>,

    #[arg(
        long,
        value_name = "TICKS",
        help = "Number of sampler ticks the fault lasts"
    )]
    fault_duration_ticks: Option<u64>,

    #[arg(long, help = "Print the effective configuration and exit")]
    print_config: bool,
}

/// Resolve configuration: explicit `--config`, then the `C_OPT_CONFIG`
/// override or default candidates, finally builtin defaults when nothing is
/// on disk. A present-but-broken file is still an error.
fn load_config(cli: &Cli) -> Result<(AppConfig, String)> {
    if let Some(path) = &cli.config {
        let loaded = AppConfig::load_with_source(std::slice::from_ref(path))?;
        return Ok((loaded.config, loaded.source.display().to_string()));
    }
    let candidates = DEFAULT_CONFIG_CANDIDATES.map(PathBuf::from);
    let env_override = std::env::var(AppConfig::ENV_CONFIG_PATH)
        .map(|v| !v.trim().is_empty())
        .unwrap_or(false);
    if env_override || candidates.iter().any(|p| p.exists()) {
        let loaded = AppConfig::load_with_source(&candidates)?;
        return Ok((loaded.config, loaded.source.display().to_string()));
    }
    Ok((AppConfig::default(), "builtin defaults".to_owned()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut config, config_source) = load_config(&cli)?;
    if let Some(seed) = cli.seed {
        config.simulation.random_seed = seed;
    }
    if let Some(fault) = cli.fault {
        config.simulation.fault = Some(fault);
    }
    if let Some(tick) = cli.fault_start_tick {
        config.simulation.fault_start_tick = tick;
    }
    if let Some(ticks) = cli.fault_duration_ticks {
        config.simulation.fault_duration_ticks = ticks;
    }
    config.validate()?;

    if cli.print_config {
        print!(
            "{}",
            toml::to_string_pretty(&config).context("failed to render configuration")?
        );
        return Ok(());
    }

    init_tracing("c-optd", &config.logging)?;
    info!(
        config_source = %config_source,
        seed = config.simulation.random_seed,
        "c-optd starting"
    );
    if let Some(fault) = config.simulation.fault {
        warn!(
            fault = ?fault,
            start_tick = config.simulation.fault_start_tick,
            duration_ticks = config.simulation.fault_duration_ticks,
            "fault injection enabled"
        );
    }

    let mut telemetry = TelemetryFeed::new(
        config.telemetry.clone(),
        Box::new(RandomTelemetrySampler::from_config(&config.simulation)),
    );
    let mut proposals = ProposalFeed::new(
        config.proposals.clone(),
        Box::new(RandomProposalSource::new(
            config.simulation.random_seed,
            config.proposals.spawn_probability,
        )),
    );

    telemetry.start();
    proposals.start();

    // Mirror watch updates into the log so headless runs stay observable.
    let mut telemetry_rx = telemetry.subscribe();
    let telemetry_log = tokio::spawn(async move {
        while telemetry_rx.changed().await.is_ok() {
            let snapshot = telemetry_rx.borrow_and_update().clone();
            if let (Some(sample), Some(trends)) = (&snapshot.latest, &snapshot.trends) {
                info!(
                    time = %sample.time_label,
                    kiln = %format_metric(sample.kiln_temp_c, 0, "\u{b0}C"),
                    energy = %format_metric(sample.energy_per_ton_kwh, 1, "kWh/ton"),
                    energy_trend = %format_trend_pct(trends.energy),
                    kiln_status = ?kiln_temp_status(sample.kiln_temp_c),
                    energy_status = ?energy_status(sample.energy_per_ton_kwh),
                    history_len = snapshot.history.len(),
                    "telemetry update"
                );
            }
        }
    });
    let mut proposals_rx = proposals.subscribe();
    let proposals_log = tokio::spawn(async move {
        while proposals_rx.changed().await.is_ok() {
            let pending = proposals_rx.borrow_and_update().clone();
            info!(
                pending = pending.len(),
                newest = pending.first().map(|p| p.id.as_str()).unwrap_or("-"),
                "proposal list update"
            );
        }
    });

    signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;
    info!("shutdown signal received");
    telemetry.stop();
    proposals.stop();
    telemetry_log.abort();
    proposals_log.abort();
    info!("c-optd shutdown complete");
    Ok(())
}
