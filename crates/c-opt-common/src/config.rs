//! ---
//! opt_section: "01-core-functionality"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Shared primitives and utilities for the simulation core."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

fn default_telemetry_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_history_capacity() -> usize {
    20
}

fn default_proposal_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_proposal_capacity() -> usize {
    3
}

fn default_spawn_probability() -> f64 {
    0.3
}

fn default_fault_duration_ticks() -> u64 {
    12
}

fn default_simulation_seed() -> u64 {
    0xC1_17_4Au64
}

fn default_logging_directory() -> PathBuf {
    PathBuf::from("target/logs")
}

fn default_log_format() -> LogFormat {
    LogFormat::StructuredJson
}

/// Primary configuration object for the C-OPT runtime.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub telemetry: TelemetryFeedConfig,
    #[serde(default)]
    pub proposals: ProposalFeedConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    pub source: PathBuf,
}

impl AppConfig {
    pub const ENV_CONFIG_PATH: &str = "C_OPT_CONFIG";

    /// Load configuration from disk, respecting the `C_OPT_CONFIG` override.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self> {
        Ok(Self::load_with_source(candidates)?.config)
    }

    /// Load configuration from disk together with the effective source path.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        if let Ok(env_path) = std::env::var(Self::ENV_CONFIG_PATH) {
            if !env_path.trim().is_empty() {
                let path = PathBuf::from(env_path);
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: path,
                });
            }
        }

        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(path.clone())?;
                return Ok(LoadedAppConfig {
                    config,
                    source: path,
                });
            }
        }

        Err(anyhow!(
            "no configuration files found. inspected: {}",
            candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }

    fn from_path(path: PathBuf) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.telemetry.validate()?;
        self.proposals.validate()?;
        self.simulation.validate()?;
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Telemetry feed cadence and retention settings.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryFeedConfig {
    #[serde(default = "default_telemetry_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub tick_interval: Duration,
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl TelemetryFeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(anyhow!("telemetry tick_interval must be greater than zero"));
        }
        if self.history_capacity == 0 {
            return Err(anyhow!("telemetry history_capacity must be at least 1"));
        }
        Ok(())
    }
}

impl Default for TelemetryFeedConfig {
    fn default() -> Self {
        Self {
            tick_interval: default_telemetry_interval(),
            history_capacity: default_history_capacity(),
        }
    }
}

/// Proposal feed cadence, retention, and spawn behaviour.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalFeedConfig {
    #[serde(default = "default_proposal_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub tick_interval: Duration,
    #[serde(default = "default_proposal_capacity")]
    pub capacity: usize,
    #[serde(default = "default_spawn_probability")]
    pub spawn_probability: f64,
}

impl ProposalFeedConfig {
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(anyhow!("proposal tick_interval must be greater than zero"));
        }
        if self.capacity == 0 {
            return Err(anyhow!("proposal capacity must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(anyhow!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            ));
        }
        Ok(())
    }
}

impl Default for ProposalFeedConfig {
    fn default() -> Self {
        Self {
            tick_interval: default_proposal_interval(),
            capacity: default_proposal_capacity(),
            spawn_probability: default_spawn_probability(),
        }
    }
}

/// Plant fault scenarios supported by the randomized sampler.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FaultKind {
    RawVariabilitySpike,
    FuelQualityDrop,
    MillVibration,
    CoolerFanFailure,
}

impl std::str::FromStr for FaultKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "raw_variability_spike" => Ok(FaultKind::RawVariabilitySpike),
            "fuel_quality_drop" => Ok(FaultKind::FuelQualityDrop),
            "mill_vibration" => Ok(FaultKind::MillVibration),
            "cooler_fan_failure" => Ok(FaultKind::CoolerFanFailure),
            other => Err(format!("unknown fault kind: {}", other)),
        }
    }
}

/// Randomized input configuration shared by both feeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_simulation_seed")]
    pub random_seed: u64,
    #[serde(default)]
    pub fault: Option<FaultKind>,
    #[serde(default)]
    pub fault_start_tick: u64,
    #[serde(default = "default_fault_duration_ticks")]
    pub fault_duration_ticks: u64,
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.fault.is_some() && self.fault_duration_ticks == 0 {
            return Err(anyhow!(
                "fault_duration_ticks must be greater than zero when a fault is configured"
            ));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            random_seed: default_simulation_seed(),
            fault: None,
            fault_start_tick: 0,
            fault_duration_ticks: default_fault_duration_ticks(),
        }
    }
}

/// Log sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_logging_directory(),
            format: default_log_format(),
            file_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_passes_validation() {
        let config = AppConfig::default();
        config.validate().expect("defaults must validate");
        assert_eq!(config.telemetry.tick_interval, Duration::from_secs(5));
        assert_eq!(config.telemetry.history_capacity, 20);
        assert_eq!(config.proposals.tick_interval, Duration::from_secs(30));
        assert_eq!(config.proposals.capacity, 3);
        assert!((config.proposals.spawn_probability - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn parses_overrides_from_toml() {
        let config: AppConfig = r#"
            [telemetry]
            tick_interval = 1
            history_capacity = 5

            [proposals]
            spawn_probability = 1.0

            [simulation]
            random_seed = 7
            fault = "mill_vibration"
            fault_start_tick = 2
            fault_duration_ticks = 4
        "#
        .parse()
        .expect("config parses");
        assert_eq!(config.telemetry.tick_interval, Duration::from_secs(1));
        assert_eq!(config.telemetry.history_capacity, 5);
        assert_eq!(config.simulation.random_seed, 7);
        assert_eq!(config.simulation.fault, Some(FaultKind::MillVibration));
    }

    #[test]
    fn rejects_out_of_range_spawn_probability() {
        let result = r#"
            [proposals]
            spawn_probability = 1.5
        "#
        .parse::<AppConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let result = r#"
            [telemetry]
            tick_interval = 0
        "#
        .parse::<AppConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn fault_kind_accepts_kebab_and_snake_case() {
        assert_eq!(
            "cooler-fan-failure".parse::<FaultKind>().unwrap(),
            FaultKind::CoolerFanFailure
        );
        assert_eq!(
            "raw_variability_spike".parse::<FaultKind>().unwrap(),
            FaultKind::RawVariabilitySpike
        );
        assert!("grinding_gremlins".parse::<FaultKind>().is_err());
    }

    #[test]
    fn load_reads_candidate_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[telemetry]\nhistory_capacity = 8").expect("write config");
        let loaded =
            AppConfig::load_with_source(&[file.path().to_path_buf()]).expect("config loads");
        assert_eq!(loaded.config.telemetry.history_capacity, 8);
        assert_eq!(loaded.source, file.path());
    }

    #[test]
    fn load_fails_when_no_candidate_exists() {
        let result = AppConfig::load(&[PathBuf::from("does/not/exist.toml")]);
        assert!(result.is_err());
    }
}
