//! ---
//! opt_section: "02-synthetic-data"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Telemetry sample and trend data model."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One component of the kiln fuel mix. Shares are drawn independently and
/// only informally sum to ~100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelShare {
    pub fuel: String,
    #[serde(rename = "%")]
    pub pct: f64,
}

impl FuelShare {
    pub fn new(fuel: &str, pct: f64) -> Self {
        Self {
            fuel: fuel.to_owned(),
            pct,
        }
    }
}

/// One synthetic snapshot of plant sensor readings. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySample {
    pub timestamp: DateTime<Utc>,
    pub mill_power_kw: f64,
    pub mill_throughput_tph: f64,
    /// Fraction in 0..1, not a percentage.
    pub separator_efficiency: f64,
    pub kiln_temp_c: f64,
    pub cooler_fan_rpm: f64,
    pub raw_cao_pct: f64,
    pub raw_sio2_pct: f64,
    pub raw_al2o3_pct: f64,
    pub raw_fe2o3_pct: f64,
    pub raw_moisture_pct: f64,
    pub clinker_temp_c: f64,
    pub fuel_mix: Vec<FuelShare>,
    pub energy_per_ton_kwh: f64,
    pub thermal_substitution_pct: f64,
    /// Pre-rendered `HH:MM` label for chart axes.
    pub time_label: String,
}

/// Short-term percentage deltas shown alongside the headline metrics.
///
/// Each field is resampled independently every tick from a fixed symmetric
/// range; none of them is derived from the sample history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    pub energy: f64,
    pub power: f64,
    pub kiln_temp: f64,
    pub throughput: f64,
    pub thermal_sub: f64,
    pub separator: f64,
}
