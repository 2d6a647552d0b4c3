//! ---
//! opt_section: "02-synthetic-data"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Randomized telemetry sampling with fault injection."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use chrono::Utc;
use rand::prelude::*;

use c_opt_common::config::{FaultKind, SimulationConfig};
use c_opt_common::time::clock_label;

use crate::sample::{FuelShare, TelemetrySample, Trends};

// Uniform bands per field, expressed as (lo, span): draws land in [lo, lo + span).
const MILL_POWER_KW: (f64, f64) = (1200.0, 150.0);
const MILL_THROUGHPUT_TPH: (f64, f64) = (80.0, 10.0);
const SEPARATOR_EFFICIENCY: (f64, f64) = (0.82, 0.08);
const KILN_TEMP_C: (f64, f64) = (1395.0, 30.0);
const COOLER_FAN_RPM: (f64, f64) = (820.0, 60.0);
const RAW_CAO_PCT: (f64, f64) = (61.5, 2.0);
const RAW_SIO2_PCT: (f64, f64) = (20.5, 1.0);
const RAW_AL2O3_PCT: (f64, f64) = (5.2, 0.6);
const RAW_FE2O3_PCT: (f64, f64) = (3.0, 0.4);
const RAW_MOISTURE_PCT: (f64, f64) = (1.8, 0.5);
const CLINKER_TEMP_C: (f64, f64) = (1130.0, 40.0);
const FUEL_COAL_PCT: (f64, f64) = (52.0, 6.0);
const FUEL_BIOMASS_PCT: (f64, f64) = (24.0, 4.0);
const FUEL_PETCOKE_PCT: (f64, f64) = (18.0, 4.0);
const ENERGY_PER_TON_KWH: (f64, f64) = (94.0, 8.0);
const THERMAL_SUBSTITUTION_PCT: (f64, f64) = (24.0, 8.0);

// Symmetric trend ranges, drawn as [-half, half).
const TREND_ENERGY: f64 = 2.1;
const TREND_POWER: f64 = 1.5;
const TREND_KILN_TEMP: f64 = 0.8;
const TREND_THROUGHPUT: f64 = 1.0;
const TREND_THERMAL_SUB: f64 = 0.5;
const TREND_SEPARATOR: f64 = 0.3;

/// Source of synthetic telemetry. Implementations own their randomness so a
/// real ingestion pipeline can replace them behind the same interface.
pub trait TelemetrySampler: Send {
    /// Draw one fresh sample, every field independent of the last.
    fn sample(&mut self) -> TelemetrySample;
    /// Redraw the decorative trend percentages.
    fn trends(&mut self) -> Trends;
}

/// Tick window during which a configured fault skews the sampler output.
#[derive(Debug, Clone, Copy)]
pub struct FaultWindow {
    pub kind: FaultKind,
    pub start_tick: u64,
    pub duration_ticks: u64,
}

impl FaultWindow {
    pub fn from_config(config: &SimulationConfig) -> Option<Self> {
        config.fault.map(|kind| Self {
            kind,
            start_tick: config.fault_start_tick,
            duration_ticks: config.fault_duration_ticks,
        })
    }

    fn contains(&self, tick: u64) -> bool {
        tick >= self.start_tick && tick < self.start_tick + self.duration_ticks
    }
}

/// Additive offsets applied to affected fields while a fault window is active.
#[derive(Debug, Default, Clone, Copy)]
struct FaultOffsets {
    mill_power_kw: f64,
    mill_throughput_tph: f64,
    separator_efficiency: f64,
    kiln_temp_c: f64,
    cooler_fan_rpm: f64,
    raw_cao_pct: f64,
    raw_sio2_pct: f64,
    raw_al2o3_pct: f64,
    raw_moisture_pct: f64,
    clinker_temp_c: f64,
    coal_pct: f64,
    biomass_pct: f64,
}

fn offsets_for(kind: FaultKind) -> FaultOffsets {
    match kind {
        FaultKind::RawVariabilitySpike => FaultOffsets {
            raw_cao_pct: -4.0,
            raw_sio2_pct: 2.0,
            raw_al2o3_pct: 1.0,
            raw_moisture_pct: 0.8,
            ..FaultOffsets::default()
        },
        FaultKind::FuelQualityDrop => FaultOffsets {
            biomass_pct: -10.0,
            coal_pct: 10.0,
            kiln_temp_c: -15.0,
            ..FaultOffsets::default()
        },
        FaultKind::MillVibration => FaultOffsets {
            mill_power_kw: 150.0,
            separator_efficiency: -0.08,
            mill_throughput_tph: -10.0,
            ..FaultOffsets::default()
        },
        FaultKind::CoolerFanFailure => FaultOffsets {
            cooler_fan_rpm: -300.0,
            clinker_temp_c: 80.0,
            kiln_temp_c: 20.0,
            ..FaultOffsets::default()
        },
    }
}

/// Seeded uniform sampler standing in for the plant data pipeline.
#[derive(Debug)]
pub struct RandomTelemetrySampler {
    rng: StdRng,
    fault: Option<FaultWindow>,
    tick: u64,
}

impl RandomTelemetrySampler {
    pub fn new(seed: u64, fault: Option<FaultWindow>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            fault,
            tick: 0,
        }
    }

    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.random_seed, FaultWindow::from_config(config))
    }

    fn band(&mut self, (lo, span): (f64, f64)) -> f64 {
        self.rng.gen_range(lo..lo + span)
    }

    fn spread(&mut self, half: f64) -> f64 {
        self.rng.gen_range(-half..half)
    }
}

impl TelemetrySampler for RandomTelemetrySampler {
    fn sample(&mut self) -> TelemetrySample {
        let offsets = self
            .fault
            .filter(|window| window.contains(self.tick))
            .map(|window| offsets_for(window.kind))
            .unwrap_or_default();
        self.tick += 1;

        let timestamp = Utc::now();
        let fuel_mix = vec![
            FuelShare::new("coal", self.band(FUEL_COAL_PCT) + offsets.coal_pct),
            FuelShare::new("biomass", self.band(FUEL_BIOMASS_PCT) + offsets.biomass_pct),
            FuelShare::new("petcoke", self.band(FUEL_PETCOKE_PCT)),
        ];

        TelemetrySample {
            timestamp,
            mill_power_kw: self.band(MILL_POWER_KW) + offsets.mill_power_kw,
            mill_throughput_tph: self.band(MILL_THROUGHPUT_TPH) + offsets.mill_throughput_tph,
            separator_efficiency: self.band(SEPARATOR_EFFICIENCY) + offsets.separator_efficiency,
            kiln_temp_c: self.band(KILN_TEMP_C) + offsets.kiln_temp_c,
            cooler_fan_rpm: self.band(COOLER_FAN_RPM) + offsets.cooler_fan_rpm,
            raw_cao_pct: self.band(RAW_CAO_PCT) + offsets.raw_cao_pct,
            raw_sio2_pct: self.band(RAW_SIO2_PCT) + offsets.raw_sio2_pct,
            raw_al2o3_pct: self.band(RAW_AL2O3_PCT) + offsets.raw_al2o3_pct,
            raw_fe2o3_pct: self.band(RAW_FE2O3_PCT),
            raw_moisture_pct: self.band(RAW_MOISTURE_PCT) + offsets.raw_moisture_pct,
            clinker_temp_c: self.band(CLINKER_TEMP_C) + offsets.clinker_temp_c,
            fuel_mix,
            energy_per_ton_kwh: self.band(ENERGY_PER_TON_KWH),
            thermal_substitution_pct: self.band(THERMAL_SUBSTITUTION_PCT),
            time_label: clock_label(timestamp),
        }
    }

    fn trends(&mut self) -> Trends {
        Trends {
            energy: self.spread(TREND_ENERGY),
            power: self.spread(TREND_POWER),
            kiln_temp: self.spread(TREND_KILN_TEMP),
            throughput: self.spread(TREND_THROUGHPUT),
            thermal_sub: self.spread(TREND_THERMAL_SUB),
            separator: self.spread(TREND_SEPARATOR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_band(value: f64, (lo, span): (f64, f64)) -> bool {
        value >= lo && value < lo + span
    }

    #[test]
    fn samples_stay_within_bands() {
        let mut sampler = RandomTelemetrySampler::new(42, None);
        for _ in 0..200 {
            let sample = sampler.sample();
            assert!(in_band(sample.mill_power_kw, MILL_POWER_KW));
            assert!(in_band(sample.mill_throughput_tph, MILL_THROUGHPUT_TPH));
            assert!(in_band(sample.separator_efficiency, SEPARATOR_EFFICIENCY));
            assert!(in_band(sample.kiln_temp_c, KILN_TEMP_C));
            assert!(in_band(sample.cooler_fan_rpm, COOLER_FAN_RPM));
            assert!(in_band(sample.raw_cao_pct, RAW_CAO_PCT));
            assert!(in_band(sample.raw_moisture_pct, RAW_MOISTURE_PCT));
            assert!(in_band(sample.clinker_temp_c, CLINKER_TEMP_C));
            assert!(in_band(sample.energy_per_ton_kwh, ENERGY_PER_TON_KWH));
            assert!(in_band(
                sample.thermal_substitution_pct,
                THERMAL_SUBSTITUTION_PCT
            ));
        }
    }

    #[test]
    fn fuel_mix_keeps_fixed_order() {
        let mut sampler = RandomTelemetrySampler::new(7, None);
        let sample = sampler.sample();
        let fuels: Vec<&str> = sample.fuel_mix.iter().map(|s| s.fuel.as_str()).collect();
        assert_eq!(fuels, ["coal", "biomass", "petcoke"]);
    }

    #[test]
    fn trends_stay_within_symmetric_ranges() {
        let mut sampler = RandomTelemetrySampler::new(42, None);
        for _ in 0..200 {
            let trends = sampler.trends();
            assert!(trends.energy.abs() <= TREND_ENERGY);
            assert!(trends.power.abs() <= TREND_POWER);
            assert!(trends.kiln_temp.abs() <= TREND_KILN_TEMP);
            assert!(trends.throughput.abs() <= TREND_THROUGHPUT);
            assert!(trends.thermal_sub.abs() <= TREND_THERMAL_SUB);
            assert!(trends.separator.abs() <= TREND_SEPARATOR);
        }
    }

    #[test]
    fn fault_offsets_apply_only_inside_window() {
        let window = FaultWindow {
            kind: FaultKind::CoolerFanFailure,
            start_tick: 2,
            duration_ticks: 3,
        };
        let mut sampler = RandomTelemetrySampler::new(9, Some(window));
        for tick in 0..8u64 {
            let sample = sampler.sample();
            if (2..5).contains(&tick) {
                // -300 rpm offset moves the band to [520, 580).
                assert!(
                    sample.cooler_fan_rpm < 600.0,
                    "tick {} expected faulted fan speed, got {}",
                    tick,
                    sample.cooler_fan_rpm
                );
            } else {
                assert!(
                    sample.cooler_fan_rpm >= 820.0,
                    "tick {} expected nominal fan speed, got {}",
                    tick,
                    sample.cooler_fan_rpm
                );
            }
        }
    }

    #[test]
    fn fault_window_from_config_requires_fault() {
        let config = SimulationConfig::default();
        assert!(FaultWindow::from_config(&config).is_none());

        let config = SimulationConfig {
            fault: Some(FaultKind::MillVibration),
            fault_start_tick: 4,
            fault_duration_ticks: 2,
            ..SimulationConfig::default()
        };
        let window = FaultWindow::from_config(&config).unwrap();
        assert!(!window.contains(3));
        assert!(window.contains(4));
        assert!(window.contains(5));
        assert!(!window.contains(6));
    }

    #[test]
    fn seeded_samplers_are_reproducible() {
        let mut a = RandomTelemetrySampler::new(1234, None);
        let mut b = RandomTelemetrySampler::new(1234, None);
        let sample_a = a.sample();
        let sample_b = b.sample();
        assert_eq!(sample_a.mill_power_kw, sample_b.mill_power_kw);
        assert_eq!(sample_a.kiln_temp_c, sample_b.kiln_temp_c);
        assert_eq!(sample_a.energy_per_ton_kwh, sample_b.energy_per_ton_kwh);
    }
}
