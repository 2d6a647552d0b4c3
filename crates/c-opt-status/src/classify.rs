//! ---
//! opt_section: "04-derived-status"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Threshold classification for dashboard status tags."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use serde::{Deserialize, Serialize};

use c_opt_sim::{RiskLevel, SafetyGateDecision};

// Literal thresholds tied to each metric.
const KILN_TEMP_SUCCESS_MIN_C: f64 = 1350.0;
const KILN_TEMP_SUCCESS_MAX_C: f64 = 1450.0;
const ENERGY_SUCCESS_MAX_KWH_TON: f64 = 95.0;
const THERMAL_SUB_SUCCESS_MIN_PCT: f64 = 30.0;
const SEPARATOR_SUCCESS_MIN: f64 = 0.80;

/// Display-status tag driving card colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Success,
    Warning,
    Destructive,
}

/// `Success` iff the temperature sits within [1350, 1450] inclusive.
pub fn kiln_temp_status(temp_c: f64) -> StatusTag {
    if (KILN_TEMP_SUCCESS_MIN_C..=KILN_TEMP_SUCCESS_MAX_C).contains(&temp_c) {
        StatusTag::Success
    } else {
        StatusTag::Destructive
    }
}

/// `Success` iff specific energy is strictly below 95 kWh/ton.
pub fn energy_status(kwh_per_ton: f64) -> StatusTag {
    if kwh_per_ton < ENERGY_SUCCESS_MAX_KWH_TON {
        StatusTag::Success
    } else {
        StatusTag::Warning
    }
}

/// `Success` iff the thermal substitution rate reaches 30%.
pub fn thermal_substitution_status(pct: f64) -> StatusTag {
    if pct >= THERMAL_SUB_SUCCESS_MIN_PCT {
        StatusTag::Success
    } else {
        StatusTag::Warning
    }
}

/// `Success` iff separator efficiency reaches 0.80.
pub fn separator_status(efficiency: f64) -> StatusTag {
    if efficiency >= SEPARATOR_SUCCESS_MIN {
        StatusTag::Success
    } else {
        StatusTag::Warning
    }
}

/// Risk bucket colouring for proposal cards.
pub fn risk_status(risk: RiskLevel) -> StatusTag {
    match risk {
        RiskLevel::Low => StatusTag::Success,
        RiskLevel::Medium => StatusTag::Warning,
        RiskLevel::High => StatusTag::Destructive,
    }
}

/// Savings render green, any increase renders red.
pub fn energy_delta_status(delta_kwh_ton: f64) -> StatusTag {
    if delta_kwh_ton < 0.0 {
        StatusTag::Success
    } else {
        StatusTag::Destructive
    }
}

/// Safety-gate badge colouring.
pub fn safety_gate_status(decision: SafetyGateDecision) -> StatusTag {
    match decision {
        SafetyGateDecision::Approved => StatusTag::Success,
        SafetyGateDecision::Escalated => StatusTag::Warning,
        SafetyGateDecision::Rejected => StatusTag::Destructive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kiln_temperature_boundaries_are_inclusive() {
        assert_eq!(kiln_temp_status(1400.0), StatusTag::Success);
        assert_eq!(kiln_temp_status(1300.0), StatusTag::Destructive);
        assert_eq!(kiln_temp_status(1350.0), StatusTag::Success);
        assert_eq!(kiln_temp_status(1450.0), StatusTag::Success);
        assert_eq!(kiln_temp_status(1451.0), StatusTag::Destructive);
        assert_eq!(kiln_temp_status(1349.9), StatusTag::Destructive);
    }

    #[test]
    fn energy_threshold_is_strict() {
        assert_eq!(energy_status(94.9), StatusTag::Success);
        assert_eq!(energy_status(95.0), StatusTag::Warning);
        assert_eq!(energy_status(102.0), StatusTag::Warning);
    }

    #[test]
    fn thermal_substitution_threshold_is_inclusive() {
        assert_eq!(thermal_substitution_status(30.0), StatusTag::Success);
        assert_eq!(thermal_substitution_status(29.9), StatusTag::Warning);
    }

    #[test]
    fn separator_threshold_is_inclusive() {
        assert_eq!(separator_status(0.80), StatusTag::Success);
        assert_eq!(separator_status(0.79), StatusTag::Warning);
    }

    #[test]
    fn risk_levels_map_to_three_tags() {
        assert_eq!(risk_status(RiskLevel::Low), StatusTag::Success);
        assert_eq!(risk_status(RiskLevel::Medium), StatusTag::Warning);
        assert_eq!(risk_status(RiskLevel::High), StatusTag::Destructive);
    }

    #[test]
    fn only_negative_energy_deltas_are_savings() {
        assert_eq!(energy_delta_status(-3.8), StatusTag::Success);
        assert_eq!(energy_delta_status(0.0), StatusTag::Destructive);
        assert_eq!(energy_delta_status(1.2), StatusTag::Destructive);
    }

    #[test]
    fn safety_gate_decisions_map_to_three_tags() {
        assert_eq!(
            safety_gate_status(SafetyGateDecision::Approved),
            StatusTag::Success
        );
        assert_eq!(
            safety_gate_status(SafetyGateDecision::Escalated),
            StatusTag::Warning
        );
        assert_eq!(
            safety_gate_status(SafetyGateDecision::Rejected),
            StatusTag::Destructive
        );
    }
}
