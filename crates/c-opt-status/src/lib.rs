//! ---
//! opt_section: "04-derived-status"
//! opt_subsection: "01-bootstrap"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Derived-status module exports."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
//! Stateless helpers mapping metric values to display-status tags.
//!
//! Classification is a pure function of the latest value against literal
//! thresholds. There is no hysteresis or smoothing; a value on a boundary
//! lands where the threshold comments say it does.

pub mod classify;
pub mod format;

pub use classify::{
    energy_delta_status, energy_status, kiln_temp_status, risk_status, safety_gate_status,
    separator_status, thermal_substitution_status, StatusTag,
};
pub use format::{format_metric, format_trend_pct};
