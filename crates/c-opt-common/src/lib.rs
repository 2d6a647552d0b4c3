//! ---
//! opt_section: "01-core-functionality"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Shared primitives and utilities for the simulation core."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
//! Shared primitives for the C-OPT workspace.
//! This crate exposes configuration loading, logging initialisation, and
//! clock-label utilities consumed across the workspace.

pub mod config;
pub mod logging;
pub mod time;

pub use config::{
    AppConfig, FaultKind, LoggingConfig, ProposalFeedConfig, SimulationConfig, TelemetryFeedConfig,
};
pub use logging::{init_tracing, LogFormat};
pub use time::clock_label;
