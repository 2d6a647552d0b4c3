//! ---
//! opt_section: "02-synthetic-data"
//! opt_subsection: "01-bootstrap"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Synthetic data module exports and shared types."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
//! Synthetic telemetry and optimization-proposal generators for C-OPT.
//!
//! Everything in this crate is a stand-in for a future ingestion/inference
//! backend. The sampling interfaces ([`TelemetrySampler`], [`ProposalSource`])
//! are the seams where a real source would be plugged in without touching the
//! feed publication contract.

pub mod proposal;
pub mod sample;
pub mod sampler;

pub use proposal::{
    seed_proposals, OptimizationProposal, ProposalSource, QualityImpact, RandomProposalSource,
    RiskLevel, SafetyGateDecision,
};
pub use sample::{FuelShare, TelemetrySample, Trends};
pub use sampler::{FaultWindow, RandomTelemetrySampler, TelemetrySampler};
