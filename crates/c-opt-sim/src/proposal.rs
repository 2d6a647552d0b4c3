//! ---
//! opt_section: "02-synthetic-data"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Optimization proposal data model and synthetic source."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use chrono::{DateTime, Duration, Utc};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Expected effect of a proposal on clinker quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityImpact {
    Negligible,
    Minor,
    Moderate,
}

/// Risk bucket assigned to a proposal at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Safety-gate label attached at creation time; not computed from any rule
/// engine in this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyGateDecision {
    Approved,
    Rejected,
    Escalated,
}

/// Synthetic AI-style recommendation record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationProposal {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    pub expected_energy_delta_kwh_ton: f64,
    pub expected_quality_impact: QualityImpact,
    pub confidence: f64,
    pub rationale: String,
    pub risk_level: RiskLevel,
    pub safety_gate_decision: SafetyGateDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_rejection_reason: Option<String>,
}

fn mill_power_proposal(id: &str, timestamp: DateTime<Utc>) -> OptimizationProposal {
    OptimizationProposal {
        id: id.to_owned(),
        timestamp,
        action: "Reduce mill power to 1235 kW".to_owned(),
        expected_energy_delta_kwh_ton: -3.8,
        expected_quality_impact: QualityImpact::Negligible,
        confidence: 0.87,
        rationale: "Current separator efficiency is 88%, allowing 50kW reduction without \
                    throughput loss. Raw moisture is low (1.8%), supporting grinding \
                    efficiency. Historical data shows similar conditions resulted in 3.5 \
                    kWh/ton savings with no quality degradation."
            .to_owned(),
        risk_level: RiskLevel::Low,
        safety_gate_decision: SafetyGateDecision::Approved,
        safety_rejection_reason: None,
    }
}

fn biomass_ratio_proposal(id: &str, timestamp: DateTime<Utc>) -> OptimizationProposal {
    OptimizationProposal {
        id: id.to_owned(),
        timestamp,
        action: "Increase biomass fuel ratio to 28%".to_owned(),
        expected_energy_delta_kwh_ton: -1.2,
        expected_quality_impact: QualityImpact::Minor,
        confidence: 0.73,
        rationale: "Kiln temperature is stable at 1418\u{b0}C with margin for alternative \
                    fuel increase. Biomass calorific value is within acceptable range (16.2 \
                    MJ/kg). This change will improve thermal substitution rate while \
                    maintaining clinker quality. Recommended gradual implementation over 2 \
                    hours."
            .to_owned(),
        risk_level: RiskLevel::Medium,
        safety_gate_decision: SafetyGateDecision::Approved,
        safety_rejection_reason: None,
    }
}

/// The two fixed proposals present when a feed starts, newest first.
/// `opt_002` is backdated five minutes to read as an earlier recommendation.
pub fn seed_proposals(now: DateTime<Utc>) -> Vec<OptimizationProposal> {
    vec![
        mill_power_proposal("opt_001", now),
        biomass_ratio_proposal("opt_002", now - Duration::minutes(5)),
    ]
}

/// Source of optimization proposals. The randomized implementation stands in
/// for a future inference pipeline behind the same interface.
pub trait ProposalSource: Send {
    /// Proposals present at feed start, newest first.
    fn seed(&mut self) -> Vec<OptimizationProposal>;
    /// Probabilistically synthesize one new proposal for this tick.
    fn maybe_spawn(&mut self) -> Option<OptimizationProposal>;
}

/// Seeded random source that reuses the two template rationales.
///
/// Spawned ids continue the seed numbering (`opt_003`, `opt_004`, ...) so ids
/// stay unique even when ticks are forced in rapid succession.
#[derive(Debug)]
pub struct RandomProposalSource {
    rng: StdRng,
    spawn_probability: f64,
    next_serial: u64,
}

impl RandomProposalSource {
    pub fn new(seed: u64, spawn_probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spawn_probability,
            next_serial: 3,
        }
    }
}

impl ProposalSource for RandomProposalSource {
    fn seed(&mut self) -> Vec<OptimizationProposal> {
        seed_proposals(Utc::now())
    }

    fn maybe_spawn(&mut self) -> Option<OptimizationProposal> {
        if self.rng.gen::<f64>() >= self.spawn_probability {
            return None;
        }
        let id = format!("opt_{:03}", self.next_serial);
        self.next_serial += 1;
        let now = Utc::now();
        let proposal = if self.rng.gen_bool(0.5) {
            mill_power_proposal(&id, now)
        } else {
            biomass_ratio_proposal(&id, now)
        };
        Some(proposal)
    }
}
