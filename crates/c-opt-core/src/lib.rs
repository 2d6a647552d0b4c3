//! ---
//! opt_section: "03-feeds"
//! opt_subsection: "01-bootstrap"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Feed runtime module exports."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
//! Periodic publishers for synthetic plant telemetry and optimization
//! proposals.
//!
//! Each feed owns its state, its timer task, and its shutdown channel. The
//! two feeds share nothing; consumers read consistent snapshots through
//! `watch` receivers and only mutate feed state through the explicit
//! approve/reject operations on the proposal feed.

pub mod proposals;
pub mod telemetry;

pub use proposals::ProposalFeed;
pub use telemetry::{TelemetryFeed, TelemetrySnapshot};
