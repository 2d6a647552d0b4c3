//! ---
//! opt_section: "01-core-functionality"
//! opt_subsection: "module"
//! opt_type: "source"
//! opt_scope: "code"
//! opt_description: "Shared primitives and utilities for the simulation core."
//! opt_version: "v0.1.0"
//! opt_owner: "tbd"
//! ---
use chrono::{DateTime, Timelike, Utc};

/// Render the short `HH:MM` clock label shown next to telemetry samples.
pub fn clock_label(timestamp: DateTime<Utc>) -> String {
    format!("{:02}:{:02}", timestamp.hour(), timestamp.minute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn clock_label_pads_single_digits() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 7, 5, 42).unwrap();
        assert_eq!(clock_label(ts), "07:05");
    }

    #[test]
    fn clock_label_keeps_double_digits() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 23, 59, 0).unwrap();
        assert_eq!(clock_label(ts), "23:59");
    }
}
